/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::NUM_SQUARES;

/// Maximum depth that can be searched.
///
/// Every placement fills a square and a pass can never be followed by another pass,
/// so no game lasts longer than this many plies.
pub const MAX_DEPTH: usize = 2 * NUM_SQUARES;

/// Default depth at which to run the benchmark searches.
pub const BENCH_DEPTH: usize = 6;

/// Positions searched by the `bench` command, from the opening through to the endgame.
pub const BENCHMARK_POSITIONS: [&str; 9] = [
    crate::STARTPOS,
    "WEEEEEEEEEEEEEEEEEEEOEOEEEEXOOEEEEEEOXEEEEEOXXXEEEEXEEEEEEEEEEEEE",
    "WEEEEEEEEEEEEEEEEEEXEOEEEOEXXOXXEEOXXXXEEEEOXXEEEEEEEEXEEEEEEEEXE",
    "WEEEEEEEEEEEEEEEEEOEXEEEEEOOOXOEEOOOOOXEEXOXOXEEEEOOXEEEEEEXXXEEE",
    "WEEEEEEEEEEEOXEOEEOEXXXEEEEXOOEXEEXXOOXXXXXOOOXXEXEEEEXEEEEEEOOOE",
    "WEOEEOXEEEOOXXEXEEEXXOXXOEXXXOOXEXEXXOOXEEEXXOOEEEEEEOOOEEEEOEEOO",
    "WOEOOOOEEEOOOOOEOXXOOXXXXXOOOXOXEXOOXXXEEEEOEOOXEEXXOXEEEEEXEXEEE",
    "WXXXEXOEXXXXEOEXEXXXOXXXEXXOXXXEEXXXOXXEEOOXOXEXEOOOXXXOXOEOOXEEE",
    "WXOEXEXXXXXXXXOOEOXOXOEOEOOXXOOOEOXXOXXOXEXOXOOOOOOOOOOOEOOEXXXXE",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_benchmark_positions_are_playable() {
        for encoding in BENCHMARK_POSITIONS {
            let pos: Position = encoding.parse().unwrap();
            assert!(pos.has_legal_moves(), "{encoding} has nothing to search");
        }
    }
}
