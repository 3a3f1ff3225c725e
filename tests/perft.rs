/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use othello_engine::{perft_generic, Position, STARTPOS};

fn test_perft_position_nodes(depth: usize, encoding: &str, expected: u64) {
    let position: Position = encoding.parse().unwrap();

    let bulk = perft_generic::<true, false>(&position, depth);
    assert_eq!(bulk, expected, "PERFT({depth}) failed on {encoding}");

    // Bulk counting is only a shortcut; it must never change the count.
    let full = perft_generic::<false, false>(&position, depth);
    assert_eq!(full, expected, "PERFT({depth}) without bulk counting failed on {encoding}");
}

#[cfg(test)]
mod startpos_perft {
    use super::*;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_position_nodes(1, STARTPOS, 4);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_position_nodes(2, STARTPOS, 12);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_position_nodes(3, STARTPOS, 56);
    }

    #[test]
    fn test_startpos_perft_4() {
        test_perft_position_nodes(4, STARTPOS, 244);
    }

    #[test]
    fn test_startpos_perft_5() {
        test_perft_position_nodes(5, STARTPOS, 1396);
    }

    #[test]
    fn test_startpos_perft_6() {
        test_perft_position_nodes(6, STARTPOS, 8200);
    }

    #[test]
    fn test_startpos_perft_7() {
        test_perft_position_nodes(7, STARTPOS, 55092);
    }
}

#[cfg(test)]
mod midgame_perft {
    use super::*;

    const MIDGAME: &str = "WEEEEEEEEEEEOXEOEEOEXXXEEEEXOOEXEEXXOOXXXXXOOOXXEXEEEEXEEEEEEOOOE";

    #[test]
    fn test_midgame_perft() {
        test_perft_position_nodes(1, MIDGAME, 12);
        test_perft_position_nodes(2, MIDGAME, 137);
        test_perft_position_nodes(3, MIDGAME, 1664);
        test_perft_position_nodes(4, MIDGAME, 18476);
    }
}

/// Positions close enough to the end that some lines run out of moves.
#[cfg(test)]
mod endgame_perft {
    use super::*;

    #[test]
    fn test_ten_empties_perft() {
        let encoding = "WXOEXEXXXXXXXXOOEOXOXOEOEOOXXOOOEOXXOXXOXEXOXOOOOOOOOOOOEOOEXXXXE";
        test_perft_position_nodes(1, encoding, 4);
        test_perft_position_nodes(2, encoding, 33);
        test_perft_position_nodes(3, encoding, 116);
        test_perft_position_nodes(4, encoding, 754);
        test_perft_position_nodes(5, encoding, 2356);
    }

    #[test]
    fn test_eight_empties_perft() {
        let encoding = "WEOOOOOOOXOEXEEXOXXOXXXXXXOXOXXXXXOXXOXXOXOOOXOEEXXXXXXXXEXOOXXXE";
        test_perft_position_nodes(1, encoding, 6);
        test_perft_position_nodes(2, encoding, 26);
        test_perft_position_nodes(3, encoding, 129);
        test_perft_position_nodes(4, encoding, 357);
        test_perft_position_nodes(5, encoding, 1317);
    }

    #[test]
    fn test_forced_pass_perft() {
        // Black must pass, White takes the last square, and the game is over.
        let encoding = "BEXXOOOOOXXOXOOOXXOXOOOOXOOOXXOXXXOXXXOOXXOOOOXOXXOOOOOOXXXOOOOOX";
        for depth in 1..=5 {
            test_perft_position_nodes(depth, encoding, 1);
        }
    }

    #[test]
    fn test_finished_game_perft() {
        let full = "W".to_string() + &"O".repeat(64);
        test_perft_position_nodes(0, &full, 1);
        test_perft_position_nodes(3, &full, 1);
    }
}
