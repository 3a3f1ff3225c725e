/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Action, Position};

/// Perform a perft at the specified depth, counting the positions reachable by playing exactly `depth` actions.
///
/// A forced pass counts as an action, and a finished game counts as a single position no matter how much depth remains.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
#[inline(always)]
pub fn perft(position: &Position, depth: usize) -> u64 {
    perft_generic::<true, false>(position, depth)
}

/// Perform a splitperft at the specified depth, printing the number of positions reachable after each root action.
#[inline(always)]
pub fn splitperft(position: &Position, depth: usize) -> u64 {
    perft_generic::<true, true>(position, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(position: &Position, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();

    if moves.is_empty() {
        // Neither side can move, so this line of play has ended early.
        if position.is_game_over() {
            return 1;
        }

        return recurse::<BULK, SPLIT>(position, Action::Pass, depth);
    }

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        nodes + recurse::<BULK, SPLIT>(position, mv, depth)
    })
}

/// Applies `action` and counts the nodes beneath it, printing the count if this is a splitperft.
#[inline(always)]
fn recurse<const BULK: bool, const SPLIT: bool>(
    position: &Position,
    action: Action,
    depth: usize,
) -> u64 {
    let nodes = match position.with_action(action) {
        Ok(next) => perft_generic::<BULK, false>(&next, depth - 1),
        Err(err) => unreachable!("generated action {action} is illegal on {position:?}: {err}"),
    };

    if SPLIT {
        println!("{action}\t{nodes}");
    }

    nodes
}
