/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of playable squares on the board.
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Maximum possible number of moves in a given position.
///
/// Every legal move targets a distinct empty square, so this can never exceed the number of squares.
pub const MAX_NUM_MOVES: usize = NUM_SQUARES;

/// Length of a position encoding: one side-to-move character followed by one character per square.
pub const ENCODING_LEN: usize = NUM_SQUARES + 1;

/// Encoding of the standard starting position.
///
/// White has the move, and owns the `(4,4)` and `(5,5)` squares.
pub const STARTPOS: &str = concat!(
    "W",
    "EEEEEEEE",
    "EEEEEEEE",
    "EEEEEEEE",
    "EEEOXEEE",
    "EEEXOEEE",
    "EEEEEEEE",
    "EEEEEEEE",
    "EEEEEEEE",
);
