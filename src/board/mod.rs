/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Colors of players and discs.
mod color;

/// Actions a player can take, and lists thereof.
mod moves;

/// Move-generation node counting.
mod perft;

/// Board state, move generation, and move application.
mod position;

/// Squares and directions on the board.
mod square;

/// Board dimensions and well-known encodings.
mod utils;

pub use color::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use square::*;
pub use utils::*;
