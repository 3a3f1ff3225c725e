/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and move application.
mod board;

/// Command-line interface parsing.
mod cli;

/// Code related to the engine's functionality, such as command handling.
mod engine;

/// Static evaluation of Othello positions.
mod eval;

/// Numerical evaluations of positions.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Misc utility constants.
mod utils;

pub use board::*;
pub use cli::*;
pub use engine::*;
pub use eval::*;
pub use score::*;
pub use search::*;
pub use utils::*;
