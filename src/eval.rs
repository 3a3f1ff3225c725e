/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Position, Score};

/// Encapsulates the logic of statically scoring a position.
///
/// A high score is good for White and a low score is good for Black, regardless of whose turn it is.
/// Implementations must be deterministic and free of side effects,
/// and must accept every reachable position, including finished games.
///
/// Any closure `Fn(&Position) -> i32` is also an [`Evaluator`]:
/// ```
/// # use othello_engine::{Color, Evaluator, Position, Score};
/// let white_discs = |pos: &Position| pos.count(Color::White) as i32;
/// assert_eq!(white_discs.evaluate(&Position::new()), Score(2));
/// ```
pub trait Evaluator {
    /// Scores `position` from White's perspective.
    fn evaluate(&self, position: &Position) -> Score;

    /// A short name used when reporting which evaluator a search used.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32,
{
    #[inline(always)]
    fn evaluate(&self, position: &Position) -> Score {
        Score::new(self(position))
    }
}

/// Scores a position by its disc difference: White's discs minus Black's discs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingEvaluator;

impl Evaluator for CountingEvaluator {
    #[inline(always)]
    fn evaluate(&self, position: &Position) -> Score {
        disc_difference(position)
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Scores a position by how many more legal moves White has than Black.
///
/// Once the game is over, mobility is meaningless, so the disc difference is used instead,
/// scaled by [`MobilityEvaluator::GAME_OVER_SCALE`] so that a won game always outweighs any mobility advantage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityEvaluator;

impl MobilityEvaluator {
    /// Multiplier applied to the final disc difference of a finished game.
    pub const GAME_OVER_SCALE: i32 = 100;
}

impl Evaluator for MobilityEvaluator {
    fn evaluate(&self, position: &Position) -> Score {
        let white = position.mobility(Color::White) as i32;
        let black = position.mobility(Color::Black) as i32;

        if white == 0 && black == 0 {
            disc_difference(position) * Self::GAME_OVER_SCALE
        } else {
            Score::new(white - black)
        }
    }

    fn name(&self) -> &str {
        "mobility"
    }
}

/// Number of White discs minus the number of Black discs.
#[inline(always)]
fn disc_difference(position: &Position) -> Score {
    Score::new(position.count(Color::White) as i32 - position.count(Color::Black) as i32)
}
