/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use super::{Square, SquareParseError, MAX_NUM_MOVES};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] actions.
pub type MoveList = arrayvec::ArrayVec<Action, MAX_NUM_MOVES>;

/// Something the side to move can do on its turn.
///
/// Actions are plain values; they carry no evaluation of their own.
/// When the search needs to report how good an action is, it pairs it with a [`Score`](crate::Score)
/// inside a [`SearchResult`](crate::SearchResult).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    /// Place a disc of the side to move on the given square.
    Place(Square),

    /// Skip the turn. Only legal when no placement is available.
    Pass,
}

impl Action {
    /// Returns `true` if this is a [`Action::Pass`].
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Fetches the target [`Square`] of this action, if it is a placement.
    #[inline(always)]
    pub const fn square(&self) -> Option<Square> {
        match self {
            Self::Place(square) => Some(*square),
            Self::Pass => None,
        }
    }
}

impl From<Square> for Action {
    #[inline(always)]
    fn from(square: Square) -> Self {
        Self::Place(square)
    }
}

impl FromStr for Action {
    type Err = SquareParseError;
    /// Parses an action as either `pass` or a square of the form `(row,col)`.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::{Action, Square};
    /// assert_eq!("pass".parse::<Action>(), Ok(Action::Pass));
    /// assert_eq!("(4,6)".parse::<Action>(), Ok(Action::Place(Square::new(4, 6).unwrap())));
    /// assert!("(0,6)".parse::<Action>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            Ok(Self::Pass)
        } else {
            s.parse().map(Self::Place)
        }
    }
}

impl fmt::Display for Action {
    /// Formats the action the way it is reported to the caller: `(row,col)` or `pass`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place(square) => square.fmt(f),
            Self::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        let sq = Square::new(6, 4).unwrap();
        assert_eq!(Action::Place(sq).to_string(), "(6,4)");
        assert_eq!(Action::Pass.to_string(), "pass");
    }

    #[test]
    fn test_action_parse() {
        let sq = Square::new(1, 8).unwrap();
        assert_eq!("(1,8)".parse::<Action>(), Ok(Action::Place(sq)));
        assert_eq!("PASS".parse::<Action>(), Ok(Action::Pass));
        assert_eq!(" pass\n".parse::<Action>(), Ok(Action::Pass));
        assert!("passes".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_square() {
        let sq = Square::new(5, 3).unwrap();
        assert_eq!(Action::from(sq).square(), Some(sq));
        assert_eq!(Action::Pass.square(), None);
        assert!(Action::Pass.is_pass());
        assert!(!Action::Place(sq).is_pass());
    }
}
