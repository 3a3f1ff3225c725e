/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

/// Represents the color of a player or a disc on the board.
///
/// White is the maximizing side: evaluators score positions so that a higher number is better for White.
/// White moves first in the standard starting position, so [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this [`Color`] is the maximizing side.
    #[inline(always)]
    pub const fn is_maximizing(&self) -> bool {
        matches!(self, Self::White)
    }

    /// The character used for a disc of this color in a position encoding.
    #[inline(always)]
    pub const fn disc_char(&self) -> char {
        match self {
            Self::White => 'O',
            Self::Black => 'X',
        }
    }

    /// Parses a disc of this color from a position encoding's cell character.
    #[inline(always)]
    pub const fn from_disc_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(Self::White),
            'X' => Some(Self::Black),
            _ => None,
        }
    }

    /// The character used in a position encoding to denote that this [`Color`] has the move.
    #[inline(always)]
    pub const fn side_char(&self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    /// Parses the side to move from the first character of a position encoding.
    #[inline(always)]
    pub const fn from_side_char(c: char) -> Option<Self> {
        match c {
            'W' => Some(Self::White),
            'B' => Some(Self::Black),
            _ => None,
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    /// Negating a [`Color`] yields its opponent.
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.disc_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_chars_round_trip() {
        for color in Color::all() {
            assert_eq!(Color::from_disc_char(color.disc_char()), Some(color));
            assert_eq!(Color::from_side_char(color.side_char()), Some(color));
        }

        assert_eq!(Color::from_disc_char('E'), None);
        assert_eq!(Color::from_side_char('O'), None);
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!!Color::Black, Color::Black);
        assert!(Color::White.is_maximizing());
        assert!(!Color::Black.is_maximizing());
    }
}
