/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use thiserror::Error;

use super::{BOARD_SIZE, NUM_SQUARES};

/// Returned when a row/column pair does not lie on the playable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("({row},{col}) is outside of the {size}x{size} board", size = BOARD_SIZE)]
pub struct OffBoard {
    pub row: usize,
    pub col: usize,
}

/// Errors encountered when parsing a [`Square`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareParseError {
    /// The text was not of the form `(row,col)`.
    #[error("expected a square of the form \"(row,col)\", got {0:?}")]
    Malformed(String),

    /// The coordinates were well-formed but not on the board.
    #[error(transparent)]
    OffBoard(#[from] OffBoard),
}

/// One of the eight compass directions a capturing run can extend in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 8;

    /// All directions, clockwise from [`Direction::North`].
    pub const ALL: [Self; Self::COUNT] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Returns the `(row, col)` step of this direction.
    ///
    /// Rows grow downward, so [`Direction::North`] decrements the row.
    #[inline(always)]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::East => (0, 1),
            Self::SouthEast => (1, 1),
            Self::South => (1, 0),
            Self::SouthWest => (1, -1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Returns the direction pointing the opposite way.
    #[inline(always)]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

/// Represents a single square on the board.
///
/// Rows and columns are 1-indexed, so `(1,1)` is the upper left corner
/// and `(8,8)` is the lower right corner of a standard board.
/// The index of each square is assigned in row-major order:
/// ```text
///      1  2  3  4  5  6  7  8
/// 1|   0  1  2  3  4  5  6  7
/// 2|   8  9 10 11 12 13 14 15
/// 3|  16 17 18 19 20 21 22 23
/// 4|  24 25 26 27 28 29 30 31
/// 5|  32 33 34 35 36 37 38 39
/// 6|  40 41 42 43 44 45 46 47
/// 7|  48 49 50 51 52 53 54 55
/// 8|  56 57 58 59 60 61 62 63
/// ```
///
/// A [`Square`] can only be constructed on the board, so anything holding one never needs to bounds-check it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = NUM_SQUARES;

    /// Creates a new [`Square`] from a 1-indexed `row` and `col`.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::Square;
    /// let sq = Square::new(3, 5).unwrap();
    /// assert_eq!(sq.row(), 3);
    /// assert_eq!(sq.col(), 5);
    ///
    /// assert!(Square::new(0, 1).is_err());
    /// assert!(Square::new(1, 9).is_err());
    /// ```
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Result<Self, OffBoard> {
        if row < 1 || row > BOARD_SIZE || col < 1 || col > BOARD_SIZE {
            return Err(OffBoard { row, col });
        }

        Ok(Self::from_index_unchecked((row - 1) * BOARD_SIZE + (col - 1)))
    }

    /// Creates a new [`Square`] from an index, without checking that it is on the board.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT);
        Self(index as u8)
    }

    /// Returns an iterator over all squares, in row-major order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index_unchecked)
    }

    /// Index of this square into a row-major array of [`Square::COUNT`] elements.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The 1-indexed row of this square.
    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.index() / BOARD_SIZE + 1
    }

    /// The 1-indexed column of this square.
    #[inline(always)]
    pub const fn col(&self) -> usize {
        self.index() % BOARD_SIZE + 1
    }

    /// Steps one square in `direction`, if that square is still on the board.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::{Direction, Square};
    /// let corner = Square::new(1, 1).unwrap();
    /// assert_eq!(corner.offset(Direction::SouthEast), Square::new(2, 2).ok());
    /// assert_eq!(corner.offset(Direction::North), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row() as isize + dr;
        let col = self.col() as isize + dc;

        if row < 1 || col < 1 {
            return None;
        }

        match Self::new(row as usize, col as usize) {
            Ok(square) => Some(square),
            Err(_) => None,
        }
    }

    /// Returns an iterator over all squares reachable from `self` (exclusive) by repeatedly stepping in `direction`.
    #[inline(always)]
    pub fn ray(self, direction: Direction) -> impl Iterator<Item = Self> {
        std::iter::successors(self.offset(direction), move |sq| sq.offset(direction))
    }

    /// Returns an iterator over the (up to eight) squares touching `self`.
    #[inline(always)]
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.offset(dir))
    }
}

impl FromStr for Square {
    type Err = SquareParseError;
    /// Parses a square written as `(row,col)`, as printed by this square's [`fmt::Display`] implementation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SquareParseError::Malformed(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        let (row, col) = inner.split_once(',').ok_or_else(malformed)?;
        let row = row.trim().parse().map_err(|_| malformed())?;
        let col = col.trim().parse().map_err(|_| malformed())?;

        Ok(Self::new(row, col)?)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of [`Square::COUNT`] elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// A [`Square`] can be used to mutably index into an array of [`Square::COUNT`] elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

impl fmt::Debug for Square {
    /// Displays the square's coordinates and its internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}
