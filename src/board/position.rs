/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use thiserror::Error;

use super::{
    Action, Color, Direction, MoveList, Square, BOARD_SIZE, ENCODING_LEN, NUM_SQUARES,
};

/// Returned when an [`Action`] cannot be applied to a [`Position`].
///
/// The search only ever applies actions produced by [`Position::legal_moves`],
/// so seeing this during a search means move generation and move application disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// The target square already holds a disc.
    #[error("cannot place a disc on {square}: it is occupied by {color}")]
    Occupied { square: Square, color: Color },

    /// The target square is empty, but placing there brackets no opponent discs.
    #[error("placing a disc on {square} does not capture any discs")]
    NoCapture { square: Square },

    /// A pass was attempted while placements were available.
    #[error("cannot pass while {available} legal moves are available")]
    UnwarrantedPass { available: usize },
}

/// Errors encountered when decoding a [`Position`] from its textual encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParseError {
    /// The encoding was not exactly [`ENCODING_LEN`] characters long.
    #[error("position encoding must be {expected} characters long, got {0}", expected = ENCODING_LEN)]
    InvalidLength(usize),

    /// The first character was neither `W` nor `B`.
    #[error("invalid side to move {0:?}: expected 'W' or 'B'")]
    InvalidSideToMove(char),

    /// A cell character was not one of `E`, `O`, or `X`.
    #[error("invalid cell {found:?} at {square}: expected 'E', 'O', or 'X'")]
    InvalidCell { square: Square, found: char },
}

/// Represents the state of an Othello board: the contents of every square and whose turn it is.
///
/// A [`Position`] is a small, [`Copy`] value.
/// Applying an action never modifies a position; it produces a new one via [`Position::with_action`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Contents of every square, in row-major order.
    cells: [Option<Color>; NUM_SQUARES],

    /// The player who makes the next action.
    side_to_move: Color,
}

impl Position {
    /// Creates the standard starting position.
    ///
    /// The four center squares are occupied, with White on the `(4,4)`-`(5,5)` diagonal, and White to move.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::{Position, STARTPOS};
    /// let pos = Position::new();
    /// assert_eq!(pos.to_encoding(), STARTPOS);
    /// assert_eq!(pos.legal_moves().len(), 4);
    /// ```
    pub fn new() -> Self {
        let mid = BOARD_SIZE / 2;
        let at = |row: usize, col: usize| (row - 1) * BOARD_SIZE + (col - 1);

        let mut cells = [None; NUM_SQUARES];
        cells[at(mid, mid)] = Some(Color::White);
        cells[at(mid + 1, mid + 1)] = Some(Color::White);
        cells[at(mid, mid + 1)] = Some(Color::Black);
        cells[at(mid + 1, mid)] = Some(Color::Black);

        Self::from_parts(cells, Color::White)
    }

    /// Creates a position from the contents of every square (in row-major order) and the side to move.
    #[inline(always)]
    pub const fn from_parts(cells: [Option<Color>; NUM_SQUARES], side_to_move: Color) -> Self {
        Self {
            cells,
            side_to_move,
        }
    }

    /// Decodes a position from its textual encoding.
    ///
    /// The encoding is [`ENCODING_LEN`] characters long.
    /// The first is `W` or `B`, denoting the side to move.
    /// The remaining characters describe every square in row-major order:
    /// `E` for empty, `O` for a White disc, and `X` for a Black disc.
    ///
    /// Anything else is rejected rather than guessed at.
    pub fn from_encoding(encoding: &str) -> Result<Self, PositionParseError> {
        let len = encoding.chars().count();
        if len != ENCODING_LEN {
            return Err(PositionParseError::InvalidLength(len));
        }

        let mut chars = encoding.chars();

        // Length was checked above, so there is always a first character.
        let side = chars.next().unwrap_or_default();
        let side_to_move =
            Color::from_side_char(side).ok_or(PositionParseError::InvalidSideToMove(side))?;

        let mut cells = [None; NUM_SQUARES];
        for (square, c) in Square::iter().zip(chars) {
            cells[square] = match c {
                'E' => None,
                _ => Some(
                    Color::from_disc_char(c)
                        .ok_or(PositionParseError::InvalidCell { square, found: c })?,
                ),
            };
        }

        Ok(Self::from_parts(cells, side_to_move))
    }

    /// Encodes this position in the same format accepted by [`Position::from_encoding`].
    pub fn to_encoding(&self) -> String {
        let mut encoding = String::with_capacity(ENCODING_LEN);
        encoding.push(self.side_to_move.side_char());

        for cell in self.cells {
            encoding.push(cell.map(|color| color.disc_char()).unwrap_or('E'));
        }

        encoding
    }

    /// The player who makes the next action.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Fetches the color of the disc on `square`, if there is one.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Color> {
        self.cells[square]
    }

    /// Returns an iterator over every square and its contents, in row-major order.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Color>)> + '_ {
        Square::iter().map(|square| (square, self.cells[square]))
    }

    /// Counts the discs of `color` on the board.
    #[inline(always)]
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(color)).count()
    }

    /// Counts the empty squares on the board.
    #[inline(always)]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Counts how many opponent discs the side to move would flip along `direction` by placing a disc on `square`.
    ///
    /// A run is only captured if it consists solely of opponent discs and is terminated by a disc of the side to move.
    /// An empty square or the edge of the board before that terminating disc means nothing is captured, and this returns `0`.
    ///
    /// This single predicate decides both whether a placement is legal and which discs it flips,
    /// so the two can never disagree.
    pub fn captures(&self, square: Square, direction: Direction) -> usize {
        let mover = self.side_to_move;
        let mut run = 0;

        for sq in square.ray(direction) {
            match self.cells[sq] {
                Some(color) if color == mover => return run,
                Some(_) => run += 1,
                None => return 0,
            }
        }

        // Ran off the board before finding a friendly disc
        0
    }

    /// Returns `true` if any square touching `square` holds a disc.
    #[inline(always)]
    fn has_neighbor(&self, square: Square) -> bool {
        square.neighbors().any(|sq| self.cells[sq].is_some())
    }

    /// Returns `true` if the side to move may place a disc on `square`.
    #[inline(always)]
    fn is_legal_placement(&self, square: Square) -> bool {
        self.cells[square].is_none()
            && self.has_neighbor(square)
            && Direction::ALL
                .into_iter()
                .any(|dir| self.captures(square, dir) > 0)
    }

    /// Generates all legal placements for the side to move, in row-major order.
    ///
    /// If this is empty, the side to move must pass.
    /// [`Action::Pass`] is never part of the returned list.
    pub fn legal_moves(&self) -> MoveList {
        Square::iter()
            .filter(|&square| self.is_legal_placement(square))
            .map(Action::Place)
            .collect()
    }

    /// Returns `true` if the side to move has at least one legal placement.
    #[inline(always)]
    pub fn has_legal_moves(&self) -> bool {
        Square::iter().any(|square| self.is_legal_placement(square))
    }

    /// Counts the legal placements `color` would have if it were their turn.
    #[inline(always)]
    pub fn mobility(&self, color: Color) -> usize {
        let pos = Self::from_parts(self.cells, color);
        Square::iter()
            .filter(|&square| pos.is_legal_placement(square))
            .count()
    }

    /// Returns `true` if `action` may be applied to this position.
    #[inline(always)]
    pub fn is_legal(&self, action: Action) -> bool {
        match action {
            Action::Place(square) => self.is_legal_placement(square),
            Action::Pass => !self.has_legal_moves(),
        }
    }

    /// Returns `true` if neither player can place a disc, meaning the game is over.
    #[inline(always)]
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves() && !self.with_side_flipped().has_legal_moves()
    }

    /// Copies this position, handing the move to the other player without changing any squares.
    #[inline(always)]
    fn with_side_flipped(&self) -> Self {
        Self::from_parts(self.cells, self.side_to_move.opponent())
    }

    /// Applies `action`, returning the resulting position.
    ///
    /// A placement puts a disc of the side to move on the target square,
    /// flips every bracketed run of opponent discs in all eight directions, and hands the move to the opponent.
    /// A pass only hands the move to the opponent.
    ///
    /// `self` is never modified.
    ///
    /// # Example
    /// ```
    /// # use othello_engine::{Action, Color, Position, Square};
    /// let pos = Position::new();
    /// let target = Square::new(3, 5).unwrap();
    /// let next = pos.with_action(Action::Place(target)).unwrap();
    ///
    /// assert_eq!(next.piece_at(target), Some(Color::White));
    /// assert_eq!(next.piece_at(Square::new(4, 5).unwrap()), Some(Color::White));
    /// assert_eq!(next.side_to_move(), Color::Black);
    ///
    /// // Passing is not allowed while there are moves to make
    /// assert!(pos.with_action(Action::Pass).is_err());
    /// ```
    pub fn with_action(&self, action: Action) -> Result<Self, IllegalMove> {
        let square = match action {
            Action::Place(square) => square,

            Action::Pass => {
                let available = self.legal_moves().len();
                if available > 0 {
                    return Err(IllegalMove::UnwarrantedPass { available });
                }

                return Ok(self.with_side_flipped());
            }
        };

        if let Some(color) = self.cells[square] {
            return Err(IllegalMove::Occupied { square, color });
        }

        let mover = self.side_to_move;
        let mut next = self.with_side_flipped();
        let mut flipped = 0;

        for dir in Direction::ALL {
            let run = self.captures(square, dir);

            for sq in square.ray(dir).take(run) {
                next.cells[sq] = Some(mover);
            }

            flipped += run;
        }

        if flipped == 0 {
            return Err(IllegalMove::NoCapture { square });
        }

        next.cells[square] = Some(mover);

        Ok(next)
    }
}

impl Default for Position {
    /// The default position is the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Position {
    type Err = PositionParseError;
    /// Wrapper for [`Position::from_encoding`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoding(s)
    }
}

impl fmt::Display for Position {
    /// Draws the board as a grid, with `O` for White, `X` for Black, and `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, " {col}")?;
        }
        writeln!(f)?;

        for (i, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            write!(f, "{:>2} ", i + 1)?;

            for cell in row {
                let c = cell.map(|color| color.disc_char()).unwrap_or('.');
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Side to move: {} ({})",
            self.side_to_move,
            self.side_to_move.disc_char()
        )?;
        writeln!(
            f,
            "Discs: {} White, {} Black",
            self.count(Color::White),
            self.count(Color::Black)
        )?;
        write!(f, "Encoding: {}", self.to_encoding())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_encoding())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STARTPOS;

    /// Builds a position from lists of `(row, col)` coordinates for each color.
    fn build(side_to_move: Color, white: &[(usize, usize)], black: &[(usize, usize)]) -> Position {
        let mut cells = [None; NUM_SQUARES];
        for &(row, col) in white {
            cells[Square::new(row, col).unwrap()] = Some(Color::White);
        }
        for &(row, col) in black {
            cells[Square::new(row, col).unwrap()] = Some(Color::Black);
        }
        Position::from_parts(cells, side_to_move)
    }

    fn place(row: usize, col: usize) -> Action {
        Action::Place(Square::new(row, col).unwrap())
    }

    #[test]
    fn test_startpos_legal_moves() {
        let pos = Position::new();
        let moves = pos.legal_moves();

        assert_eq!(
            moves.as_slice(),
            &[place(3, 5), place(4, 6), place(5, 3), place(6, 4)]
        );
        assert!(pos.has_legal_moves());
        assert!(!pos.is_game_over());
        assert_eq!(pos.mobility(Color::White), 4);
        assert_eq!(pos.mobility(Color::Black), 4);
    }

    #[test]
    fn test_startpos_encoding() {
        let pos: Position = STARTPOS.parse().unwrap();
        assert_eq!(pos, Position::new());
        assert_eq!(pos, Position::default());
        assert_eq!(pos.count(Color::White), 2);
        assert_eq!(pos.count(Color::Black), 2);
        assert_eq!(pos.empty_count(), NUM_SQUARES - 4);
    }

    #[test]
    fn test_encoding_round_trip() {
        let encoding = "BEEEEEEEEEEEEEEEEEEEXEEEEEEEXXXEEEEEXOXXEEEEEEEEEEEEEEEEEEEEEEEEE";
        let pos = Position::from_encoding(encoding).unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.to_encoding(), encoding);
    }

    #[test]
    fn test_encoding_errors() {
        assert_eq!(
            Position::from_encoding(&STARTPOS[1..]),
            Err(PositionParseError::InvalidLength(ENCODING_LEN - 1))
        );

        let bad_side = format!("O{}", &STARTPOS[1..]);
        assert_eq!(
            Position::from_encoding(&bad_side),
            Err(PositionParseError::InvalidSideToMove('O'))
        );

        let bad_cell = format!("{}Z", &STARTPOS[..ENCODING_LEN - 1]);
        assert_eq!(
            Position::from_encoding(&bad_cell),
            Err(PositionParseError::InvalidCell {
                square: Square::new(BOARD_SIZE, BOARD_SIZE).unwrap(),
                found: 'Z'
            })
        );
    }

    #[test]
    fn test_captures_single_run() {
        let pos = Position::new();
        let target = Square::new(3, 5).unwrap();

        assert_eq!(pos.captures(target, Direction::South), 1);
        for dir in Direction::ALL {
            if dir != Direction::South {
                assert_eq!(pos.captures(target, dir), 0, "{dir:?}");
            }
        }
    }

    #[test]
    fn test_apply_startpos_move() {
        let pos = Position::new();
        let next = pos.with_action(place(3, 5)).unwrap();

        assert_eq!(
            next.to_encoding(),
            "BEEEEEEEEEEEEEEEEEEEEOEEEEEEOOEEEEEEXOEEEEEEEEEEEEEEEEEEEEEEEEEEE"
        );
        assert_eq!(next.count(Color::White), 4);
        assert_eq!(next.count(Color::Black), 1);

        // The original position is untouched
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_apply_flips_every_bracketed_direction() {
        let pos = build(
            Color::White,
            &[(4, 7), (2, 4), (6, 6)],
            &[(4, 5), (4, 6), (3, 4), (5, 5), (5, 3)],
        );
        let target = Square::new(4, 4).unwrap();

        assert_eq!(pos.captures(target, Direction::East), 2);
        assert_eq!(pos.captures(target, Direction::North), 1);
        assert_eq!(pos.captures(target, Direction::SouthEast), 1);
        // Nothing beyond (5,3) but an empty square
        assert_eq!(pos.captures(target, Direction::SouthWest), 0);

        let next = pos.with_action(Action::Place(target)).unwrap();
        let expected = build(
            Color::Black,
            &[(4, 4), (4, 5), (4, 6), (4, 7), (3, 4), (2, 4), (5, 5), (6, 6)],
            &[(5, 3)],
        );
        assert_eq!(next, expected);
    }

    #[test]
    fn test_run_ending_at_edge_is_not_captured() {
        // The Black run along the top row reaches the edge without a White disc to close it
        let top_row: Vec<_> = (2..=BOARD_SIZE).map(|col| (1, col)).collect();
        let pos = build(Color::White, &[(BOARD_SIZE, BOARD_SIZE)], &top_row);
        let target = Square::new(1, 1).unwrap();

        assert_eq!(pos.captures(target, Direction::East), 0);
        assert!(!pos.is_legal(Action::Place(target)));
    }

    #[test]
    fn test_illegal_moves() {
        let pos = Position::new();

        let occupied = Square::new(4, 4).unwrap();
        assert_eq!(
            pos.with_action(Action::Place(occupied)),
            Err(IllegalMove::Occupied {
                square: occupied,
                color: Color::White
            })
        );

        let corner = Square::new(1, 1).unwrap();
        assert_eq!(
            pos.with_action(Action::Place(corner)),
            Err(IllegalMove::NoCapture { square: corner })
        );

        assert_eq!(
            pos.with_action(Action::Pass),
            Err(IllegalMove::UnwarrantedPass { available: 4 })
        );
    }

    #[test]
    fn test_forced_pass() {
        // White cannot bracket the lone Black disc in the corner, but Black can capture at (1,3)
        let pos = build(Color::White, &[(1, 2)], &[(1, 1)]);

        assert!(pos.legal_moves().is_empty());
        assert!(pos.is_legal(Action::Pass));
        assert!(!pos.is_game_over());

        let next = pos.with_action(Action::Pass).unwrap();
        assert_eq!(next.side_to_move(), Color::Black);
        assert!(next.iter().all(|(sq, cell)| pos.piece_at(sq) == cell));
        assert_eq!(next.legal_moves().as_slice(), &[place(1, 3)]);
    }

    #[test]
    fn test_game_over() {
        let only_black = build(Color::White, &[], &[(4, 4), (4, 5)]);
        assert!(only_black.is_game_over());

        // A completely filled board is always over
        let full = Position::from_parts([Some(Color::Black); NUM_SQUARES], Color::Black);
        assert!(full.is_game_over());
        assert!(full.legal_moves().is_empty());
        assert_eq!(full.empty_count(), 0);
    }

    #[test]
    fn test_generated_moves_always_apply() {
        // Walk every line of play a few plies deep from the start
        fn walk(pos: Position, depth: usize) {
            let moves = pos.legal_moves();
            assert_eq!(pos.is_legal(Action::Pass), moves.is_empty());

            if depth == 0 {
                return;
            }

            for mv in moves {
                assert!(pos.is_legal(mv));
                let next = pos
                    .with_action(mv)
                    .unwrap_or_else(|e| panic!("{mv} on {pos:?}: {e}"));

                // One disc placed, at least one flipped
                let mover = pos.side_to_move();
                assert_eq!(next.side_to_move(), mover.opponent());
                assert_eq!(next.empty_count(), pos.empty_count() - 1);
                assert!(next.count(mover) >= pos.count(mover) + 2);

                walk(next, depth - 1);
            }
        }

        walk(Position::new(), 4);
    }

    #[test]
    fn test_display_contains_encoding() {
        let pos = Position::new();
        let shown = pos.to_string();

        assert!(shown.contains(STARTPOS));
        assert!(shown.contains("Side to move: White (O)"));
        assert!(shown.lines().nth(4).unwrap().contains(". O X ."));
    }
}
