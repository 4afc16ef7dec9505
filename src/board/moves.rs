/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{CELLS, SIZE};

/// An alias for an [`arrayvec::ArrayVec`] containing at most one move per cell.
pub type MoveList = arrayvec::ArrayVec<Move, CELLS>;

/// The eight directions a capture ray can travel in, as `(dx, dy)` offsets.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A cell on the board, used as the target of a disc placement.
///
/// `x` is the column and `y` is the row, both in `[0, SIZE)`.
/// Internally this is the flat, row-major index `y * SIZE + x`,
/// so ordering moves by value orders them row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(u8);

impl Move {
    /// Creates a new [`Move`] targeting column `x` and row `y`.
    ///
    /// # Panics
    /// If `x` or `y` is out of bounds and debug assertions are enabled.
    #[inline(always)]
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < SIZE && (y as usize) < SIZE);
        Self(y * SIZE as u8 + x)
    }

    /// Creates a new [`Move`] from signed coordinates, returning `None` if they are out of bounds.
    ///
    /// # Example
    /// ```
    /// # use mole::Move;
    /// assert_eq!(Move::try_new(2, 3), Some(Move::new(2, 3)));
    /// assert_eq!(Move::try_new(-1, 3), None);
    /// assert_eq!(Move::try_new(2, 6), None);
    /// ```
    #[inline(always)]
    pub const fn try_new(x: i64, y: i64) -> Option<Self> {
        if x >= 0 && y >= 0 && (x as usize) < SIZE && (y as usize) < SIZE {
            Some(Self::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Creates a new [`Move`] from a flat, row-major index without bounds checking.
    #[inline(always)]
    pub const fn from_index_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < CELLS);
        Self(index)
    }

    /// Column of this move.
    #[inline(always)]
    pub const fn x(&self) -> u8 {
        self.0 % SIZE as u8
    }

    /// Row of this move.
    #[inline(always)]
    pub const fn y(&self) -> u8 {
        self.0 / SIZE as u8
    }

    /// Flat, row-major index of this move.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the cell `(dx, dy)` away from this one, if it is on the board.
    #[inline(always)]
    pub const fn offset(&self, dx: i8, dy: i8) -> Option<Self> {
        Self::try_new(self.x() as i64 + dx as i64, self.y() as i64 + dy as i64)
    }

    /// Iterates every cell on the board in row-major order.
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..CELLS as u8).map(Self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) [{}]", self.x(), self.y(), self.0)
    }
}

/// What a player does on their turn: place a disc, or pass.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Move(Move),
    Pass,
}

impl Action {
    /// Returns the targeted cell, if this action places a disc.
    #[inline(always)]
    pub const fn mv(&self) -> Option<Move> {
        match self {
            Self::Move(mv) => Some(*mv),
            Self::Pass => None,
        }
    }
}

impl From<Option<Move>> for Action {
    /// `None` means there is nothing to play, so the player passes.
    fn from(value: Option<Move>) -> Self {
        value.map(Self::Move).unwrap_or(Self::Pass)
    }
}

impl fmt::Display for Action {
    /// Formats this action as it is sent to the match authority.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(mv) => write!(f, "MOVE {} {}", mv.x(), mv.y()),
            Self::Pass => write!(f, "PASSED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_coordinates() {
        let mv = Move::new(4, 1);
        assert_eq!(mv.x(), 4);
        assert_eq!(mv.y(), 1);
        assert_eq!(mv.index(), SIZE + 4);
        assert_eq!(Move::from_index_unchecked(mv.index() as u8), mv);
    }

    #[test]
    fn test_move_offsets_stay_on_board() {
        let corner = Move::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Move::new(1, 1)));

        let last = SIZE as u8 - 1;
        assert_eq!(Move::new(last, 2).offset(1, 0), None);
    }

    #[test]
    fn test_moves_order_row_major() {
        assert!(Move::new(5, 0) < Move::new(0, 1));
        assert!(Move::new(1, 2) < Move::new(2, 2));
        assert_eq!(Move::iter().len(), CELLS);
    }

    #[test]
    fn test_action_wire_format() {
        assert_eq!(Action::Move(Move::new(2, 3)).to_string(), "MOVE 2 3");
        assert_eq!(Action::Pass.to_string(), "PASSED");
        assert_eq!(Action::from(None), Action::Pass);
    }
}
