/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

use super::{Move, CELLS, SIZE};

/// A [`Bitboard`] represents a set of cells on the board.
///
/// The internal representation is a 64-bit binary number, of which only the low [`CELLS`] bits are used.
/// Bit index `i` corresponds to the cell with flat index `i`, which is `y * SIZE + x`.
/// Iteration therefore visits cells in row-major order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    /// An empty set.
    pub const EMPTY: Self = Self(0);

    /// Every cell on the board.
    pub const FULL: Self = Self(u64::MAX >> (64 - CELLS));

    /// The four corner cells.
    pub const CORNERS: Self = Self(
        1 << 0 | 1 << (SIZE - 1) | 1 << (SIZE * (SIZE - 1)) | 1 << (SIZE * SIZE - 1),
    );

    /// Every cell on the outer ring of the board, corners excluded.
    pub const EDGES: Self = Self(Self::ring() & !Self::CORNERS.0);

    /// Computes the outer ring of the board, corners included.
    const fn ring() -> u64 {
        let mut bits = 0;
        let mut i = 0;
        while i < SIZE {
            bits |= 1 << i; // top row
            bits |= 1 << (SIZE * (SIZE - 1) + i); // bottom row
            bits |= 1 << (SIZE * i); // left column
            bits |= 1 << (SIZE * i + SIZE - 1); // right column
            i += 1;
        }
        bits
    }

    /// Constructs a [`Bitboard`] containing only the cell targeted by `mv`.
    #[inline(always)]
    pub const fn from_move(mv: Move) -> Self {
        Self(1 << mv.index())
    }

    /// Returns `true` if there are no cells in this set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if there is at least one cell in this set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `mv`'s cell is in this set.
    #[inline(always)]
    pub const fn contains(&self, mv: Move) -> bool {
        self.0 & Self::from_move(mv).0 != 0
    }

    /// Adds `mv`'s cell to this set.
    #[inline(always)]
    pub fn set(&mut self, mv: Move) {
        self.0 |= Self::from_move(mv).0;
    }

    /// Removes `mv`'s cell from this set.
    #[inline(always)]
    pub fn clear(&mut self, mv: Move) {
        self.0 &= !Self::from_move(mv).0;
    }

    /// Number of cells in this set.
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Set intersection.
    #[inline(always)]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Set union.
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Removes and returns the lowest-indexed cell, if there is one.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Move> {
        if self.is_empty() {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Move::from_index_unchecked(index))
    }

    /// Iterates the cells of this set in row-major order.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0 & Self::FULL.0)
    }
}

impl From<Move> for Bitboard {
    #[inline(always)]
    fn from(value: Move) -> Self {
        Self::from_move(value)
    }
}

impl FromIterator<Move> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, |mut bb, mv| {
            bb.set(mv);
            bb
        })
    }
}

/// An iterator over the cells of a [`Bitboard`], in row-major order.
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Move;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Move;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Bitboard {
    /// Draws the set as a grid of `X` (member) and `.` (non-member), top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let c = if self.0 & (1 << (y * SIZE + x)) != 0 {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{c}")?;
            }
            if y + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_and_edge_masks() {
        assert_eq!(Bitboard::CORNERS.population(), 4);
        assert_eq!(Bitboard::EDGES.population() as usize, 4 * (SIZE - 2));
        assert!(Bitboard::CORNERS.and(Bitboard::EDGES).is_empty());
        assert!(Bitboard::CORNERS.contains(Move::new(0, 0)));
        assert!(Bitboard::CORNERS.contains(Move::new(SIZE as u8 - 1, SIZE as u8 - 1)));
        assert!(Bitboard::EDGES.contains(Move::new(2, 0)));
        assert!(!Bitboard::EDGES.contains(Move::new(2, 2)));
    }

    #[test]
    fn test_iteration_is_row_major() {
        let bb: Bitboard = [Move::new(1, 3), Move::new(4, 0), Move::new(0, 3)]
            .into_iter()
            .collect();
        let cells = bb.iter().collect::<Vec<_>>();
        assert_eq!(cells, vec![Move::new(4, 0), Move::new(0, 3), Move::new(1, 3)]);
        assert_eq!(bb.iter().len(), 3);
    }

    #[test]
    fn test_not_stays_on_board() {
        assert_eq!(!Bitboard::EMPTY, Bitboard::FULL);
        assert_eq!((!Bitboard::FULL).population(), 0);
    }
}
