/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::HashSet;

use crate::{Bitboard, Board, BoardKey, Color, Move, MoveList};

/// A belief state: every board ("world") still considered possible.
///
/// Worlds are de-duplicated by their canonical encoding and kept in first-insertion order,
/// so iterating an [`InfoSet`] is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoSet {
    worlds: Vec<Board>,
}

impl InfoSet {
    /// Constructs an [`InfoSet`] from `worlds`, dropping duplicates.
    pub fn new(worlds: impl IntoIterator<Item = Board>) -> Self {
        let mut seen = HashSet::<BoardKey>::new();
        let worlds = worlds
            .into_iter()
            .filter(|world| seen.insert(world.key()))
            .collect();

        Self { worlds }
    }

    /// An [`InfoSet`] holding exactly one world.
    #[inline(always)]
    pub fn singleton(world: Board) -> Self {
        Self {
            worlds: vec![world],
        }
    }

    /// The belief at the start of a game: the standard starting position, with certainty.
    #[inline(always)]
    pub fn initial() -> Self {
        Self::singleton(Board::new())
    }

    /// All worlds in this set.
    #[inline(always)]
    pub fn worlds(&self) -> &[Board] {
        &self.worlds
    }

    /// Iterates all worlds in this set.
    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Board> {
        self.worlds.iter()
    }

    /// Number of worlds in this set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Returns `true` if no world is considered possible.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Moves that are legal for `color` in every world, in row-major order.
    ///
    /// Empty if there are no worlds.
    pub fn common_moves(&self, color: Color) -> MoveList {
        let mut worlds = self.iter();
        let Some(first) = worlds.next() else {
            return MoveList::new();
        };

        worlds
            .fold(first.legal_cells(color), |common, world| {
                common.and(world.legal_cells(color))
            })
            .into_iter()
            .collect()
    }

    /// Moves that are legal for `color` in at least one world, in row-major order.
    pub fn union_moves(&self, color: Color) -> MoveList {
        self.iter()
            .fold(Bitboard::EMPTY, |union, world| {
                union.or(world.legal_cells(color))
            })
            .into_iter()
            .collect()
    }

    /// Plays `mv` for `color` in every world where it is legal, discarding the rest.
    pub fn branch(&self, mv: Move, color: Color) -> Self {
        self.iter()
            .filter_map(|world| world.with_move_made(mv, color).ok())
            .map(|(next, _)| next)
            .collect()
    }

    /// Keeps only the worlds satisfying `predicate`.
    pub fn filtered(&self, predicate: impl FnMut(&&Board) -> bool) -> Self {
        Self {
            worlds: self.iter().filter(predicate).copied().collect(),
        }
    }

    /// Returns `true` if `viewer` would see exactly `visible` in every world.
    pub fn is_consistent_with(&self, visible: &Board, viewer: Color) -> bool {
        self.iter()
            .all(|world| world.visible_projection(viewer) == *visible)
    }
}

impl FromIterator<Board> for InfoSet {
    fn from_iter<T: IntoIterator<Item = Board>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a InfoSet {
    type Item = &'a Board;
    type IntoIter = std::slice::Iter<'a, Board>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
