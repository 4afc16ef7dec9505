/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Bitboard, Color, Move, MoveList, CELLS, DIRECTIONS, SIZE};
use crate::IllegalMove;

/// Contents of a single cell: empty, or a disc owned by a player.
pub type Cell = Option<Color>;

/// Character used on the wire for a cell that is empty, or not visible to the viewer.
pub const EMPTY_CHAR: char = '.';

/// A full-information Othello board.
///
/// Discs are stored as one [`Bitboard`] per player, so a [`Board`] is a small `Copy` value.
/// Discs are only ever placed or flipped, never removed, so the number of occupied cells never decreases.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    discs: [Bitboard; Color::COUNT],
}

impl Board {
    /// A board with no discs on it.
    pub const EMPTY: Self = Self {
        discs: [Bitboard::EMPTY; Color::COUNT],
    };

    /// Constructs the standard starting position.
    ///
    /// The central 2x2 block holds player `1` on its main diagonal and player `0` on the other.
    pub fn new() -> Self {
        let mid = (SIZE / 2) as u8;
        let mut board = Self::EMPTY;
        board.set(Move::new(mid - 1, mid - 1), Some(Color::One));
        board.set(Move::new(mid, mid), Some(Color::One));
        board.set(Move::new(mid, mid - 1), Some(Color::Zero));
        board.set(Move::new(mid - 1, mid), Some(Color::Zero));
        board
    }

    /// All cells occupied by `owner`.
    #[inline(always)]
    pub const fn discs(&self, owner: Color) -> Bitboard {
        self.discs[owner.index()]
    }

    /// All occupied cells.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.discs[0].or(self.discs[1])
    }

    /// All empty cells.
    #[inline(always)]
    pub fn empty_cells(&self) -> Bitboard {
        !self.occupied()
    }

    /// Fetches the contents of the cell at `mv`.
    #[inline(always)]
    pub const fn cell(&self, mv: Move) -> Cell {
        if self.discs[0].contains(mv) {
            Some(Color::Zero)
        } else if self.discs[1].contains(mv) {
            Some(Color::One)
        } else {
            None
        }
    }

    /// Overwrites the contents of the cell at `mv`.
    ///
    /// No rules are enforced; this is for constructing positions.
    #[inline(always)]
    pub fn set(&mut self, mv: Move, cell: Cell) {
        self.discs[0].clear(mv);
        self.discs[1].clear(mv);
        if let Some(owner) = cell {
            self.discs[owner.index()].set(mv);
        }
    }

    /// Computes every disc that `owner` would capture by placing a disc at `mv`.
    ///
    /// For each of the eight directions, the ray from `mv` is walked while it covers opponent discs.
    /// If the ray then ends on a disc owned by `owner`, every opponent disc it covered is captured.
    ///
    /// If `mv` is already occupied, nothing is captured.
    pub fn captures_from(&self, mv: Move, owner: Color) -> Bitboard {
        let mut captured = Bitboard::EMPTY;

        if self.occupied().contains(mv) {
            return captured;
        }

        let own = self.discs(owner);
        let opp = self.discs(owner.opponent());

        for (dx, dy) in DIRECTIONS {
            let mut ray = Bitboard::EMPTY;
            let mut next = mv.offset(dx, dy);

            while let Some(cell) = next.filter(|&c| opp.contains(c)) {
                ray.set(cell);
                next = cell.offset(dx, dy);
            }

            if ray.is_nonempty() && next.is_some_and(|c| own.contains(c)) {
                captured = captured.or(ray);
            }
        }

        captured
    }

    /// Like [`Board::captures_from`], but for raw coordinates.
    ///
    /// Out-of-bounds coordinates capture nothing.
    #[inline(always)]
    pub fn captures_at(&self, x: i64, y: i64, owner: Color) -> Bitboard {
        Move::try_new(x, y)
            .map(|mv| self.captures_from(mv, owner))
            .unwrap_or_default()
    }

    /// Returns `true` if `owner` may place a disc at `mv`.
    #[inline(always)]
    pub fn is_legal(&self, mv: Move, owner: Color) -> bool {
        self.captures_from(mv, owner).is_nonempty()
    }

    /// All cells where `owner` may legally place a disc, as a set.
    pub fn legal_cells(&self, owner: Color) -> Bitboard {
        self.empty_cells()
            .into_iter()
            .filter(|&mv| self.is_legal(mv, owner))
            .collect()
    }

    /// All cells where `owner` may legally place a disc, in row-major order.
    ///
    /// # Example
    /// ```
    /// # use mole::{Board, Color, Move};
    /// let moves = Board::new().legal_moves(Color::Zero);
    /// assert_eq!(
    ///     moves.as_slice(),
    ///     &[Move::new(2, 1), Move::new(1, 2), Move::new(4, 3), Move::new(3, 4)]
    /// );
    /// ```
    #[inline(always)]
    pub fn legal_moves(&self, owner: Color) -> MoveList {
        self.legal_cells(owner).into_iter().collect()
    }

    /// Returns `true` if `owner` has at least one legal move.
    #[inline(always)]
    pub fn has_legal_move(&self, owner: Color) -> bool {
        self.empty_cells()
            .into_iter()
            .any(|mv| self.is_legal(mv, owner))
    }

    /// Places a disc for `owner` at `mv`, flipping every captured disc.
    ///
    /// On success, the set of flipped cells is returned so that the move can be reverted with [`Board::unmake_move`].
    /// If the move captures nothing (including when `mv` is occupied), the board is left untouched.
    pub fn make_move(&mut self, mv: Move, owner: Color) -> Result<Bitboard, IllegalMove> {
        let captured = self.captures_from(mv, owner);
        if captured.is_empty() {
            return Err(IllegalMove { mv, owner });
        }

        let (own, opp) = (owner.index(), owner.opponent().index());
        self.discs[own] = self.discs[own].or(captured);
        self.discs[own].set(mv);
        self.discs[opp] = self.discs[opp].and(!captured);

        Ok(captured)
    }

    /// Reverts a move previously applied with [`Board::make_move`].
    ///
    /// `captured` must be the set returned when the move was made.
    pub fn unmake_move(&mut self, mv: Move, owner: Color, captured: Bitboard) {
        let (own, opp) = (owner.index(), owner.opponent().index());
        self.discs[own].clear(mv);
        self.discs[own] = self.discs[own].and(!captured);
        self.discs[opp] = self.discs[opp].or(captured);
    }

    /// Places a disc for `owner` at `mv`, returning the number of discs flipped.
    ///
    /// The placed disc itself is not counted.
    #[inline(always)]
    pub fn place(&mut self, mv: Move, owner: Color) -> Result<u8, IllegalMove> {
        self.make_move(mv, owner).map(|captured| captured.population())
    }

    /// Copy-make: returns a new board with `mv` played, along with the number of discs flipped.
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move, owner: Color) -> Result<(Self, u8), IllegalMove> {
        let mut next = *self;
        let flips = next.place(mv, owner)?;
        Ok((next, flips))
    }

    /// Returns `true` if neither player has a legal move.
    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        Color::all().into_iter().all(|c| !self.has_legal_move(c))
    }

    /// Number of discs owned by `owner`.
    #[inline(always)]
    pub const fn count_pieces(&self, owner: Color) -> u8 {
        self.discs(owner).population()
    }

    /// Number of corner cells owned by `owner`.
    #[inline(always)]
    pub const fn count_corner_pieces(&self, owner: Color) -> u8 {
        self.discs(owner).and(Bitboard::CORNERS).population()
    }

    /// Number of non-corner edge cells owned by `owner`.
    #[inline(always)]
    pub const fn count_edge_pieces(&self, owner: Color) -> u8 {
        self.discs(owner).and(Bitboard::EDGES).population()
    }

    /// The board as `viewer` sees it: only `viewer`'s own discs.
    ///
    /// Opponent discs and empty cells are indistinguishable to the viewer.
    #[inline(always)]
    pub fn visible_projection(&self, viewer: Color) -> Self {
        let mut visible = Self::EMPTY;
        visible.discs[viewer.index()] = self.discs(viewer);
        visible
    }

    /// The canonical flat encoding of this board, usable as a hash key.
    pub fn key(&self) -> BoardKey {
        let mut key = [EMPTY_CHAR as u8; CELLS];
        for owner in Color::all() {
            for mv in self.discs(owner) {
                key[mv.index()] = owner.char() as u8;
            }
        }
        BoardKey(key)
    }

    /// The flat, row-major wire encoding of this board.
    ///
    /// # Example
    /// ```
    /// # use mole::Board;
    /// let flat = Board::new().to_flat();
    /// assert_eq!(flat.len(), 36);
    /// assert_eq!(&flat[12..24], "..10....01..");
    /// ```
    #[inline(always)]
    pub fn to_flat(&self) -> String {
        self.key().to_string()
    }

    /// Parses a board from its flat, row-major wire encoding.
    pub fn from_flat(flat: &str) -> Result<Self> {
        let len = flat.chars().count();
        if len != CELLS {
            bail!("Board encoding must have exactly {CELLS} cells. Got {len} in {flat:?}.");
        }

        let mut board = Self::EMPTY;
        for (mv, c) in Move::iter().zip(flat.chars()) {
            if c != EMPTY_CHAR {
                board.set(mv, Some(Color::from_char(c)?));
            }
        }

        Ok(board)
    }
}

impl Default for Board {
    /// The standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    /// Wrapper over [`Board::from_flat`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_flat(s)
    }
}

impl fmt::Display for Board {
    /// Draws the board as a grid, top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        write!(f, "  ")?;
        for x in 0..SIZE {
            write!(f, "{x}")?;
        }
        for (y, row) in key.0.chunks(SIZE).enumerate() {
            write!(f, "\n{y} ")?;
            for &c in row {
                write!(f, "{}", c as char)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.key())
    }
}

/// The canonical encoding of a [`Board`]: one wire character per cell, row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey([u8; CELLS]);

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Traces the eight rays from `(x, y)` one cell at a time, without bitboards.
    fn traced_captures(board: &Board, x: i64, y: i64, owner: Color) -> Vec<Move> {
        let Some(mv) = Move::try_new(x, y) else {
            return vec![];
        };
        if board.cell(mv).is_some() {
            return vec![];
        }

        let mut captured = vec![];
        for (dx, dy) in DIRECTIONS {
            let mut path = vec![];
            let (mut cx, mut cy) = (x + dx as i64, y + dy as i64);
            loop {
                match Move::try_new(cx, cy).map(|c| board.cell(c)) {
                    Some(Some(c)) if c == owner.opponent() => {
                        path.push(Move::try_new(cx, cy).unwrap());
                        cx += dx as i64;
                        cy += dy as i64;
                    }
                    Some(Some(c)) if c == owner => {
                        captured.extend(path);
                        break;
                    }
                    _ => break,
                }
            }
        }
        captured.sort();
        captured
    }

    fn midgame() -> Board {
        "......\
         ..0...\
         .0011.\
         .1110.\
         ..10..\
         ......"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_initial_position() {
        let board = Board::new();
        assert_eq!(board.count_pieces(Color::Zero), 2);
        assert_eq!(board.count_pieces(Color::One), 2);
        assert_eq!(board.cell(Move::new(2, 2)), Some(Color::One));
        assert_eq!(board.cell(Move::new(3, 3)), Some(Color::One));
        assert_eq!(board.cell(Move::new(3, 2)), Some(Color::Zero));
        assert_eq!(board.cell(Move::new(2, 3)), Some(Color::Zero));
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::new();
        let zero = board.legal_moves(Color::Zero);
        assert_eq!(
            zero.as_slice(),
            &[Move::new(2, 1), Move::new(1, 2), Move::new(4, 3), Move::new(3, 4)]
        );

        let one = board.legal_moves(Color::One);
        assert_eq!(
            one.as_slice(),
            &[Move::new(3, 1), Move::new(4, 2), Move::new(1, 3), Move::new(2, 4)]
        );
    }

    #[test]
    fn test_captures_match_traced_rays() {
        for board in [Board::new(), midgame()] {
            for owner in Color::all() {
                for y in -1..=SIZE as i64 {
                    for x in -1..=SIZE as i64 {
                        let got = board.captures_at(x, y, owner).iter().collect::<Vec<_>>();
                        assert_eq!(
                            got,
                            traced_captures(&board, x, y, owner),
                            "captures differ at ({x}, {y}) for {owner:?} on\n{board}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_legal_moves_are_exactly_capturing_empty_cells() {
        for board in [Board::new(), midgame(), Board::EMPTY] {
            for owner in Color::all() {
                let expected = Move::iter()
                    .filter(|&mv| board.cell(mv).is_none() && board.captures_from(mv, owner).is_nonempty())
                    .collect::<Vec<_>>();
                assert_eq!(board.legal_moves(owner).to_vec(), expected);
            }
        }
    }

    #[test]
    fn test_place_flips_and_unmake_restores() {
        for start in [Board::new(), midgame()] {
            for owner in Color::all() {
                for mv in start.legal_moves(owner) {
                    let mut board = start;
                    let captured = board.make_move(mv, owner).unwrap();

                    assert_eq!(board.cell(mv), Some(owner));
                    for c in captured {
                        assert_eq!(board.cell(c), Some(owner));
                    }
                    assert_eq!(board.occupied().population(), start.occupied().population() + 1);

                    board.unmake_move(mv, owner, captured);
                    assert_eq!(board, start);
                }
            }
        }
    }

    #[test]
    fn test_place_returns_flip_count() {
        let mut board = Board::new();
        let flips = board.place(Move::new(2, 1), Color::Zero).unwrap();
        assert_eq!(flips, 1);
        assert_eq!(board.count_pieces(Color::Zero), 4);
        assert_eq!(board.count_pieces(Color::One), 1);
    }

    #[test]
    fn test_illegal_placements_are_rejected() {
        let mut board = Board::new();

        // Occupied
        assert!(board.place(Move::new(2, 2), Color::Zero).is_err());
        // Captures nothing
        assert!(board.place(Move::new(0, 0), Color::Zero).is_err());
        assert_eq!(board, Board::new());

        // Out of bounds captures nothing
        assert!(board.captures_at(-1, 2, Color::Zero).is_empty());
        assert!(board.captures_at(2, SIZE as i64, Color::Zero).is_empty());
    }

    #[test]
    fn test_terminal_detection() {
        assert!(!Board::new().is_terminal());
        assert!(Board::EMPTY.is_terminal());

        let full: Board = "0".repeat(CELLS).parse().unwrap();
        assert!(full.is_terminal());
    }

    #[test]
    fn test_corner_and_edge_counts() {
        let board: Board = "0....1\
                            0.....\
                            ......\
                            ......\
                            .....1\
                            1....."
            .parse()
            .unwrap();
        assert_eq!(board.count_corner_pieces(Color::Zero), 1);
        assert_eq!(board.count_corner_pieces(Color::One), 2);
        assert_eq!(board.count_edge_pieces(Color::Zero), 1);
        assert_eq!(board.count_edge_pieces(Color::One), 1);
    }

    #[test]
    fn test_visible_projection_hides_opponent() {
        let board = midgame();
        let visible = board.visible_projection(Color::Zero);
        assert_eq!(visible.discs(Color::Zero), board.discs(Color::Zero));
        assert!(visible.discs(Color::One).is_empty());
        assert!(visible.to_flat().chars().all(|c| c == '.' || c == '0'));
    }

    #[test]
    fn test_flat_encoding() {
        let board = midgame();
        assert_eq!(board.to_flat().parse::<Board>().unwrap(), board);
        assert_eq!(board.key().to_string(), board.to_flat());

        assert!("...".parse::<Board>().is_err());
        assert!("x".repeat(CELLS).parse::<Board>().is_err());
    }
}
