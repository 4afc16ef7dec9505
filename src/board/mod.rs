/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of cells, stored as bits.
mod bitboard;

/// The full-information board engine: captures, legality, placement, projection.
#[allow(clippy::module_inception)]
mod board;

/// Player identities.
mod color;

/// Cell coordinates and player actions.
mod moves;

pub use bitboard::*;
pub use board::*;
pub use color::*;
pub use moves::*;

/// Width and height of the board.
pub const SIZE: usize = 6;

/// Number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;
