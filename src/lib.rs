/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Tracking the set of boards consistent with what a player has seen.
mod belief;

/// Board representation, move generation, and rules of the game.
mod board;

/// Command-line interface.
mod cli;

/// Code related to playing a game over a text connection, such as input handling.
mod engine;

/// Error types.
mod error;

/// Evaluation of fully-known boards.
mod eval;

/// Sets of possible boards.
mod infoset;

/// Decision strategies.
mod player;

/// Messages exchanged with the match authority.
mod protocol;

/// An in-process match authority.
mod referee;

/// Scores of boards and searches.
mod score;

/// Main engine logic; all search related code.
mod search;

/// Tunable evaluation and search parameters.
mod tune;

pub use belief::*;
pub use board::*;
pub use cli::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use infoset::*;
pub use player::*;
pub use protocol::*;
pub use referee::*;
pub use score::*;
pub use search::*;
