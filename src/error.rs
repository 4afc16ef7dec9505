/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::{Color, Move};

/// A placement that captures nothing: the target is occupied, or no ray ends on an own disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{owner:?} cannot place a disc at {mv}")]
pub struct IllegalMove {
    pub mv: Move,
    pub owner: Color,
}

/// The match authority sent something the session cannot work with.
///
/// These are only fatal while the session is being set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("expected `ID <n>` as the first message, got {got:?}")]
    MissingId { got: String },

    #[error("connection closed before a player id was assigned")]
    ConnectionClosed,

    #[error("malformed message {line:?}: {reason}")]
    Malformed { line: String, reason: String },
}
