/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};

use crate::{Action, Board, Color, Move};

/// Greeting sent by the match authority right after a player's id.
pub const GREETING: &str = "Welcome to hidden-view Othello server.";

/// How a game ended, from the receiving player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// The outcome as seen by the other player.
    #[inline(always)]
    pub const fn flipped(&self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "you win"),
            Self::Lose => write!(f, "you lose"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// A message sent from the match authority to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `ID <n>`: assigns the receiver's identity. Always the first message.
    Id(Color),

    /// The authority's greeting. Carries no information.
    Greeting,

    /// `BOARD <flat>`: the receiver's visible projection of the true board.
    Board(Board),

    /// `FLIP_COUNT <n>`: discs flipped by the most recent turn. `0` means a pass.
    FlipCount(u8),

    /// `ILLEGAL_COUNT <you> <opp>`: cumulative illegal-move counters.
    IllegalCount { own: u32, opponent: u32 },

    /// `your turn`
    YourTurn,

    /// `waiting`
    Waiting,

    /// `you win`, `you lose`, or `draw`.
    GameOver(Outcome),
}

impl FromStr for ServerMessage {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s {
            "your turn" => return Ok(Self::YourTurn),
            "waiting" => return Ok(Self::Waiting),
            "you win" => return Ok(Self::GameOver(Outcome::Win)),
            "you lose" => return Ok(Self::GameOver(Outcome::Lose)),
            "draw" => return Ok(Self::GameOver(Outcome::Draw)),
            GREETING => return Ok(Self::Greeting),
            _ => {}
        }

        let mut parts = s.split_ascii_whitespace();
        let cmd = parts.next().ok_or_else(|| anyhow!("Empty message"))?;
        let args = parts.collect::<Vec<_>>();

        let expect_args = |n: usize| {
            if args.len() != n {
                bail!("{cmd} expects {n} argument(s), got {}: {s:?}", args.len());
            }
            Ok(())
        };

        let msg = match cmd {
            "ID" => {
                expect_args(1)?;
                Self::Id(args[0].parse()?)
            }

            "BOARD" => {
                expect_args(1)?;
                Self::Board(args[0].parse()?)
            }

            "FLIP_COUNT" => {
                expect_args(1)?;
                let flips = args[0]
                    .parse()
                    .with_context(|| format!("Invalid flip count in {s:?}"))?;
                Self::FlipCount(flips)
            }

            "ILLEGAL_COUNT" => {
                expect_args(2)?;
                let own = args[0]
                    .parse()
                    .with_context(|| format!("Invalid illegal count in {s:?}"))?;
                let opponent = args[1]
                    .parse()
                    .with_context(|| format!("Invalid illegal count in {s:?}"))?;
                Self::IllegalCount { own, opponent }
            }

            _ => bail!("Unrecognized message {s:?}"),
        };

        Ok(msg)
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(color) => write!(f, "ID {color}"),
            Self::Greeting => write!(f, "{GREETING}"),
            Self::Board(board) => write!(f, "BOARD {}", board.to_flat()),
            Self::FlipCount(flips) => write!(f, "FLIP_COUNT {flips}"),
            Self::IllegalCount { own, opponent } => write!(f, "ILLEGAL_COUNT {own} {opponent}"),
            Self::YourTurn => write!(f, "your turn"),
            Self::Waiting => write!(f, "waiting"),
            Self::GameOver(outcome) => outcome.fmt(f),
        }
    }
}

/// A message sent from a player to the match authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `NAME <name>`: introduces the player, sent once after receiving an id.
    Name(String),

    /// `MOVE <x> <y>` or `PASSED`.
    Action(Action),
}

impl FromStr for ClientMessage {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "PASSED" {
            return Ok(Self::Action(Action::Pass));
        }

        let mut parts = s.split_ascii_whitespace();
        match parts.next() {
            Some("NAME") => {
                let name = parts.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    bail!("NAME requires a name: {s:?}");
                }
                Ok(Self::Name(name))
            }

            Some("MOVE") => {
                let coords = parts
                    .map(|p| p.parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("Invalid coordinates in {s:?}"))?;

                let [x, y] = coords[..] else {
                    bail!("MOVE expects 2 coordinates: {s:?}");
                };

                let mv = Move::try_new(x, y)
                    .ok_or_else(|| anyhow!("Move ({x}, {y}) is off the board"))?;
                Ok(Self::Action(Action::Move(mv)))
            }

            _ => bail!("Unrecognized message {s:?}"),
        }
    }
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "NAME {name}"),
            Self::Action(action) => action.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_messages() {
        assert_eq!("ID 1".parse::<ServerMessage>().unwrap(), ServerMessage::Id(Color::One));
        assert_eq!(
            "FLIP_COUNT 3\n".parse::<ServerMessage>().unwrap(),
            ServerMessage::FlipCount(3)
        );
        assert_eq!(
            "ILLEGAL_COUNT 2 0".parse::<ServerMessage>().unwrap(),
            ServerMessage::IllegalCount {
                own: 2,
                opponent: 0
            }
        );
        assert_eq!(
            "your turn".parse::<ServerMessage>().unwrap(),
            ServerMessage::YourTurn
        );
        assert_eq!(
            "you lose".parse::<ServerMessage>().unwrap(),
            ServerMessage::GameOver(Outcome::Lose)
        );
        assert_eq!(
            GREETING.parse::<ServerMessage>().unwrap(),
            ServerMessage::Greeting
        );

        let visible = Board::new().visible_projection(Color::Zero);
        let line = format!("BOARD {}", visible.to_flat());
        assert_eq!(
            line.parse::<ServerMessage>().unwrap(),
            ServerMessage::Board(visible)
        );
        assert_eq!(ServerMessage::Board(visible).to_string(), line);
    }

    #[test]
    fn test_reject_malformed_server_messages() {
        for bad in [
            "",
            "ID",
            "ID 2",
            "BOARD ...",
            "FLIP_COUNT -1",
            "ILLEGAL_COUNT 1",
            "HELLO",
        ] {
            assert!(bad.parse::<ServerMessage>().is_err(), "{bad:?} parsed");
        }
    }

    #[test]
    fn test_parse_client_messages() {
        assert_eq!(
            "MOVE 2 3".parse::<ClientMessage>().unwrap(),
            ClientMessage::Action(Action::Move(Move::new(2, 3)))
        );
        assert_eq!(
            "PASSED".parse::<ClientMessage>().unwrap(),
            ClientMessage::Action(Action::Pass)
        );
        assert_eq!(
            "NAME mole 0.1.0".parse::<ClientMessage>().unwrap(),
            ClientMessage::Name("mole 0.1.0".into())
        );

        assert!("MOVE 6 0".parse::<ClientMessage>().is_err());
        assert!("MOVE 1".parse::<ClientMessage>().is_err());
        assert!("MOVE a b".parse::<ClientMessage>().is_err());
    }
}
