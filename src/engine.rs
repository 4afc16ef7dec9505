/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{BufRead, Write},
    sync::mpsc::{channel, Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use log::{debug, info, trace, warn};

use crate::{ClientMessage, Color, Outcome, Player, ProtocolError, ServerMessage};

/// A line received from the match authority, along with its interpretation.
#[derive(Debug)]
struct Received {
    /// The line as received, without surrounding whitespace.
    line: String,

    /// The message it parsed into, if it was recognized.
    msg: Result<ServerMessage>,
}

/// Drives a [`Player`] through one game against a remote match authority.
pub struct Engine {
    /// The player making the decisions.
    player: Box<dyn Player>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance to be executed with [`Engine::run`].
    pub fn new(player: Box<dyn Player>) -> Self {
        Self { player }
    }

    /// Returns a string of the engine's name and current version.
    pub fn version(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Execute the main event loop for one game.
    ///
    /// Spawns a thread that reads messages from `reader`, and answers them on `writer`.
    /// Returns the outcome of the game, or `None` if the authority hung up before announcing one.
    ///
    /// Fails if the first message is not `ID <n>` or if `writer` cannot be written to.
    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<Option<Outcome>>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let (sender, receiver) = channel();
        thread::spawn(move || {
            if let Err(err) = input_handler(reader, sender) {
                debug!("Input handler thread stopping: {err:#}");
            }
        });

        let color = handshake(&receiver)?;
        info!("{} connected as {color:?}", self.version());

        self.player.on_message(&ServerMessage::Id(color));
        send(&mut writer, ClientMessage::Name(self.player.name()))?;

        while let Ok(Received { line, msg }) = receiver.recv() {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(
                        "Ignoring: {}",
                        ProtocolError::Malformed {
                            line,
                            reason: format!("{e:#}"),
                        }
                    );
                    continue;
                }
            };

            self.player.on_message(&msg);

            match msg {
                ServerMessage::YourTurn => {
                    let action = self.player.choose_action();
                    send(&mut writer, ClientMessage::Action(action))?;
                }

                ServerMessage::GameOver(outcome) => {
                    info!("{outcome}");
                    return Ok(Some(outcome));
                }

                _ => {}
            }
        }

        warn!("Connection closed before the game ended");
        Ok(None)
    }
}

/// Waits for the authority to assign this player's identity.
fn handshake(receiver: &Receiver<Received>) -> Result<Color, ProtocolError> {
    let Received { line, msg } = receiver
        .recv()
        .map_err(|_| ProtocolError::ConnectionClosed)?;

    match msg {
        Ok(ServerMessage::Id(color)) => Ok(color),
        _ => Err(ProtocolError::MissingId { got: line }),
    }
}

/// Writes `msg` as one line and flushes it.
fn send<W: Write>(writer: &mut W, msg: ClientMessage) -> Result<()> {
    trace!("<- {msg}");
    writeln!(writer, "{msg}").with_context(|| format!("Failed to send {msg:?}"))?;
    writer.flush().context("Failed to flush output")
}

/// Loops endlessly to await input from `reader`, forwarding every non-empty line to `sender`.
///
/// Returns once `reader` is exhausted or the receiving half of the channel is gone.
fn input_handler<R: BufRead>(mut reader: R, sender: Sender<Received>) -> Result<()> {
    let mut buffer = String::with_capacity(128);

    loop {
        buffer.clear();
        let bytes = reader
            .read_line(&mut buffer)
            .context("Failed to read line from the match authority")?;

        if bytes == 0 {
            return Ok(());
        }

        let line = buffer.trim();
        if line.is_empty() {
            continue;
        }

        trace!("-> {line}");
        sender
            .send(Received {
                line: line.to_string(),
                msg: line.parse(),
            })
            .context("Session ended while input was still arriving")?;
    }
}
