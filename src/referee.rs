/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, info, trace};

use crate::{tune, Action, Board, Color, Outcome, Player, ServerMessage};

/// Illegal moves a player may make before forfeiting, when not otherwise specified.
pub const DEFAULT_MAX_ILLEGAL: u32 = tune::default_max_illegal!();

/// Configuration variables for a [`Referee`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// A player whose illegal-move count reaches this value loses immediately.
    pub max_illegal: u32,
}

impl Default for MatchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_illegal: DEFAULT_MAX_ILLEGAL,
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// The true board when the match ended.
    pub board: Board,

    /// Valid turns played, passes included.
    pub turns: usize,

    /// Illegal moves made by each player, indexed by [`Color::index`].
    pub illegal: [u32; Color::COUNT],

    /// The winner, or `None` for a draw.
    pub winner: Option<Color>,

    /// Set if the match ended because this player made too many illegal moves.
    pub forfeited: Option<Color>,
}

/// The authority for a game of hidden-view Othello.
///
/// Holds the true board, and tells each player only what it is allowed to see.
#[derive(Debug, Clone)]
pub struct Referee {
    board: Board,
    config: MatchConfig,
    illegal: [u32; Color::COUNT],
    passes: [u32; Color::COUNT],
    turns: usize,
}

impl Referee {
    /// Constructs a [`Referee`] for a new game from the standard starting position.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            board: Board::new(),
            config,
            illegal: [0; Color::COUNT],
            passes: [0; Color::COUNT],
            turns: 0,
        }
    }

    /// Plays a full game between `players`, where `players[0]` moves first.
    pub fn play(mut self, players: [&mut dyn Player; Color::COUNT]) -> MatchResult {
        for color in Color::all() {
            let player = &mut *players[color.index()];
            info!("{color:?} is {}", player.name());

            tell(player, ServerMessage::Id(color));
            tell(player, ServerMessage::Greeting);
            tell(player, ServerMessage::Board(self.board.visible_projection(color)));
        }

        loop {
            let curr = if self.turns % 2 == 0 { Color::Zero } else { Color::One };
            let opp = curr.opponent();

            debug!("Turn {} ({curr:?} to move):\n{}", self.turns, self.board);

            tell(&mut *players[curr.index()], ServerMessage::YourTurn);
            tell(&mut *players[opp.index()], ServerMessage::Waiting);

            let action = players[curr.index()].choose_action();
            trace!("{curr:?} -> {action}");

            let flips = match action {
                Action::Pass => {
                    self.passes[curr.index()] += 1;
                    0
                }

                Action::Move(mv) => match self.board.place(mv, curr) {
                    Ok(flips) => {
                        self.passes[curr.index()] = 0;
                        flips
                    }

                    Err(e) => {
                        debug!("{e}");
                        self.illegal[curr.index()] += 1;

                        if self.illegal[curr.index()] >= self.config.max_illegal {
                            info!("{curr:?} forfeits after {} illegal moves", self.config.max_illegal);
                            let lost = Outcome::Lose;
                            tell(&mut *players[curr.index()], ServerMessage::GameOver(lost));
                            tell(&mut *players[opp.index()], ServerMessage::GameOver(lost.flipped()));
                            return self.result(Some(opp), Some(curr));
                        }

                        let player = &mut *players[curr.index()];
                        tell(
                            player,
                            ServerMessage::IllegalCount {
                                own: self.illegal[curr.index()],
                                opponent: self.illegal[opp.index()],
                            },
                        );
                        let visible = self.board.visible_projection(curr);
                        tell(player, ServerMessage::Board(visible));
                        continue;
                    }
                },
            };

            for color in Color::all() {
                tell(&mut *players[color.index()], ServerMessage::FlipCount(flips));
            }
            for color in [curr, opp] {
                let visible = self.board.visible_projection(color);
                tell(&mut *players[color.index()], ServerMessage::Board(visible));
            }

            if self.is_over() {
                let winner = self.leader();
                let outcome = match winner {
                    None => Outcome::Draw,
                    Some(Color::Zero) => Outcome::Win,
                    Some(Color::One) => Outcome::Lose,
                };
                tell(&mut *players[0], ServerMessage::GameOver(outcome));
                tell(&mut *players[1], ServerMessage::GameOver(outcome.flipped()));

                info!(
                    "Game over after {} turns: {} to {}",
                    self.turns + 1,
                    self.board.count_pieces(Color::Zero),
                    self.board.count_pieces(Color::One)
                );
                self.turns += 1;
                return self.result(winner, None);
            }

            self.turns += 1;
        }
    }

    /// Whether both players have passed more than once in a row, or neither can move.
    fn is_over(&self) -> bool {
        self.passes.iter().all(|&passes| passes > 1) || self.board.is_terminal()
    }

    /// The player with more discs, if any.
    fn leader(&self) -> Option<Color> {
        let zero = self.board.count_pieces(Color::Zero);
        let one = self.board.count_pieces(Color::One);

        match zero.cmp(&one) {
            std::cmp::Ordering::Greater => Some(Color::Zero),
            std::cmp::Ordering::Less => Some(Color::One),
            std::cmp::Ordering::Equal => None,
        }
    }

    fn result(&self, winner: Option<Color>, forfeited: Option<Color>) -> MatchResult {
        MatchResult {
            board: self.board,
            turns: self.turns,
            illegal: self.illegal,
            winner,
            forfeited,
        }
    }
}

#[inline(always)]
fn tell(player: &mut dyn Player, msg: ServerMessage) {
    trace!("-> {}: {msg}", player.name());
    player.on_message(&msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    /// Replays a fixed list of actions, passing once they run out.
    struct Scripted {
        actions: Vec<Action>,
        seen: Vec<ServerMessage>,
    }

    impl Scripted {
        fn new(actions: impl IntoIterator<Item = Action>) -> Self {
            let mut actions = actions.into_iter().collect::<Vec<_>>();
            actions.reverse();
            Self {
                actions,
                seen: Vec::new(),
            }
        }
    }

    impl Player for Scripted {
        fn name(&self) -> String {
            String::from("Scripted")
        }

        fn on_message(&mut self, msg: &ServerMessage) {
            self.seen.push(msg.clone());
        }

        fn choose_action(&mut self) -> Action {
            self.actions.pop().unwrap_or(Action::Pass)
        }
    }

    #[test]
    fn test_handshake_order() {
        let mut zero = Scripted::new([]);
        let mut one = Scripted::new([]);
        Referee::new(MatchConfig::default()).play([&mut zero, &mut one]);

        assert_eq!(zero.seen[0], ServerMessage::Id(Color::Zero));
        assert_eq!(zero.seen[1], ServerMessage::Greeting);
        assert_eq!(
            zero.seen[2],
            ServerMessage::Board(Board::new().visible_projection(Color::Zero))
        );
        assert_eq!(one.seen[0], ServerMessage::Id(Color::One));
        assert_eq!(zero.seen[3], ServerMessage::YourTurn);
        assert_eq!(one.seen[3], ServerMessage::Waiting);
    }

    #[test]
    fn test_repeated_passes_end_the_game_in_a_draw() {
        let mut zero = Scripted::new([]);
        let mut one = Scripted::new([]);
        let result = Referee::new(MatchConfig::default()).play([&mut zero, &mut one]);

        // Each player must pass twice in a row.
        assert_eq!(result.turns, 4);
        assert_eq!(result.winner, None);
        assert_eq!(result.board, Board::new());
        assert_eq!(zero.seen.last(), Some(&ServerMessage::GameOver(Outcome::Draw)));
    }

    #[test]
    fn test_illegal_move_is_reported_only_to_the_mover() {
        let mut zero = Scripted::new([Action::Move(Move::new(0, 0))]);
        let mut one = Scripted::new([]);
        let result = Referee::new(MatchConfig::default()).play([&mut zero, &mut one]);

        assert_eq!(result.illegal, [1, 0]);
        assert_eq!(
            zero.seen[4],
            ServerMessage::IllegalCount {
                own: 1,
                opponent: 0
            }
        );
        assert!(!one
            .seen
            .iter()
            .any(|msg| matches!(msg, ServerMessage::IllegalCount { .. })));
    }

    #[test]
    fn test_valid_move_reports_flips_to_both() {
        let mut zero = Scripted::new([Action::Move(Move::new(2, 1))]);
        let mut one = Scripted::new([]);
        let result = Referee::new(MatchConfig::default()).play([&mut zero, &mut one]);

        assert!(zero.seen.contains(&ServerMessage::FlipCount(1)));
        assert!(one.seen.contains(&ServerMessage::FlipCount(1)));
        assert_eq!(result.board.count_pieces(Color::Zero), 4);
        assert_eq!(result.winner, Some(Color::Zero));
        assert_eq!(zero.seen.last(), Some(&ServerMessage::GameOver(Outcome::Win)));
        assert_eq!(one.seen.last(), Some(&ServerMessage::GameOver(Outcome::Lose)));
    }

    #[test]
    fn test_too_many_illegal_moves_forfeits() {
        let mut zero = Scripted::new([]);
        let mut one = Scripted::new(std::iter::repeat(Action::Move(Move::new(0, 0))).take(5));
        let result = Referee::new(MatchConfig { max_illegal: 3 }).play([&mut zero, &mut one]);

        assert_eq!(result.forfeited, Some(Color::One));
        assert_eq!(result.winner, Some(Color::Zero));
        assert_eq!(result.illegal[Color::One.index()], 3);
        assert_eq!(one.seen.last(), Some(&ServerMessage::GameOver(Outcome::Lose)));
        assert_eq!(zero.seen.last(), Some(&ServerMessage::GameOver(Outcome::Win)));
    }
}
