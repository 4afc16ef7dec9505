/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::mem;

use log::{debug, warn};

use crate::{Action, Board, Color, InfoSet, Move, ServerMessage};

/// An action this player sent that the match authority has not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    /// What was sent.
    action: Action,

    /// The belief at the moment `action` was sent, restored from if the move is rejected.
    snapshot: InfoSet,
}

/// How the next `BOARD` message should be interpreted.
///
/// The authority reports a turn as `FLIP_COUNT` followed by `BOARD`,
/// and a rejected move as `ILLEGAL_COUNT` followed by `BOARD`.
/// The first message of each pair decides what the second one means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Expect {
    /// No turn is being reported.
    #[default]
    Nothing,

    /// This player's own move or pass was accepted.
    OwnTurn,

    /// This player's move was rejected, so the view is resent unchanged.
    Resend,

    /// The opponent moved (`flips > 0`) or passed (`flips == 0`).
    OpponentTurn { flips: u8 },
}

/// Tracks everything a player has observed, and the set of boards consistent with it.
///
/// Feed every message from the match authority through [`Belief::update`],
/// and call [`Belief::submit`] whenever an action is sent.
/// Whenever an observation cannot be reconciled with any believed world,
/// the belief collapses to the directly visible board instead of becoming empty.
#[derive(Debug, Clone)]
pub struct Belief {
    /// The player whose belief this is.
    color: Color,

    /// Boards consistent with every observation so far.
    infoset: InfoSet,

    /// Whether a `BOARD` has been received, which seeds `infoset`.
    seeded: bool,

    /// The most recently received visible board.
    visible: Board,

    /// Cumulative illegal moves made by this player.
    own_illegal: u32,

    /// Cumulative illegal moves made by the opponent.
    opponent_illegal: u32,

    /// Number of turns reported so far, passes included.
    turn: usize,

    /// Action awaiting a response from the authority.
    pending: Option<Pending>,

    /// Meaning of the next `BOARD`.
    expect: Expect,

    /// Number of times the belief collapsed to the visible board.
    resets: usize,
}

impl Belief {
    /// Constructs a fresh [`Belief`] for `color`, before any board has been seen.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            infoset: InfoSet::initial(),
            seeded: false,
            visible: Board::EMPTY,
            own_illegal: 0,
            opponent_illegal: 0,
            turn: 0,
            pending: None,
            expect: Expect::Nothing,
            resets: 0,
        }
    }

    /// Constructs a [`Belief`] for `color` that already considers exactly the worlds of `infoset` possible.
    ///
    /// `visible` is the board last shown to `color`.
    pub fn from_infoset(color: Color, infoset: InfoSet, visible: Board) -> Self {
        Self {
            infoset,
            seeded: true,
            visible,
            ..Self::new(color)
        }
    }

    /// The player whose belief this is.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Every board currently considered possible.
    #[inline(always)]
    pub const fn infoset(&self) -> &InfoSet {
        &self.infoset
    }

    /// The most recently received visible board.
    #[inline(always)]
    pub const fn visible(&self) -> &Board {
        &self.visible
    }

    /// Number of turns reported so far, passes included.
    #[inline(always)]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    /// Cumulative illegal moves, as `(own, opponent)`.
    #[inline(always)]
    pub const fn illegal_counts(&self) -> (u32, u32) {
        (self.own_illegal, self.opponent_illegal)
    }

    /// The move sent to the authority and not yet answered, if any.
    #[inline(always)]
    pub fn pending_move(&self) -> Option<Move> {
        self.pending.as_ref().and_then(|p| p.action.mv())
    }

    /// Number of times the belief could not be reconciled and collapsed to the visible board.
    #[inline(always)]
    pub const fn resets(&self) -> usize {
        self.resets
    }

    /// Records that `action` was sent, snapshotting the current belief.
    pub fn submit(&mut self, action: Action) {
        self.pending = Some(Pending {
            action,
            snapshot: self.infoset.clone(),
        });
    }

    /// Applies one message from the authority.
    pub fn update(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::Id(color) => {
                if *color != self.color || self.seeded {
                    *self = Self::new(*color);
                }
            }

            ServerMessage::Board(visible) => self.on_board(*visible),

            ServerMessage::FlipCount(flips) => self.on_flip_count(*flips),

            ServerMessage::IllegalCount { own, opponent } => {
                self.on_illegal_count(*own, *opponent)
            }

            ServerMessage::Greeting
            | ServerMessage::YourTurn
            | ServerMessage::Waiting
            | ServerMessage::GameOver(_) => {}
        }
    }

    /// A turn was completed by one of the players.
    fn on_flip_count(&mut self, flips: u8) {
        self.turn += 1;

        self.expect = match self.pending.take() {
            Some(Pending {
                action: Action::Move(mv),
                ..
            }) => {
                self.confirm_own_move(mv, flips);
                Expect::OwnTurn
            }

            Some(Pending {
                action: Action::Pass,
                ..
            }) => Expect::OwnTurn,

            None => Expect::OpponentTurn { flips },
        };
    }

    /// The authority accepted our move at `mv`, which flipped `flips` discs.
    ///
    /// Only worlds where `mv` was legal and flips exactly `flips` discs survive, advanced by the move.
    fn confirm_own_move(&mut self, mv: Move, flips: u8) {
        let narrowed = self
            .infoset
            .iter()
            .filter_map(|world| world.with_move_made(mv, self.color).ok())
            .filter(|&(_, n)| n == flips)
            .map(|(next, _)| next)
            .collect::<InfoSet>();

        if narrowed.is_empty() {
            warn!(
                "No world allows {mv} flipping {flips} discs for {:?}; keeping {} pre-move worlds",
                self.color,
                self.infoset.len()
            );
        } else {
            debug!(
                "Own move {mv} confirmed: {} -> {} worlds",
                self.infoset.len(),
                narrowed.len()
            );
            self.infoset = narrowed;
        }
    }

    /// Illegal-move counters were updated.
    ///
    /// If our own counter went up, our pending move was rejected.
    fn on_illegal_count(&mut self, own: u32, opponent: u32) {
        let rejected = own > self.own_illegal;
        self.own_illegal = own;
        self.opponent_illegal = opponent;

        if !rejected {
            return;
        }

        self.expect = Expect::Resend;

        let Some(Pending {
            action: Action::Move(mv),
            snapshot,
        }) = self.pending.take()
        else {
            return;
        };

        // Every world where the move was legal has been ruled out by the authority.
        let remaining = snapshot.filtered(|world| !world.is_legal(mv, self.color));

        if remaining.is_empty() {
            warn!(
                "{mv} was rejected but is legal in all {} believed worlds; resetting to the visible board",
                snapshot.len()
            );
            self.reset();
        } else {
            debug!(
                "Move {mv} rejected: {} -> {} worlds",
                snapshot.len(),
                remaining.len()
            );
            self.infoset = remaining;
        }
    }

    /// A new visible board arrived.
    fn on_board(&mut self, visible: Board) {
        self.visible = visible;

        // Nothing better is known at the start of a game than the standard opening.
        if !self.seeded {
            self.seeded = true;
            self.infoset = InfoSet::initial();
            self.expect = Expect::Nothing;
            return;
        }

        match mem::take(&mut self.expect) {
            Expect::Nothing => {}

            Expect::OwnTurn | Expect::Resend => self.retain_visible(),

            Expect::OpponentTurn { flips: 0 } => self.on_opponent_pass(),

            Expect::OpponentTurn { flips } => self.on_opponent_move(flips),
        }
    }

    /// Keeps the worlds matching the visible board, resetting if there are none.
    fn retain_visible(&mut self) {
        let matching = self.matching_visible();

        if matching.is_empty() {
            warn!(
                "None of {} worlds match the visible board after our own turn; resetting",
                self.infoset.len()
            );
            self.reset();
        } else {
            self.infoset = matching;
        }
    }

    /// The opponent passed, so nothing visible should have changed.
    ///
    /// If no world agrees, the prior belief is kept rather than collapsed.
    fn on_opponent_pass(&mut self) {
        let matching = self.matching_visible();

        if matching.is_empty() {
            warn!(
                "Opponent passed but none of {} worlds match the visible board; keeping them",
                self.infoset.len()
            );
        } else {
            self.infoset = matching;
        }
    }

    /// The opponent placed a disc, flipping `flips` discs.
    ///
    /// Every legal opponent move in every world is tried; a resulting world survives
    /// if it flips exactly `flips` discs and looks exactly like the visible board.
    fn on_opponent_move(&mut self, flips: u8) {
        let opp = self.color.opponent();
        let mut hypotheses = Vec::new();

        for world in self.infoset.iter() {
            let mut scratch = *world;

            for mv in world.legal_cells(opp) {
                let Ok(captured) = scratch.make_move(mv, opp) else {
                    continue;
                };

                if captured.population() == flips
                    && scratch.visible_projection(self.color) == self.visible
                {
                    hypotheses.push(scratch);
                }

                scratch.unmake_move(mv, opp, captured);
            }
        }

        let next = InfoSet::new(hypotheses);

        if next.is_empty() {
            warn!(
                "No opponent move in {} worlds flips {flips} discs and matches the visible board; resetting",
                self.infoset.len()
            );
            self.reset();
        } else {
            debug!(
                "Opponent move flipping {flips}: {} -> {} worlds",
                self.infoset.len(),
                next.len()
            );
            self.infoset = next;
        }
    }

    /// Worlds that project onto the visible board.
    fn matching_visible(&self) -> InfoSet {
        self.infoset
            .filtered(|world| world.visible_projection(self.color) == self.visible)
    }

    /// Collapses the belief to certainty about only the visible board.
    fn reset(&mut self) {
        self.resets += 1;
        self.infoset = InfoSet::singleton(self.visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    fn seeded(color: Color) -> Belief {
        let mut belief = Belief::new(color);
        belief.update(&ServerMessage::Id(color));
        belief.update(&ServerMessage::Board(
            Board::new().visible_projection(color),
        ));
        belief
    }

    /// Plays `mv` on `truth`, reporting it to `belief` the way the authority would.
    fn report(belief: &mut Belief, truth: &mut Board, mv: Move, mover: Color) {
        if mover == belief.color() {
            belief.submit(Action::Move(mv));
        }
        let flips = truth.place(mv, mover).unwrap();
        belief.update(&ServerMessage::FlipCount(flips));
        belief.update(&ServerMessage::Board(
            truth.visible_projection(belief.color()),
        ));
    }

    #[test]
    fn test_first_board_seeds_the_starting_position() {
        let mut belief = Belief::new(Color::Zero);
        belief.update(&ServerMessage::Board(Board::EMPTY));
        assert_eq!(belief.infoset(), &InfoSet::initial());
    }

    #[test]
    fn test_own_move_narrows_by_flip_count() {
        let mut belief = seeded(Color::Zero);
        let mut truth = Board::new();
        report(&mut belief, &mut truth, Move::new(2, 1), Color::Zero);

        assert_eq!(belief.infoset().worlds(), &[truth]);
        assert_eq!(belief.turn(), 1);
        assert_eq!(belief.pending_move(), None);
    }

    #[test]
    fn test_own_move_with_mismatched_flips_keeps_prior_worlds() {
        let mut belief = seeded(Color::Zero);
        belief.submit(Action::Move(Move::new(2, 1)));
        belief.update(&ServerMessage::FlipCount(3));
        assert_eq!(belief.infoset(), &InfoSet::initial());
    }

    #[test]
    fn test_opponent_move_branches_over_hypotheses() {
        let mut belief = seeded(Color::Zero);
        let mut truth = Board::new();
        report(&mut belief, &mut truth, Move::new(2, 1), Color::Zero);
        report(&mut belief, &mut truth, Move::new(1, 1), Color::One);

        assert!(belief.infoset().worlds().contains(&truth));
        assert!(belief
            .infoset()
            .is_consistent_with(&truth.visible_projection(Color::Zero), Color::Zero));
        assert_eq!(belief.resets(), 0);
    }

    #[test]
    fn test_opponent_pass_keeps_matching_worlds() {
        let mut belief = seeded(Color::Zero);
        let before = belief.infoset().clone();

        belief.update(&ServerMessage::FlipCount(0));
        belief.update(&ServerMessage::Board(
            Board::new().visible_projection(Color::Zero),
        ));

        assert_eq!(belief.infoset(), &before);
        assert_eq!(belief.turn(), 1);
    }

    #[test]
    fn test_opponent_pass_matching_nothing_keeps_prior_worlds() {
        let mut belief = seeded(Color::Zero);

        belief.update(&ServerMessage::FlipCount(0));
        belief.update(&ServerMessage::Board(Board::EMPTY));

        assert_eq!(belief.infoset(), &InfoSet::initial());
        assert_eq!(belief.resets(), 0);
    }

    #[test]
    fn test_stale_board_after_own_move_resets_to_visible_board() {
        let mut belief = seeded(Color::Zero);
        let stale = Board::new().visible_projection(Color::Zero);

        belief.submit(Action::Move(Move::new(2, 1)));
        belief.update(&ServerMessage::FlipCount(1));
        assert_eq!(belief.infoset().len(), 1);

        belief.update(&ServerMessage::Board(stale));

        assert_eq!(belief.infoset().worlds(), &[stale]);
        assert_eq!(belief.resets(), 1);
    }

    #[test]
    fn test_rejected_move_removes_worlds_where_it_was_legal() {
        let mut belief = seeded(Color::Zero);

        // Occupied in the only world, so it was never legal; nothing is ruled out.
        belief.submit(Action::Move(Move::new(2, 2)));
        belief.update(&ServerMessage::IllegalCount {
            own: 1,
            opponent: 0,
        });
        belief.update(&ServerMessage::Board(
            Board::new().visible_projection(Color::Zero),
        ));

        assert_eq!(belief.infoset(), &InfoSet::initial());
        assert_eq!(belief.illegal_counts(), (1, 0));
        assert_eq!(belief.turn(), 0);
    }

    #[test]
    fn test_rejected_move_legal_everywhere_resets_to_visible_board() {
        let mut belief = seeded(Color::Zero);
        belief.submit(Action::Move(Move::new(2, 1)));
        belief.update(&ServerMessage::IllegalCount {
            own: 1,
            opponent: 0,
        });

        let visible = Board::new().visible_projection(Color::Zero);
        assert_eq!(belief.infoset().worlds(), &[visible]);
        assert_eq!(belief.resets(), 1);
    }

    #[test]
    fn test_unexplainable_opponent_move_resets() {
        let mut belief = seeded(Color::Zero);
        belief.update(&ServerMessage::FlipCount(5));
        belief.update(&ServerMessage::Board(
            Board::new().visible_projection(Color::Zero),
        ));

        assert_eq!(belief.infoset().len(), 1);
        assert_eq!(belief.resets(), 1);
    }

    #[test]
    fn test_new_identity_starts_over() {
        let mut belief = seeded(Color::Zero);
        belief.update(&ServerMessage::FlipCount(0));
        belief.update(&ServerMessage::GameOver(Outcome::Draw));
        belief.update(&ServerMessage::Id(Color::One));

        assert_eq!(belief.color(), Color::One);
        assert_eq!(belief.turn(), 0);
    }
}
