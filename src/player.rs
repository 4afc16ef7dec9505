/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use log::{info, warn};
use rand::{rngs::SmallRng, seq::IndexedRandom, SeedableRng};

use crate::{
    Action, Belief, Color, InfoSet, Move, Search, SearchConfig, SearchResult, ServerMessage,
};

/// Anything that can take part in a game of hidden-view Othello.
///
/// A player is told about every message the match authority sends it,
/// and is asked for an action whenever it is its turn.
pub trait Player {
    /// Name announced to the match authority.
    fn name(&self) -> String;

    /// Observes one message from the match authority.
    fn on_message(&mut self, msg: &ServerMessage);

    /// Decides what to do on this player's turn.
    fn choose_action(&mut self) -> Action;
}

/// Every strategy a [`Player`] can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Searches over every world in its belief.
    #[default]
    InfoSet,

    /// Searches as if the first world in its belief were the truth.
    Minimax,

    /// Places a disc on a random cell that does not visibly hold its own disc.
    Random,
}

impl Strategy {
    /// Builds a player following this strategy.
    ///
    /// `depth` is ignored by [`Strategy::Random`], and `seed` by the searching strategies.
    pub fn build(self, depth: usize, seed: Option<u64>) -> Box<dyn Player> {
        let config = SearchConfig::new(depth);
        match self {
            Self::InfoSet => Box::new(InfoSetPlayer::new(config)),
            Self::Minimax => Box::new(MinimaxPlayer::new(config)),
            Self::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InfoSet => "ismm",
            Self::Minimax => "minimax",
            Self::Random => "random",
        };
        write!(f, "{name}")
    }
}

/// Shared bookkeeping for every strategy: track the belief and report noteworthy messages.
fn observe(belief: &mut Belief, msg: &ServerMessage) {
    belief.update(msg);

    match msg {
        ServerMessage::Id(color) => info!("Playing as {color:?}"),
        ServerMessage::IllegalCount { own, opponent } => {
            info!("Illegal moves -> You: {own}, Opponent: {opponent}")
        }
        ServerMessage::GameOver(outcome) => info!("Game over: {outcome}"),
        _ => {}
    }
}

/// Runs a search for `belief`'s player over `infoset` and records the chosen action.
fn search_and_submit(belief: &mut Belief, infoset: &InfoSet, config: SearchConfig) -> Action {
    let SearchResult {
        bestmove, score, ..
    } = Search::new(infoset, belief.color(), belief.turn(), config).start();

    let action = Action::from(bestmove);
    info!(
        "Turn {}: {action} (score {score}, {} worlds)",
        belief.turn(),
        infoset.len()
    );

    belief.submit(action);
    action
}

/// Chooses moves by information-set minimax over its whole belief.
#[derive(Debug, Clone)]
pub struct InfoSetPlayer {
    belief: Belief,
    config: SearchConfig,
}

impl InfoSetPlayer {
    /// Constructs an [`InfoSetPlayer`] searching with `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            belief: Belief::new(Color::default()),
            config,
        }
    }

    /// The current belief state.
    #[inline(always)]
    pub const fn belief(&self) -> &Belief {
        &self.belief
    }
}

impl Player for InfoSetPlayer {
    fn name(&self) -> String {
        String::from("isMinimax")
    }

    fn on_message(&mut self, msg: &ServerMessage) {
        observe(&mut self.belief, msg);
    }

    fn choose_action(&mut self) -> Action {
        let infoset = self.belief.infoset().clone();
        search_and_submit(&mut self.belief, &infoset, self.config)
    }
}

/// Chooses moves by plain minimax, treating the first believed world as certain.
///
/// It tracks the same belief as an [`InfoSetPlayer`] and differs only in what it searches.
#[derive(Debug, Clone)]
pub struct MinimaxPlayer {
    belief: Belief,
    config: SearchConfig,
}

impl MinimaxPlayer {
    /// Constructs a [`MinimaxPlayer`] searching with `config`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            belief: Belief::new(Color::default()),
            config,
        }
    }

    /// The current belief state.
    #[inline(always)]
    pub const fn belief(&self) -> &Belief {
        &self.belief
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> String {
        String::from("Minimax")
    }

    fn on_message(&mut self, msg: &ServerMessage) {
        observe(&mut self.belief, msg);
    }

    fn choose_action(&mut self) -> Action {
        let guess = match self.belief.infoset().worlds().first() {
            Some(world) => InfoSet::singleton(*world),
            None => InfoSet::singleton(*self.belief.visible()),
        };
        search_and_submit(&mut self.belief, &guess, self.config)
    }
}

/// Places discs at random, paying no attention to legality.
///
/// Useful as a sparring partner: its mistakes exercise the illegal-move path.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    belief: Belief,
    rng: SmallRng,
}

impl RandomPlayer {
    /// Constructs a [`RandomPlayer`], seeded for reproducibility if `seed` is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Self {
            belief: Belief::new(Color::default()),
            rng,
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        String::from("Random")
    }

    fn on_message(&mut self, msg: &ServerMessage) {
        observe(&mut self.belief, msg);
    }

    fn choose_action(&mut self) -> Action {
        let cells = self.belief.visible().empty_cells().iter().collect::<Vec<Move>>();

        let action = match cells.choose(&mut self.rng) {
            Some(&mv) => Action::Move(mv),
            None => {
                warn!("No visibly empty cells; passing");
                Action::Pass
            }
        };

        self.belief.submit(action);
        action
    }
}
