/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::{debug, trace};

use crate::{evaluate, tune, Board, Color, InfoSet, Move, Score};

/// Depth searched when none is specified.
pub const DEFAULT_DEPTH: usize = tune::default_search_depth!();

/// The result of a search, containing the best move found, score, and total nodes searched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// Number of nodes searched.
    pub nodes: u64,

    /// Best move found during the search, or `None` if the player should pass.
    pub bestmove: Option<Move>,

    /// Expected evaluation after `bestmove` is made, from the searching player's perspective.
    pub score: Score,
}

impl Default for SearchResult {
    /// A default search result should initialize to a *very bad* value,
    /// since there isn't a move to play.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            bestmove: None,
            score: -Score::INF,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of plies to look ahead.
    pub max_depth: usize,
}

impl SearchConfig {
    /// Constructs a [`SearchConfig`] that looks `max_depth` plies ahead.
    #[inline(always)]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Executes a minimax search over every world of an [`InfoSet`] at once.
///
/// At each node, only moves legal in *every* world are expanded, and applying a move
/// keeps the worlds where it was legal. Leaves score the average evaluation of their
/// worlds, always from the perspective of the player who started the search.
pub struct Search<'a> {
    /// The belief to search from.
    infoset: &'a InfoSet,

    /// The player choosing a move.
    root: Color,

    /// Turn number at the root, used by the evaluation.
    turn: usize,

    /// The result of the search, updated as-needed during search.
    result: SearchResult,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] choosing a move for `root` among the worlds of `infoset`.
    #[inline(always)]
    pub fn new(infoset: &'a InfoSet, root: Color, turn: usize, config: SearchConfig) -> Self {
        Self {
            infoset,
            root,
            turn,
            result: SearchResult::default(),
            config,
        }
    }

    /// Start the search, returning the best move found.
    ///
    /// Root candidates are the moves legal in every world. If there are none,
    /// the moves legal in *any* world are tried instead, since guessing beats passing.
    /// Candidates are tried in row-major order and the first of equally-scored moves wins.
    pub fn start(mut self) -> SearchResult {
        debug!(
            "Starting depth {} search for {:?} over {} worlds on turn {}",
            self.config.max_depth,
            self.root,
            self.infoset.len(),
            self.turn
        );

        let common = self.infoset.common_moves(self.root);
        let candidates = if common.is_empty() {
            self.infoset.union_moves(self.root)
        } else {
            common
        };

        let depth = self.config.max_depth.saturating_sub(1);
        let mut alpha = -Score::INF;

        for mv in candidates {
            let next = self.infoset.branch(mv, self.root);
            if next.is_empty() {
                continue;
            }

            let score = self.minimax(
                &next,
                depth,
                self.root.opponent(),
                self.turn + 1,
                alpha,
                Score::INF,
            );
            trace!("{mv} scored {score} over {} worlds", next.len());

            if self.result.bestmove.is_none() || score > self.result.score {
                self.result.bestmove = Some(mv);
                self.result.score = score;
                alpha = alpha.max(score);
            }
        }

        match self.result.bestmove {
            Some(mv) => debug!(
                "Best move {mv} with score {} after {} nodes",
                self.result.score, self.result.nodes
            ),
            None => {
                self.result.score = self.leaf(self.infoset, self.turn);
                debug!("No candidate moves for {:?}; passing", self.root);
            }
        }

        self.result
    }

    /// Primary location of search logic.
    ///
    /// Uses [alpha-beta](https://www.chessprogramming.org/Alpha-Beta) minimax,
    /// maximizing on the root player's turns and minimizing on the opponent's.
    fn minimax(
        &mut self,
        infoset: &InfoSet,
        depth: usize,
        to_move: Color,
        turn: usize,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.result.nodes += 1;

        if depth == 0 || infoset.is_empty() || infoset.iter().all(Board::is_terminal) {
            return self.leaf(infoset, turn);
        }

        let moves = infoset.common_moves(to_move);
        if moves.is_empty() {
            return self.leaf(infoset, turn);
        }

        let maximizing = to_move == self.root;
        let mut best = if maximizing { -Score::INF } else { Score::INF };
        let mut searched = false;

        for mv in moves {
            let next = infoset.branch(mv, to_move);
            if next.is_empty() {
                continue;
            }
            searched = true;

            let score =
                self.minimax(&next, depth - 1, to_move.opponent(), turn + 1, alpha, beta);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                break;
            }
        }

        if searched {
            best
        } else {
            self.leaf(infoset, turn)
        }
    }

    /// Averages the evaluation of every world, or scores a draw if there are none.
    #[inline(always)]
    fn leaf(&self, infoset: &InfoSet, turn: usize) -> Score {
        Score::mean(infoset.iter().map(|world| evaluate(world, self.root, turn)))
    }
}
