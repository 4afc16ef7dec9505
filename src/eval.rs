/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{tune, Board, Color, Score};

/// Evaluates `world` from `player`'s perspective, `turn` turns into the game.
///
/// Shorthand for [`Evaluator::eval_for`].
#[inline(always)]
pub fn evaluate(world: &Board, player: Color, turn: usize) -> Score {
    Evaluator::new(world, turn).eval_for(player)
}

/// Stage of the game, which decides how the evaluation terms are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Mobility is boosted.
    Opening,

    /// All terms at their base weight.
    Midgame,

    /// Disc difference is boosted.
    Late,

    /// Only disc difference matters.
    Endgame,
}

impl Phase {
    /// Determines the phase of the game from the number of turns played.
    #[inline(always)]
    pub const fn at(turn: usize) -> Self {
        if turn >= tune::endgame_turn!() {
            Self::Endgame
        } else if turn >= tune::late_game_turn!() {
            Self::Late
        } else if turn < tune::early_game_turn!() {
            Self::Opening
        } else {
            Self::Midgame
        }
    }
}

/// Raw differences (own minus opponent) that make up an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvalTerms {
    pub discs: i32,
    pub corners: i32,
    pub edges: i32,
    pub mobility: i32,
}

/// Encapsulates the logic of scoring a fully-known board.
///
/// A positive score is good for the player being evaluated for, a negative one is good for their opponent.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    /// The board to evaluate.
    board: &'a Board,

    /// Stage of the game the board is in.
    phase: Phase,
}

impl<'a> Evaluator<'a> {
    /// Construct a new [`Evaluator`] for `board`, `turn` turns into the game.
    #[inline(always)]
    pub fn new(board: &'a Board, turn: usize) -> Self {
        Self {
            board,
            phase: Phase::at(turn),
        }
    }

    /// Computes the raw term differences from `color`'s perspective.
    pub fn terms(&self, color: Color) -> EvalTerms {
        let opp = color.opponent();
        let diff =
            |f: fn(&Board, Color) -> u8| f(self.board, color) as i32 - f(self.board, opp) as i32;

        EvalTerms {
            discs: diff(Board::count_pieces),
            corners: diff(Board::count_corner_pieces),
            edges: diff(Board::count_edge_pieces),
            mobility: self.board.legal_cells(color).population() as i32
                - self.board.legal_cells(opp).population() as i32,
        }
    }

    /// Evaluate the board from `color`'s perspective.
    pub fn eval_for(&self, color: Color) -> Score {
        // Near the end every disc is countable, so nothing else matters.
        if self.phase == Phase::Endgame {
            let discs = self.board.count_pieces(color) as i32
                - self.board.count_pieces(color.opponent()) as i32;
            return Score::from(discs);
        }

        let terms = self.terms(color);

        let disc_multiplier = if self.phase == Phase::Late {
            tune::late_game_multiplier!()
        } else {
            1.0
        };

        let mobility_multiplier = if self.phase == Phase::Opening {
            tune::early_game_multiplier!()
        } else {
            1.0
        };

        Score(
            terms.discs as f64 * tune::disc_weight!() * disc_multiplier
                + terms.corners as f64 * tune::corner_weight!()
                + terms.edges as f64 * tune::edge_weight!()
                + terms.mobility as f64 * tune::mobility_weight!() * mobility_multiplier,
        )
    }
}

impl fmt::Display for Evaluator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.board)?;
        writeln!(f, "Phase: {:?}", self.phase)?;

        for color in Color::all() {
            let terms = self.terms(color);
            writeln!(
                f,
                "{color:?}: discs {:+} corners {:+} edges {:+} mobility {:+} => {}",
                terms.discs,
                terms.corners,
                terms.edges,
                terms.mobility,
                self.eval_for(color)
            )?;
        }

        Ok(())
    }
}
