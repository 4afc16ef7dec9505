/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{builder::PossibleValue, Args, Parser, Subcommand, ValueEnum};

use crate::{Board, Color, Strategy, DEFAULT_DEPTH, DEFAULT_MAX_ILLEGAL};

/// A hidden-view Othello agent that plays by information-set minimax.
#[derive(Debug, Clone, Parser)]
#[command(version, about, rename_all = "lower")]
pub struct Cli {
    /// Increase logging verbosity (`-v` info, `-vv` debug, `-vvv` trace).
    ///
    /// The `RUST_LOG` environment variable takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// What to do. Defaults to playing one game over stdin/stdout.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// A command to be executed.
#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum Command {
    /// Play one game against a match authority.
    ///
    /// Messages are read from stdin and answered on stdout unless `--connect` is given.
    Play {
        /// Connect to the authority at this address (e.g. `localhost:8000`) instead of using stdin/stdout.
        #[arg(short, long)]
        connect: Option<String>,

        #[command(flatten)]
        player: PlayerArgs,
    },

    /// Play a game between two built-in strategies and print the result.
    #[command(alias = "self")]
    SelfPlay {
        /// Strategy of the player who moves first.
        #[arg(long, default_value_t = Strategy::InfoSet)]
        black: Strategy,

        /// Strategy of the player who moves second.
        #[arg(long, default_value_t = Strategy::Random)]
        white: Strategy,

        /// Search depth of both players.
        #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
        depth: usize,

        /// Seed for random players.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Illegal moves a player may make before forfeiting.
        #[arg(long, default_value_t = DEFAULT_MAX_ILLEGAL)]
        max_illegal: u32,
    },

    /// Shows all legal moves of a player on a board.
    Moves {
        /// The board, as 36 cells of `0`, `1`, or `.`, top row first.
        board: Board,

        /// The player to move.
        #[arg(short, long, default_value_t = Color::Zero)]
        player: Color,
    },

    /// Print an evaluation of a board.
    Eval {
        /// The board, as 36 cells of `0`, `1`, or `.`, top row first.
        board: Board,

        /// The player to evaluate for.
        #[arg(short, long, default_value_t = Color::Zero)]
        player: Color,

        /// Number of turns played so far.
        #[arg(short, long, default_value_t = 0)]
        turn: usize,
    },
}

impl Default for Command {
    /// Play over stdin/stdout with the default player.
    fn default() -> Self {
        Self::Play {
            connect: None,
            player: PlayerArgs::default(),
        }
    }
}

/// Options describing the player used by [`Command::Play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
pub struct PlayerArgs {
    /// Decision strategy.
    #[arg(long, default_value_t = Strategy::InfoSet)]
    pub strategy: Strategy,

    /// Number of plies to search ahead.
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Seed for the random strategy.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl Default for PlayerArgs {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            depth: DEFAULT_DEPTH,
            seed: None,
        }
    }
}

impl ValueEnum for Strategy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Strategy::InfoSet, Strategy::Minimax, Strategy::Random]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = PossibleValue::new(match self {
            Strategy::InfoSet => "ismm",
            Strategy::Minimax => "minimax",
            Strategy::Random => "random",
        });

        // Some strategies have additional aliases
        let value = match self {
            Strategy::InfoSet => value.aliases(["infoset", "isminimax"]),
            Strategy::Minimax => value.alias("mm"),
            Strategy::Random => value,
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_plays_over_stdio() {
        let cli = Cli::try_parse_from(["mole"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());

        let Command::Play { connect, player } = Command::default() else {
            panic!("default command should be `play`");
        };
        assert_eq!(connect, None);
        assert_eq!(player.depth, DEFAULT_DEPTH);
    }

    #[test]
    fn test_parse_play() {
        let cli =
            Cli::try_parse_from(["mole", "-vv", "play", "--strategy", "mm", "-d", "2"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let Some(Command::Play { player, .. }) = cli.command else {
            panic!("expected `play`");
        };
        assert_eq!(player.strategy, Strategy::Minimax);
        assert_eq!(player.depth, 2);
    }

    #[test]
    fn test_parse_moves() {
        let flat = Board::new().to_flat();
        let cli = Cli::try_parse_from(["mole", "moves", flat.as_str(), "--player", "1"]).unwrap();

        let Some(Command::Moves { board, player }) = cli.command else {
            panic!("expected `moves`");
        };
        assert_eq!(board, Board::new());
        assert_eq!(player, Color::One);
    }

    #[test]
    fn test_strategy_names_and_aliases() {
        for strategy in Strategy::value_variants() {
            let name = strategy.to_string();
            assert_eq!(Strategy::from_str(&name, false), Ok(*strategy));
        }

        assert_eq!(Strategy::from_str("infoset", false), Ok(Strategy::InfoSet));
        assert_eq!(Strategy::from_str("mm", false), Ok(Strategy::Minimax));
        assert!(Strategy::from_str("greedy", false).is_err());

        let cli = Cli::try_parse_from(["mole", "selfplay", "--white", "random"]).unwrap();
        let Some(Command::SelfPlay { black, white, .. }) = cli.command else {
            panic!("expected `selfplay`");
        };
        assert_eq!(black, Strategy::InfoSet);
        assert_eq!(white, Strategy::Random);
    }

    #[test]
    fn test_rejects_bad_board() {
        assert!(Cli::try_parse_from(["mole", "eval", "0101"]).is_err());
    }
}
