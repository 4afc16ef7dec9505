/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, BufReader},
    net::TcpStream,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use mole::{
    Cli, Color, Command, Engine, Evaluator, MatchConfig, PlayerArgs, Referee, Strategy,
};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command.unwrap_or_default()) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

/// Logs go to stderr, since stdout may be the game connection.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Play { connect, player } => play(connect, player),

        Command::SelfPlay {
            black,
            white,
            depth,
            seed,
            max_illegal,
        } => self_play(black, white, depth, seed, max_illegal),

        Command::Moves { board, player } => {
            let moves = board.legal_moves(player);

            // If there are none, print "(none)"
            let moves_string = if moves.is_empty() {
                String::from("(none)")
            } else {
                moves
                    .into_iter()
                    .map(|mv| mv.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            println!("{board}\n\n{moves_string}");
            Ok(())
        }

        Command::Eval {
            board,
            player,
            turn,
        } => {
            let evaluator = Evaluator::new(&board, turn);
            print!("{evaluator}\nScore: ");
            println!("{}", evaluator.eval_for(player));
            Ok(())
        }
    }
}

fn play(connect: Option<String>, args: PlayerArgs) -> Result<()> {
    let mut engine = Engine::new(args.strategy.build(args.depth, args.seed));

    let outcome = match connect {
        Some(addr) => {
            let stream = TcpStream::connect(&addr)
                .with_context(|| format!("Failed to connect to {addr}"))?;
            let reader = BufReader::new(
                stream
                    .try_clone()
                    .context("Failed to split the connection")?,
            );
            engine.run(reader, stream)?
        }

        None => engine.run(BufReader::new(io::stdin()), io::stdout())?,
    };

    match outcome {
        Some(outcome) => eprintln!("{outcome}"),
        None => eprintln!("Game ended without a result"),
    }

    Ok(())
}

fn self_play(
    black: Strategy,
    white: Strategy,
    depth: usize,
    seed: Option<u64>,
    max_illegal: u32,
) -> Result<()> {
    let mut zero = black.build(depth, seed);
    let mut one = white.build(depth, seed.map(|s| s.wrapping_add(1)));

    let result = Referee::new(MatchConfig { max_illegal }).play([zero.as_mut(), one.as_mut()]);

    println!("{}\n", result.board);
    for color in Color::all() {
        println!(
            "{color:?} ({}): {} discs, {} illegal moves",
            if color == Color::Zero { black } else { white },
            result.board.count_pieces(color),
            result.illegal[color.index()]
        );
    }

    match (result.winner, result.forfeited) {
        (Some(winner), Some(loser)) => println!("{winner:?} wins: {loser:?} forfeited"),
        (Some(winner), None) => println!("{winner:?} wins after {} turns", result.turns),
        (None, _) => println!("Draw after {} turns", result.turns),
    }

    Ok(())
}
