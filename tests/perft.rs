/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use mole::{Board, Color};

/// Counts leaf nodes `depth` plies from `board`, where a forced pass counts as a ply.
///
/// Uses make/unmake on a single board.
fn perft(board: &mut Board, to_move: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    if board.is_terminal() {
        return 1;
    }

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return perft(board, to_move.opponent(), depth - 1);
    }

    let mut nodes = 0;
    for mv in moves {
        let captured = board.make_move(mv, to_move).unwrap();
        nodes += perft(board, to_move.opponent(), depth - 1);
        board.unmake_move(mv, to_move, captured);
    }
    nodes
}

/// Same as [`perft`], but copies the board for every move.
fn perft_copy(board: Board, to_move: Color, depth: usize) -> u64 {
    if depth == 0 || board.is_terminal() {
        return 1;
    }

    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return perft_copy(board, to_move.opponent(), depth - 1);
    }

    moves
        .into_iter()
        .map(|mv| {
            let (next, _) = board.with_move_made(mv, to_move).unwrap();
            perft_copy(next, to_move.opponent(), depth - 1)
        })
        .sum()
}

fn test_perft_nodes(depth: usize, expected: u64) {
    let mut board = Board::new();
    let res = perft(&mut board, Color::Zero, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed");
    assert_eq!(board, Board::new(), "PERFT({depth}) did not restore the board");
}

#[test]
fn test_perft_startpos() {
    test_perft_nodes(1, 4);
    test_perft_nodes(2, 12);
    test_perft_nodes(3, 56);
}

#[test]
fn test_make_unmake_agrees_with_copy_make() {
    for depth in 1..=6 {
        let mut board = Board::new();
        assert_eq!(
            perft(&mut board, Color::Zero, depth),
            perft_copy(Board::new(), Color::Zero, depth),
            "PERFT({depth}) disagreement"
        );
    }
}
