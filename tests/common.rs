//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tictactoe_agent::{Board, GameOutcome, Player};

/// Play uniformly random legal moves from an empty board.
///
/// Returns every board from the empty one to the terminal one, and the
/// outcome.
pub fn random_game(seed: u64) -> (Vec<Board>, GameOutcome) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut boards = vec![board];
    let mut player = Player::X;

    loop {
        if let Some(outcome) = board.find_winner() {
            return (boards, outcome);
        }
        let free = board.free_positions();
        let position = *free.choose(&mut rng).expect("non-terminal board has a free cell");
        board.place(player, position).unwrap();
        boards.push(board);
        player = player.opponent();
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
