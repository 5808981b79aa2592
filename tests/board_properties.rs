//! Board invariants checked over many random games.

mod common;

use std::collections::HashSet;

use common::random_game;
use tictactoe_agent::{
    Board, GameOutcome, Player, Position,
    tictactoe::{Cell, WINNING_LINES},
};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

fn has_complete_line(board: &Board) -> bool {
    let cells = board.cells();
    WINNING_LINES.iter().any(|line| {
        let first = cells[line[0]];
        first != Cell::Empty && line.iter().all(|&i| cells[i] == first)
    })
}

#[test]
fn top_row_wins_for_player_one() {
    let mut board = Board::new();
    for (player, position) in [
        (Player::X, pos(0, 0)),
        (Player::O, pos(1, 0)),
        (Player::X, pos(0, 1)),
        (Player::O, pos(1, 1)),
    ] {
        board.place(player, position).unwrap();
        assert_eq!(board.find_winner(), None);
    }

    board.place(Player::X, pos(0, 2)).unwrap();
    assert_eq!(board.find_winner(), Some(GameOutcome::Win(Player::X)));
}

#[test]
fn full_board_without_line_is_a_draw() {
    let board = Board::parse("XOX/XXO/OXO").unwrap();
    assert!(board.is_full());
    assert_eq!(board.find_winner(), Some(GameOutcome::Draw));
}

#[test]
fn no_outcome_until_line_or_full_board() {
    for seed in 0..300 {
        let (boards, outcome) = random_game(seed);
        let (last, earlier) = boards.split_last().unwrap();

        for board in earlier {
            assert_eq!(board.find_winner(), None, "premature outcome on\n{board}");
            assert!(!has_complete_line(board));
        }

        match outcome {
            GameOutcome::Win(player) => {
                assert!(has_complete_line(last));
                assert!(last.has_won(player));
                assert!(!last.has_won(player.opponent()));
            }
            GameOutcome::Draw => {
                assert!(last.is_full());
                assert!(!has_complete_line(last));
            }
        }
    }
}

#[test]
fn free_positions_match_placements() {
    for seed in 0..100 {
        let (boards, _) = random_game(seed);
        for (placed, board) in boards.iter().enumerate() {
            let free = board.free_positions();
            assert_eq!(free.len(), 9 - placed);
            assert_eq!(board.occupied_count(), placed);

            let unique: HashSet<_> = free.iter().collect();
            assert_eq!(unique.len(), free.len());
            assert!(free.windows(2).all(|w| w[0].index() < w[1].index()));
            assert!(free.iter().all(|&p| board.get(p) == Cell::Empty));
        }
    }
}

#[test]
fn identifier_depends_only_on_contents() {
    // the same position reached through different move orders
    let mut a = Board::new();
    a.place(Player::X, pos(0, 0)).unwrap();
    a.place(Player::O, pos(1, 1)).unwrap();
    a.place(Player::X, pos(2, 2)).unwrap();

    let mut b = Board::new();
    b.place(Player::X, pos(2, 2)).unwrap();
    b.place(Player::O, pos(1, 1)).unwrap();
    b.place(Player::X, pos(0, 0)).unwrap();

    assert_eq!(a.identifier(), b.identifier());
    assert_eq!(a.identifier(), Board::parse("X../.O./..X").unwrap().identifier());
}

#[test]
fn distinct_boards_have_distinct_identifiers() {
    let mut seen = std::collections::HashMap::new();
    for seed in 0..300 {
        let (boards, _) = random_game(seed);
        for board in boards {
            let previous = seen.insert(board.identifier(), board);
            if let Some(previous) = previous {
                assert_eq!(previous, board);
            }
        }
    }
}

#[test]
fn occupied_cell_is_rejected() {
    let mut board = Board::parse("X../.../...").unwrap();
    let before = board;
    assert!(board.place(Player::O, pos(0, 0)).is_err());
    assert_eq!(board, before);
}
