//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in the order they are checked
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::line_owner(cells, line) == Some(player))
    }

    /// The player holding every cell of `line`, if any
    pub fn line_owner(cells: &[Cell; 9], line: &[usize; 3]) -> Option<Player> {
        let mut x_count = 0;
        let mut o_count = 0;

        for &idx in line {
            match cells[idx] {
                Cell::X => x_count += 1,
                Cell::O => o_count += 1,
                Cell::Empty => return None,
            }
        }

        if x_count == 3 {
            Some(Player::X)
        } else if o_count == 3 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Owner of the first complete line, scanning rows, then columns, then diagonals
    pub fn first_complete_line(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_owner(cells, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::X;
        cells[4] = Cell::X;
        cells[6] = Cell::X;

        assert_eq!(LineAnalyzer::first_complete_line(&cells), Some(Player::X));
    }

    #[test]
    fn test_mixed_line_has_no_owner() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::O;
        cells[2] = Cell::X;

        assert_eq!(LineAnalyzer::line_owner(&cells, &WINNING_LINES[0]), None);
    }

    #[test]
    fn test_two_in_a_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[4] = Cell::X;

        assert_eq!(LineAnalyzer::first_complete_line(&cells), None);
    }
}
