//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{digest::BoardDigest, game::GameOutcome, lines::LineAnalyzer};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Byte fed to the board digest
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

/// A player in the game. `X` is player one and moves first in the standard game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Numeric player id: 1 for X, 2 for O
    pub fn id(self) -> u8 {
        match self {
            Player::X => 1,
            Player::O => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A validated board coordinate, `(row, col)` with both in `0..3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Create a new position, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Position { row, col })
        } else {
            Err(crate::Error::OutOfBounds { row, col })
        }
    }

    /// Position for a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Self::new(index / 3, index % 3)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(&self) -> usize {
        self.row * 3 + self.col
    }
}

impl TryFrom<(usize, usize)> for Position {
    type Error = crate::Error;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Position::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 playing grid
///
/// Cells are stored row-major. A cell that has been placed is never cleared;
/// a fresh board is created for every episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Parse a board from nine cell characters.
    ///
    /// Whitespace and `/` row separators are ignored, so `"XO./.X./..O"` and
    /// `"XO. .X. ..O"` describe the same board. No turn-order validation is
    /// performed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoard`] if the text does not hold exactly
    /// nine valid cell characters.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();

        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoard {
                input: s.to_string(),
                reason: format!("expected 9 cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidBoard {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at cell {i}"),
            })?;
        }

        Ok(Board { cells })
    }

    /// Get cell at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Put `player`'s token on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if the cell is occupied. Callers
    /// are expected to choose from [`free_positions`](Self::free_positions),
    /// so this indicates a bug and must abort the episode.
    pub fn place(&mut self, player: Player, pos: Position) -> Result<(), crate::Error> {
        let cell = &mut self.cells[pos.index()];
        if *cell != Cell::Empty {
            return Err(crate::Error::IllegalMove { position: pos });
        }
        *cell = player.to_cell();
        Ok(())
    }

    /// Outcome of the game, or `None` while it is still being played.
    ///
    /// Rows are checked before columns, columns before diagonals, and lines
    /// before the full-board draw check.
    pub fn find_winner(&self) -> Option<GameOutcome> {
        if let Some(player) = LineAnalyzer::first_complete_line(&self.cells) {
            Some(GameOutcome::Win(player))
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.find_winner().is_some()
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Empty cells in row-major order
    pub fn free_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position {
                row: i / 3,
                col: i % 3,
            })
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Knowledge-base key for the current cell contents
    pub fn identifier(&self) -> BoardDigest {
        BoardDigest::of_cells(&self.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
