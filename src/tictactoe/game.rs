//! Game outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Player;

/// Terminal outcome of a game
///
/// An ongoing game has no outcome; [`Board::find_winner`] returns `None` for it.
///
/// [`Board::find_winner`]: super::Board::find_winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// The winning player, if the game was not drawn
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Win(player) => write!(f, "Player {} won!", player.id()),
            GameOutcome::Draw => write!(f, "Nobody won"),
        }
    }
}
