//! Uniform random mover used as a training and evaluation opponent

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Player, Position},
};

/// Plays a uniformly random free cell; never learns
pub struct RandomAgent {
    name: String,
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        Self {
            name: format!("Random-{player}"),
            player,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a random agent with a deterministic seed
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(player)
        }
    }
}

impl Agent for RandomAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, board: &Board) -> Result<Position> {
        board
            .free_positions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_free_cells() {
        let board = Board::parse("XOX/O.X/OXO").unwrap();
        let mut agent = RandomAgent::with_seed(Player::X, 7);
        for _ in 0..10 {
            assert_eq!(agent.next_move(&board).unwrap(), Position::new(1, 1).unwrap());
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = Board::new();
        let mut a = RandomAgent::with_seed(Player::O, 99);
        let mut b = RandomAgent::with_seed(Player::O, 99);
        for _ in 0..20 {
            assert_eq!(a.next_move(&board).unwrap(), b.next_move(&board).unwrap());
        }
    }

    #[test]
    fn test_every_free_cell_is_reachable() {
        let board = Board::parse("X.O/.../O.X").unwrap();
        let mut agent = RandomAgent::with_seed(Player::X, 3);
        let seen: std::collections::HashSet<Position> =
            (0..200).map(|_| agent.next_move(&board).unwrap()).collect();
        assert_eq!(seen.len(), board.free_positions().len());
    }

    #[test]
    fn test_full_board() {
        let board = Board::parse("XOX/XOO/OXX").unwrap();
        let mut agent = RandomAgent::new(Player::O);
        assert!(matches!(agent.next_move(&board), Err(Error::NoValidMoves)));
    }
}
