//! Epsilon-greedy tabular learner
//!
//! The agent keeps one action table per board state it has been asked to move
//! from. While learning it explores with probability ε and otherwise plays the
//! action with the best mean return. Every move of an episode is buffered and,
//! once the outcome is known, credited with the same terminal reward.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::{
    Error, Result,
    app::AgentConfig,
    knowledge::KnowledgeBase,
    ports::Agent,
    tictactoe::{Board, BoardDigest, GameOutcome, Player, Position},
};

/// Reward for a game won by this agent
pub const WIN_REWARD: f64 = 1.0;
/// Reward for a drawn game
pub const DRAW_REWARD: f64 = 0.0;
/// Reward for a game lost by this agent
pub const LOSS_REWARD: f64 = -1.0;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

pub(crate) fn validate_epsilon(epsilon: f64) -> Result<()> {
    if (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration {
            message: format!("epsilon must be within [0, 1], got {epsilon}"),
        })
    }
}

/// Epsilon-greedy agent with an exclusively owned knowledge base
#[derive(Debug, Clone)]
pub struct EpsilonGreedyAgent {
    name: String,
    player: Player,
    epsilon: f64,
    learning: bool,
    buffer: Vec<(BoardDigest, usize)>,
    knowledge: KnowledgeBase,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl EpsilonGreedyAgent {
    /// Create a new agent with an empty knowledge base and learning disabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `epsilon` is not in `[0, 1]`.
    pub fn new(player: Player, epsilon: f64) -> Result<Self> {
        validate_epsilon(epsilon)?;
        Ok(Self {
            name: format!("EpsilonGreedy-{player}"),
            player,
            epsilon,
            learning: false,
            buffer: Vec::new(),
            knowledge: KnowledgeBase::new(),
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    /// Create an agent from a validated configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let mut agent = Self::new(config.player, config.epsilon)?;
        if let Some(name) = &config.name {
            agent.name = name.clone();
        }
        if let Some(seed) = config.seed {
            agent = agent.with_seed(seed);
        }
        Ok(agent)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Continue from a previously learned knowledge base
    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Replace the exploration rate, keeping everything learned so far
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `epsilon` is not in `[0, 1]`.
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        validate_epsilon(epsilon)?;
        self.epsilon = epsilon;
        Ok(self)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// (state, action index) pairs recorded since the last reset
    pub fn episode_buffer(&self) -> &[(BoardDigest, usize)] {
        &self.buffer
    }

    /// Reward this agent assigns to a terminal outcome
    pub fn reward(&self, outcome: GameOutcome) -> f64 {
        match outcome {
            GameOutcome::Win(winner) if winner == self.player => WIN_REWARD,
            GameOutcome::Win(_) => LOSS_REWARD,
            GameOutcome::Draw => DRAW_REWARD,
        }
    }
}

impl Agent for EpsilonGreedyAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn set_learning(&mut self, enabled: bool) {
        self.learning = enabled;
    }

    fn next_move(&mut self, board: &Board) -> Result<Position> {
        if board.is_full() {
            return Err(Error::NoValidMoves);
        }

        let (digest, table) = self.knowledge.table_for(board);

        let index = if self.learning && self.rng.random::<f64>() < self.epsilon {
            // Explore: uniformly random action
            self.rng.random_range(0..table.len())
        } else {
            // Exploit: best mean so far, lowest index on ties
            table.greedy_index().ok_or(Error::NoValidMoves)?
        };
        let position = table.action(index);

        self.buffer.push((digest, index));
        Ok(position)
    }

    fn learn(&mut self, outcome: GameOutcome) -> Result<()> {
        let buffer = std::mem::take(&mut self.buffer);

        if !self.learning {
            trace!(agent = %self.name, ?outcome, "learning disabled; outcome ignored");
            return Ok(());
        }

        let reward = self.reward(outcome);
        for (digest, index) in &buffer {
            self.knowledge.record_return(digest, *index, reward);
        }

        debug!(
            agent = %self.name,
            ?outcome,
            reward,
            moves = buffer.len(),
            states = self.knowledge.len(),
            "episode learned"
        );
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_rejects_epsilon_out_of_range() {
        assert!(EpsilonGreedyAgent::new(Player::X, -0.1).is_err());
        assert!(EpsilonGreedyAgent::new(Player::X, 1.5).is_err());
        assert!(EpsilonGreedyAgent::new(Player::X, f64::NAN).is_err());
        assert!(EpsilonGreedyAgent::new(Player::X, 0.0).is_ok());
        assert!(EpsilonGreedyAgent::new(Player::X, 1.0).is_ok());
    }

    #[test]
    fn test_rewards() {
        let agent = EpsilonGreedyAgent::new(Player::O, 0.1).unwrap();
        assert_eq!(agent.reward(GameOutcome::Win(Player::O)), 1.0);
        assert_eq!(agent.reward(GameOutcome::Win(Player::X)), -1.0);
        assert_eq!(agent.reward(GameOutcome::Draw), 0.0);
    }

    #[test]
    fn test_first_move_creates_optimistic_table() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.0).unwrap();
        let board = Board::new();

        let position = agent.next_move(&board).unwrap();

        assert_eq!(agent.knowledge().len(), 1);
        let table = agent.knowledge().get(&board.identifier()).unwrap();
        assert_eq!(table.len(), 9);
        assert!(table.visits().iter().all(|&v| v == 1));
        assert!(table.means().iter().all(|&m| m == 1.0));
        // all means tie, so the greedy choice is the first free cell
        assert_eq!(position, pos(0, 0));
        assert_eq!(agent.episode_buffer(), &[(board.identifier(), 0)]);
    }

    #[test]
    fn test_next_move_on_full_board() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.5).unwrap();
        let board = Board::parse("XOX/XOO/OXX").unwrap();
        assert!(matches!(agent.next_move(&board), Err(Error::NoValidMoves)));
        assert!(agent.knowledge().is_empty());
    }

    #[test]
    fn test_reset_clears_buffer_but_keeps_knowledge() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.0).unwrap();
        agent.next_move(&Board::new()).unwrap();
        agent.reset();
        assert!(agent.episode_buffer().is_empty());
        assert_eq!(agent.knowledge().len(), 1);
    }

    #[test]
    fn test_learn_disabled_leaves_knowledge_untouched() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.0).unwrap();
        let board = Board::new();
        agent.next_move(&board).unwrap();

        agent.learn(GameOutcome::Win(Player::O)).unwrap();

        let table = agent.knowledge().get(&board.identifier()).unwrap();
        assert_eq!(table.visits()[0], 1);
        assert_eq!(table.means()[0], 1.0);
        assert!(agent.episode_buffer().is_empty());
    }

    #[test]
    fn test_loss_steers_greedy_choice_away() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.0).unwrap();
        agent.set_learning(true);
        let board = Board::new();

        assert_eq!(agent.next_move(&board).unwrap(), pos(0, 0));
        agent.learn(GameOutcome::Win(Player::O)).unwrap();

        agent.reset();
        assert_eq!(agent.next_move(&board).unwrap(), pos(0, 1));
    }

    #[test]
    fn test_won_episode_keeps_means_and_bumps_counts() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.0).unwrap();
        agent.set_learning(true);

        let first = Board::new();
        let second = Board::parse("XO./.../...").unwrap();
        agent.next_move(&first).unwrap();
        agent.next_move(&second).unwrap();
        agent.learn(GameOutcome::Win(Player::X)).unwrap();

        for board in [first, second] {
            let table = agent.knowledge().get(&board.identifier()).unwrap();
            assert_eq!(table.visits()[0], 2);
            assert!((table.means()[0] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_repeated_episodes_follow_running_mean() {
        // a single free cell forces the same action every episode
        let board = Board::parse("XOX/XOO/OX.").unwrap();
        let outcomes = [
            GameOutcome::Win(Player::O),
            GameOutcome::Draw,
            GameOutcome::Win(Player::X),
            GameOutcome::Win(Player::O),
        ];
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.3)
            .unwrap()
            .with_seed(11);
        agent.set_learning(true);

        let mut sum = 0.0;
        for (k, outcome) in outcomes.into_iter().enumerate() {
            assert_eq!(agent.next_move(&board).unwrap(), pos(2, 2));
            agent.learn(outcome).unwrap();
            sum += agent.reward(outcome);

            let table = agent.knowledge().get(&board.identifier()).unwrap();
            let expected = (1.0 + sum) / (k as f64 + 2.0);
            assert!((table.means()[0] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_greedy_when_not_learning_despite_epsilon() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 1.0)
            .unwrap()
            .with_seed(5);
        for _ in 0..20 {
            assert_eq!(agent.next_move(&Board::new()).unwrap(), pos(0, 0));
            agent.reset();
        }
    }

    #[test]
    fn test_full_exploration_still_records_moves() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 1.0)
            .unwrap()
            .with_seed(3);
        agent.set_learning(true);
        let board = Board::new();

        let position = agent.next_move(&board).unwrap();
        let (_, index) = agent.episode_buffer()[0];
        let table = agent.knowledge().get(&board.identifier()).unwrap();
        assert_eq!(table.action(index), position);
    }

    #[test]
    fn test_with_epsilon_keeps_knowledge() {
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.1).unwrap();
        agent.set_learning(true);
        agent.next_move(&Board::new()).unwrap();
        agent.learn(GameOutcome::Win(Player::X)).unwrap();
        let learned = agent.knowledge().clone();

        let agent = agent.with_epsilon(0.4).unwrap();
        assert_eq!(agent.epsilon(), 0.4);
        assert_eq!(agent.knowledge(), &learned);
        assert!(agent.with_epsilon(1.2).is_err());
    }
}
