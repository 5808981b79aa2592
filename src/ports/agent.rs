//! Agent port - anything that can take a turn in a game
//!
//! The orchestration loop drives every agent through the same per-episode
//! cycle:
//!
//! 1. [`reset`](Agent::reset) at the start of the episode
//! 2. [`next_move`](Agent::next_move) once per turn, never on a terminal board
//! 3. [`learn`](Agent::learn) exactly once, after the terminal outcome is known
//!
//! [`set_learning`](Agent::set_learning) is toggled around training runs so
//! that evaluation plays a fixed policy.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Player, Position},
};

/// Unified interface for learning and non-learning players
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agent::{
///     ports::Agent,
///     tictactoe::Board,
/// };
///
/// fn first_move(agent: &mut dyn Agent) -> tictactoe_agent::Result<()> {
///     let mut board = Board::new();
///     agent.reset();
///     let position = agent.next_move(&board)?;
///     board.place(agent.player(), position)?;
///     Ok(())
/// }
/// ```
pub trait Agent: Send {
    /// The token this agent places
    fn player(&self) -> Player;

    /// Used for identification in summaries and logging.
    fn name(&self) -> &str;

    /// Prepare for a new episode.
    ///
    /// Learners drop whatever they recorded during the previous episode. The
    /// learned policy itself is kept.
    fn reset(&mut self) {}

    /// Enable or disable learning updates.
    ///
    /// Non-adaptive agents ignore this.
    fn set_learning(&mut self, _enabled: bool) {}

    /// Choose a free cell on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the board has no free cell.
    fn next_move(&mut self, board: &Board) -> Result<Position>;

    /// Receive the outcome of the finished episode.
    ///
    /// The default implementation does nothing, suitable for non-adaptive
    /// agents like the random mover or a human player.
    fn learn(&mut self, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Seed the agent's internal random number generator.
    ///
    /// Training pipelines call this when given a deterministic seed.
    /// Agents without randomness can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
