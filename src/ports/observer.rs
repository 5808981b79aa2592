//! Observer port - abstraction for watching games as they are played
//!
//! Observers collect progress, metrics and logs without coupling the
//! orchestration loop to any particular output.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Player, Position},
};

/// Observer trait for monitoring training and evaluation runs
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each move in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agent::{
///     ports::Observer,
///     tictactoe::GameOutcome,
/// };
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///     ) -> tictactoe_agent::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    ///
    /// # Parameters
    ///
    /// * `total_games` - Total number of games that will be played
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts (0-based `game_num`).
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move is chosen and before it is placed.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Step number within the game (0-based)
    /// * `board` - Board before the move
    /// * `player` - Player making the move
    /// * `position` - Cell chosen
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _player: Player,
        _position: Position,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal state, after both agents learned.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
