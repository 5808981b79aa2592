//! Training pipeline: episode loop, training runs and displayed games

use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    ports::{Agent, Observer},
    tictactoe::{Board, GameOutcome},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Random seed; the first agent gets `seed`, the second `seed + 1`
    pub seed: Option<u64>,

    /// Whether agents learn during the run
    pub learning: bool,

    /// Log running tallies every this many games
    pub milestone_interval: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 10_000,
            seed: None,
            learning: true,
            milestone_interval: Some(5_000),
        }
    }
}

/// Result of a training or evaluation run
///
/// Player one is the agent that opened every game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
    pub player_one_win_rate: f64,
    pub player_two_win_rate: f64,
    pub draw_rate: f64,
}

impl TrainingResult {
    pub fn new(
        total_games: usize,
        player_one_wins: usize,
        player_two_wins: usize,
        draws: usize,
    ) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            player_one_wins,
            player_two_wins,
            draws,
            player_one_win_rate: rate(player_one_wins),
            player_two_win_rate: rate(player_two_wins),
            draw_rate: rate(draws),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create summary file {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open summary file {path:?}"),
            source,
        })?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Runs games between two agents and reports outcomes to observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
    games_played: usize,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            games_played: 0,
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play one complete game and let both agents learn from it.
    ///
    /// `first` opens the game. Both agents are reset, moves alternate until
    /// the board reports an outcome, then both receive it.
    pub fn run_episode(
        &mut self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<GameOutcome> {
        check_distinct_players(first, second)?;
        let game_num = self.games_played;
        let outcome = self.play_game(game_num, first, second)?;
        self.games_played += 1;
        Ok(outcome)
    }

    /// Play `num_games` episodes.
    ///
    /// Learning is switched to `config.learning` before the first game and
    /// off again after the last.
    pub fn run(
        &mut self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<TrainingResult> {
        check_distinct_players(first, second)?;
        if let Some(seed) = self.config.seed {
            first.set_rng_seed(seed)?;
            second.set_rng_seed(seed.wrapping_add(1))?;
        }

        first.set_learning(self.config.learning);
        second.set_learning(self.config.learning);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_games)?;
        }

        info!(
            games = self.config.num_games,
            first = first.name(),
            second = second.name(),
            learning = self.config.learning,
            "training started"
        );

        let mut player_one_wins = 0;
        let mut player_two_wins = 0;
        let mut draws = 0;

        for game_num in 0..self.config.num_games {
            let outcome = self.play_game(game_num, first, second)?;
            self.games_played += 1;

            match outcome {
                GameOutcome::Win(winner) if winner == first.player() => player_one_wins += 1,
                GameOutcome::Win(_) => player_two_wins += 1,
                GameOutcome::Draw => draws += 1,
            }

            let games = game_num + 1;
            if let Some(interval) = self.config.milestone_interval
                && interval > 0
                && games.is_multiple_of(interval)
            {
                info!(games, player_one_wins, player_two_wins, draws, "training milestone");
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        first.set_learning(false);
        second.set_learning(false);

        let result = TrainingResult::new(
            self.config.num_games,
            player_one_wins,
            player_two_wins,
            draws,
        );
        info!(
            player_one_win_rate = result.player_one_win_rate,
            draw_rate = result.draw_rate,
            "training finished"
        );
        Ok(result)
    }

    /// Play a single game without learning, writing the board before every
    /// move and the verdict at the end.
    pub fn play<W: Write>(
        &mut self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
        out: &mut W,
    ) -> Result<GameOutcome> {
        check_distinct_players(first, second)?;
        first.set_learning(false);
        second.set_learning(false);
        first.reset();
        second.reset();

        let write_error = |source| Error::Io {
            operation: "write game board".to_string(),
            source,
        };

        let mut board = Board::new();
        let mut turn = 0;
        let outcome = loop {
            if let Some(outcome) = board.find_winner() {
                break outcome;
            }
            writeln!(out, "{board}\n").map_err(write_error)?;

            let agent: &mut dyn Agent = if turn % 2 == 0 {
                &mut *first
            } else {
                &mut *second
            };
            let position = agent.next_move(&board)?;
            board.place(agent.player(), position)?;
            turn += 1;
        };

        writeln!(out, "{board}\n\n{outcome}").map_err(write_error)?;
        Ok(outcome)
    }

    fn play_game(
        &mut self,
        game_num: usize,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
    ) -> Result<GameOutcome> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        first.reset();
        second.reset();

        let mut board = Board::new();
        let mut step_num = 0;
        let outcome = loop {
            if let Some(outcome) = board.find_winner() {
                break outcome;
            }

            let agent: &mut dyn Agent = if step_num % 2 == 0 {
                &mut *first
            } else {
                &mut *second
            };
            let player = agent.player();
            let position = agent.next_move(&board)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, &board, player, position)?;
            }

            board.place(player, position)?;
            step_num += 1;
        };

        first.learn(outcome)?;
        second.learn(outcome)?;

        debug!(game = game_num, moves = step_num, ?outcome, "episode finished");

        for observer in &mut self.observers {
            observer.on_game_end(game_num, outcome)?;
        }

        Ok(outcome)
    }
}

fn check_distinct_players(first: &dyn Agent, second: &dyn Agent) -> Result<()> {
    if first.player() == second.player() {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "both agents play {}; opponents need different tokens",
                first.player()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::{EpsilonGreedyAgent, RandomAgent},
        tictactoe::Player,
    };

    fn config(num_games: usize) -> TrainingConfig {
        TrainingConfig {
            num_games,
            seed: Some(42),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_training_pipeline() {
        let mut pipeline = TrainingPipeline::new(config(50));
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.1).unwrap();
        let mut opponent = RandomAgent::new(Player::O);

        let result = pipeline.run(&mut agent, &mut opponent).unwrap();

        assert_eq!(result.total_games, 50);
        assert_eq!(
            result.player_one_wins + result.player_two_wins + result.draws,
            50
        );
        assert!(!agent.knowledge().is_empty());
        assert!(!agent.is_learning());
    }

    #[test]
    fn test_run_without_learning_leaves_knowledge_at_prior() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            learning: false,
            ..config(5)
        });
        let mut agent = EpsilonGreedyAgent::new(Player::X, 0.5).unwrap();
        let mut opponent = RandomAgent::new(Player::O);

        pipeline.run(&mut agent, &mut opponent).unwrap();

        for (_, table) in agent.knowledge().iter() {
            assert!(table.visits().iter().all(|&v| v == 1));
            assert!(table.means().iter().all(|&m| m == 1.0));
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let run = || {
            let mut pipeline = TrainingPipeline::new(config(200));
            let mut agent = EpsilonGreedyAgent::new(Player::X, 0.2).unwrap();
            let mut opponent = RandomAgent::new(Player::O);
            let result = pipeline.run(&mut agent, &mut opponent).unwrap();
            (result, agent.knowledge().clone())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_rejects_same_token() {
        let mut pipeline = TrainingPipeline::new(config(1));
        let mut a = RandomAgent::new(Player::X);
        let mut b = RandomAgent::new(Player::X);
        assert!(matches!(
            pipeline.run(&mut a, &mut b),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_play_prints_boards_and_verdict() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig::default());
        let mut first = RandomAgent::with_seed(Player::X, 1);
        let mut second = RandomAgent::with_seed(Player::O, 2);
        let mut out = Vec::new();

        let outcome = pipeline.play(&mut first, &mut second, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("...\n...\n...\n"));
        assert!(text.trim_end().ends_with(&outcome.to_string()));
    }

    #[test]
    fn test_result_rates() {
        let result = TrainingResult::new(4, 2, 1, 1);
        assert_eq!(result.player_one_win_rate, 0.5);
        assert_eq!(result.player_two_win_rate, 0.25);
        assert_eq!(result.draw_rate, 0.25);

        let empty = TrainingResult::new(0, 0, 0, 0);
        assert_eq!(empty.draw_rate, 0.0);
    }
}
