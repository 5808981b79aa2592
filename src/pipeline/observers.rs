//! Observers for training runs
//!
//! Observers collect data while games are played without coupling the
//! orchestration loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, Player, Position},
};

/// Progress bar observer - shows training progress with running tallies
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - counts outcomes by token and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

/// Summary of collected metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub draw_rate: f64,
    pub avg_game_length: f64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    /// Games won by `player`
    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn draw_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_games as f64
        }
    }

    /// Average number of moves per game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            draw_rate: self.draw_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.move_counts.push(0);
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _player: Player,
        _position: Position,
    ) -> Result<()> {
        if let Some(last) = self.move_counts.last_mut() {
            *last += 1;
        }
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        Ok(())
    }
}

/// A single move as recorded by [`JsonlObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    pub step_num: usize,
    /// Board before the move, rows separated by `/`
    pub board: String,
    pub player: Player,
    pub position: Position,
}

/// One finished game as recorded by [`JsonlObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub game_num: usize,
    pub outcome: String,
    pub steps: Vec<StepObservation>,
}

/// JSONL observer - writes one JSON object per finished game
pub struct JsonlObserver<W: Write> {
    writer: W,
    current_game_steps: Vec<StepObservation>,
}

impl JsonlObserver<BufWriter<File>> {
    /// Create an observer writing to a new file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create game log {path:?}"),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current_game_steps: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for JsonlObserver<W> {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_game_steps.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        board: &Board,
        player: Player,
        position: Position,
    ) -> Result<()> {
        self.current_game_steps.push(StepObservation {
            step_num,
            board: board.to_string().replace('\n', "/"),
            player,
            position,
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        let observation = Observation {
            game_num,
            outcome: outcome.to_string(),
            steps: std::mem::take(&mut self.current_game_steps),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Milestone observer - tracks the first draw and the last loss of one token
///
/// A learner that has stopped losing shows its last loss well before the end
/// of the run.
pub struct MilestoneObserver {
    tracked: Player,
    first_draw: Option<usize>,
    last_loss: Option<usize>,
    games: usize,
}

impl MilestoneObserver {
    /// Track milestones from `tracked`'s point of view
    pub fn new(tracked: Player) -> Self {
        Self {
            tracked,
            first_draw: None,
            last_loss: None,
            games: 0,
        }
    }

    pub fn first_draw(&self) -> Option<usize> {
        self.first_draw
    }

    pub fn last_loss(&self) -> Option<usize> {
        self.last_loss
    }

    pub fn games(&self) -> usize {
        self.games
    }

    /// Print milestone summary
    pub fn display_summary(&self) {
        println!("\n=== Learning Milestones for {} ===", self.tracked);

        match self.first_draw {
            Some(game) => println!("  First draw: Game #{}", game + 1),
            None => println!("  First draw: Not achieved"),
        }

        match self.last_loss {
            Some(game) => {
                println!("  Last loss: Game #{}", game + 1);
                println!("  Games since last loss: {}", self.games - game - 1);
            }
            None => println!("  Last loss: No losses recorded"),
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.games = game_num + 1;

        match outcome {
            GameOutcome::Draw => {
                if self.first_draw.is_none() {
                    self.first_draw = Some(game_num);
                }
            }
            GameOutcome::Win(winner) if winner != self.tracked => {
                self.last_loss = Some(game_num);
            }
            GameOutcome::Win(_) => {}
        }

        Ok(())
    }
}

/// Observer handle that stays readable after the pipeline takes ownership
///
/// ```
/// use tictactoe_agent::pipeline::{MetricsObserver, SharedObserver, TrainingConfig, TrainingPipeline};
///
/// let metrics = SharedObserver::new(MetricsObserver::new());
/// let pipeline = TrainingPipeline::new(TrainingConfig::default())
///     .with_observer(Box::new(metrics.clone()));
/// # drop(pipeline);
/// assert_eq!(metrics.with(|m| m.total_games()), 0);
/// ```
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    /// Run `f` against the wrapped observer
    pub fn with<T>(&self, f: impl FnOnce(&O) -> T) -> T {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, O> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.lock().on_training_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        self.lock().on_game_start(game_num)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        board: &Board,
        player: Player,
        position: Position,
    ) -> Result<()> {
        self.lock()
            .on_move(game_num, step_num, board, player, position)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.lock().on_game_end(game_num, outcome)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.lock().on_training_end()
    }
}
