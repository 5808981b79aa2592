//! Evaluate command - play a saved agent against a random mover

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    agents::RandomAgent,
    app::App,
    cli::output::{print_kv, print_result, print_section},
    pipeline::{
        MetricsObserver, ProgressObserver, SharedObserver, TrainingConfig, TrainingPipeline,
        TrainingResult,
    },
    ports::Agent,
    serialization::TrainingMetadata,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent against a random mover")]
pub struct EvaluateArgs {
    /// Path to the saved agent
    pub agent: PathBuf,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationExport {
    agent_file: String,
    agent_player: Player,
    evaluation: TrainingResult,
    avg_game_length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    games_trained: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trained_against: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading trained agent from: {}", args.agent.display());
    let app = App::new();
    let (mut agent, metadata) = app
        .load_agent(&args.agent)
        .with_context(|| format!("Failed to load agent from {}", args.agent.display()))?;

    print_section("Loaded Agent");
    print_kv("Player", &agent.player().to_string());
    print_kv("Epsilon", &agent.epsilon().to_string());
    print_kv("States known", &agent.knowledge().len().to_string());
    if let Some(games) = metadata.games_trained {
        print_kv("Games trained", &games.to_string());
    }
    if !metadata.opponents.is_empty() {
        print_kv("Trained against", &metadata.opponents.join(", "));
    }

    let agent_player = agent.player();
    let mut opponent = RandomAgent::new(agent_player.opponent());

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.games,
        seed: args.seed,
        learning: false,
        milestone_interval: None,
    });
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let metrics = SharedObserver::new(MetricsObserver::new());
    pipeline = pipeline.with_observer(Box::new(metrics.clone()));

    let result = if agent_player == Player::X {
        pipeline.run(&mut agent, &mut opponent)?
    } else {
        pipeline.run(&mut opponent, &mut agent)?
    };
    let avg_game_length = metrics.with(|m| m.avg_game_length());

    print_section("Evaluation Results");
    if agent_player == Player::X {
        print_result(&result, agent.name(), opponent.name());
    } else {
        print_result(&result, opponent.name(), agent.name());
    }
    print_kv("Avg game length", &format!("{avg_game_length:.2}"));

    if let Some(path) = &args.export {
        export_results(&args.agent, agent_player, result, avg_game_length, metadata, path)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}

fn export_results(
    agent_file: &Path,
    agent_player: Player,
    evaluation: TrainingResult,
    avg_game_length: f64,
    metadata: TrainingMetadata,
    path: &Path,
) -> Result<()> {
    let export = EvaluationExport {
        agent_file: agent_file.display().to_string(),
        agent_player,
        evaluation,
        avg_game_length,
        games_trained: metadata.games_trained,
        trained_against: metadata.opponents,
        saved_at: metadata.saved_at,
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export).context("Failed to write evaluation results")?;
    Ok(())
}
