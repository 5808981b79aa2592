//! Train command - train an epsilon-greedy agent and optionally save it

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;

use super::{parse_player_token, timestamp};
use crate::{
    agents::{EpsilonGreedyAgent, RandomAgent},
    app::{AgentConfig, App},
    cli::{
        config::{OpponentKind, RunConfig},
        output::{print_kv, print_result, print_section},
    },
    pipeline::{
        JsonlObserver, MilestoneObserver, ProgressObserver, SharedObserver, TrainingConfig,
        TrainingPipeline, TrainingResult,
    },
    ports::Agent,
    serialization::TrainingMetadata,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train an epsilon-greedy agent")]
pub struct TrainArgs {
    /// Number of training games [default: 10000]
    #[arg(long, short = 'g')]
    pub games: Option<usize>,

    /// Exploration rate while training [default: 0.1]
    #[arg(long, short = 'e')]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which token the agent controls (`x` or `o`); X always opens
    #[arg(long)]
    pub agent_player: Option<String>,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum)]
    pub opponent: Option<OpponentKind>,

    /// Exploration rate of a greedy opponent [default: 0.1]
    #[arg(long)]
    pub opponent_epsilon: Option<f64>,

    /// Log running tallies every N games (0 disables)
    #[arg(long)]
    pub milestone_interval: Option<usize>,

    /// JSON file with run settings; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Continue training a previously saved agent
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Output file for the trained agent (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional JSONL file receiving every training game
    #[arg(long)]
    pub log_games: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    agent: AgentSummary,
    opponent: String,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    player: Player,
    epsilon: f64,
    states_learned: usize,
    games_trained: usize,
}

pub(crate) fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name: treat as a directory
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

impl TrainArgs {
    fn flag_overrides(&self) -> Result<RunConfig> {
        let agent_player = self
            .agent_player
            .as_deref()
            .map(|value| parse_player_token(value, "--agent-player"))
            .transpose()?;

        Ok(RunConfig {
            games: self.games,
            epsilon: self.epsilon,
            seed: self.seed,
            agent_player,
            opponent: self.opponent,
            opponent_epsilon: self.opponent_epsilon,
            milestone_interval: self.milestone_interval,
        })
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let run = file_config.merged_with(args.flag_overrides()?);

    let app = App::new();
    let (mut agent, previous) = build_agent(&app, &args, &run)?;
    let agent_player = agent.player();

    let mut opponent: Box<dyn Agent> = match run.opponent() {
        OpponentKind::Random => Box::new(RandomAgent::new(agent_player.opponent())),
        OpponentKind::Greedy => Box::new(
            app.create_agent(
                AgentConfig::new(agent_player.opponent()).with_epsilon(run.opponent_epsilon()),
            )?,
        ),
    };

    print_section("Training Configuration");
    print_kv("Agent", &format!("{} (epsilon {})", agent.name(), agent.epsilon()));
    print_kv("Opponent", opponent.name());
    print_kv("Games", &run.games().to_string());
    if let Some(seed) = run.seed {
        print_kv("Seed", &seed.to_string());
    }
    if let Some(path) = &args.resume {
        print_kv("Resumed from", &path.display().to_string());
        print_kv("States known", &agent.knowledge().len().to_string());
    }

    let interval = run.milestone_interval();
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: run.games(),
        seed: run.seed,
        learning: true,
        milestone_interval: (interval > 0).then_some(interval),
    });

    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    let milestones = SharedObserver::new(MilestoneObserver::new(agent_player));
    pipeline = pipeline.with_observer(Box::new(milestones.clone()));
    if let Some(path) = &args.log_games {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::create(path)?));
    }

    // X always opens
    let result = if agent_player == Player::X {
        pipeline.run(&mut agent, opponent.as_mut())?
    } else {
        pipeline.run(opponent.as_mut(), &mut agent)?
    };
    let (first, second) = if agent_player == Player::X {
        (agent.name().to_string(), opponent.name().to_string())
    } else {
        (opponent.name().to_string(), agent.name().to_string())
    };

    print_section("Training Results");
    print_result(&result, &first, &second);
    print_kv("States learned", &agent.knowledge().len().to_string());
    milestones.with(|m| m.display_summary());

    let games_trained = previous.games_trained.unwrap_or(0) + result.total_games;
    let mut opponents = previous.opponents;
    opponents.push(run.opponent().label().to_string());

    if let Some(output) = &args.output {
        let metadata = TrainingMetadata {
            games_trained: Some(games_trained),
            opponents,
            seed: run.seed,
            saved_at: timestamp(),
        };
        app.save_agent(&agent, metadata, output)
            .with_context(|| format!("Failed to save agent to {}", output.display()))?;
        println!("\n✓ Agent saved to: {}", output.display());
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if path != *raw {
            println!("Note: summary path normalized to {}", path.display());
        }
        let summary = TrainingSummaryFile {
            training: result,
            agent: AgentSummary {
                player: agent_player,
                epsilon: agent.epsilon(),
                states_learned: agent.knowledge().len(),
                games_trained,
            },
            opponent: run.opponent().label().to_string(),
            seed: run.seed,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &summary).context("Failed to write summary")?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}

/// Fresh agent, or a saved one when `--resume` is given
fn build_agent(
    app: &App,
    args: &TrainArgs,
    run: &RunConfig,
) -> Result<(EpsilonGreedyAgent, TrainingMetadata)> {
    let Some(path) = &args.resume else {
        let mut config = AgentConfig::new(run.agent_player()).with_epsilon(run.epsilon());
        if let Some(seed) = run.seed {
            config = config.with_seed(seed);
        }
        return Ok((app.create_agent(config)?, TrainingMetadata::default()));
    };

    let (saved, metadata) = app
        .load_agent(path)
        .with_context(|| format!("Failed to load agent from {}", path.display()))?;

    if let Some(requested) = run.agent_player
        && requested != saved.player()
    {
        return Err(anyhow!(
            "Saved agent plays {}, but {} was requested",
            saved.player(),
            requested
        ));
    }

    let agent = match run.epsilon {
        Some(epsilon) => saved.with_epsilon(epsilon)?,
        None => saved,
    };
    Ok((agent, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.json")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.txt")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/")),
            PathBuf::from("out/training_summary.json")
        );
    }

    #[test]
    fn test_flag_overrides_parse_player() {
        let args = TrainArgs::parse_from(["train", "--agent-player", "o", "--games", "3"]);
        let overrides = args.flag_overrides().unwrap();
        assert_eq!(overrides.agent_player, Some(Player::O));
        assert_eq!(overrides.games, Some(3));
        assert!(overrides.epsilon.is_none());
    }
}
