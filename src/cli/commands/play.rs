//! Play command - a person at the terminal against an agent

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_player_token;
use crate::{
    agents::{EpsilonGreedyAgent, ManualAgent},
    app::{AgentConfig, App},
    pipeline::{TrainingConfig, TrainingPipeline},
    ports::Agent,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play against an agent")]
pub struct PlayArgs {
    /// Saved agent to play against; an untrained agent is used otherwise
    #[arg(long, short = 'a')]
    pub agent: Option<PathBuf>,

    /// Token the human plays (`x` or `o`); X always opens
    #[arg(long, default_value = "x")]
    pub human: String,

    /// Random seed for an untrained agent
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_player = parse_player_token(&args.human, "--human")?;
    let app = App::new();

    let mut agent: EpsilonGreedyAgent = match &args.agent {
        Some(path) => {
            let (agent, _) = app
                .load_agent(path)
                .with_context(|| format!("Failed to load agent from {}", path.display()))?;
            if agent.player() == human_player {
                anyhow::bail!(
                    "Saved agent plays {}; choose the other token with --human",
                    agent.player()
                );
            }
            agent
        }
        None => {
            let mut config = AgentConfig::new(human_player.opponent());
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            app.create_agent(config)?
        }
    };

    let mut human = ManualAgent::new(human_player, io::BufReader::new(io::stdin()), io::stdout());
    let mut pipeline = TrainingPipeline::new(TrainingConfig::default());
    let mut out = io::stdout();

    if human_player == Player::X {
        pipeline.play(&mut human, &mut agent, &mut out)?;
    } else {
        pipeline.play(&mut agent, &mut human, &mut out)?;
    }

    Ok(())
}
