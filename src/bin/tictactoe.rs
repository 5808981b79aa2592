//! Command-line front end: train, evaluate and play against epsilon-greedy
//! tic-tac-toe agents

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tictactoe_agent::cli::commands::{evaluate, play, train};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

#[derive(Parser)]
#[command(name = "tictactoe-agent")]
#[command(version, about = "Tabular epsilon-greedy tic-tac-toe agents", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent against a random or greedy opponent
    Train(Box<train::TrainArgs>),

    /// Evaluate a saved agent against a random mover
    Evaluate(evaluate::EvaluateArgs),

    /// Play against an agent from the terminal
    Play(play::PlayArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Play(args) => play::execute(args),
    }
}
