//! playlab CLI - Tic-Tac-Toe minimax and gridworld Q-learning experiments

use anyhow::Result;
use clap::{Parser, Subcommand};

use playlab::cli::commands;

#[derive(Parser)]
#[command(name = "playlab")]
#[command(version, about = "Game search and tabular reinforcement learning", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train Q-learning on the teleporting gridworld and print the policy
    Gridworld(Box<commands::gridworld::GridworldArgs>),

    /// Find the optimal move for a Tic-Tac-Toe position
    Solve(commands::solve::SolveArgs),

    /// Watch minimax play itself
    Selfplay(commands::selfplay::SelfplayArgs),

    /// Play against the minimax solver
    Play(commands::play::PlayArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Gridworld(args) => commands::gridworld::execute(*args),
        Commands::Solve(args) => commands::solve::execute(args),
        Commands::Selfplay(args) => commands::selfplay::execute(args),
        Commands::Play(args) => commands::play::execute(args),
    }
}
