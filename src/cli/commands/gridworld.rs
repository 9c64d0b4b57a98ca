//! Gridworld command - Learn action values with Q-learning and report the policy

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    cli::output::{print_kv, print_section, print_stats_table, print_subsection},
    config::ExperimentConfig,
    gridworld::GridWorld,
    pipeline::{JsonlObserver, ProgressObserver, TracingObserver},
    ports::TrainingObserver,
    q_learning::{PolicyReport, QLearner, QLearningConfig, TrainingSummary},
};

#[derive(Parser, Debug)]
#[command(about = "Learn gridworld action values with Q-learning")]
pub struct GridworldArgs {
    /// JSON experiment configuration (grid, learning, report sections)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Step cap per episode
    #[arg(long)]
    pub steps: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the report as JSON instead of text grids
    #[arg(long)]
    pub json: bool,

    /// Write one JSON line per episode to this file
    #[arg(long)]
    pub episode_log: Option<PathBuf>,

    /// Export the summary and report to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GridworldExport<'a> {
    learning: &'a QLearningConfig,
    training: &'a TrainingSummary,
    report: &'a PolicyReport,
}

/// Merge the config file (if any) with command-line overrides and validate.
pub fn build_config(args: &GridworldArgs) -> Result<ExperimentConfig> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };

    let learning = &mut config.learning;
    if let Some(episodes) = args.episodes {
        learning.episodes = episodes;
    }
    if let Some(steps) = args.steps {
        learning.max_steps = steps;
    }
    if let Some(alpha) = args.alpha {
        learning.alpha = alpha;
    }
    if let Some(gamma) = args.gamma {
        learning.gamma = gamma;
    }
    if let Some(epsilon) = args.epsilon {
        learning.epsilon = epsilon;
    }
    if let Some(seed) = args.seed {
        learning.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

pub fn execute(args: GridworldArgs) -> Result<()> {
    let config = build_config(&args)?;
    let env = GridWorld::new(config.grid.clone())?;
    let report_config = config.report_config(&env);

    if !args.json {
        print_banner(&env, &config.learning);
    }

    let mut observers: Vec<Box<dyn TrainingObserver>> =
        vec![Box::new(TracingObserver::default())];
    if !args.no_progress && !args.json {
        observers.push(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.episode_log {
        observers.push(Box::new(JsonlObserver::new(path)?));
    }

    let mut learner = QLearner::new(env.clone(), config.learning.clone())?;
    let summary = learner.train_with_observer(&mut observers)?;

    let report = learner.report(&report_config)?;
    info!(episodes = summary.episodes, "evaluated learned policy");

    let export = GridworldExport {
        learning: &config.learning,
        training: &summary,
        report: &report,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&export)?);
    } else {
        print_training_summary(&summary);
        print_report(&report);
    }

    if let Some(path) = &args.export {
        let file =
            File::create(path).with_context(|| format!("creating export {}", path.display()))?;
        to_writer_pretty(file, &export)?;
        if !args.json {
            println!("\n✓ Report exported to: {}", path.display());
        }
    }

    Ok(())
}

fn print_banner(env: &GridWorld, learning: &QLearningConfig) {
    print_section("Gridworld Q-learning");
    print_kv("Grid size", &format!("{}x{}", env.rows(), env.cols()));
    for cell in &env.config().special_cells {
        print_kv(
            &format!("Special cell {}", cell.name),
            &format!(
                "{} -> {} (reward {})",
                cell.source, cell.destination, cell.reward
            ),
        );
    }
    print_stats_table(&[
        ("γ", learning.gamma.to_string()),
        ("ε", learning.epsilon.to_string()),
        ("α", learning.alpha.to_string()),
        ("Episodes", learning.episodes.to_string()),
        ("Steps", learning.max_steps.to_string()),
    ]);
}

fn print_training_summary(summary: &TrainingSummary) {
    print_subsection("Training");
    print_stats_table(&[
        ("Episodes", summary.episodes.to_string()),
        ("Total steps", summary.total_steps.to_string()),
        ("Mean steps", format!("{:.1}", summary.mean_steps())),
        ("Mean return", format!("{:.2}", summary.mean_reward())),
        ("Wall collisions", summary.wall_collisions.to_string()),
        ("Teleports", summary.teleports.to_string()),
    ]);
}

fn print_report(report: &PolicyReport) {
    print_subsection("Optimal Value Function");
    print!("{}", report.render_values());
    print_subsection("Optimal Policy");
    print!("{}", report.render_action_names());
    print_subsection("Optimal Policy (arrows)");
    print!("{}", report.render_arrows());
}
