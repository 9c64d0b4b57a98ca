//! Observer implementations for training runs
//!
//! Observers allow composable data collection during training without coupling
//! the learning loop to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, trace};

use crate::{
    Result,
    ports::TrainingObserver,
    q_learning::{EpisodeEnd, EpisodeStats, TrainingSummary},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    collisions: usize,
    teleports: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            collisions: 0,
            teleports: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        if stats.end == EpisodeEnd::WallCollision {
            self.collisions += 1;
        }
        self.teleports += stats.teleports;

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(format!(
                "walls:{} teleports:{}",
                self.collisions, self.teleports
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "walls:{} teleports:{}",
                self.collisions, self.teleports
            ));
        }
        Ok(())
    }
}

/// Tracing observer - Emits structured log events
///
/// Every episode is logged at `trace` level; a line at `info` level is
/// emitted every `log_every` episodes and at the end of training.
pub struct TracingObserver {
    log_every: usize,
    total_episodes: usize,
}

impl TracingObserver {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
            total_episodes: 0,
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl TrainingObserver for TracingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        info!(total_episodes, "training started");
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        trace!(
            episode,
            steps = stats.steps,
            reward = stats.total_reward,
            end = ?stats.end,
            "episode"
        );
        if episode.is_multiple_of(self.log_every) {
            info!(episode, total = self.total_episodes, "training progress");
        }
        Ok(())
    }

    fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
        info!(
            episodes = summary.episodes,
            total_steps = summary.total_steps,
            wall_collisions = summary.wall_collisions,
            teleports = summary.teleports,
            "training finished"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct EpisodeRecord<'a> {
    episode: usize,
    #[serde(flatten)]
    stats: &'a EpisodeStats,
}

/// JSONL observer - Writes one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create episode log {}", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl TrainingObserver for JsonlObserver {
    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &EpisodeRecord { episode, stats })?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
