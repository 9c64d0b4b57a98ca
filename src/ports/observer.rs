//! Observer port - abstraction for watching a training run

use crate::{
    Result,
    q_learning::{EpisodeStats, TrainingSummary},
};

/// Observer trait for monitoring Q-learning training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. `on_episode_end(episode, stats)` - After each episode, numbered from 1
/// 3. `on_training_end(summary)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use playlab::{ports::TrainingObserver, q_learning::EpisodeStats};
///
/// struct StepCounter {
///     steps: usize,
/// }
///
/// impl TrainingObserver for StepCounter {
///     fn on_episode_end(&mut self, _episode: usize, stats: &EpisodeStats) -> playlab::Result<()> {
///         self.steps += stats.steps;
///         Ok(())
///     }
/// }
/// ```
pub trait TrainingObserver: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every episode.
    fn on_episode_end(&mut self, _episode: usize, _stats: &EpisodeStats) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        Ok(())
    }
}

/// Fan events out to several observers in order
impl TrainingObserver for Vec<Box<dyn TrainingObserver>> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        for observer in self.iter_mut() {
            observer.on_training_start(total_episodes)?;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, stats: &EpisodeStats) -> Result<()> {
        for observer in self.iter_mut() {
            observer.on_episode_end(episode, stats)?;
        }
        Ok(())
    }

    fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
        for observer in self.iter_mut() {
            observer.on_training_end(summary)?;
        }
        Ok(())
    }
}
