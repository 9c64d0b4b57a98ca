//! Observer adapters for Q-learning training runs
//!
//! This module provides composable observers for:
//! - Showing training progress on the terminal
//! - Logging episodes through `tracing`
//! - Recording episodes to JSON Lines

pub mod observers;

// Re-export observer implementations (adapters)
pub use observers::{JsonlObserver, ProgressObserver, TracingObserver};

pub use crate::ports::TrainingObserver;
