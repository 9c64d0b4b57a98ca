//! Ports (trait boundaries) for external dependencies.
//!
//! The training loop reports progress through these traits so it stays
//! independent of progress bars, logging or metrics collection.

pub mod observer;

pub use observer::TrainingObserver;
