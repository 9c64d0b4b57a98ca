//! Teleporting gridworld environment
//!
//! A rectangular grid where the agent moves north, south, east or west.
//! Leaving the grid costs -1 and leaves the agent in place; designated
//! source cells jump to a fixed destination with a fixed reward no matter
//! which action is taken. Transitions are deterministic.

pub mod action;
pub mod config;
pub mod env;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use action::Action;
pub use config::{GridWorldConfig, SpecialCell};
pub use env::{GridWorld, Transition, WALL_PENALTY};

/// A (row, column) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridState {
    pub row: usize,
    pub col: usize,
}

impl GridState {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
