//! Action-value table for the gridworld

use serde::{Deserialize, Serialize};

use crate::gridworld::{Action, GridState};

/// Dense Q-table: one `[f64; 4]` row per grid cell, indexed by
/// [`Action::index`]. Every entry starts at 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionValueTable {
    rows: usize,
    cols: usize,
    values: Vec<[f64; 4]>,
}

impl ActionValueTable {
    /// Create a zero-initialised table for a `rows` x `cols` grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![[0.0; 4]; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn slot(&self, state: GridState) -> usize {
        debug_assert!(state.row < self.rows && state.col < self.cols);
        state.row * self.cols + state.col
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: GridState, action: Action) -> f64 {
        self.values[self.slot(state)][action.index()]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: GridState, action: Action, value: f64) {
        let slot = self.slot(state);
        self.values[slot][action.index()] = value;
    }

    /// All four action values of a state
    pub fn values(&self, state: GridState) -> &[f64; 4] {
        &self.values[self.slot(state)]
    }

    /// max_a Q(s, a)
    pub fn max_value(&self, state: GridState) -> f64 {
        self.values(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the TD error.
    pub fn q_learning_update(
        &mut self,
        state: GridState,
        action: Action,
        reward: f64,
        next_state: GridState,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(state, action);
        let td_target = reward + discount_factor * self.max_value(next_state);
        let td_error = td_target - current_q;
        self.set(state, action, current_q + learning_rate * td_error);
        td_error
    }
}
