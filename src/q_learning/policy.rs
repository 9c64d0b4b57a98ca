//! Priority-ordered tie breaking over action values

use serde::{Deserialize, Serialize};

use crate::{Error, Result, gridworld::Action};

/// Default absolute tolerance for treating two values as tied
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Picks the greedy action, resolving near-ties by a fixed priority list.
///
/// Every action whose value lies within `tolerance` of the maximum counts as
/// best; the one listed first in `priority` wins. The same policy drives
/// exploitation during training and the greedy policy shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieBreakPolicy {
    pub priority: Vec<Action>,
    pub tolerance: f64,
}

impl TieBreakPolicy {
    pub fn new(priority: Vec<Action>, tolerance: f64) -> Self {
        Self {
            priority,
            tolerance,
        }
    }

    /// Same tolerance, different priority order.
    pub fn with_priority(&self, priority: Vec<Action>) -> Self {
        Self {
            priority,
            tolerance: self.tolerance,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `priority` names each
    /// action exactly once and `tolerance` is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.priority.len() != Action::ALL.len()
            || Action::ALL.iter().any(|a| !self.priority.contains(a))
        {
            return Err(Error::config(format!(
                "priority order must list north, south, east and west exactly once (got {:?})",
                self.priority
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(Error::config(format!(
                "tie tolerance must be finite and non-negative (got {})",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Highest-priority action among those tied for the maximum.
    ///
    /// `values` is indexed by [`Action::index`].
    pub fn select(&self, values: &[f64; 4]) -> Action {
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        self.priority
            .iter()
            .copied()
            .find(|a| (values[a.index()] - max).abs() <= self.tolerance)
            .unwrap_or_else(|| {
                // Unvalidated priority lists may miss the argmax.
                Action::ALL
                    .into_iter()
                    .find(|a| values[a.index()] == max)
                    .unwrap_or(Action::North)
            })
    }
}

impl Default for TieBreakPolicy {
    /// north > west > east > south, tolerance 1e-4
    fn default() -> Self {
        Self::new(
            vec![Action::North, Action::West, Action::East, Action::South],
            DEFAULT_TOLERANCE,
        )
    }
}
