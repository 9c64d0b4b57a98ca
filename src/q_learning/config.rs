//! Hyperparameters for the Q-learning loop.

use serde::{Deserialize, Serialize};

use super::policy::TieBreakPolicy;
use crate::{Error, Result};

/// Configuration for a [`super::QLearner`] run.
///
/// Defaults reproduce the classic setup: α = 0.2, γ = 0.9, ε = 0.1,
/// 5000 episodes of at most 5000 steps each.
///
/// # Examples
///
/// ```
/// use playlab::q_learning::QLearningConfig;
///
/// let config = QLearningConfig::default()
///     .with_episodes(200)
///     .with_epsilon(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Number of training episodes
    pub episodes: usize,
    /// Step cap per episode
    pub max_steps: usize,
    /// Greedy tie-breaking used during exploitation
    pub policy: TieBreakPolicy,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl QLearningConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_policy(mut self, policy: TieBreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if α is outside (0, 1], γ or ε
    /// outside [0, 1], or the tie-break policy is malformed.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::config(format!(
                "alpha must be in (0, 1] (got {})",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::config(format!(
                "gamma must be in [0, 1] (got {})",
                self.gamma
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::config(format!(
                "epsilon must be in [0, 1] (got {})",
                self.epsilon
            )));
        }
        self.policy.validate()
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            gamma: 0.9,
            epsilon: 0.1,
            episodes: 5000,
            max_steps: 5000,
            policy: TieBreakPolicy::default(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QLearningConfig::default();
        assert_eq!(config.alpha, 0.2);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.episodes, 5000);
        assert_eq!(config.max_steps, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        assert!(QLearningConfig::default().with_alpha(0.0).validate().is_err());
        assert!(QLearningConfig::default().with_alpha(1.5).validate().is_err());
        assert!(QLearningConfig::default().with_gamma(-0.1).validate().is_err());
        assert!(
            QLearningConfig::default()
                .with_epsilon(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_zero_episodes_is_allowed() {
        let config = QLearningConfig::default().with_episodes(0).with_max_steps(0);
        assert!(config.validate().is_ok());
    }
}
