//! Experiment configuration loaded from JSON.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    gridworld::{GridWorld, GridWorldConfig},
    q_learning::{QLearningConfig, ReportConfig},
};

/// Everything needed for one gridworld training run.
///
/// Every section is optional in the JSON file; omitted fields take their
/// defaults. When `report` is omitted the report uses
/// [`ReportConfig::for_grid`] on the configured grid.
///
/// ```json
/// {
///   "grid": { "rows": 5, "cols": 5 },
///   "learning": { "alpha": 0.2, "gamma": 0.9, "episodes": 2000, "seed": 7 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub grid: GridWorldConfig,
    pub learning: QLearningConfig,
    pub report: Option<ReportConfig>,
}

impl ExperimentConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExperimentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let env = GridWorld::new(self.grid.clone())?;
        self.learning.validate()?;
        self.report_config(&env).validate(&env)
    }

    /// Report configuration to use for `env`
    pub fn report_config(&self, env: &GridWorld) -> ReportConfig {
        self.report
            .clone()
            .unwrap_or_else(|| ReportConfig::for_grid(env))
    }
}
