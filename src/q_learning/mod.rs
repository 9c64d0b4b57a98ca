//! Tabular Q-learning on the teleporting gridworld
//!
//! The learner estimates Q*(s, a) from sampled transitions using the
//! off-policy temporal-difference rule
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! while behaving ε-greedily. Greedy choices, both while training and in the
//! final report, go through a [`TieBreakPolicy`] so near-equal values always
//! resolve the same way.
//!
//! ## Usage Example
//!
//! ```no_run
//! use playlab::gridworld::GridWorld;
//! use playlab::q_learning::{QLearner, QLearningConfig, ReportConfig};
//!
//! let env = GridWorld::default();
//! let mut learner = QLearner::new(env.clone(), QLearningConfig::default().with_seed(42))?;
//! learner.train()?;
//!
//! let report = learner.report(&ReportConfig::for_grid(&env))?;
//! print!("{}", report.render_arrows());
//! # Ok::<(), playlab::Error>(())
//! ```

pub mod config;
pub mod learner;
pub mod policy;
pub mod q_table;
pub mod report;

// Public re-exports
pub use config::QLearningConfig;
pub use learner::{EpisodeEnd, EpisodeStats, QLearner, TrainingSummary};
pub use policy::{DEFAULT_TOLERANCE, TieBreakPolicy};
pub use q_table::ActionValueTable;
pub use report::{CellReport, DisplayOverride, PolicyReport, ReportConfig};
