//! Read-only evaluation of a learned action-value table
//!
//! Produces the state-value grid V(s) = max_a Q(s, a) and the greedy action
//! per cell. Display overrides swap the tie-break priority for individual
//! cells; they only change what is shown, never what was learned.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{policy::TieBreakPolicy, q_table::ActionValueTable};
use crate::{
    Error, Result,
    gridworld::{Action, GridState, GridWorld},
};

/// Alternate tie-break priority for one cell in reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOverride {
    pub state: GridState,
    pub priority: Vec<Action>,
}

/// Per-cell display overrides applied on top of the learner's tie-break policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub overrides: Vec<DisplayOverride>,
}

impl ReportConfig {
    /// Report with no per-cell overrides
    pub fn plain() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, state: GridState, priority: Vec<Action>) -> Self {
        self.overrides.push(DisplayOverride { state, priority });
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if an override priority is
    /// malformed or an override lies outside `env`.
    pub fn validate(&self, env: &GridWorld) -> Result<()> {
        for entry in &self.overrides {
            if !env.contains(entry.state) {
                return Err(Error::config(format!(
                    "display override at {} lies outside the {}x{} grid",
                    entry.state,
                    env.rows(),
                    env.cols()
                )));
            }
            TieBreakPolicy::default()
                .with_priority(entry.priority.clone())
                .validate()?;
        }
        Ok(())
    }

    /// `base` with the priority of any override for `state` swapped in.
    /// The tolerance always comes from `base`.
    fn policy_for(&self, base: &TieBreakPolicy, state: GridState) -> TieBreakPolicy {
        match self.overrides.iter().find(|o| o.state == state) {
            Some(entry) => base.with_priority(entry.priority.clone()),
            None => base.clone(),
        }
    }

    /// Default report for `env`: a west > north > east > south override on
    /// the bottom-right corner.
    pub fn for_grid(env: &GridWorld) -> Self {
        let corner = GridState::new(env.rows() - 1, env.cols() - 1);
        Self::plain().with_override(
            corner,
            vec![Action::West, Action::North, Action::East, Action::South],
        )
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::for_grid(&GridWorld::default())
    }
}

/// Value and displayed greedy action of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellReport {
    pub state: GridState,
    pub value: f64,
    pub action: Action,
}

/// Row-major per-cell report of a learned table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellReport>,
}

impl PolicyReport {
    /// Evaluate `table` over every state of `env`, choosing actions with
    /// `policy` (the one used for training) plus the display overrides in
    /// `config`. Never mutates the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the table was not built for
    /// a grid of `env`'s size.
    pub fn evaluate(
        table: &ActionValueTable,
        env: &GridWorld,
        policy: &TieBreakPolicy,
        config: &ReportConfig,
    ) -> Result<Self> {
        if table.rows() != env.rows() || table.cols() != env.cols() {
            return Err(Error::config(format!(
                "action-value table is {}x{} but the grid is {}x{}",
                table.rows(),
                table.cols(),
                env.rows(),
                env.cols()
            )));
        }

        let cells = env
            .states()
            .map(|state| CellReport {
                state,
                value: table.max_value(state),
                action: config.policy_for(policy, state).select(table.values(state)),
            })
            .collect();

        Ok(Self {
            rows: env.rows(),
            cols: env.cols(),
            cells,
        })
    }

    pub fn cell(&self, state: GridState) -> Option<&CellReport> {
        if state.row >= self.rows || state.col >= self.cols {
            return None;
        }
        self.cells.get(state.row * self.cols + state.col)
    }

    fn render_with(&self, mut cell_text: impl FnMut(&CellReport) -> String) -> String {
        let mut out = String::new();
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: Vec<String> = row.iter().map(&mut cell_text).collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }
        out
    }

    /// State values with two decimals
    pub fn render_values(&self) -> String {
        self.render_with(|cell| format!("{:.2}", cell.value))
    }

    /// Action names padded to six characters
    pub fn render_action_names(&self) -> String {
        self.render_with(|cell| format!("{:<6}", cell.action.name()))
    }

    /// One arrow glyph per cell
    pub fn render_arrows(&self) -> String {
        self.render_with(|cell| cell.action.arrow().to_string())
    }
}
