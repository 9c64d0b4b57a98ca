//! Gridworld topology configuration

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::GridState;
use crate::{Error, Result};

/// A cell that teleports the agent and pays a fixed reward whatever it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialCell {
    pub name: String,
    pub source: GridState,
    pub destination: GridState,
    pub reward: f64,
}

impl SpecialCell {
    pub fn new(
        name: impl Into<String>,
        source: GridState,
        destination: GridState,
        reward: f64,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            destination,
            reward,
        }
    }
}

/// Grid dimensions and teleport table.
///
/// The default is the classic 5x5 layout: A at (0,1) jumps to (4,1) for +10,
/// B at (0,3) jumps to (2,3) for +5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWorldConfig {
    pub rows: usize,
    pub cols: usize,
    pub special_cells: Vec<SpecialCell>,
}

impl GridWorldConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            special_cells: Vec::new(),
        }
    }

    /// Add a teleport cell.
    pub fn with_special_cell(mut self, cell: SpecialCell) -> Self {
        self.special_cells.push(cell);
        self
    }

    fn in_bounds(&self, state: GridState) -> bool {
        state.row < self.rows && state.col < self.cols
    }

    /// Reject layouts the environment cannot run on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the grid is empty or not
    /// square, or a special cell is out of bounds, duplicated, teleports onto
    /// itself, or carries a non-finite reward.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::config(format!(
                "grid must have at least one row and column (got {}x{})",
                self.rows, self.cols
            )));
        }
        if self.rows != self.cols {
            return Err(Error::config(format!(
                "grid must be square (got {}x{})",
                self.rows, self.cols
            )));
        }

        let mut sources = HashSet::new();
        for cell in &self.special_cells {
            if !self.in_bounds(cell.source) {
                return Err(Error::config(format!(
                    "special cell '{}' source {} lies outside the {}x{} grid",
                    cell.name, cell.source, self.rows, self.cols
                )));
            }
            if !self.in_bounds(cell.destination) {
                return Err(Error::config(format!(
                    "special cell '{}' destination {} lies outside the {}x{} grid",
                    cell.name, cell.destination, self.rows, self.cols
                )));
            }
            if cell.source == cell.destination {
                return Err(Error::config(format!(
                    "special cell '{}' teleports onto itself at {}",
                    cell.name, cell.source
                )));
            }
            if !cell.reward.is_finite() {
                return Err(Error::config(format!(
                    "special cell '{}' reward must be finite (got {})",
                    cell.name, cell.reward
                )));
            }
            if !sources.insert(cell.source) {
                return Err(Error::config(format!(
                    "more than one special cell starts at {}",
                    cell.source
                )));
            }
        }

        Ok(())
    }
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self::new(5, 5)
            .with_special_cell(SpecialCell::new(
                "A",
                GridState::new(0, 1),
                GridState::new(4, 1),
                10.0,
            ))
            .with_special_cell(SpecialCell::new(
                "B",
                GridState::new(0, 3),
                GridState::new(2, 3),
                5.0,
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridWorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.special_cells.len(), 2);
    }

    #[test]
    fn test_rejects_non_square_grid() {
        let err = GridWorldConfig::new(4, 5).validate().unwrap_err();
        assert!(err.to_string().contains("square"));
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(GridWorldConfig::new(0, 0).validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_bounds_destination() {
        let config = GridWorldConfig::new(3, 3).with_special_cell(SpecialCell::new(
            "A",
            GridState::new(0, 1),
            GridState::new(4, 1),
            10.0,
        ));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_rejects_duplicate_sources() {
        let config = GridWorldConfig::new(5, 5)
            .with_special_cell(SpecialCell::new(
                "A",
                GridState::new(0, 1),
                GridState::new(4, 1),
                10.0,
            ))
            .with_special_cell(SpecialCell::new(
                "A2",
                GridState::new(0, 1),
                GridState::new(2, 3),
                5.0,
            ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_self_teleport_and_nan_reward() {
        let self_loop = GridWorldConfig::new(5, 5).with_special_cell(SpecialCell::new(
            "L",
            GridState::new(2, 2),
            GridState::new(2, 2),
            1.0,
        ));
        assert!(self_loop.validate().is_err());

        let nan = GridWorldConfig::new(5, 5).with_special_cell(SpecialCell::new(
            "N",
            GridState::new(2, 2),
            GridState::new(3, 3),
            f64::NAN,
        ));
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: GridWorldConfig = serde_json::from_str(r#"{"rows": 5, "cols": 5}"#).unwrap();
        assert_eq!(config, GridWorldConfig::default());
    }
}
