//! Deterministic transition and reward model

use serde::Serialize;

use super::{Action, GridState, GridWorldConfig, SpecialCell};
use crate::Result;

/// Reward for bumping into the edge of the grid
pub const WALL_PENALTY: f64 = -1.0;

/// What the environment returns for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub next_state: GridState,
    pub reward: f64,
}

/// A validated gridworld.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: GridWorldConfig,
}

impl GridWorld {
    /// Build an environment from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration
    /// fails [`GridWorldConfig::validate`].
    pub fn new(config: GridWorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridWorldConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    /// Number of cells in the grid
    pub fn num_states(&self) -> usize {
        self.config.rows * self.config.cols
    }

    pub fn contains(&self, state: GridState) -> bool {
        state.row < self.config.rows && state.col < self.config.cols
    }

    /// Row-major index of a state
    pub fn index_of(&self, state: GridState) -> usize {
        state.row * self.config.cols + state.col
    }

    /// Every state in row-major order
    pub fn states(&self) -> impl Iterator<Item = GridState> + '_ {
        (0..self.config.rows)
            .flat_map(move |row| (0..self.config.cols).map(move |col| GridState::new(row, col)))
    }

    /// Teleport starting at `state`, if any
    pub fn special_cell_at(&self, state: GridState) -> Option<&SpecialCell> {
        self.config
            .special_cells
            .iter()
            .find(|cell| cell.source == state)
    }

    /// Apply `action` in `state`.
    ///
    /// A teleport source ignores the action entirely. Otherwise the agent moves
    /// one cell for reward 0, or stays where it is for [`WALL_PENALTY`] when the
    /// move would leave the grid.
    pub fn step(&self, state: GridState, action: Action) -> Transition {
        if let Some(cell) = self.special_cell_at(state) {
            return Transition {
                next_state: cell.destination,
                reward: cell.reward,
            };
        }

        let (dr, dc) = action.delta();
        let moved = state
            .row
            .checked_add_signed(dr)
            .zip(state.col.checked_add_signed(dc))
            .map(|(row, col)| GridState::new(row, col))
            .filter(|&next| self.contains(next));

        match moved {
            Some(next_state) => Transition {
                next_state,
                reward: 0.0,
            },
            None => Transition {
                next_state: state,
                reward: WALL_PENALTY,
            },
        }
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self {
            config: GridWorldConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teleport_a_ignores_action() {
        let env = GridWorld::default();
        for action in Action::ALL {
            let t = env.step(GridState::new(0, 1), action);
            assert_eq!(t.next_state, GridState::new(4, 1));
            assert_eq!(t.reward, 10.0);
        }
    }

    #[test]
    fn test_teleport_b_ignores_action() {
        let env = GridWorld::default();
        for action in Action::ALL {
            let t = env.step(GridState::new(0, 3), action);
            assert_eq!(t.next_state, GridState::new(2, 3));
            assert_eq!(t.reward, 5.0);
        }
    }

    #[test]
    fn test_wall_collision() {
        let env = GridWorld::default();
        let t = env.step(GridState::new(0, 0), Action::North);
        assert_eq!(t.next_state, GridState::new(0, 0));
        assert_eq!(t.reward, -1.0);

        let t = env.step(GridState::new(4, 4), Action::East);
        assert_eq!(t.next_state, GridState::new(4, 4));
        assert_eq!(t.reward, -1.0);
    }

    #[test]
    fn test_ordinary_moves() {
        let env = GridWorld::default();
        let start = GridState::new(2, 2);
        let expected = [
            (Action::North, GridState::new(1, 2)),
            (Action::South, GridState::new(3, 2)),
            (Action::East, GridState::new(2, 3)),
            (Action::West, GridState::new(2, 1)),
        ];
        for (action, next) in expected {
            let t = env.step(start, action);
            assert_eq!(t.next_state, next);
            assert_eq!(t.reward, 0.0);
        }
    }

    #[test]
    fn test_states_row_major() {
        let env = GridWorld::default();
        let states: Vec<_> = env.states().collect();
        assert_eq!(states.len(), 25);
        assert_eq!(states[0], GridState::new(0, 0));
        assert_eq!(states[1], GridState::new(0, 1));
        assert_eq!(states[24], GridState::new(4, 4));
        assert_eq!(env.index_of(GridState::new(3, 2)), 17);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GridWorld::new(GridWorldConfig::new(2, 3)).is_err());
    }
}
