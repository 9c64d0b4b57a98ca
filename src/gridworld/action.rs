//! Movement actions available to the gridworld agent

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the four compass moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    North,
    South,
    East,
    West,
}

impl Action {
    /// Every action, in table-column order
    pub const ALL: [Action; 4] = [Action::North, Action::South, Action::East, Action::West];

    /// Column of this action in an action-value row
    pub fn index(self) -> usize {
        match self {
            Action::North => 0,
            Action::South => 1,
            Action::East => 2,
            Action::West => 3,
        }
    }

    /// (row, column) displacement
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::North => (-1, 0),
            Action::South => (1, 0),
            Action::East => (0, 1),
            Action::West => (0, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::North => "north",
            Action::South => "south",
            Action::East => "east",
            Action::West => "west",
        }
    }

    pub fn arrow(self) -> char {
        match self {
            Action::North => '↑',
            Action::South => '↓',
            Action::East => '→',
            Action::West => '←',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" | "up" => Ok(Action::North),
            "south" | "s" | "down" => Ok(Action::South),
            "east" | "e" | "right" => Ok(Action::East),
            "west" | "w" | "left" => Ok(Action::West),
            _ => Err(crate::Error::ParseAction {
                input: s.to_string(),
            }),
        }
    }
}
