//! Subcommand implementations

pub mod gridworld;
pub mod play;
pub mod selfplay;
pub mod solve;

use anyhow::{Result, anyhow};

use crate::tictactoe::Player;

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
