//! Small laboratory for game search and tabular reinforcement learning
//!
//! This crate provides:
//! - Tic-Tac-Toe rules with an exhaustive minimax solver
//! - A 5x5 gridworld with teleporting cells
//! - A Q-learning agent with deterministic tie-breaking and policy reports
//! - Training observers and a command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use error::{Error, Result};
