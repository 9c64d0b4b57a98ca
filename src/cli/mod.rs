//! Command-line interface for playlab
//!
//! Subcommands train the gridworld learner and drive the Tic-Tac-Toe solver
//! from a terminal.

pub mod commands;
pub mod output;
