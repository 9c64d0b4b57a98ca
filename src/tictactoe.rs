//! Tic-Tac-Toe rules engine and minimax solver

pub mod board;
pub mod game;
pub mod lines;
pub mod minimax;

pub use board::{BoardState, Cell, Move, Player};
pub use game::{Game, GameOutcome, PlayedMove};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use minimax::{MinimaxSolver, SearchResult};
