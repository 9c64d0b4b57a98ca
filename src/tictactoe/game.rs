//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Move, Player};

/// A move played during a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedMove {
    pub mv: Move,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Score from X's perspective
    pub fn utility(self) -> i32 {
        match self {
            GameOutcome::Win(Player::X) => 1,
            GameOutcome::Win(Player::O) => -1,
            GameOutcome::Draw => 0,
        }
    }
}

/// A game in progress together with its history.
///
/// Unlike [`BoardState::apply_move`], which stays permissive on decided
/// boards, a `Game` refuses further moves once it has an outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    state: BoardState,
    moves: Vec<PlayedMove>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for whichever player is to act
    pub fn play(&mut self, mv: Move) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.state.current_player();
        self.state = self.state.apply_move(mv)?;
        self.moves.push(PlayedMove { mv, player });
        self.outcome = self.state.outcome();

        Ok(())
    }

    /// Current board state
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Moves played so far, in order
    pub fn moves(&self) -> &[PlayedMove] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
