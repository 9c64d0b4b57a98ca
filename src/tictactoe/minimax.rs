//! Exhaustive minimax search for Tic-Tac-Toe
//!
//! X maximises [`BoardState::utility`], O minimises it. Children are visited
//! in row-major order and a sibling scan stops as soon as the mover reaches
//! the best score it could ever get (+1 for X, -1 for O). There is no
//! alpha-beta bound passed between frames and no transposition table; the
//! full tree is small enough that neither is needed.

use serde::Serialize;
use tracing::debug;

use super::board::{BoardState, Move, Player};

/// Result of searching one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Game-theoretic value with both sides playing perfectly
    pub value: i32,
    /// Move achieving `value`, `None` for terminal positions
    pub best_move: Option<Move>,
    /// Positions expanded during the search, the root included
    pub nodes_visited: usize,
}

/// Stateless minimax solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxSolver;

impl MinimaxSolver {
    pub fn new() -> Self {
        MinimaxSolver
    }

    /// Optimal move for the player to act, or `None` if the game is over.
    pub fn best_move(&self, board: &BoardState) -> Option<Move> {
        self.evaluate(board).best_move
    }

    /// Search `board` and report its value, best move and search size.
    pub fn evaluate(&self, board: &BoardState) -> SearchResult {
        let mut nodes = 0;
        let (value, best_move) = if board.is_terminal() {
            nodes += 1;
            (board.utility(), None)
        } else {
            match board.current_player() {
                Player::X => max_value(board, &mut nodes),
                Player::O => min_value(board, &mut nodes),
            }
        };

        debug!(
            board = %board.encode(),
            value,
            best_move = ?best_move,
            nodes_visited = nodes,
            "minimax search finished"
        );

        SearchResult {
            value,
            best_move,
            nodes_visited: nodes,
        }
    }
}

fn max_value(board: &BoardState, nodes: &mut usize) -> (i32, Option<Move>) {
    *nodes += 1;
    if board.is_terminal() {
        return (board.utility(), None);
    }

    let mut best = i32::MIN;
    let mut best_move = None;
    for mv in board.legal_moves() {
        let Ok(child) = board.apply_move(mv) else {
            continue;
        };
        let (value, _) = min_value(&child, nodes);
        if value > best {
            best = value;
            best_move = Some(mv);
            if best == 1 {
                break;
            }
        }
    }

    (best, best_move)
}

fn min_value(board: &BoardState, nodes: &mut usize) -> (i32, Option<Move>) {
    *nodes += 1;
    if board.is_terminal() {
        return (board.utility(), None);
    }

    let mut best = i32::MAX;
    let mut best_move = None;
    for mv in board.legal_moves() {
        let Ok(child) = board.apply_move(mv) else {
            continue;
        };
        let (value, _) = max_value(&child, nodes);
        if value < best {
            best = value;
            best_move = Some(mv);
            if best == -1 {
                break;
            }
        }
    }

    (best, best_move)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let solver = MinimaxSolver::new();
        assert_eq!(solver.best_move(&board("XXXOO....")), None);
        assert_eq!(solver.best_move(&board("XOXXOOOXX")), None);

        let result = solver.evaluate(&board("XXXOO...."));
        assert_eq!(result.value, 1);
        assert_eq!(result.nodes_visited, 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X .
        // O O .
        // . . .
        let position = board("XX.OO....");
        let mv = MinimaxSolver::new().best_move(&position).unwrap();
        assert_eq!(mv, Move::new(0, 2).unwrap());
        assert_eq!(position.apply_move(mv).unwrap().utility(), 1);
    }

    #[test]
    fn test_o_takes_immediate_win() {
        // X X .
        // O O .
        // X . .
        let position = board("XX.OO.X..");
        let mv = MinimaxSolver::new().best_move(&position).unwrap();
        assert_eq!(mv, Move::new(1, 2).unwrap());
        assert_eq!(position.apply_move(mv).unwrap().utility(), -1);
    }

    #[test]
    fn test_o_blocks_threat() {
        // X X .
        // . O .
        // . . .
        let position = board("XX..O....");
        let mv = MinimaxSolver::new().best_move(&position).unwrap();
        assert_eq!(mv, Move::new(0, 2).unwrap());
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let result = MinimaxSolver::new().evaluate(&BoardState::new());
        assert_eq!(result.value, 0);
        // Every opening draws, so the first one enumerated is kept.
        assert_eq!(result.best_move, Some(Move::new(0, 0).unwrap()));
        assert!(result.nodes_visited > 1);
    }

    #[test]
    fn test_search_is_deterministic() {
        let solver = MinimaxSolver::new();
        let position = board("X...O....");
        assert_eq!(solver.evaluate(&position), solver.evaluate(&position));
    }
}
