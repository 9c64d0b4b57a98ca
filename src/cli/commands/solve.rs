//! Solve command - Report the minimax move for a given position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_board_with_coordinates, print_kv, print_section},
    tictactoe::{BoardState, GameOutcome, MinimaxSolver},
};

#[derive(Parser, Debug)]
#[command(about = "Find the optimal move for a Tic-Tac-Toe position")]
pub struct SolveArgs {
    /// Board as nine cells in row-major order using X, O and '.', e.g. "XX.OO...."
    pub board: String,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = BoardState::from_string(&args.board)
        .with_context(|| format!("parsing board '{}'", args.board))?;

    print_section("Position");
    print!("{}", format_board_with_coordinates(&board));

    if let Some(outcome) = board.outcome() {
        let result = match outcome {
            GameOutcome::Win(player) => format!("{player} wins"),
            GameOutcome::Draw => "tie".to_string(),
        };
        print_kv("Game over", &result);
        return Ok(());
    }

    let result = MinimaxSolver::new().evaluate(&board);
    print_kv("To move", &board.current_player().to_string());
    if let Some(mv) = result.best_move {
        print_kv("Best move", &mv.to_string());
    }
    print_kv("Value (X view)", &result.value.to_string());
    print_kv("Nodes searched", &result.nodes_visited.to_string());
    Ok(())
}
