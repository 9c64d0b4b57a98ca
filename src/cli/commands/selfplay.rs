//! Selfplay command - Let the minimax solver play both sides

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    tictactoe::{BoardState, Game, GameOutcome, MinimaxSolver},
};

#[derive(Parser, Debug)]
#[command(about = "Play minimax against itself from the empty board")]
pub struct SelfplayArgs {}

/// Play a full game with the solver choosing every move.
pub fn play_out() -> Result<Game> {
    let solver = MinimaxSolver::new();
    let mut game = Game::new();
    while !game.is_over() {
        let mv = solver
            .best_move(game.state())
            .ok_or_else(|| anyhow!("solver returned no move for a live position"))?;
        game.play(mv)?;
    }
    Ok(game)
}

pub fn execute(_args: SelfplayArgs) -> Result<()> {
    let game = play_out()?;

    print_section("Minimax self-play");
    let mut state = BoardState::new();
    for (ply, played) in game.moves().iter().enumerate() {
        state = state.apply_move(played.mv)?;
        print_subsection(&format!("Ply {}: {} plays {}", ply + 1, played.player, played.mv));
        println!("{state}");
    }

    let result = match game.outcome() {
        Some(GameOutcome::Win(player)) => format!("{player} wins"),
        Some(GameOutcome::Draw) => "tie".to_string(),
        None => "unfinished".to_string(),
    };
    println!();
    print_kv("Result", &result);
    Ok(())
}
