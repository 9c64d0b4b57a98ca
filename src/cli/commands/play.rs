//! Play command - Human versus minimax on the console

use std::io::{self, BufRead, Write};

use anyhow::{Result, anyhow};
use clap::Parser;

use super::parse_player_token;
use crate::{
    cli::output::format_board_with_coordinates,
    tictactoe::{Game, GameOutcome, MinimaxSolver, Move, Player},
};

#[derive(Parser, Debug)]
#[command(about = "Play Tic-Tac-Toe against the minimax solver")]
pub struct PlayArgs {
    /// Which mark the human plays (`x` moves first)
    #[arg(long, default_value = "x")]
    pub human: String,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human = parse_player_token(&args.human, "--human")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    play_game(human, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Parse "row col" or "row,col"
fn parse_move(line: &str) -> Option<Move> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Move::new(row, col).ok()
}

/// Run one console game. The human's moves are read line by line from `input`.
pub fn play_game<R: BufRead, W: Write>(
    human: Player,
    mut input: R,
    mut output: W,
) -> Result<GameOutcome> {
    let solver = MinimaxSolver::new();
    let mut game = Game::new();

    writeln!(output, "You are {human}. Enter moves as 'row col' (0-2).")?;
    while !game.is_over() {
        write!(output, "\n{}", format_board_with_coordinates(game.state()))?;
        let to_move = game.state().current_player();

        if to_move == human {
            write!(output, "Your move ({human}): ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(anyhow!("input ended before the game finished"));
            }
            match parse_move(&line) {
                Some(mv) => {
                    if let Err(e) = game.play(mv) {
                        writeln!(output, "Invalid move: {e}")?;
                    }
                }
                None => writeln!(output, "Could not read '{}', try e.g. '1 1'", line.trim())?,
            }
        } else {
            let mv = solver
                .best_move(game.state())
                .ok_or_else(|| anyhow!("solver returned no move for a live position"))?;
            writeln!(output, "AI ({to_move}) plays {mv}")?;
            game.play(mv)?;
        }
    }

    let outcome = game
        .outcome()
        .ok_or_else(|| anyhow!("game loop ended without an outcome"))?;
    write!(output, "\n{}", format_board_with_coordinates(game.state()))?;
    match outcome {
        GameOutcome::Win(player) if player == human => writeln!(output, "Game over: you win!")?,
        GameOutcome::Win(player) => writeln!(output, "Game over: {player} wins.")?,
        GameOutcome::Draw => writeln!(output, "Game over: tie.")?,
    }
    Ok(outcome)
}
