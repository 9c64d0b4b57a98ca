//! Output formatting helpers for CLI commands

use crate::tictactoe::BoardState;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Render a board with row and column indices for interactive play
pub fn format_board_with_coordinates(board: &BoardState) -> String {
    let mut out = String::from("    0 1 2\n");
    for (row, cells) in board.cells.chunks(3).enumerate() {
        let line: Vec<String> = cells.iter().map(|c| c.to_char().to_string()).collect();
        out.push_str(&format!("  {row} {}\n", line.join(" ")));
    }
    out
}
