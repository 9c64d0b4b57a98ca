//! Winning line analysis for Tic-Tac-Toe

use super::Cell;

/// Winning line indices on the 3x3 board, in the order they are checked
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First line filled with one non-empty mark, if any.
    pub fn winning_line(cells: &[Cell; 9]) -> Option<[usize; 3]> {
        WINNING_LINES.iter().copied().find(|&[a, b, c]| {
            cells[a] != Cell::Empty && cells[a] == cells[b] && cells[b] == cells[c]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_line_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[3] = Cell::X;
        cells[4] = Cell::X;
        cells[5] = Cell::X;

        assert_eq!(LineAnalyzer::winning_line(&cells), Some([3, 4, 5]));
    }

    #[test]
    fn test_winning_line_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[1] = Cell::O;
        cells[4] = Cell::O;
        cells[7] = Cell::O;

        assert_eq!(LineAnalyzer::winning_line(&cells), Some([1, 4, 7]));
    }

    #[test]
    fn test_rows_checked_before_columns() {
        // X X X
        // X . .
        // X . .
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 1, 2, 3, 6] {
            cells[idx] = Cell::X;
        }

        assert_eq!(LineAnalyzer::winning_line(&cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let cells = [Cell::Empty; 9];
        assert_eq!(LineAnalyzer::winning_line(&cells), None);
    }
}
