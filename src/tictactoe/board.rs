//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A (row, column) coordinate on the 3x3 board.
///
/// Fields are private so every `Move` is on the board; deserialisation goes
/// through the same check as [`Move::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawMove")]
pub struct Move {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawMove {
    row: usize,
    col: usize,
}

impl TryFrom<RawMove> for Move {
    type Error = crate::Error;

    fn try_from(raw: RawMove) -> Result<Self, Self::Error> {
        Move::new(raw.row, raw.col)
    }
}

impl Move {
    /// Create a move, rejecting coordinates outside the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] if either coordinate is greater than 2.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Move { row, col })
        } else {
            Err(crate::Error::InvalidMove { row, col })
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Move {
            row: index / 3,
            col: index % 3,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

/// Immutable 3x3 board.
///
/// The player to move is derived from the piece counts rather than stored,
/// so every board built through [`BoardState::apply_move`] keeps
/// `count(X) - count(O)` in `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; 9],
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; 9],
        }
    }

    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and `|` separators are ignored, so `"XO.|...|..."` and
    /// `"XO. ... ..."` both parse. Exactly nine cells are required.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board does not contain exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts could not arise from X-first play
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let count = Self::count_pieces(&cells);
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(BoardState { cells })
    }

    /// Get cell at a coordinate
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.index()]
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Player whose turn it is: X whenever X has not placed more marks than O.
    pub fn current_player(&self) -> Player {
        let count = Self::count_pieces(&self.cells);
        if count.x <= count.o {
            Player::X
        } else {
            Player::O
        }
    }

    /// All empty cells in row-major order.
    ///
    /// Terminal boards are not special-cased: a won board with empty cells
    /// still reports them.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::from_index(i))
            .collect()
    }

    /// Place the current player's mark and return the resulting board.
    #[must_use = "apply_move returns a new board state; the original is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<BoardState, crate::Error> {
        if self.get(mv) != Cell::Empty {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = *self;
        next.cells[mv.index()] = self.current_player().to_cell();
        Ok(next)
    }

    /// Owner of the first complete line (rows, then columns, then diagonals).
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winning_line(&self.cells).and_then(|line| self.cells[line[0]].to_player())
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// +1 if X has won, -1 if O has won, 0 otherwise (including unfinished boards).
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// Outcome of a finished game, `None` while play continues.
    pub fn outcome(&self) -> Option<super::GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(super::GameOutcome::Win(winner))
        } else if self.is_terminal() {
            Some(super::GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Compact single-line encoding, e.g. `XO.......`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
