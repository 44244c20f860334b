//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    #[display("X")]
    X,
    /// Player O (goes second).
    #[display("O")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty squares show their index so a player can type it.
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => pos.to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The text did not contain exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
    /// A cell character was not `X`, `O`, `_` or `.`.
    #[display("Invalid cell character {:?}", _0)]
    InvalidCell(char),
}

impl std::error::Error for BoardParseError {}

/// Parses `"XX_OO____"`-style boards. Whitespace and `,`/`|` separators
/// are ignored; `_` and `.` mark empty cells.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && *c != '|')
            .map(|c| match c.to_ascii_uppercase() {
                'X' => Ok(Square::Occupied(Player::X)),
                'O' => Ok(Square::Occupied(Player::O)),
                '_' | '.' => Ok(Square::Empty),
                other => Err(BoardParseError::InvalidCell(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|cells: Vec<Square>| BoardParseError::WrongLength(cells.len()))?;
        Ok(Self::from_squares(squares))
    }
}

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    InProgress,
    /// A player completed a triple. Only reset leaves this phase.
    Won,
    /// The board filled without a winner. Only reset leaves this phase.
    Draw,
}

/// Status line derived from board, turn and winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// A player has won.
    #[display("Winner: {}", _0)]
    Winner(Player),
    /// Board is full with no winner.
    #[display("Draw!")]
    Draw,
    /// Game continues; the given player moves next.
    #[display("Next player: {}", _0)]
    Next(Player),
}

impl Status {
    /// Returns the phase this status belongs to.
    pub fn phase(self) -> Phase {
        match self {
            Status::Winner(_) => Phase::Won,
            Status::Draw => Phase::Draw,
            Status::Next(_) => Phase::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let board: Board = "XX_ OO_ ___".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
        assert!(board.is_empty(Position::TopRight));
        assert_eq!(board.occupied(), 4);
    }

    #[test]
    fn test_parse_board_wrong_length() {
        assert_eq!(
            "XX_".parse::<Board>(),
            Err(BoardParseError::WrongLength(3))
        );
    }

    #[test]
    fn test_parse_board_invalid_cell() {
        assert_eq!(
            "XX_OO_??_".parse::<Board>(),
            Err(BoardParseError::InvalidCell('?'))
        );
    }

    #[test]
    fn test_display_shows_indices_for_empty() {
        let board: Board = "X________".parse().unwrap();
        assert_eq!(board.display(), "X|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Winner(Player::X).to_string(), "Winner: X");
        assert_eq!(Status::Draw.to_string(), "Draw!");
        assert_eq!(Status::Next(Player::O).to_string(), "Next player: O");
    }

    #[test]
    fn test_board_serializes() {
        let board: Board = "X___O____".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
