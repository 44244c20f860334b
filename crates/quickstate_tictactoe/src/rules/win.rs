//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use tracing::instrument;

/// The 8 winning triples in fixed evaluation order: rows top to bottom,
/// columns left to right, then the two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first triple in [`LINES`] held entirely by one player.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<[Position; 3]> {
    LINES.into_iter().find(|&[a, b, c]| {
        let sq = board.get(a);
        sq != Square::Empty && sq == board.get(b) && sq == board.get(c)
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn compute_winner(board: &Board) -> Option<Player> {
    winning_line(board).and_then(|[a, _, _]| board.get(a).player())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        assert_eq!(compute_winner(&board), Some(Player::X));
        assert_eq!(
            winning_line(&board),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_winner_diagonal() {
        let board: Board = "O_X _OX __O".parse().unwrap();
        assert_eq!(compute_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "__X _X_ X__".parse().unwrap();
        assert_eq!(
            winning_line(&board),
            Some([Position::TopRight, Position::Center, Position::BottomLeft])
        );
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_ ___ ___".parse().unwrap();
        assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XOX ___ ___".parse().unwrap();
        assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn test_rows_checked_before_columns() {
        // Unreachable in play, but fixes evaluation order: row 0 (X) wins
        // over column 2 (also X here) and column 0.
        let board: Board = "XXX X_X X_X".parse().unwrap();
        assert_eq!(
            winning_line(&board),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
    }

    #[test]
    fn test_every_line_detected_for_both_players() {
        for player in [Player::X, Player::O] {
            for line in LINES {
                let mut board = Board::new();
                for pos in line {
                    board.set(pos, Square::Occupied(player));
                }
                assert_eq!(compute_winner(&board), Some(player), "line {line:?}");
            }
        }
    }
}
