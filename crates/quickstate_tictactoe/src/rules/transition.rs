//! Pure state transitions: move application and reset.

use super::win::compute_winner;
use crate::{Board, MoveError, Player, Position, Square};
use tracing::{instrument, warn};

/// Applies a move for `turn` at board index `cell`.
///
/// Returns the new board and the player to move next. The input board is
/// untouched; on rejection the caller keeps its current state.
///
/// # Errors
///
/// - [`MoveError::OutOfBounds`] if `cell > 8`
/// - [`MoveError::GameOver`] if the board already has a winner
/// - [`MoveError::SquareOccupied`] if the cell is taken
#[instrument]
pub fn apply_move(board: Board, turn: Player, cell: usize) -> Result<(Board, Player), MoveError> {
    let pos = Position::from_index(cell).ok_or(MoveError::OutOfBounds(cell))?;

    if compute_winner(&board).is_some() {
        warn!(cell, "Move rejected: game already won");
        return Err(MoveError::GameOver);
    }

    if !board.is_empty(pos) {
        warn!(cell, "Move rejected: square occupied");
        return Err(MoveError::SquareOccupied(pos));
    }

    let mut next = board;
    next.set(pos, Square::Occupied(turn));
    Ok((next, turn.opponent()))
}

/// Initial state: empty board, X to move.
pub fn reset() -> (Board, Player) {
    (Board::new(), Player::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Status, compute_status};

    #[test]
    fn test_move_places_mark_and_flips_turn() {
        let (board, turn) = reset();
        let (board, turn) = apply_move(board, turn, 4).unwrap();
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(turn, Player::O);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let (board, turn) = apply_move(Board::new(), Player::X, 0).unwrap();
        assert_eq!(
            apply_move(board, turn, 0),
            Err(MoveError::SquareOccupied(Position::TopLeft))
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert_eq!(
            apply_move(Board::new(), Player::X, 9),
            Err(MoveError::OutOfBounds(9))
        );
    }

    #[test]
    fn test_move_after_win_rejected() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        assert_eq!(apply_move(board, Player::O, 5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_completing_move_wins() {
        let board: Board = "XX_ OO_ ___".parse().unwrap();
        let (board, turn) = apply_move(board, Player::X, 2).unwrap();
        let winner = compute_winner(&board);
        assert_eq!(winner, Some(Player::X));
        assert_eq!(compute_status(&board, turn, winner).to_string(), "Winner: X");
        assert_eq!(compute_status(&board, turn, winner), Status::Winner(Player::X));
    }
}
