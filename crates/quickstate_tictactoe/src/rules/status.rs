//! Status derivation.

use super::draw::is_full;
use crate::{Board, Player, Status};
use tracing::instrument;

/// Derives the status line from board, turn and winner.
///
/// The winner is passed in rather than recomputed so callers that already
/// hold it (a cached view, a finished game) do not scan the board twice.
#[instrument(skip(board))]
pub fn compute_status(board: &Board, turn: Player, winner: Option<Player>) -> Status {
    match winner {
        Some(player) => Status::Winner(player),
        None if is_full(board) => Status::Draw,
        None => Status::Next(turn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_winner;

    #[test]
    fn test_next_player_on_empty_board() {
        let board = Board::new();
        assert_eq!(
            compute_status(&board, Player::X, None),
            Status::Next(Player::X)
        );
    }

    #[test]
    fn test_winner_status() {
        let board: Board = "XXX OO_ ___".parse().unwrap();
        let status = compute_status(&board, Player::O, compute_winner(&board));
        assert_eq!(status, Status::Winner(Player::X));
        assert_eq!(status.to_string(), "Winner: X");
    }

    #[test]
    fn test_draw_status() {
        let board: Board = "XOX OXX OXO".parse().unwrap();
        let status = compute_status(&board, Player::O, compute_winner(&board));
        assert_eq!(status, Status::Draw);
        assert_eq!(status.to_string(), "Draw!");
    }

    #[test]
    fn test_winner_on_full_board_is_not_draw() {
        let board: Board = "XXX OOX OXO".parse().unwrap();
        let status = compute_status(&board, Player::O, compute_winner(&board));
        assert_eq!(status, Status::Winner(Player::X));
    }
}
