//! History consistency invariant: history length matches occupied squares.

use super::Invariant;
use crate::Game;

/// Invariant: History length equals number of occupied squares.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        game.history().len() == game.board().occupied()
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    #[test]
    fn test_multiple_moves_hold() {
        let game = Game::replay(&[
            Position::TopLeft,
            Position::Center,
            Position::TopRight,
            Position::BottomLeft,
        ])
        .unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn test_unrecorded_square_violates() {
        let mut game = Game::new();
        game.board.set(Position::Center, Square::Occupied(Player::X));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
