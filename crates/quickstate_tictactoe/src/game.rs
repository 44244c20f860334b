//! Owned game state driven by cell-click and restart events.

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, TicTacToeInvariants};
use super::position::Position;
use super::rules::{apply_move, compute_status, compute_winner, reset, winning_line};
use super::types::{Board, Phase, Player, Status};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe game: board, turn flag and move history.
///
/// A rendering layer owns one `Game` per session, calls [`Game::play`] on
/// a cell click and [`Game::reset`] on restart, then re-renders from
/// [`Game::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) turn: Player,
    pub(crate) history: Vec<Move>,
}

impl Game {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        let (board, turn) = reset();
        Self {
            board,
            turn,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose mark the next accepted move places.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        compute_winner(&self.board)
    }

    /// Returns the winning triple, if any.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        winning_line(&self.board)
    }

    /// Returns the derived status line.
    pub fn status(&self) -> Status {
        compute_status(&self.board, self.turn, self.winner())
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.status().phase()
    }

    /// Returns the squares a move may still target. Empty once the game is over.
    pub fn valid_moves(&self) -> Vec<Position> {
        match self.phase() {
            Phase::InProgress => Position::valid_moves(&self.board),
            Phase::Won | Phase::Draw => Vec::new(),
        }
    }

    /// Places the current player's mark at `pos`.
    ///
    /// Returns the phase after the move. A rejected move leaves the game
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game is won or drawn
    /// - [`MoveError::SquareOccupied`] if the square is taken
    /// - [`MoveError::InvariantViolation`] if the resulting state breaks an
    ///   engine invariant
    #[instrument(skip(self), fields(player = %self.turn))]
    pub fn play(&mut self, pos: Position) -> Result<Phase, MoveError> {
        if self.phase() != Phase::InProgress {
            warn!(position = %pos, "Move rejected: game is over");
            return Err(MoveError::GameOver);
        }

        let (board, turn) = apply_move(self.board, self.turn, pos.to_index())?;
        let mut history = self.history.clone();
        history.push(Move::new(self.turn, pos));

        let next = Self {
            board,
            turn,
            history,
        };

        TicTacToeInvariants::check_all(&next).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(descriptions)
        })?;

        *self = next;
        let phase = self.phase();
        info!(position = %pos, ?phase, "Move applied");
        Ok(phase)
    }

    /// Places the current player's mark at board index `cell` (0-8).
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfBounds`] for indices past 8, otherwise as
    /// [`Game::play`].
    #[instrument(skip(self))]
    pub fn play_index(&mut self, cell: usize) -> Result<Phase, MoveError> {
        let pos = Position::from_index(cell).ok_or(MoveError::OutOfBounds(cell))?;
        self.play(pos)
    }

    /// Restarts: empty board, X to move, history cleared.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!(moves = self.history.len(), "Resetting game");
        *self = Self::new();
    }

    /// Rebuilds a game by playing `moves` in order from a fresh board.
    ///
    /// # Errors
    ///
    /// The first rejected move's error.
    #[instrument]
    pub fn replay(moves: &[Position]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for pos in moves {
            game.play(*pos)?;
        }
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
