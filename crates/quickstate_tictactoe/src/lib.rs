//! Quickstate tic-tac-toe - pure game engine.
//!
//! The engine is a plain owned state object ([`Game`]) plus the pure
//! transition functions it is built from. A rendering layer feeds cell
//! clicks in and re-renders from the derived [`Status`].
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Square`], [`Player`], [`Status`], [`Phase`]
//! - **Rules**: [`compute_winner`], [`compute_status`], [`apply_move`], [`reset`]
//! - **Game**: owned state with move history and invariant checks
//!
//! # Example
//!
//! ```
//! use quickstate_tictactoe::{Game, Phase, Player, Position};
//!
//! let mut game = Game::new();
//! game.play(Position::Center).unwrap();
//! assert_eq!(game.turn(), Player::O);
//! assert_eq!(game.phase(), Phase::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use position::{Position, PositionParseError};
pub use rules::{apply_move, compute_status, compute_winner, is_draw, is_full, reset, winning_line};
pub use types::{Board, BoardParseError, Phase, Player, Square, Status};
