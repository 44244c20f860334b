//! Game rules for tic-tac-toe.
//!
//! Pure functions over boards. Rules are kept apart from [`Game`](crate::Game)
//! so a rendering layer can derive its view without owning a game.

pub mod draw;
pub mod status;
pub mod transition;
pub mod win;

pub use draw::{is_draw, is_full};
pub use status::compute_status;
pub use transition::{apply_move, reset};
pub use win::{LINES, compute_winner, winning_line};
