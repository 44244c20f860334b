//! Quickstate - terminal front-end for the tic-tac-toe engine and the todo
//! store.
//!
//! # Architecture
//!
//! - **Adapters**: parse a line into a command, apply it, render text
//! - **REPL**: generic driver over `BufRead`/`Write`
//! - **Config**: TOML settings with command-line overrides
//!
//! # Example
//!
//! ```
//! use quickstate::{Reply, Session, TicTacToeSession};
//!
//! let mut session = TicTacToeSession::new();
//! let reply = session.handle("center").unwrap();
//! assert!(matches!(reply, Reply::Continue(text) if text.contains("Next player: O")));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapters;
mod cli;
mod config;
pub mod repl;

pub use adapters::{
    CommandError, GameCommand, Reply, Session, TicTacToeSession, TodoCommand, TodoEdit, TodoSession,
};
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
