//! Text adapters between terminal lines and the state engines.
//!
//! Each adapter parses a line into a command, applies it to the state it
//! owns and renders the result as text. Nothing here touches stdin or
//! stdout; [`crate::repl`] does the I/O.

mod tictactoe;
mod todo;

pub use tictactoe::{GameCommand, TicTacToeSession};
pub use todo::{TodoCommand, TodoEdit, TodoSession};

/// What the driver should do after a line is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and read the next line.
    Continue(String),
    /// Print this text and stop.
    Quit(String),
}

/// A line that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{}", message)]
pub struct CommandError {
    /// Message shown to the user.
    pub message: String,
}

impl CommandError {
    /// Creates a command error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A line-driven session over some owned state.
pub trait Session {
    /// Prompt printed before each line.
    fn prompt(&self) -> &'static str;

    /// Text shown when the session starts.
    fn banner(&self) -> String;

    /// Handles one input line.
    ///
    /// # Errors
    ///
    /// [`CommandError`] when the line does not parse or names a rejected
    /// event; the state is unchanged.
    fn handle(&mut self, line: &str) -> Result<Reply, CommandError>;
}

/// Splits `line` into a lowercase verb and the trimmed rest.
pub(crate) fn split_verb(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_verb() {
        assert_eq!(split_verb("  ADD  buy milk "), ("add".to_string(), "buy milk"));
        assert_eq!(split_verb("list"), ("list".to_string(), ""));
        assert_eq!(split_verb(""), (String::new(), ""));
    }
}
