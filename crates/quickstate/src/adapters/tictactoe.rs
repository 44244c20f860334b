//! Tic-tac-toe text adapter.

use super::{CommandError, Reply, Session, split_verb};
use quickstate_tictactoe::{Game, Phase, Position};
use tracing::{debug, instrument};

const HELP: &str = "\
Commands:
  <0-8|label>   place the next mark (e.g. 4, center, top-left)
  restart       start a new game
  board         show the board
  help          show this help
  quit          leave";

/// A parsed tic-tac-toe command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Click a cell.
    Play(Position),
    /// Start over.
    Restart,
    /// Redraw.
    Board,
    /// Show help.
    Help,
    /// Leave.
    Quit,
}

impl GameCommand {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// [`CommandError`] for unknown verbs and positions.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let (verb, rest) = split_verb(line);
        match verb.as_str() {
            "restart" | "reset" | "new" => Ok(Self::Restart),
            "board" | "show" => Ok(Self::Board),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "play" | "move" => rest
                .parse::<Position>()
                .map(Self::Play)
                .map_err(|e| CommandError::new(e.to_string())),
            _ => line
                .parse::<Position>()
                .map(Self::Play)
                .map_err(|e| CommandError::new(e.to_string())),
        }
    }
}

/// One game in a terminal.
#[derive(Debug, Clone, Default)]
pub struct TicTacToeSession {
    game: Game,
}

impl TicTacToeSession {
    /// Starts a fresh game.
    pub fn new() -> Self {
        Self::default()
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Board and status line.
    pub fn render(&self) -> String {
        let mut out = self.game.board().display();
        out.push_str("\n\n");
        out.push_str(&self.game.status().to_string());
        if let Some(line) = self.game.winning_line() {
            let cells = line.map(|p| p.label()).join(", ");
            out.push_str(&format!(" ({cells})"));
        }
        if self.game.phase() != Phase::InProgress {
            out.push_str("\nType 'restart' to play again.");
        }
        out
    }

    /// Applies a parsed command.
    ///
    /// # Errors
    ///
    /// [`CommandError`] carrying the rejection reason for illegal moves.
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: GameCommand) -> Result<Reply, CommandError> {
        match command {
            GameCommand::Play(pos) => {
                self.game
                    .play(pos)
                    .map_err(|e| CommandError::new(e.to_string()))?;
                Ok(Reply::Continue(self.render()))
            }
            GameCommand::Restart => {
                self.game.reset();
                Ok(Reply::Continue(self.render()))
            }
            GameCommand::Board => Ok(Reply::Continue(self.render())),
            GameCommand::Help => Ok(Reply::Continue(HELP.to_string())),
            GameCommand::Quit => {
                debug!(moves = self.game.history().len(), "Leaving game");
                Ok(Reply::Quit("Bye!".to_string()))
            }
        }
    }
}

impl Session for TicTacToeSession {
    fn prompt(&self) -> &'static str {
        "ttt> "
    }

    fn banner(&self) -> String {
        format!("Tic Tac Toe\n\n{}\n\n{}", self.render(), "Type 'help' for commands.")
    }

    fn handle(&mut self, line: &str) -> Result<Reply, CommandError> {
        let command = GameCommand::parse(line)?;
        self.apply(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(GameCommand::parse("4"), Ok(GameCommand::Play(Position::Center)));
        assert_eq!(
            GameCommand::parse("top-left"),
            Ok(GameCommand::Play(Position::TopLeft))
        );
        assert_eq!(
            GameCommand::parse("play bottom right"),
            Ok(GameCommand::Play(Position::BottomRight))
        );
        assert_eq!(GameCommand::parse("RESTART"), Ok(GameCommand::Restart));
        assert_eq!(GameCommand::parse("q"), Ok(GameCommand::Quit));
        assert!(GameCommand::parse("jump").is_err());
    }

    #[test]
    fn test_rejected_move_reports_reason() {
        let mut session = TicTacToeSession::new();
        session.handle("4").unwrap();
        let err = session.handle("center").unwrap_err();
        assert_eq!(err.message, "Square Center is already occupied");
        assert_eq!(session.game().history().len(), 1);
    }

    #[test]
    fn test_render_after_win() {
        let mut session = TicTacToeSession::new();
        for line in ["0", "3", "1", "4"] {
            session.handle(line).unwrap();
        }
        let Reply::Continue(text) = session.handle("2").unwrap() else {
            panic!("expected continue");
        };
        assert!(text.contains("Winner: X (Top-left, Top-center, Top-right)"));
        assert!(text.contains("restart"));
    }
}
