//! Command-line interface for quickstate.

use clap::{Parser, Subcommand};

/// Quickstate - play tic-tac-toe or manage todos in the terminal
#[derive(Parser, Debug)]
#[command(name = "quickstate")]
#[command(about = "Tic-tac-toe and todo list state engines with a terminal front-end", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play tic-tac-toe (two players, one terminal)
    Tictactoe,

    /// Manage the todo list
    Todo {
        /// Todos per page (overrides config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Number of generated seed todos (overrides config)
        #[arg(long)]
        seed_todos: Option<usize>,
    },
}
