//! Quickstate - play tic-tac-toe or manage todos in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use quickstate::{AppConfig, Cli, Command, TicTacToeSession, TodoSession, repl};
use quickstate_todo::{Seed, TodoStore};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the REPL owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Tictactoe => run_tictactoe(),
        Command::Todo {
            page_size,
            seed_todos,
        } => run_todo(config.with_overrides(page_size, seed_todos)?),
    }
}

/// Reads the config file if one was given, otherwise uses defaults.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Play tic-tac-toe on stdin/stdout
#[instrument]
fn run_tictactoe() -> Result<()> {
    info!("Starting tic-tac-toe");
    let mut session = TicTacToeSession::new();
    let stdin = std::io::stdin();
    repl::run(&mut session, stdin.lock(), &mut std::io::stdout())?;
    Ok(())
}

/// Manage the todo list on stdin/stdout
#[instrument(skip(config))]
fn run_todo(config: AppConfig) -> Result<()> {
    let seed = Seed::generate(
        *config.seed_users(),
        *config.seed_todos(),
        chrono::Utc::now(),
    );
    info!(
        users = seed.users.len(),
        todos = seed.todos.len(),
        "Starting todo list"
    );

    let store = TodoStore::new(seed, config.store_settings());
    let mut session = TodoSession::new(store);
    let stdin = std::io::stdin();
    repl::run(&mut session, stdin.lock(), &mut std::io::stdout())?;
    Ok(())
}
