//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use quickstate_todo::{EditHistoryPolicy, StoreSettings, UserId, seed};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a quickstate session.
///
/// Every field is optional in the file; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Todos per page.
    page_size: usize,

    /// Number of seed users.
    seed_users: usize,

    /// Number of seed todos.
    seed_todos: usize,

    /// User recorded as the actor for create, toggle and audited edits.
    current_user: String,

    /// Whether edits append an `updated` history entry.
    edit_history: EditHistoryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            seed_users: seed::DEFAULT_USERS,
            seed_todos: seed::DEFAULT_TODOS,
            current_user: "user-1".to_string(),
            edit_history: EditHistoryPolicy::Overwrite,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(page_size = config.page_size, seed_todos = config.seed_todos, "Config loaded");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::new("page_size must be at least 1"));
        }
        if self.current_user.trim().is_empty() {
            return Err(ConfigError::new("current_user must not be empty"));
        }
        Ok(())
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        page_size: Option<usize>,
        seed_todos: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(size) = page_size {
            self.page_size = size;
        }
        if let Some(count) = seed_todos {
            self.seed_todos = count;
        }
        self.validate()?;
        Ok(self)
    }

    /// Store settings derived from this configuration.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings::new(
            self.page_size,
            self.edit_history,
            UserId::from(self.current_user.as_str()),
        )
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
