//! Tests for loading configuration from disk.

use quickstate::AppConfig;
use quickstate_todo::{EditHistoryPolicy, UserId};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
page_size = 25
seed_users = 3
seed_todos = 40
current_user = "user-3"
edit_history = "record_update"
"#,
    );

    let config = AppConfig::from_file(file.path()).expect("Failed to load config");
    assert_eq!(*config.page_size(), 25);
    assert_eq!(*config.seed_users(), 3);
    assert_eq!(*config.seed_todos(), 40);

    let settings = config.store_settings();
    assert_eq!(*settings.page_size(), 25);
    assert_eq!(*settings.edit_policy(), EditHistoryPolicy::RecordUpdate);
    assert_eq!(settings.current_user(), &UserId::from("user-3"));
}

#[test]
fn test_empty_file_is_defaults() {
    let file = write_config("");
    let config = AppConfig::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_flags_override_file() {
    let file = write_config("page_size = 25\nseed_todos = 40\n");
    let config = AppConfig::from_file(file.path())
        .and_then(|c| c.with_overrides(Some(5), None))
        .expect("Failed to load config");
    assert_eq!(*config.page_size(), 5);
    assert_eq!(*config.seed_todos(), 40);
}

#[test]
fn test_invalid_files_rejected() {
    for content in [
        "page_size = \"ten\"\n",
        "edit_history = \"sometimes\"\n",
        "current_user = \"  \"\n",
    ] {
        let file = write_config(content);
        assert!(AppConfig::from_file(file.path()).is_err(), "{content}");
    }
}

#[test]
fn test_missing_file_reports_location() {
    let err = AppConfig::from_file("/nonexistent/quickstate.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
}
