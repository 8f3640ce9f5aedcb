//! Filesystem locations for Concierge state.

use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "concierge";

/// Environment variable overriding the log file location.
pub const LOG_PATH_ENV: &str = "CONCIERGE_LOG_PATH";

/// Default log file name inside the app directory.
pub const LOG_FILE_NAME: &str = "concierge.log";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if trimmed == "~" {
        return home();
    }
    match trimmed.strip_prefix("~/").or_else(|| trimmed.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(trimmed),
    }
}

/// `~/.config/concierge` (or the platform equivalent).
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Resolve a file path from `env_var` when set and non-blank, falling back to
/// `file_name` inside [`app_config_dir`].
pub fn resolve_override(env_var: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = env::var(env_var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    app_config_dir().join(file_name)
}

/// Where TUI sessions write their trace log.
pub fn default_log_path() -> PathBuf {
    resolve_override(LOG_PATH_ENV, LOG_FILE_NAME)
}
