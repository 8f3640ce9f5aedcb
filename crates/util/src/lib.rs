//! Small shared helpers: user preferences and file locations.

pub mod paths;
pub mod preferences;

pub use paths::{app_config_dir, default_log_path, expand_tilde};
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences};
