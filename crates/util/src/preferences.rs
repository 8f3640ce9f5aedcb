//! JSON-backed user preferences.
//!
//! The store keeps the last chosen theme and optional flow tuning (transition
//! delays and the re-entry policy). It lives at
//! `~/.config/concierge/preferences.json` unless [`PREFERENCES_PATH_ENV`]
//! points elsewhere. A corrupt file is logged and treated as empty rather than
//! failing startup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use concierge_types::FlowSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::resolve_override;

/// Environment variable overriding the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "CONCIERGE_PREFERENCES_PATH";

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk shape of the preferences file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical id of the theme last picked in the TUI.
    pub preferred_theme: Option<String>,
    #[serde(default)]
    pub flow: FlowSettings,
}

#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Load from the default location (or the env override).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::with_path(resolve_override(PREFERENCES_PATH_ENV, PREFERENCES_FILE_NAME))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        debug!(path = %path.display(), "loaded preferences");
        Ok(Self {
            path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// In-memory store for when the config directory is unusable.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferred_theme(&self) -> Option<String> {
        self.lock().preferred_theme.clone()
    }

    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        let mut payload = self.lock();
        payload.preferred_theme = theme_id;
        self.save_locked(&payload)
    }

    pub fn flow_settings(&self) -> FlowSettings {
        self.lock().flow
    }

    fn lock(&self) -> MutexGuard<'_, PreferencesPayload> {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if !self.persist_to_disk {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(payload)?)?;
        Ok(())
    }
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(serde_json::from_str(&data).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "failed to parse preferences file; using defaults");
            PreferencesPayload::default()
        })),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use concierge_types::ReentryPolicy;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let prefs = UserPreferences::with_path(dir.path().join("nope.json")).unwrap();
        assert_eq!(prefs.preferred_theme(), None);
        assert_eq!(prefs.flow_settings(), FlowSettings::default());
    }

    #[test]
    fn theme_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = UserPreferences::with_path(&path).unwrap();
        prefs.set_preferred_theme(Some("nord".into())).unwrap();

        let reloaded = UserPreferences::with_path(&path).unwrap();
        assert_eq!(reloaded.preferred_theme().as_deref(), Some("nord"));
    }

    #[test]
    fn partial_flow_settings_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"flow":{"reentry":"restart","delays":{"submit_details_ms":10}}}"#).unwrap();

        let flow = UserPreferences::with_path(&path).unwrap().flow_settings();
        assert_eq!(flow.reentry, ReentryPolicy::Restart);
        assert_eq!(flow.delays.submit_details(), Duration::from_millis(10));
        assert_eq!(flow.delays.select_service(), Duration::from_millis(600));
    }

    #[test]
    fn corrupt_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        let prefs = UserPreferences::with_path(&path).unwrap();
        assert_eq!(prefs.preferred_theme(), None);
    }

    #[test]
    fn ephemeral_store_never_writes() {
        let prefs = UserPreferences::ephemeral();
        prefs.set_preferred_theme(Some("dracula".into())).unwrap();
        assert_eq!(prefs.preferred_theme().as_deref(), Some("dracula"));
        assert_eq!(prefs.path(), Path::new(""));
    }

    #[test]
    fn env_override_selects_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.as_os_str()), || {
            let prefs = UserPreferences::new().unwrap();
            assert_eq!(prefs.path(), path.as_path());
        });
    }
}
