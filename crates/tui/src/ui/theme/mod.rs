//! Theme styling for the TUI.
//!
//! Two palettes (Dracula, Nord) are mapped onto semantic [`roles::ThemeRoles`];
//! widgets style themselves through the [`Theme`] trait and the builders in
//! [`theme_helpers`] instead of hard-coding colors.

use std::env;

use tracing::debug;

pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment variable naming a theme id or alias.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus the definition that produced it.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

/// Pick a theme: explicit flag, then `TUI_THEME`, then the saved preference,
/// then the default. Unknown names fall through to the next source.
pub fn load(explicit: Option<&str>, preferred: Option<&str>) -> LoadedTheme {
    let from_env = env::var(THEME_ENV).ok();
    let candidates = [
        ("flag", explicit),
        ("env", from_env.as_deref()),
        ("preferences", preferred),
    ];
    for (source, name) in candidates {
        let Some(name) = name else { continue };
        match catalog::resolve(name) {
            Some(definition) => {
                debug!(source, theme = definition.id, "selected theme");
                return LoadedTheme::from_definition(definition);
            }
            None => debug!(source, name, "ignoring unknown theme"),
        }
    }
    LoadedTheme::from_definition(catalog::default_definition())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_and_preferences() {
        temp_env::with_var(THEME_ENV, Some("dracula"), || {
            assert_eq!(load(Some("nord"), Some("dracula")).definition.id, "nord");
        });
    }

    #[test]
    fn env_beats_preferences() {
        temp_env::with_var(THEME_ENV, Some("nord"), || {
            assert_eq!(load(None, Some("dracula")).definition.id, "nord");
        });
    }

    #[test]
    fn unknown_names_fall_through() {
        temp_env::with_var(THEME_ENV, Some("sepia"), || {
            assert_eq!(load(Some("neon"), Some("nord")).definition.id, "nord");
            assert_eq!(load(None, None).definition.id, "dracula");
        });
    }
}
