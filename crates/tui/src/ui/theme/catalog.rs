use super::{DraculaTheme, NordTheme, Theme};

/// Describes a selectable theme.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Alternate spellings accepted from env vars and flags.
    pub aliases: &'static [&'static str],
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of themes; `t` cycles through them in this order.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "dracula",
        aliases: &["dracula", "default"],
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "nord",
        aliases: &["nord", "polar"],
        factory: || Box::new(NordTheme::new()),
    },
];

/// Locate a definition by id or alias (case-insensitive).
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let name = name.trim();
    THEME_DEFINITIONS
        .iter()
        .find(|definition| definition.id.eq_ignore_ascii_case(name) || definition.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name)))
}

pub fn default_definition() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// The definition following `id`, wrapping around. Unknown ids restart at the first theme.
pub fn next_after(id: &str) -> &'static ThemeDefinition {
    let position = THEME_DEFINITIONS.iter().position(|definition| definition.id == id);
    match position {
        Some(index) => &THEME_DEFINITIONS[(index + 1) % THEME_DEFINITIONS.len()],
        None => default_definition(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ids_and_aliases() {
        assert_eq!(resolve("NORD").map(|d| d.id), Some("nord"));
        assert_eq!(resolve(" polar ").map(|d| d.id), Some("nord"));
        assert_eq!(resolve("default").map(|d| d.id), Some("dracula"));
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(next_after("dracula").id, "nord");
        assert_eq!(next_after("nord").id, "dracula");
        assert_eq!(next_after("missing").id, "dracula");
    }
}
