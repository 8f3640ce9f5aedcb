use ratatui::style::Color;

use super::roles::{Theme, ThemeRoles};

// Dracula palette (https://draculatheme.com/contribute)
pub const BG: Color = Color::Rgb(0x28, 0x2A, 0x36); // #282a36
pub const CURRENT_LINE: Color = Color::Rgb(0x44, 0x47, 0x5A); // #44475a
pub const FOREGROUND: Color = Color::Rgb(0xF8, 0xF8, 0xF2); // #f8f8f2
pub const COMMENT: Color = Color::Rgb(0x62, 0x72, 0xA4); // #6272a4

pub const CYAN: Color = Color::Rgb(0x8B, 0xE9, 0xFD); // #8be9fd
pub const GREEN: Color = Color::Rgb(0x50, 0xFA, 0x7B); // #50fa7b
pub const ORANGE: Color = Color::Rgb(0xFF, 0xB8, 0x6C); // #ffb86c
pub const PINK: Color = Color::Rgb(0xFF, 0x79, 0xC6); // #ff79c6
pub const PURPLE: Color = Color::Rgb(0xBD, 0x93, 0xF9); // #bd93f9
pub const RED: Color = Color::Rgb(0xFF, 0x55, 0x55); // #ff5555

/// Default theme tuned for dark terminals.
#[derive(Debug, Clone)]
pub struct DraculaTheme {
    roles: ThemeRoles,
}

impl DraculaTheme {
    pub fn new() -> Self {
        Self {
            roles: ThemeRoles {
                background: BG,
                surface: BG,
                surface_muted: CURRENT_LINE,
                border: CURRENT_LINE,

                text: FOREGROUND,
                text_secondary: PURPLE,
                text_muted: COMMENT,

                // Pink marks interactive elements, cyan marks focus.
                accent_primary: PINK,
                accent_secondary: CYAN,

                success: GREEN,
                warning: ORANGE,
                error: RED,

                selection_bg: CURRENT_LINE,
                selection_fg: FOREGROUND,
                focus: CYAN,
            },
        }
    }
}

impl Theme for DraculaTheme {
    fn roles(&self) -> &ThemeRoles {
        &self.roles
    }
}
