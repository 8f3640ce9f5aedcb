use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme))
        .padding(Padding::horizontal(1));
    if let Some(title) = title {
        block = block.title(Span::styled(
            format!(" {title} "),
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers.
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Page background.
pub fn page_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// Non-RGB colors are returned unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let scale = |channel: u8| (f32::from(channel) * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Foreground used for content behind the loading overlay.
pub fn dimmed_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default().fg(darken_rgb(theme.roles().text, 0.55)).add_modifier(Modifier::DIM)
}

/// Option rows (services, slots): highlighted when under the cursor, accented when checked.
pub fn option_style<T: Theme + ?Sized>(theme: &T, under_cursor: bool, checked: bool) -> Style {
    let style = if checked { theme.accent_emphasis_style() } else { theme.text_primary_style() };
    if under_cursor {
        style.patch(theme.selection_style()).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Style for input fields; invalid fields take the error color.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles {
        surface_muted, text, error, ..
    } = *theme.roles();
    let mut style = Style::default().bg(surface_muted).fg(text);
    if !valid {
        style = style.fg(error);
    }
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    if !enabled {
        let ThemeRoles {
            surface_muted, text_muted, ..
        } = *theme.roles();
        return Style::default().bg(surface_muted).fg(text_muted);
    }
    let ThemeRoles {
        accent_primary, background, ..
    } = *theme.roles();
    let style = Style::default().bg(accent_primary).fg(background).add_modifier(Modifier::BOLD);
    if focused { style.add_modifier(Modifier::UNDERLINED) } else { style }
}

/// Secondary button style (text only, selection background when focused).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool, focused: bool) -> Style {
    if !enabled {
        return theme.text_muted_style();
    }
    let style = Style::default().fg(theme.roles().accent_secondary);
    if focused { style.bg(theme.roles().selection_bg) } else { style }
}

/// Key/description pairs for hint strips: keys accented, descriptions muted.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darken_scales_rgb_only() {
        assert_eq!(darken_rgb(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(darken_rgb(Color::Rgb(10, 10, 10), 2.0), Color::Rgb(10, 10, 10));
        assert_eq!(darken_rgb(Color::Indexed(42), 0.5), Color::Indexed(42));
    }

    #[test]
    fn hint_spans_alternate_key_and_description() {
        let theme = crate::ui::theme::NordTheme::new();
        let spans = build_hint_spans(&theme, &[("q", " Quit "), ("t", " Theme")]);
        let text: Vec<&str> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, vec!["q", " Quit ", "t", " Theme"]);
        assert_eq!(spans[0].style, theme.accent_emphasis_style());
    }
}
