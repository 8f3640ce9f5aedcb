//! The scrolling page: section content composed into an off-screen buffer
//! and copied through the viewport at the current offset.

use concierge_engine::Catalog;
use concierge_types::Effect;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::state::{NAV_ROWS, PageState, SECTIONS};
use crate::app::App;
use crate::ui::components::{BookingComponent, Component};
use crate::ui::theme::{Theme, theme_helpers as th};

/// Widest the page content grows before it is centered.
const CONTENT_MAX_WIDTH: u16 = 76;

#[derive(Debug, Default)]
pub struct PageComponent {
    booking: BookingComponent,
    /// Screen area of the last render.
    viewport: Rect,
}

impl PageComponent {
    /// Draw the whole document; returns the booking cursor in document coordinates.
    fn compose(&mut self, doc: &mut Buffer, app: &App) -> Option<Position> {
        let theme = app.ctx.theme.as_ref();
        doc.set_style(doc.area, th::page_style(theme));
        let mut cursor = None;
        for (index, section) in SECTIONS.iter().enumerate() {
            let Some(top) = PageState::section_top(index) else { continue };
            // Sections that were never on screen stay blank until revealed.
            if app.page.is_paused(section.id) {
                continue;
            }
            let area = centered(Rect::new(0, top, doc.area.width, section.rows));
            match section.id {
                "services" => draw_services(doc, area, theme, app.flow.catalog()),
                "book" => cursor = self.booking.draw(doc, area, app),
                _ => draw_contact(doc, area, theme),
            }
            if app.page.fade_level(section.id) > 0 {
                doc.set_style(area, th::dimmed_style(theme));
            }
        }
        cursor
    }
}

impl Component for PageComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        self.booking.handle_key_events(app, key)
    }

    /// Left clicks below the nav bar go to the widget in document coordinates.
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !self.viewport.contains(Position::new(mouse.column, mouse.row)) {
            return Vec::new();
        }
        let row = mouse.row - self.viewport.y;
        if row < NAV_ROWS {
            return Vec::new();
        }
        let position = Position::new(mouse.column - self.viewport.x, app.page.offset_rows().saturating_add(row));
        self.booking.click(app, position)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        self.viewport = rect;
        if rect.is_empty() {
            return;
        }
        let mut doc = Buffer::empty(Rect::new(0, 0, rect.width, PageState::document_rows()));
        let cursor = self.compose(&mut doc, app);

        let first_row = app.page.offset_rows();
        let buf = frame.buffer_mut();
        for row in 0..rect.height {
            let Some(doc_y) = first_row.checked_add(row).filter(|y| *y < doc.area.height) else {
                break;
            };
            for column in 0..rect.width {
                if let (Some(source), Some(target)) = (doc.cell((column, doc_y)), buf.cell_mut((rect.x + column, rect.y + row))) {
                    *target = source.clone();
                }
            }
        }

        // No cursor while the field sits under the nav bar.
        if let Some(position) = cursor
            && let Some(row) = position.y.checked_sub(first_row)
            && (NAV_ROWS..rect.height).contains(&row)
        {
            frame.set_cursor_position(Position::new(rect.x + position.x, rect.y + row));
        }
    }
}

fn centered(area: Rect) -> Rect {
    let width = area.width.min(CONTENT_MAX_WIDTH);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

fn draw_services(buf: &mut Buffer, area: Rect, theme: &dyn Theme, catalog: &Catalog) {
    let mut lines = vec![
        Line::from(Span::styled("Our Services", theme.accent_emphasis_style())),
        Line::from(Span::styled(
            "Same-day appointments with our clinical concierge team.",
            theme.text_muted_style(),
        )),
        Line::default(),
    ];
    for service in catalog.services() {
        lines.push(Line::from(vec![
            Span::styled("● ", theme.accent_primary_style()),
            Span::styled(service.name.clone(), theme.text_primary_style().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {} · {}", service.duration, service.price),
            theme.text_secondary_style(),
        )));
        lines.push(Line::default());
    }
    Paragraph::new(lines).render(area, buf);
}

fn draw_contact(buf: &mut Buffer, area: Rect, theme: &dyn Theme) {
    let lines = vec![
        Line::from(Span::styled("Contact", theme.accent_emphasis_style())),
        Line::default(),
        Line::from(Span::styled(
            "Questions before booking? Our concierge team replies within 2 hours.",
            theme.text_primary_style(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", theme.text_muted_style()),
            Span::styled("2", theme.accent_primary_style()),
            Span::styled(" to jump to booking.", theme.text_muted_style()),
        ]),
    ];
    Paragraph::new(lines).wrap(Wrap { trim: true }).render(area, buf);
}

#[cfg(test)]
mod tests {
    use concierge_types::Msg;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::tests::test_app;

    fn render_text(app: &mut App, width: u16, height: u16) -> String {
        render_with(&mut PageComponent::default(), app, width, height)
    }

    fn render_with(page: &mut PageComponent, app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| page.render(frame, frame.area(), app)).expect("draw");
        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol())).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn top_of_page_shows_services() {
        let mut app = test_app();
        let text = render_text(&mut app, 80, 39);
        assert!(text.contains("Our Services"));
        assert!(text.contains("Book an Appointment"));
        assert!(!text.contains("Contact"), "contact is not revealed yet");
    }

    #[test]
    fn scrolling_moves_content_up() {
        let mut app = test_app();
        app.update(&Msg::FollowLink(2));
        let text = render_text(&mut app, 80, 39);
        assert!(text.contains("Questions before booking?"));
        assert!(!text.contains("Our Services"));
    }

    #[test]
    fn clicking_a_service_row_picks_it() {
        let mut app = test_app();
        let mut page = PageComponent::default();
        let text = render_with(&mut page, &mut app, 80, 39);
        let row = text.lines().position(|line| line.contains("○ Specialist Diagnostic")).expect("service row");
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: u16::try_from(row).expect("row fits"),
            modifiers: KeyModifiers::NONE,
        };
        let effects = page.handle_mouse_events(&mut app, click);
        assert!(matches!(effects.as_slice(), [Effect::ScheduleTransition { .. }]));
        assert_eq!(app.flow.pending_target(), Some(concierge_types::Step::SelectTime));
        assert_eq!(app.booking.service_cursor, 1);
    }

    #[test]
    fn clicks_under_the_nav_bar_are_ignored() {
        let mut app = test_app();
        app.update(&Msg::FollowLink(1));
        let mut page = PageComponent::default();
        render_with(&mut page, &mut app, 80, 39);
        for row in 0..NAV_ROWS {
            let click = MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 40,
                row,
                modifiers: KeyModifiers::NONE,
            };
            assert!(page.handle_mouse_events(&mut app, click).is_empty());
        }
        assert!(!app.flow.is_busy());
    }
}
