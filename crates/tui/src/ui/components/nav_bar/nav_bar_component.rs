use concierge_types::{Effect, Msg};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::page::{NAV_ROWS, SECTIONS};
use crate::ui::theme::{Theme, theme_helpers as th};

const BRAND: &str = "Concierge";
const MENU_TOGGLE: &str = "[m] Menu";

/// Below this width the inline links are replaced by the menu toggle.
const LINKS_MIN_WIDTH: u16 = 56;

#[derive(Debug, Default)]
pub struct NavBarComponent {
    /// Link hit areas from the last render, indexed like `SECTIONS`.
    link_areas: Vec<Rect>,
    toggle_area: Rect,
}

impl NavBarComponent {
    fn link_label(index: usize, label: &str) -> String {
        format!("{} {label}", index + 1)
    }

    fn render_bar(&mut self, frame: &mut Frame, bar: Rect, app: &App) {
        let theme = app.ctx.theme.as_ref();
        let scrolled = app.page.nav.scrolled;
        let style = if scrolled { th::panel_style(theme) } else { th::page_style(theme) };
        let mut block = Block::default().style(style);
        if scrolled {
            block = block.borders(Borders::BOTTOM).border_style(theme.border_style(false));
        }
        let inner = block.inner(bar);
        frame.render_widget(Clear, bar);
        frame.render_widget(block, bar);
        if inner.is_empty() {
            return;
        }
        // Unscrolled bar sits one row lower, leaving breathing room at the top.
        let row_y = if scrolled { inner.y } else { inner.y + inner.height / 2 };
        let row = Rect::new(inner.x + 1, row_y, inner.width.saturating_sub(2), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(BRAND, theme.accent_emphasis_style().add_modifier(Modifier::BOLD))),
            row,
        );

        self.link_areas.clear();
        self.toggle_area = Rect::default();
        if row.width >= LINKS_MIN_WIDTH {
            let mut x = row.right();
            let mut areas = Vec::with_capacity(SECTIONS.len());
            for (index, section) in SECTIONS.iter().enumerate().rev() {
                let label = Self::link_label(index, section.label);
                let width = label.chars().count() as u16;
                x = x.saturating_sub(width);
                let area = Rect::new(x, row.y, width, 1);
                frame.render_widget(Paragraph::new(link_line(theme, &label)), area);
                areas.push(area);
                x = x.saturating_sub(3);
            }
            areas.reverse();
            self.link_areas = areas;
        } else {
            let width = MENU_TOGGLE.len() as u16;
            let area = Rect::new(row.right().saturating_sub(width), row.y, width.min(row.width), 1);
            let style = if app.page.nav.menu_open {
                theme.selection_style()
            } else {
                th::button_secondary_style(theme, true, false)
            };
            frame.render_widget(Paragraph::new(Span::styled(MENU_TOGGLE, style)), area);
            self.toggle_area = area;
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, page: Rect, app: &App) {
        let theme = app.ctx.theme.as_ref();
        let labels: Vec<String> = SECTIONS
            .iter()
            .enumerate()
            .map(|(index, section)| Self::link_label(index, section.label))
            .collect();
        let content_width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0) as u16;
        // Border plus horizontal padding on both sides.
        let width = (content_width + 4).min(page.width);
        let height = (labels.len() as u16 + 2).min(page.height.saturating_sub(NAV_ROWS));
        let area = Rect::new(page.right().saturating_sub(width), page.y + NAV_ROWS, width, height);
        if area.is_empty() {
            return;
        }
        frame.render_widget(Clear, area);
        let block = th::block(theme, None, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.link_areas = labels
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1).intersection(inner);
                frame.render_widget(Paragraph::new(link_line(theme, label)), row);
                row
            })
            .collect();
    }

    fn hit(&self, column: u16, row: u16) -> Option<Msg> {
        let position = Position::new(column, row);
        if let Some(index) = self.link_areas.iter().position(|area| area.contains(position)) {
            return Some(Msg::FollowLink(index));
        }
        self.toggle_area.contains(position).then_some(Msg::ToggleMenu)
    }
}

fn link_line<'a>(theme: &dyn Theme, label: &'a str) -> Line<'a> {
    let (digit, text) = label.split_at(1);
    Line::from(vec![
        Span::styled(digit, theme.accent_primary_style()),
        Span::styled(text, theme.text_secondary_style()),
    ])
}

impl Component for NavBarComponent {
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        match self.hit(mouse.column, mouse.row) {
            Some(msg) => app.update(&msg),
            None => Vec::new(),
        }
    }

    /// `rect` is the whole page viewport; the bar takes its top rows and the
    /// open menu drops down over the content below.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let bar = Rect::new(rect.x, rect.y, rect.width, NAV_ROWS.min(rect.height));
        if bar.is_empty() {
            return;
        }
        self.render_bar(frame, bar, app);
        if app.page.nav.menu_open {
            self.render_menu(frame, rect, app);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::tests::test_app;

    fn draw(nav: &mut NavBarComponent, app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| nav.render(frame, frame.area(), app)).expect("draw");
        let buf = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol())).collect())
            .collect()
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn wide_bar_shows_brand_and_links() {
        let mut app = test_app();
        let rows = draw(&mut NavBarComponent::default(), &mut app, 100, 10);
        let bar = rows[..3].join("\n");
        assert!(bar.contains(BRAND));
        assert!(bar.contains("1 Services"));
        assert!(bar.contains("3 Contact"));
        assert!(!bar.contains(MENU_TOGGLE));
    }

    #[test]
    fn narrow_bar_collapses_links_into_menu() {
        let mut app = test_app();
        let mut nav = NavBarComponent::default();
        let rows = draw(&mut nav, &mut app, 40, 10);
        assert!(rows[1].contains(MENU_TOGGLE));
        assert!(!rows.join("").contains("Services"));

        let toggle = nav.toggle_area;
        nav.handle_mouse_events(&mut app, click(toggle.x, toggle.y));
        assert!(app.page.nav.menu_open);
        let rows = draw(&mut nav, &mut app, 40, 10);
        assert!(rows[NAV_ROWS as usize + 1].contains("1 Services"));
    }

    #[test]
    fn clicking_a_menu_link_follows_it() {
        let mut app = test_app();
        app.update(&Msg::ToggleMenu);
        let mut nav = NavBarComponent::default();
        draw(&mut nav, &mut app, 40, 10);
        let contact = nav.link_areas[2];
        nav.handle_mouse_events(&mut app, click(contact.x, contact.y));
        assert!(!app.page.nav.menu_open);
        assert!(app.page.nav.scrolled);
    }

    #[test]
    fn scrolled_bar_draws_a_bottom_rule() {
        let mut app = test_app();
        app.update(&Msg::ScrollBy(5));
        let rows = draw(&mut NavBarComponent::default(), &mut app, 100, 10);
        assert!(rows[0].contains(BRAND));
        assert!(rows[NAV_ROWS as usize - 1].contains('─'));
    }
}
