//! Root view: routes input between the page chrome and the booking widget,
//! and lays out the page, nav overlay and hint bar.

use concierge_types::{Effect, Msg};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::Block,
};

use super::components::page::{NAV_ROWS, SECTIONS};
use super::components::{Component, HintBarComponent, NavBarComponent, PageComponent};
use super::theme::theme_helpers as th;
use crate::app::App;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

#[derive(Debug, Default)]
pub struct MainView {
    page_view: PageComponent,
    nav_bar_view: NavBarComponent,
    hint_bar_view: HintBarComponent,
    /// Page area of the last render; the nav bar covers its top rows.
    page_area: Rect,
}

impl MainView {
    /// Keys handled while the menu dropdown is open; everything else is swallowed.
    fn handle_menu_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => app.update(&Msg::ToggleMenu),
            KeyCode::Char(c) => match section_for_digit(c) {
                Some(index) => app.update(&Msg::FollowLink(index)),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Page-level shortcuts; `None` lets the key through to the widget.
    fn handle_page_key(app: &mut App, key: KeyEvent) -> Option<Vec<Effect>> {
        let page_rows = i32::from(app.page.viewport_rows().saturating_sub(NAV_ROWS).max(1));
        match key.code {
            KeyCode::PageDown => return Some(app.update(&Msg::ScrollBy(page_rows))),
            KeyCode::PageUp => return Some(app.update(&Msg::ScrollBy(-page_rows))),
            _ => {}
        }
        if app.booking.is_editing(app.flow.state().step) || !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return None;
        }
        match key.code {
            KeyCode::Char('q') => Some(vec![Effect::Quit]),
            KeyCode::Char('m') => Some(app.update(&Msg::ToggleMenu)),
            KeyCode::Char('t') => Some(app.cycle_theme()),
            KeyCode::Char(c) => section_for_digit(c).map(|index| app.update(&Msg::FollowLink(index))),
            _ => None,
        }
    }
}

/// Maps `1`..`n` onto section indexes.
fn section_for_digit(c: char) -> Option<usize> {
    let index = usize::try_from(c.to_digit(10)?).ok()?.checked_sub(1)?;
    (index < SECTIONS.len()).then_some(index)
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        app.update(msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        if app.page.nav.menu_open {
            return Self::handle_menu_key(app, key);
        }
        if let Some(effects) = Self::handle_page_key(app, key) {
            return effects;
        }
        self.page_view.handle_key_events(app, key)
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        match mouse.kind {
            MouseEventKind::ScrollDown => app.update(&Msg::ScrollBy(WHEEL_ROWS)),
            MouseEventKind::ScrollUp => app.update(&Msg::ScrollBy(-WHEEL_ROWS)),
            _ if app.page.nav.menu_open || mouse.row < self.page_area.y.saturating_add(NAV_ROWS) => {
                self.nav_bar_view.handle_mouse_events(app, mouse)
            }
            _ => self.page_view.handle_mouse_events(app, mouse),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Block::default().style(th::page_style(app.ctx.theme.as_ref())), area);
        let [page_area, hints_area] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        self.page_area = page_area;
        self.page_view.render(frame, page_area, app);
        // Nav bar and its dropdown overlay the page.
        self.nav_bar_view.render(frame, page_area, app);
        self.hint_bar_view.render(frame, hints_area, app);
    }
}
