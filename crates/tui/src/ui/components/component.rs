//! Component system for the Concierge TUI.
//!
//! Components are thin: their state lives on [`App`] so the reducer and the
//! tests can reach it without a component instance. A component translates
//! input into state changes and [`Effect`]s, and draws itself into a `Rect`.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use concierge_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own input handling and rendering.
///
/// # Lifecycle
///
/// 1. Input arrives through `handle_key_events` / `handle_mouse_events`.
/// 2. Application messages (ticks, resizes, elapsed timers) arrive through
///    `handle_message`.
/// 3. `render` draws into the given area. Rendering must not change flow state.
pub(crate) trait Component {
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
