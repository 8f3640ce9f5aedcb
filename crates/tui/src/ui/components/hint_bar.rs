//! Hint bar component for keyboard shortcuts and status messages.
//!
//! Renders the single bottom row. A status message from a background command
//! takes precedence; otherwise the hints follow the booking step and focus.

use concierge_types::Step;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::components::booking::DetailFocus;
use crate::ui::theme::theme_helpers as th;

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl HintBarComponent {
    fn hints(app: &App) -> &'static [(&'static str, &'static str)] {
        if app.page.nav.menu_open {
            return &[("1-3", " Jump  "), ("Esc", " Close menu")];
        }
        if app.flow.is_busy() {
            return &[("PgUp/PgDn", " Scroll  "), ("q", " Quit")];
        }
        match app.flow.state().step {
            Step::SelectService => &[("↑/↓", " Move  "), ("Enter", " Choose  "), ("m", " Menu  "), ("t", " Theme  "), ("q", " Quit")],
            Step::SelectTime => &[("←↑↓→", " Move  "), ("Enter", " Choose  "), ("Esc", " Back  "), ("t", " Theme  "), ("q", " Quit")],
            Step::ConfirmDetails if app.booking.focus == DetailFocus::Submit => {
                &[("Enter", " Request  "), ("Tab", " Fields  "), ("Esc", " Back  "), ("q", " Quit")]
            }
            Step::ConfirmDetails => &[("Tab", " Next field  "), ("Enter", " Next  "), ("Esc", " Back  "), ("Ctrl+C", " Quit")],
            Step::Success => &[("Enter", " Book another  "), ("t", " Theme  "), ("q", " Quit")],
        }
    }
}

/// What the pending transition is working towards.
fn busy_label(target: Step) -> String {
    match target {
        Step::Success => "  Sending request…".to_string(),
        step => format!("  Loading {}…", step.title()),
    }
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = app.ctx.theme.as_ref();
        let line = match app.status.as_deref() {
            Some(status) => Line::from(Span::styled(status.to_string(), theme.status_warning())),
            None => {
                let mut spans = th::build_hint_spans(theme, Self::hints(app));
                if let Some(target) = app.flow.pending_target() {
                    spans.push(Span::styled(busy_label(target), theme.text_muted_style()));
                }
                Line::from(spans)
            }
        };
        frame.render_widget(Paragraph::new(line).style(th::page_style(theme)), rect);
    }
}
