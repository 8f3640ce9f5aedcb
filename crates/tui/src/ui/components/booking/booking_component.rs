//! Draws the booking widget from the engine's [`WidgetView`] and turns keys
//! into flow triggers.
//!
//! Every frame is rebuilt from scratch out of `app.flow.view()`; the only
//! state kept between frames is [`BookingUiState`](super::BookingUiState).

use chrono::Local;
use concierge_engine::{DetailField, SegmentStatus, StepView, WidgetView};
use concierge_types::{Effect, Msg, Step, Trigger};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::state::{DetailFocus, SLOT_COLUMNS};
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

static FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const WIDGET_TITLE: &str = "Book an Appointment";
const SLOT_WIDTH: usize = 12;

/// Clickable parts of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    Service(usize),
    Slot(usize),
    Back,
    Field(DetailFocus),
    Submit,
    BookAnother,
}

/// A click target laid out on a line of the widget body.
struct LineHit {
    line: usize,
    x: u16,
    width: u16,
    height: u16,
    target: BookingTarget,
}

impl LineHit {
    fn new(line: usize, x: u16, width: usize, target: BookingTarget) -> Self {
        Self {
            line,
            x,
            width: u16::try_from(width).unwrap_or(u16::MAX),
            height: 1,
            target,
        }
    }

    fn rows(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    fn area(&self, inner: Rect) -> Option<(Rect, BookingTarget)> {
        let line = u16::try_from(self.line).ok().filter(|line| *line < inner.height)?;
        let area = Rect::new(inner.x.saturating_add(self.x), inner.y + line, self.width, self.height).intersection(inner);
        (!area.is_empty()).then_some((area, self.target))
    }
}

#[derive(Debug, Default)]
pub struct BookingComponent {
    /// Click targets from the last draw, in the coordinates of that buffer.
    hit_areas: Vec<(Rect, BookingTarget)>,
}

impl BookingComponent {
    /// Draw the widget into `area` of `buf`. Returns the terminal cursor
    /// position when a text field has focus. A zero-sized area draws nothing.
    pub fn draw(&mut self, buf: &mut Buffer, area: Rect, app: &App) -> Option<Position> {
        self.hit_areas.clear();
        if area.is_empty() {
            return None;
        }
        let theme = app.ctx.theme.as_ref();
        let view = app.flow.view();

        let block = th::block(theme, Some(WIDGET_TITLE), !view.busy);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return None;
        }

        let mut lines = vec![progress_line(theme, &view, inner.width), Line::default()];
        lines.push(title_line(theme, &view));
        lines.push(Line::default());
        let mut cursor_row = None;
        let mut hits = Vec::new();
        match &view.content {
            StepView::SelectService { options, .. } => {
                for (index, option) in options.iter().enumerate() {
                    let under_cursor = index == app.booking.service_cursor;
                    let style = th::option_style(theme, under_cursor, option.checked);
                    let marker = if option.checked { "◉" } else { "○" };
                    let pointer = if under_cursor { "▸" } else { " " };
                    let name = format!("{pointer} {marker} {}", option.service.name);
                    let gap = usize::from(inner.width).saturating_sub(name.chars().count() + option.service.price.len());
                    hits.push(LineHit::new(lines.len(), 0, usize::from(inner.width), BookingTarget::Service(index)).rows(2));
                    lines.push(Line::from(vec![
                        Span::styled(name, style),
                        Span::styled(" ".repeat(gap), style),
                        Span::styled(option.service.price.clone(), style.patch(theme.accent_primary_style())),
                    ]));
                    lines.push(Line::from(Span::styled(
                        format!("      {}", option.service.duration),
                        theme.text_muted_style(),
                    )));
                }
            }
            StepView::SelectTime {
                back_label,
                caption,
                slots,
                ..
            } => {
                lines.insert(2, back_line(theme, back_label));
                hits.push(back_hit(back_label));
                let today = Local::now().format("%a %b %-d");
                lines.push(Line::from(Span::styled(format!("{caption} ({today})"), theme.text_muted_style())));
                lines.push(Line::default());
                for (row, chunk) in slots.chunks(SLOT_COLUMNS).enumerate() {
                    for column in 0..chunk.len() {
                        let x = u16::try_from(column * (SLOT_WIDTH + 1)).unwrap_or(u16::MAX);
                        hits.push(LineHit::new(lines.len(), x, SLOT_WIDTH, BookingTarget::Slot(row * SLOT_COLUMNS + column)));
                    }
                    let cells = chunk.iter().enumerate().flat_map(|(column, slot)| {
                        let index = row * SLOT_COLUMNS + column;
                        let chosen = app.flow.state().selection.time.as_ref() == Some(slot);
                        let style = th::option_style(theme, index == app.booking.slot_cursor, chosen);
                        [Span::styled(format!("[{slot:^width$}]", width = SLOT_WIDTH - 2), style), Span::raw(" ")]
                    });
                    lines.push(Line::from(cells.collect::<Vec<_>>()));
                    lines.push(Line::default());
                }
            }
            StepView::ConfirmDetails {
                back_label,
                summary,
                fields,
                submit_label,
                ..
            } => {
                lines.insert(2, back_line(theme, back_label));
                hits.push(back_hit(back_label));
                for (label, value) in [
                    ("Service", &summary.service),
                    ("Time", &summary.time),
                    ("Duration", &summary.duration),
                ] {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{label}: "), theme.text_secondary_style().add_modifier(Modifier::BOLD)),
                        Span::styled(value.clone(), theme.text_primary_style()),
                    ]));
                }
                lines.push(Line::default());
                for field in fields {
                    let (input, focus) = match field.field {
                        DetailField::Name => (&app.booking.name, DetailFocus::Name),
                        DetailField::Email => (&app.booking.email, DetailFocus::Email),
                    };
                    let focused = app.booking.focus == focus;
                    let valid = !app.booking.invalid.contains(&field.field);
                    let label_style = if valid { theme.text_secondary_style() } else { theme.status_error() };
                    hits.push(LineHit::new(lines.len(), 0, usize::from(inner.width), BookingTarget::Field(focus)).rows(2));
                    lines.push(Line::from(Span::styled(field.label, label_style)));
                    if focused {
                        cursor_row = Some((lines.len(), input.cursor_columns()));
                    }
                    let width = usize::from(inner.width).saturating_sub(1);
                    lines.push(Line::from(Span::styled(
                        format!(" {:<width$}", input.input()),
                        th::input_style(theme, valid, focused),
                    )));
                }
                match &app.booking.hint {
                    Some(hint) => lines.push(Line::from(Span::styled(hint.clone(), theme.status_error()))),
                    None => lines.push(Line::default()),
                }
                let submit_focused = app.booking.focus == DetailFocus::Submit;
                let submit = format!("[ {submit_label} ]");
                hits.push(LineHit::new(lines.len(), 0, submit.width(), BookingTarget::Submit));
                lines.push(Line::from(Span::styled(
                    submit,
                    th::button_primary_style(theme, !view.busy, submit_focused),
                )));
            }
            StepView::Success {
                headline,
                message,
                reset_label,
            } => {
                // No numbered title on the success screen.
                lines.truncate(2);
                lines.push(Line::from(vec![
                    Span::styled("✓ ", theme.status_success().add_modifier(Modifier::BOLD)),
                    Span::styled(*headline, theme.accent_emphasis_style()),
                ]));
                lines.push(Line::default());
                for row in wrap_words(message, usize::from(inner.width)) {
                    lines.push(Line::from(Span::styled(row, theme.text_primary_style())));
                }
                lines.push(Line::default());
                let reset = format!("[ {reset_label} ]");
                hits.push(LineHit::new(lines.len(), 0, reset.width(), BookingTarget::BookAnother));
                lines.push(Line::from(Span::styled(
                    reset,
                    th::button_secondary_style(theme, true, true),
                )));
            }
        }

        Paragraph::new(lines).render(inner, buf);
        self.hit_areas = hits.iter().filter_map(|hit| hit.area(inner)).collect();

        if view.busy {
            buf.set_style(inner, th::dimmed_style(theme));
            let throbber = Span::styled(FRAMES[app.throbber_idx % FRAMES.len()], theme.accent_emphasis_style());
            let spot = Rect::new(inner.right().saturating_sub(2), inner.y.saturating_add(2), 1, 1).intersection(inner);
            Paragraph::new(throbber).render(spot, buf);
        }

        let (row, columns) = cursor_row?;
        let y = inner.y.saturating_add(u16::try_from(row).ok()?);
        let x = inner.x.saturating_add(1).saturating_add(columns).min(inner.right().saturating_sub(1));
        (y < inner.bottom()).then_some(Position::new(x, y))
    }

    fn handle_booking_key(&self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let step = app.flow.state().step;
        let trigger = match step {
            Step::SelectService => {
                let len = app.flow.catalog().services().len();
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.booking.move_service(-1, len);
                        None
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        app.booking.move_service(1, len);
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        app.flow.catalog().services().get(app.booking.service_cursor).map(|service| Trigger::PickService {
                            service_id: service.id.clone(),
                        })
                    }
                    _ => None,
                }
            }
            Step::SelectTime => {
                let len = app.flow.catalog().time_slots().len();
                match key.code {
                    KeyCode::Left => {
                        app.booking.move_slot(-1, 0, len);
                        None
                    }
                    KeyCode::Right => {
                        app.booking.move_slot(1, 0, len);
                        None
                    }
                    KeyCode::Up => {
                        app.booking.move_slot(0, -1, len);
                        None
                    }
                    KeyCode::Down => {
                        app.booking.move_slot(0, 1, len);
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => app
                        .flow
                        .catalog()
                        .time_slots()
                        .get(app.booking.slot_cursor)
                        .map(|slot| Trigger::PickTime { slot: slot.clone() }),
                    KeyCode::Esc | KeyCode::Backspace => Some(Trigger::Back),
                    _ => None,
                }
            }
            Step::ConfirmDetails => self.handle_form_key(app, key),
            Step::Success => matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')).then_some(Trigger::BookAnother),
        };
        send(app, trigger)
    }

    /// Target under `position`, in the coordinates of the last draw.
    pub fn target_at(&self, position: Position) -> Option<BookingTarget> {
        self.hit_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Act on a left click at `position` (coordinates of the last draw).
    pub fn click(&self, app: &mut App, position: Position) -> Vec<Effect> {
        let Some(target) = self.target_at(position) else {
            return Vec::new();
        };
        let trigger = match target {
            BookingTarget::Service(index) => {
                app.booking.service_cursor = index;
                app.flow.catalog().services().get(index).map(|service| Trigger::PickService {
                    service_id: service.id.clone(),
                })
            }
            BookingTarget::Slot(index) => {
                app.booking.slot_cursor = index;
                app.flow.catalog().time_slots().get(index).map(|slot| Trigger::PickTime { slot: slot.clone() })
            }
            BookingTarget::Back => Some(Trigger::Back),
            BookingTarget::Field(focus) => {
                app.booking.focus = focus;
                None
            }
            BookingTarget::Submit => {
                app.booking.focus = DetailFocus::Submit;
                Some(app.booking.submission())
            }
            BookingTarget::BookAnother => Some(Trigger::BookAnother),
        };
        send(app, trigger)
    }

    fn handle_form_key(&self, app: &mut App, key: KeyEvent) -> Option<Trigger> {
        let booking = &mut app.booking;
        match key.code {
            KeyCode::Esc => return Some(Trigger::Back),
            KeyCode::Tab | KeyCode::Down => booking.focus = booking.focus.next(),
            KeyCode::BackTab | KeyCode::Up => booking.focus = booking.focus.prev(),
            KeyCode::Enter if booking.focus == DetailFocus::Submit => return Some(booking.submission()),
            KeyCode::Char(' ') if booking.focus == DetailFocus::Submit => return Some(booking.submission()),
            KeyCode::Enter => booking.focus = booking.focus.next(),
            code => {
                let Some(input) = booking.focused_input_mut() else {
                    return None;
                };
                match code {
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert_char(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_home(),
                    KeyCode::End => input.move_end(),
                    _ => return None,
                }
                booking.clear_hint();
            }
        }
        None
    }
}

impl Component for BookingComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        self.handle_booking_key(app, key)
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        if let Some(position) = self.draw(frame.buffer_mut(), rect, app) {
            frame.set_cursor_position(position);
        }
    }
}

fn send(app: &mut App, trigger: Option<Trigger>) -> Vec<Effect> {
    match trigger {
        Some(trigger) => app.update(&Msg::Booking(trigger)),
        None => Vec::new(),
    }
}

/// Empty on the success screen, which has no progress indicator.
fn progress_line(theme: &dyn Theme, view: &WidgetView, width: u16) -> Line<'static> {
    let Some(segments) = view.progress else {
        return Line::default();
    };
    let label = format!(" Step {} of {}", view.meta.value_now, view.meta.value_max);
    let available = usize::from(width).saturating_sub(label.len());
    let segment_width = (available / segments.len()).saturating_sub(1).max(1);
    let mut spans: Vec<Span> = segments
        .iter()
        .flat_map(|status| {
            let (glyph, style) = match status {
                SegmentStatus::Completed => ("━", theme.status_success()),
                SegmentStatus::Active => ("━", theme.accent_emphasis_style()),
                SegmentStatus::Upcoming => ("─", theme.text_muted_style()),
            };
            [Span::styled(glyph.repeat(segment_width), style), Span::raw(" ")]
        })
        .collect();
    spans.push(Span::styled(label, theme.text_muted_style()));
    Line::from(spans)
}

fn title_line(theme: &dyn Theme, view: &WidgetView) -> Line<'static> {
    let title = match &view.content {
        StepView::SelectService { title, .. }
        | StepView::SelectTime { title, .. }
        | StepView::ConfirmDetails { title, .. } => *title,
        StepView::Success { .. } => return Line::default(),
    };
    Line::from(vec![
        Span::styled(format!(" {} ", view.meta.value_now), th::button_primary_style(theme, true, false)),
        Span::styled(format!(" {title}"), theme.accent_emphasis_style()),
    ])
}

fn back_hit(label: &str) -> LineHit {
    LineHit::new(2, 0, format!("‹ {label}").width(), BookingTarget::Back)
}

/// Greedy word wrap by display width.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in text.split_whitespace() {
        if !row.is_empty() && row.width() + 1 + word.width() > width {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn back_line(theme: &dyn Theme, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("‹ {label}"), th::button_secondary_style(theme, true, false)),
        Span::styled(" (Esc)", theme.text_muted_style()),
    ])
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::tests::test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| (area.left()..area.right()).filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol())).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw_with(booking: &mut BookingComponent, app: &mut App) -> (String, Option<Position>) {
        let mut terminal = Terminal::new(TestBackend::new(70, 26)).expect("terminal");
        let mut cursor = None;
        terminal
            .draw(|frame| {
                let area = frame.area();
                cursor = booking.draw(frame.buffer_mut(), area, app);
            })
            .expect("draw");
        (buffer_text(terminal.backend().buffer()), cursor)
    }

    fn draw(app: &mut App) -> (String, Option<Position>) {
        draw_with(&mut BookingComponent::default(), app)
    }

    /// Redraw, then click the top-left cell of `target` and let any timer elapse.
    fn click(booking: &mut BookingComponent, app: &mut App, target: BookingTarget) -> String {
        let (text, _) = draw_with(booking, app);
        let (area, _) = *booking
            .hit_areas
            .iter()
            .find(|(_, hit)| *hit == target)
            .unwrap_or_else(|| panic!("{target:?} is not on screen"));
        let row = text.lines().nth(usize::from(area.y)).expect("row").to_string();
        let effects = booking.click(app, Position::new(area.x, area.y));
        elapse(app, effects);
        row
    }

    fn elapse(app: &mut App, effects: Vec<Effect>) {
        for effect in effects {
            if let Effect::ScheduleTransition { ticket, .. } = effect {
                app.update(&Msg::TransitionElapsed(ticket));
            }
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let effects = BookingComponent::default().handle_key_events(app, key(code));
        elapse(app, effects);
    }

    #[test]
    fn first_step_lists_services_with_prices() {
        let mut app = test_app();
        let (text, cursor) = draw(&mut app);
        assert!(text.contains("Select Service"));
        assert!(text.contains("Primary Care Consultation"));
        assert!(text.contains("$400"));
        assert!(text.contains("Step 1 of 4"));
        assert!(cursor.is_none());
    }

    #[test]
    fn keyboard_walks_through_the_whole_flow() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().step, Step::SelectTime);
        assert_eq!(app.flow.state().selection.service.as_ref().map(|s| s.id.as_str()), Some("specialist"));
        let (text, _) = draw(&mut app);
        assert!(text.contains("Available slots for Today"));
        assert!(text.contains("10:30 AM"));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().selection.time.as_deref(), Some("2:30 PM"));
        assert_eq!(app.flow.state().step, Step::ConfirmDetails);

        for c in "Jane Doe".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        let (text, cursor) = draw(&mut app);
        assert!(text.contains("Today at 2:30 PM"));
        assert!(text.contains("Jane Doe"));
        assert!(cursor.is_some());

        press(&mut app, KeyCode::Tab);
        for c in "jane@example.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.booking.focus, DetailFocus::Submit);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().step, Step::Success);
        assert_eq!(app.flow.state().selection.email, "jane@example.com");

        let (text, _) = draw(&mut app);
        assert!(text.contains("Request Received"));
        assert!(text.contains("Book Another"));
        assert!(!text.contains('━'), "no progress segments on the success screen");
        assert!(!text.contains("Step 4 of 4"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().step, Step::SelectService);
        assert!(app.flow.state().selection.is_empty());
    }

    #[test]
    fn escape_goes_back_from_details() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().step, Step::ConfirmDetails);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.flow.state().step, Step::SelectTime);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.flow.state().step, Step::SelectService);
    }

    #[test]
    fn empty_submit_shows_inline_hint() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.flow.state().step, Step::ConfirmDetails);
        let (text, _) = draw(&mut app);
        assert!(text.contains("Please fill in Full Name and Email Address."));

        press(&mut app, KeyCode::Char('J'));
        assert!(app.booking.hint.is_none());
    }

    #[test]
    fn busy_widget_shows_a_throbber() {
        let mut app = test_app();
        let effects = BookingComponent::default().handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::ScheduleTransition { .. }]));
        let (text, _) = draw(&mut app);
        assert!(text.contains(FRAMES[0]));
        assert_eq!(app.flow.state().step, Step::SelectService);
    }

    #[test]
    fn zero_sized_area_draws_nothing() {
        let app = test_app();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));
        let before = buf.clone();
        assert!(BookingComponent::default().draw(&mut buf, Rect::new(0, 0, 0, 0), &app).is_none());
        assert_eq!(buf, before);
    }

    #[test]
    fn clicks_drive_the_flow() {
        let mut app = test_app();
        let mut booking = BookingComponent::default();
        let row = click(&mut booking, &mut app, BookingTarget::Service(1));
        assert!(row.contains("Specialist Diagnostic"));
        assert_eq!(app.flow.state().step, Step::SelectTime);
        assert_eq!(app.booking.service_cursor, 1);

        click(&mut booking, &mut app, BookingTarget::Back);
        assert_eq!(app.flow.state().step, Step::SelectService);
        click(&mut booking, &mut app, BookingTarget::Service(0));

        let row = click(&mut booking, &mut app, BookingTarget::Slot(4));
        assert!(row.contains("4:00 PM"));
        assert_eq!(app.flow.state().selection.time.as_deref(), Some("4:00 PM"));
        assert_eq!(app.flow.state().step, Step::ConfirmDetails);

        click(&mut booking, &mut app, BookingTarget::Field(DetailFocus::Email));
        assert_eq!(app.booking.focus, DetailFocus::Email);
        click(&mut booking, &mut app, BookingTarget::Submit);
        assert_eq!(app.flow.state().step, Step::ConfirmDetails);
        assert!(app.booking.hint.is_some());

        app.booking.name.set_input("Ada");
        app.booking.email.set_input("ada@example.com");
        click(&mut booking, &mut app, BookingTarget::Submit);
        assert_eq!(app.flow.state().step, Step::Success);

        let row = click(&mut booking, &mut app, BookingTarget::BookAnother);
        assert!(row.contains("Book Another"));
        assert_eq!(app.flow.state().step, Step::SelectService);
    }

    #[test]
    fn clicks_outside_targets_do_nothing() {
        let mut app = test_app();
        let mut booking = BookingComponent::default();
        draw_with(&mut booking, &mut app);
        assert!(booking.target_at(Position::new(0, 0)).is_none());
        assert!(booking.click(&mut app, Position::new(0, 0)).is_empty());
        assert!(!app.flow.is_busy());
    }

    #[test]
    fn success_message_wraps_to_the_card() {
        assert_eq!(wrap_words("a bb ccc dddd", 6), vec!["a bb", "ccc", "dddd"]);
        assert!(wrap_words("   ", 10).is_empty());
    }
}
