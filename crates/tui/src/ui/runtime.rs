//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (alternate screen, raw mode, mouse capture).
//! - Drive a single `tokio::select!` loop over terminal input, the animation
//!   ticker, finished background commands and Ctrl+C.
//! - Turn the `Effect`s returned by the view into commands right after the
//!   branch that produced them, so transition timers start without waiting
//!   for the next tick.
//!
//! Ticking is fast (100 ms) only while the widget is busy or a section is
//! fading in, and slow (5 s) otherwise.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use concierge_types::{Effect, ExecOutcome, Msg};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::TuiOptions;
use crate::app::{App, SharedCtx};
use crate::cmd;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;
use concierge_engine::BookingFlow;

type Backend = CrosstermBackend<Stdout>;

const FAST_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_millis(5000);
const INPUT_POLL: Duration = Duration::from_millis(16);

/// Read terminal input on a blocking thread and forward it over a channel.
///
/// `poll()` and `read()` stay on the same OS thread. Mouse moves are
/// throttled to one per poll interval.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let mut last_mouse_move = Instant::now();
        // Stops once the receiver is dropped so runtime shutdown is not blocked.
        while !sender.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    warn!(%error, "failed to poll terminal input");
                    break;
                }
            }
            let event = match event::read() {
                Ok(event) => event,
                Err(error) => {
                    warn!(%error, "failed to read terminal input");
                    break;
                }
            };
            if event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved) {
                if last_mouse_move.elapsed() < INPUT_POLL {
                    continue;
                }
                last_mouse_move = Instant::now();
            }
            if sender.blocking_send(event).is_err() {
                break;
            }
        }
    });
    receiver
}

fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<Backend>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => {
            app.status = None;
            main_view.handle_key_events(app, key_event)
        }
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn handle_outcome(app: &mut App, main_view: &mut MainView, outcome: ExecOutcome) -> Vec<Effect> {
    match outcome {
        ExecOutcome::TransitionElapsed(ticket) => main_view.handle_message(app, &Msg::TransitionElapsed(ticket)),
        ExecOutcome::Log(message) => {
            app.status = Some(message);
            Vec::new()
        }
    }
}

/// Run effects to completion. Returns `true` when the app should quit.
fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    mut effects: Vec<Effect>,
    pending_execs: &mut FuturesUnordered<JoinHandle<ExecOutcome>>,
) -> bool {
    while !effects.is_empty() {
        if effects.contains(&Effect::Quit) {
            return true;
        }
        let batch = cmd::run_cmds(app, cmd::from_effects(std::mem::take(&mut effects)));
        pending_execs.extend(batch.pending);
        for outcome in batch.immediate {
            effects.extend(handle_outcome(app, main_view, outcome));
        }
    }
    false
}

async fn event_loop(terminal: &mut Terminal<Backend>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut pending_execs: FuturesUnordered<JoinHandle<ExecOutcome>> = FuturesUnordered::new();

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Track the last known size to synthesize Resize messages for terminals
    // that drop resize notifications.
    let mut last_size = crossterm::terminal::size().ok();
    if let Some((width, height)) = last_size {
        main_view.handle_message(app, &Msg::Resize(width, height));
    }
    render(terminal, app, main_view)?;

    loop {
        let animating = app.is_animating();
        let target_interval = if animating { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut effects = Vec::new();
        let mut needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                effects.extend(handle_input_event(app, main_view, event));
                true
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(app, &Msg::Tick));
                animating
            }

            Some(joined) = pending_execs.next(), if !pending_execs.is_empty() => {
                match joined {
                    Ok(outcome) => effects.extend(handle_outcome(app, main_view, outcome)),
                    // Aborted timers belong to superseded transitions.
                    Err(error) if error.is_cancelled() => {}
                    Err(error) => {
                        warn!(%error, "background task failed");
                        app.status = Some(format!("Background task failed: {error}"));
                    }
                }
                true
            }

            _ = signal::ctrl_c() => break,
        };

        if process_effects(app, main_view, effects, &mut pending_execs) {
            break;
        }

        if let Ok(size) = crossterm::terminal::size()
            && last_size != Some(size)
        {
            last_size = Some(size);
            main_view.handle_message(app, &Msg::Resize(size.0, size.1));
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }

    app.timers.cancel_all();
    Ok(())
}

/// Set up the terminal, run the loop and always restore the terminal.
pub async fn run_app(options: TuiOptions) -> Result<()> {
    let loaded = theme::load(options.theme.as_deref(), options.preferences.preferred_theme().as_deref());
    let ctx = SharedCtx::new(options.preferences, loaded);
    let mut app = App::new(ctx, BookingFlow::new(options.catalog, options.flow));
    info!(theme = app.ctx.theme_definition.id, reentry = ?app.flow.settings().reentry, "starting TUI");
    let mut main_view = MainView::default();

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut main_view).await;
    cleanup_terminal(&mut terminal).context("restore terminal")?;
    info!("TUI exited");
    result
}

#[cfg(test)]
mod tests {
    use concierge_types::{Step, Trigger};

    use super::*;
    use crate::app::tests::test_app;

    #[tokio::test(start_paused = true)]
    async fn effects_start_timers_and_outcomes_advance_the_flow() {
        let mut app = test_app();
        let mut main_view = MainView::default();
        let mut pending = FuturesUnordered::new();
        let effects = main_view.handle_message(
            &mut app,
            &Msg::Booking(Trigger::PickService {
                service_id: "primary".into(),
            }),
        );
        assert!(!process_effects(&mut app, &mut main_view, effects, &mut pending));
        assert_eq!(pending.len(), 1);

        let outcome = pending.next().await.expect("timer").expect("not cancelled");
        let effects = handle_outcome(&mut app, &mut main_view, outcome);
        assert!(effects.is_empty());
        assert_eq!(app.flow.state().step, Step::SelectTime);
    }

    #[test]
    fn quit_effect_stops_the_loop() {
        let mut app = test_app();
        let mut main_view = MainView::default();
        let mut pending = FuturesUnordered::new();
        assert!(process_effects(&mut app, &mut main_view, vec![Effect::Quit], &mut pending));
    }

    #[test]
    fn log_outcomes_become_the_status_line() {
        let mut app = test_app();
        let mut main_view = MainView::default();
        handle_outcome(&mut app, &mut main_view, ExecOutcome::Log("Could not save theme".into()));
        assert_eq!(app.status.as_deref(), Some("Could not save theme"));
    }
}
