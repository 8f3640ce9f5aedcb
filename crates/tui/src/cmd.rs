//! # Command Execution Layer
//!
//! Translates [`Effect`]s returned by the reducer and components into
//! imperative [`Cmd`]s and runs them. This is the boundary where the pure
//! booking state meets side effects:
//! - transition timers (tokio sleeps, abortable)
//! - writes to the preferences file
//!
//! Timers report back as [`ExecOutcome::TransitionElapsed`]; the runtime
//! feeds that into `App::update` as a `Msg::TransitionElapsed`.

use std::collections::HashMap;
use std::time::Duration;

use concierge_types::{Effect, ExecOutcome, TransitionTicket};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use crate::app::App;

/// Side-effectful commands executed outside of state updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Sleep for `delay`, then report the ticket.
    StartTimer { ticket: TransitionTicket, delay: Duration },
    /// Abort a running timer; a no-op when it already fired.
    CancelTimer(TransitionTicket),
    /// Save the theme id to the preferences file.
    SaveTheme(String),
}

/// Output of [`run_cmds`]: spawned tasks to await and results known right away.
#[derive(Debug, Default)]
pub struct CommandBatch {
    pub pending: Vec<JoinHandle<ExecOutcome>>,
    pub immediate: Vec<ExecOutcome>,
}

/// Abort handles of running transition timers, keyed by ticket.
#[derive(Debug, Default)]
pub struct Timers {
    running: HashMap<TransitionTicket, AbortHandle>,
}

impl Timers {
    pub fn track(&mut self, ticket: TransitionTicket, handle: AbortHandle) {
        if let Some(previous) = self.running.insert(ticket, handle) {
            previous.abort();
        }
    }

    /// Abort the timer for `ticket`; returns whether one was running.
    pub fn cancel(&mut self, ticket: TransitionTicket) -> bool {
        match self.running.remove(&ticket) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop bookkeeping for a timer that completed.
    pub fn forget(&mut self, ticket: TransitionTicket) {
        self.running.remove(&ticket);
    }

    /// Abort every running timer.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.running.drain() {
            handle.abort();
        }
    }
}

/// Convert effects into commands. `Effect::Quit` is owned by the runtime loop
/// and produces no command.
pub fn from_effects(effects: Vec<Effect>) -> Vec<Cmd> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::ScheduleTransition { ticket, delay } => Some(Cmd::StartTimer { ticket, delay }),
            Effect::CancelTransition(ticket) => Some(Cmd::CancelTimer(ticket)),
            Effect::PersistTheme(id) => Some(Cmd::SaveTheme(id)),
            Effect::Quit => None,
        })
        .collect()
}

/// Execute commands against the app. Must be called inside a tokio runtime.
pub fn run_cmds(app: &mut App, commands: Vec<Cmd>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::StartTimer { ticket, delay } => {
                debug!(%ticket, delay_ms = delay.as_millis() as u64, "starting transition timer");
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    ExecOutcome::TransitionElapsed(ticket)
                });
                app.timers.track(ticket, handle.abort_handle());
                batch.pending.push(handle);
            }
            Cmd::CancelTimer(ticket) => {
                let aborted = app.timers.cancel(ticket);
                debug!(%ticket, aborted, "cancelled transition timer");
            }
            Cmd::SaveTheme(id) => {
                if let Err(error) = app.ctx.preferences.set_preferred_theme(Some(id.clone())) {
                    warn!(theme = %id, %error, "failed to persist theme preference");
                    batch.immediate.push(ExecOutcome::Log(format!("Could not save theme: {error}")));
                }
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use concierge_types::{Msg, Step, Trigger};

    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn quit_produces_no_command() {
        let ticket = TransitionTicket(3);
        let commands = from_effects(vec![
            Effect::CancelTransition(ticket),
            Effect::Quit,
            Effect::PersistTheme("nord".into()),
        ]);
        assert_eq!(commands, vec![Cmd::CancelTimer(ticket), Cmd::SaveTheme("nord".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_reports_its_ticket_after_the_delay() {
        let mut app = test_app();
        let ticket = TransitionTicket(1);
        let mut batch = run_cmds(
            &mut app,
            vec![Cmd::StartTimer {
                ticket,
                delay: Duration::from_millis(600),
            }],
        );
        let handle = batch.pending.pop().expect("timer spawned");
        let started = tokio::time::Instant::now();
        let outcome = handle.await.expect("timer completes");
        assert_eq!(outcome, ExecOutcome::TransitionElapsed(ticket));
        assert!(started.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_reports() {
        let mut app = test_app();
        let ticket = TransitionTicket(9);
        let mut batch = run_cmds(
            &mut app,
            vec![Cmd::StartTimer {
                ticket,
                delay: Duration::from_millis(500),
            }],
        );
        run_cmds(&mut app, vec![Cmd::CancelTimer(ticket)]);
        assert!(!app.timers.cancel(ticket), "already removed");
        let error = batch.pending.pop().expect("timer spawned").await.expect_err("aborted");
        assert!(error.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn booking_advances_only_after_the_timer_fires() {
        let mut app = test_app();
        let effects = app.update(&Msg::Booking(Trigger::PickService {
            service_id: "primary".into(),
        }));
        let mut batch = run_cmds(&mut app, from_effects(effects));
        assert_eq!(app.flow.state().step, Step::SelectService);
        assert!(app.flow.is_busy());

        let outcome = batch.pending.pop().expect("timer spawned").await.expect("timer completes");
        let ExecOutcome::TransitionElapsed(ticket) = outcome else {
            panic!("unexpected outcome");
        };
        app.update(&Msg::TransitionElapsed(ticket));
        assert_eq!(app.flow.state().step, Step::SelectTime);
        assert!(!app.timers.cancel(ticket), "finished timers are forgotten");
    }

    #[test]
    fn saving_theme_to_ephemeral_preferences_succeeds() {
        let mut app = test_app();
        let batch = run_cmds(&mut app, vec![Cmd::SaveTheme("nord".into())]);
        assert!(batch.immediate.is_empty());
        assert_eq!(app.ctx.preferences.preferred_theme().as_deref(), Some("nord"));
    }
}
