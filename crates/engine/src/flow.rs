//! The booking flow controller.
//!
//! [`BookingFlow`] owns the one live [`BookingState`] and at most one pending
//! forward transition. Forward triggers do not mutate state; they are parked
//! behind a [`TransitionTicket`] that the caller redeems with
//! [`BookingFlow::complete`] once the delay has elapsed. Cancelling (or
//! replacing) the pending transition makes its ticket stale, so a timer that
//! fires late is harmless.

use std::time::Duration;

use concierge_types::{BookingState, FlowSettings, ReentryPolicy, Step, TransitionTicket, Trigger};
use tracing::{debug, info};

use crate::{
    Catalog,
    transition::{self, Commit, Plan, TransitionError},
    view::{self, WidgetView},
};

/// A forward transition waiting on its delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub ticket: TransitionTicket,
    pub delay: Duration,
    pub target: Step,
}

/// Outcome of a successfully dispatched trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The state changed immediately (back / reset).
    Applied {
        from: Step,
        to: Step,
        cancelled: Option<TransitionTicket>,
    },
    /// A forward transition is now pending; start a timer for it.
    Scheduled {
        scheduled: ScheduledTransition,
        cancelled: Option<TransitionTicket>,
    },
}

impl Dispatch {
    /// Ticket of the pending transition this dispatch displaced, if any.
    pub fn cancelled(&self) -> Option<TransitionTicket> {
        match self {
            Dispatch::Applied { cancelled, .. } | Dispatch::Scheduled { cancelled, .. } => *cancelled,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingTransition {
    ticket: TransitionTicket,
    commit: Commit,
}

/// Owned booking controller: state, catalog, settings and the pending slot.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    state: BookingState,
    catalog: Catalog,
    settings: FlowSettings,
    pending: Option<PendingTransition>,
    next_ticket: u64,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new(Catalog::builtin(), FlowSettings::default())
    }
}

impl BookingFlow {
    pub fn new(catalog: Catalog, settings: FlowSettings) -> Self {
        Self {
            state: BookingState::default(),
            catalog,
            settings,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// True while a forward transition waits on its delay.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<TransitionTicket> {
        self.pending.as_ref().map(|pending| pending.ticket)
    }

    /// Step the pending transition will land on.
    pub fn pending_target(&self) -> Option<Step> {
        self.pending.as_ref().map(|pending| pending.commit.target())
    }

    /// Route a user trigger through the transition table.
    ///
    /// While busy, [`ReentryPolicy::Ignore`] rejects everything with
    /// [`TransitionError::Busy`]; [`ReentryPolicy::Restart`] lets a valid
    /// trigger displace the pending transition. A rejected trigger never
    /// disturbs the pending transition.
    pub fn dispatch(&mut self, trigger: Trigger) -> Result<Dispatch, TransitionError> {
        if let Some(pending) = self.pending.as_ref()
            && self.settings.reentry == ReentryPolicy::Ignore
        {
            debug!(ticket = %pending.ticket, trigger = %trigger, "ignoring trigger while a transition is pending");
            return Err(TransitionError::Busy(pending.ticket));
        }

        let plan = transition::plan(&self.state, &trigger, &self.catalog)?;
        let cancelled = self.cancel_pending();

        match plan {
            Plan::Immediate(next) => {
                let from = self.state.step;
                self.state = next;
                info!(trigger = %trigger, from = from.number(), to = self.state.step.number(), "booking step changed");
                Ok(Dispatch::Applied {
                    from,
                    to: self.state.step,
                    cancelled,
                })
            }
            Plan::Deferred(commit) => {
                let ticket = self.issue_ticket();
                let delay = commit.delay(&self.settings.delays);
                let target = commit.target();
                debug!(ticket = %ticket, trigger = %trigger, delay_ms = delay.as_millis() as u64, "transition scheduled");
                self.pending = Some(PendingTransition { ticket, commit });
                Ok(Dispatch::Scheduled {
                    scheduled: ScheduledTransition { ticket, delay, target },
                    cancelled,
                })
            }
        }
    }

    /// Commit the pending transition if `ticket` still identifies it.
    ///
    /// Returns `false` (and changes nothing) for stale or unknown tickets.
    pub fn complete(&mut self, ticket: TransitionTicket) -> bool {
        let Some(pending) = self.pending.take_if(|pending| pending.ticket == ticket) else {
            debug!(ticket = %ticket, "discarding stale transition ticket");
            return false;
        };
        let from = self.state.step;
        self.state = transition::apply(std::mem::take(&mut self.state), pending.commit);
        info!(ticket = %ticket, from = from.number(), to = self.state.step.number(), "booking step changed");
        true
    }

    /// Drop the pending transition, returning its ticket so the caller can
    /// abort the matching timer.
    pub fn cancel_pending(&mut self) -> Option<TransitionTicket> {
        let ticket = self.pending.take().map(|pending| pending.ticket)?;
        debug!(ticket = %ticket, "pending transition cancelled");
        Some(ticket)
    }

    /// Project the current state for rendering.
    pub fn view(&self) -> WidgetView {
        view::project(&self.state, &self.catalog, self.is_busy())
    }

    fn issue_ticket(&mut self) -> TransitionTicket {
        let ticket = TransitionTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}
