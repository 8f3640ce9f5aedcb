//! Shared type definitions for the Concierge booking workspace.
//!
//! Holds the booking data model, flow settings, and the message/effect
//! vocabulary exchanged between the TUI components and the runtime loop.

use std::{fmt, time::Duration};

pub mod booking;
pub mod settings;

pub use booking::{BookingState, ParseStepError, Selection, Service, Step, Trigger};
pub use settings::{FlowSettings, ParseReentryPolicyError, ReentryPolicy, TransitionDelays};

/// Identifies one scheduled (deferred) transition.
///
/// Tickets are issued by the flow controller in increasing order; a timer
/// that fires with a ticket the controller no longer holds is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionTicket(pub u64);

impl fmt::Display for TransitionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Messages that can be sent to update the application state.
///
/// This enum defines the user actions and system events that can trigger
/// state changes in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick (throbber)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A user action for the booking flow
    Booking(Trigger),
    /// A deferred transition's delay elapsed
    TransitionElapsed(TransitionTicket),
    /// Scroll the page by the given number of rows
    ScrollBy(i32),
    /// Open or close the navigation menu
    ToggleMenu,
    /// Follow the navigation link at the given index
    FollowLink(usize),
}

/// Side effects that can be triggered by state changes.
///
/// Components return these instead of performing I/O; the runtime turns them
/// into commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a timer that reports `TransitionElapsed(ticket)` after `delay`
    ScheduleTransition { ticket: TransitionTicket, delay: Duration },
    /// Abort the timer for a transition that was cancelled
    CancelTransition(TransitionTicket),
    /// Save the chosen theme id to the preferences file
    PersistTheme(String),
    /// Leave the application
    Quit,
}

/// Result of a background command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The delay for a scheduled transition has elapsed
    TransitionElapsed(TransitionTicket),
    /// Free-form status line
    Log(String),
}
