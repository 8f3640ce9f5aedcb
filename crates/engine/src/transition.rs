//! Pure transition rules for the booking flow.
//!
//! [`plan`] decides what a trigger does at the current step without touching
//! the state; [`apply`] performs a deferred mutation once its delay has
//! elapsed. Both take and return owned values so they can be exercised
//! without any UI or timer.

use std::{fmt, time::Duration};

use concierge_types::{BookingState, Service, Step, TransitionDelays, TransitionTicket, Trigger};
use thiserror::Error;

use crate::Catalog;

/// A required field of the details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    Name,
    Email,
}

impl DetailField {
    pub const ALL: [DetailField; 2] = [DetailField::Name, DetailField::Email];

    pub fn label(self) -> &'static str {
        match self {
            DetailField::Name => "Full Name",
            DetailField::Email => "Email Address",
        }
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DetailField::Name => "name",
            DetailField::Email => "email",
        })
    }
}

/// Reasons a trigger leaves the flow unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The trigger has no row in the transition table for this step.
    #[error("'{trigger}' is not available at step {step}")]
    NotAvailable { trigger: &'static str, step: Step },
    #[error("unknown service '{0}'")]
    UnknownService(String),
    #[error("unknown time slot '{0}'")]
    UnknownTimeSlot(String),
    /// The details guard failed; lists the fields that were blank after trimming.
    #[error("missing required details: {}", join_fields(.0))]
    MissingDetails(Vec<DetailField>),
    /// Another transition is still waiting on its delay.
    #[error("transition {0} is still pending")]
    Busy(TransitionTicket),
}

fn join_fields(fields: &[DetailField]) -> String {
    fields.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// The mutation a forward transition performs once its delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Service(Service),
    Time(String),
    Details { name: String, email: String },
}

impl Commit {
    /// Step the flow lands on after this commit.
    pub fn target(&self) -> Step {
        match self {
            Commit::Service(_) => Step::SelectTime,
            Commit::Time(_) => Step::ConfirmDetails,
            Commit::Details { .. } => Step::Success,
        }
    }

    pub fn delay(&self, delays: &TransitionDelays) -> Duration {
        match self {
            Commit::Service(_) => delays.select_service(),
            Commit::Time(_) => delays.select_time(),
            Commit::Details { .. } => delays.submit_details(),
        }
    }
}

/// What a trigger resolves to at the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Back and reset: the next state, to be installed right away.
    Immediate(BookingState),
    /// Forward transitions: a commit to apply after the step's delay.
    Deferred(Commit),
}

/// Resolve `trigger` against `state` using the transition table.
pub fn plan(state: &BookingState, trigger: &Trigger, catalog: &Catalog) -> Result<Plan, TransitionError> {
    match (state.step, trigger) {
        (Step::SelectService, Trigger::PickService { service_id }) => catalog
            .service(service_id)
            .cloned()
            .map(|service| Plan::Deferred(Commit::Service(service)))
            .ok_or_else(|| TransitionError::UnknownService(service_id.clone())),
        (Step::SelectTime, Trigger::PickTime { slot }) => catalog
            .time_slot(slot)
            .map(|slot| Plan::Deferred(Commit::Time(slot.to_string())))
            .ok_or_else(|| TransitionError::UnknownTimeSlot(slot.clone())),
        (Step::SelectTime, Trigger::Back) => Ok(Plan::Immediate(BookingState {
            step: Step::SelectService,
            selection: state.selection.clone(),
        })),
        (Step::ConfirmDetails, Trigger::SubmitDetails { name, email }) => {
            let (name, email) = (name.trim(), email.trim());
            let missing: Vec<DetailField> = [(DetailField::Name, name), (DetailField::Email, email)]
                .into_iter()
                .filter(|(_, value)| value.is_empty())
                .map(|(field, _)| field)
                .collect();
            if !missing.is_empty() {
                return Err(TransitionError::MissingDetails(missing));
            }
            Ok(Plan::Deferred(Commit::Details {
                name: name.to_string(),
                email: email.to_string(),
            }))
        }
        (Step::ConfirmDetails, Trigger::Back) => Ok(Plan::Immediate(BookingState {
            step: Step::SelectTime,
            selection: state.selection.clone(),
        })),
        (Step::Success, Trigger::BookAnother) => Ok(Plan::Immediate(BookingState::default())),
        (step, trigger) => Err(TransitionError::NotAvailable {
            trigger: trigger.label(),
            step,
        }),
    }
}

/// Install a deferred commit, moving the flow to the commit's target step.
pub fn apply(state: BookingState, commit: Commit) -> BookingState {
    let step = commit.target();
    let mut selection = state.selection;
    match commit {
        Commit::Service(service) => selection.service = Some(service),
        Commit::Time(slot) => selection.time = Some(slot),
        Commit::Details { name, email } => {
            selection.name = name;
            selection.email = email;
        }
    }
    BookingState { step, selection }
}
