//! Booking domain data shared by the engine, the TUI and the CLI.
//!
//! These are plain values: the controller in `concierge-engine` owns the
//! only live [`BookingState`] and hands out references to it.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// A bookable service offering from the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Stable key (e.g., "specialist")
    pub id: String,
    /// Display name (e.g., "Specialist Diagnostic")
    pub name: String,
    /// Display duration (e.g., "60 mins")
    pub duration: String,
    /// Display price (e.g., "$400")
    pub price: String,
}

impl Service {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: duration.into(),
            price: price.into(),
        }
    }
}

/// The four phases of the booking flow.
///
/// Serialized as its 1-based number so JSON output reads `"step": 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Step {
    #[default]
    SelectService,
    SelectTime,
    ConfirmDetails,
    Success,
}

impl Step {
    /// 1-based step number.
    pub const fn number(self) -> u8 {
        match self {
            Step::SelectService => 1,
            Step::SelectTime => 2,
            Step::ConfirmDetails => 3,
            Step::Success => 4,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Step::SelectService => "Select Service",
            Step::SelectTime => "Choose Availability",
            Step::ConfirmDetails => "Confirm Details",
            Step::Success => "Request Received",
        }
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = ParseStepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Step::SelectService),
            2 => Ok(Step::SelectTime),
            3 => Ok(Step::ConfirmDetails),
            4 => Ok(Step::Success),
            other => Err(ParseStepError(other)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStepError(pub u8);

impl fmt::Display for ParseStepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid booking step {}; expected 1 through 4", self.0)
    }
}

impl Error for ParseStepError {}

/// Values the visitor has accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub service: Option<Service>,
    pub time: Option<String>,
    pub name: String,
    pub email: String,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Complete booking flow state: the current step plus the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    pub step: Step,
    pub selection: Selection,
}

/// A user action aimed at the booking flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Pick a service by catalog id (step 1)
    PickService { service_id: String },
    /// Pick a time slot by label (step 2)
    PickTime { slot: String },
    /// Submit the details form (step 3)
    SubmitDetails { name: String, email: String },
    /// Return to the previous step (steps 2 and 3)
    Back,
    /// Restart from the success screen (step 4)
    BookAnother,
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Trigger::PickService { .. } => "pick_service",
            Trigger::PickTime { .. } => "pick_time",
            Trigger::SubmitDetails { .. } => "submit_details",
            Trigger::Back => "back",
            Trigger::BookAnother => "book_another",
        }
    }

    /// Forward triggers are the delayed ones.
    pub fn is_forward(&self) -> bool {
        matches!(
            self,
            Trigger::PickService { .. } | Trigger::PickTime { .. } | Trigger::SubmitDetails { .. }
        )
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_serializes_as_its_number() {
        let state = BookingState {
            step: Step::ConfirmDetails,
            selection: Selection::default(),
        };
        let json = serde_json::to_value(&state).expect("serialize state");
        assert_eq!(json["step"], 3);

        let parsed: BookingState = serde_json::from_value(json).expect("deserialize state");
        assert_eq!(parsed.step, Step::ConfirmDetails);
    }

    #[test]
    fn step_rejects_out_of_range_numbers() {
        assert_eq!(Step::try_from(0), Err(ParseStepError(0)));
        assert_eq!(Step::try_from(5), Err(ParseStepError(5)));
        assert!(serde_json::from_str::<Step>("7").is_err());
    }

    #[test]
    fn trigger_uses_tagged_representation() {
        let trigger: Trigger = serde_json::from_str(r#"{"kind":"pick_time","slot":"1:00 PM"}"#).expect("deserialize trigger");
        assert_eq!(trigger, Trigger::PickTime { slot: "1:00 PM".into() });
        assert!(trigger.is_forward());
        assert!(!Trigger::Back.is_forward());
    }
}
