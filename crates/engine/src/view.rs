//! Declarative projection of the booking flow.
//!
//! [`project`] is a pure function of the state and catalog. Renderers draw a
//! [`WidgetView`] from scratch after every transition; nothing here holds
//! state of its own.

use concierge_types::{BookingState, Service, Step};
use serde::Serialize;

use crate::{
    Catalog,
    progress::{PROGRESS_SEGMENTS, ProgressMeta, SegmentStatus, progress_segments},
    transition::DetailField,
};

pub const BACK_LABEL: &str = "Back";
pub const SLOTS_CAPTION: &str = "Available slots for Today";
pub const SUBMIT_LABEL: &str = "Request Appointment";
pub const RESET_LABEL: &str = "Book Another";
pub const SUCCESS_MESSAGE: &str =
    "We've received your appointment request. Our concierge team will contact you within 2 hours to confirm details.";

/// One entry of the service radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOption {
    pub service: Service,
    pub checked: bool,
}

/// Read-only recap shown above the details form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub service: String,
    pub time: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    #[serde(skip)]
    pub field: DetailField,
    pub label: &'static str,
    pub required: bool,
}

impl FormField {
    fn required(field: DetailField) -> Self {
        let label = match field {
            DetailField::Name => "Full Name *",
            DetailField::Email => "Email Address *",
        };
        Self {
            field,
            label,
            required: true,
        }
    }
}

/// Per-step widget content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepView {
    SelectService {
        title: &'static str,
        options: Vec<ServiceOption>,
    },
    SelectTime {
        title: &'static str,
        back_label: &'static str,
        caption: &'static str,
        slots: Vec<String>,
    },
    ConfirmDetails {
        title: &'static str,
        back_label: &'static str,
        summary: Summary,
        fields: [FormField; 2],
        submit_label: &'static str,
    },
    Success {
        headline: &'static str,
        message: &'static str,
        reset_label: &'static str,
    },
}

/// Everything a renderer needs for one frame of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    pub step: Step,
    pub progress: Option<[SegmentStatus; PROGRESS_SEGMENTS]>,
    pub meta: ProgressMeta,
    /// A deferred transition is pending; controls render as disabled.
    pub busy: bool,
    pub content: StepView,
}

/// Project `state` into a view.
pub fn project(state: &BookingState, catalog: &Catalog, busy: bool) -> WidgetView {
    let selection = &state.selection;
    let content = match state.step {
        Step::SelectService => StepView::SelectService {
            title: Step::SelectService.title(),
            options: catalog
                .services()
                .iter()
                .map(|service| ServiceOption {
                    checked: selection.service.as_ref().is_some_and(|chosen| chosen.id == service.id),
                    service: service.clone(),
                })
                .collect(),
        },
        Step::SelectTime => StepView::SelectTime {
            title: Step::SelectTime.title(),
            back_label: BACK_LABEL,
            caption: SLOTS_CAPTION,
            slots: catalog.time_slots().to_vec(),
        },
        Step::ConfirmDetails => {
            let service = selection.service.as_ref();
            StepView::ConfirmDetails {
                title: Step::ConfirmDetails.title(),
                back_label: BACK_LABEL,
                summary: Summary {
                    service: service.map(|s| s.name.clone()).unwrap_or_default(),
                    time: format!("Today at {}", selection.time.as_deref().unwrap_or_default()),
                    duration: service.map(|s| s.duration.clone()).unwrap_or_default(),
                },
                fields: DetailField::ALL.map(FormField::required),
                submit_label: SUBMIT_LABEL,
            }
        }
        Step::Success => StepView::Success {
            headline: Step::Success.title(),
            message: SUCCESS_MESSAGE,
            reset_label: RESET_LABEL,
        },
    };

    WidgetView {
        step: state.step,
        progress: progress_segments(state.step),
        meta: ProgressMeta::for_step(state.step),
        busy,
        content,
    }
}

#[cfg(test)]
mod tests {
    use concierge_types::Selection;

    use super::*;

    #[test]
    fn first_step_marks_only_the_chosen_service() {
        let catalog = Catalog::builtin();
        let state = BookingState {
            step: Step::SelectService,
            selection: Selection {
                service: catalog.service("wellness").cloned(),
                ..Selection::default()
            },
        };
        let view = project(&state, &catalog, false);
        let StepView::SelectService { options, .. } = view.content else {
            panic!("step 1 lists services");
        };
        let checked: Vec<&str> = options.iter().filter(|o| o.checked).map(|o| o.service.id.as_str()).collect();
        assert_eq!(checked, vec!["wellness"]);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn fresh_flow_has_nothing_checked() {
        let view = project(&BookingState::default(), &Catalog::builtin(), false);
        assert!(matches!(view.content, StepView::SelectService { ref options, .. } if options.iter().all(|o| !o.checked)));
        assert_eq!(view.meta.value_now, 1);
    }

    #[test]
    fn details_step_summarizes_and_requires_both_fields() {
        let catalog = Catalog::builtin();
        let state = BookingState {
            step: Step::ConfirmDetails,
            selection: Selection {
                service: catalog.service("specialist").cloned(),
                time: Some("1:00 PM".into()),
                ..Selection::default()
            },
        };
        let view = project(&state, &catalog, true);
        assert!(view.busy);
        let StepView::ConfirmDetails { summary, fields, .. } = view.content else {
            panic!("step 3 shows the form");
        };
        assert_eq!(summary.service, "Specialist Diagnostic");
        assert_eq!(summary.time, "Today at 1:00 PM");
        assert_eq!(summary.duration, "60 mins");
        assert!(fields.iter().all(|field| field.required));
        assert_eq!(fields[0].field, DetailField::Name);
        assert_eq!(fields[1].field, DetailField::Email);
    }

    #[test]
    fn success_view_hides_progress() {
        let state = BookingState {
            step: Step::Success,
            selection: Selection::default(),
        };
        let view = project(&state, &Catalog::builtin(), false);
        assert!(view.progress.is_none());
        assert!(matches!(view.content, StepView::Success { reset_label: "Book Another", .. }));
    }

    #[test]
    fn view_serializes_for_headless_consumers() {
        let view = project(&BookingState::default(), &Catalog::builtin(), false);
        let json = serde_json::to_value(&view).expect("serialize view");
        assert_eq!(json["content"]["kind"], "select_service");
        assert_eq!(json["progress"][0], "active");
        assert_eq!(json["step"], 1);
    }
}
