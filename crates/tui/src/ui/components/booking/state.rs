//! Local UI state for the booking widget: cursors, form inputs and focus.
//!
//! None of this is booking data. The flow controller owns the selection; this
//! state only remembers where the user is pointing and what they have typed
//! so far.

use concierge_engine::{Catalog, DetailField};
use concierge_types::{BookingState, Step, Trigger};

use crate::ui::components::common::TextInputState;

/// Columns in the time slot grid.
pub const SLOT_COLUMNS: usize = 3;

/// Focus ring of the details form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFocus {
    #[default]
    Name,
    Email,
    Submit,
}

impl DetailFocus {
    pub fn next(self) -> Self {
        match self {
            DetailFocus::Name => DetailFocus::Email,
            DetailFocus::Email => DetailFocus::Submit,
            DetailFocus::Submit => DetailFocus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DetailFocus::Name => DetailFocus::Submit,
            DetailFocus::Email => DetailFocus::Name,
            DetailFocus::Submit => DetailFocus::Email,
        }
    }
}

impl From<DetailField> for DetailFocus {
    fn from(field: DetailField) -> Self {
        match field {
            DetailField::Name => DetailFocus::Name,
            DetailField::Email => DetailFocus::Email,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingUiState {
    pub service_cursor: usize,
    pub slot_cursor: usize,
    pub name: TextInputState,
    pub email: TextInputState,
    pub focus: DetailFocus,
    /// Inline validation message for the details form.
    pub hint: Option<String>,
    /// Fields flagged by the last rejected submission.
    pub invalid: Vec<DetailField>,
    rendered_step: Step,
}

impl BookingUiState {
    /// Re-align cursors and inputs after the flow changed step. A no-op when
    /// the step is unchanged.
    pub fn sync(&mut self, state: &BookingState, catalog: &Catalog) {
        if state.step == self.rendered_step {
            return;
        }
        self.rendered_step = state.step;
        self.clear_hint();
        let selection = &state.selection;
        match state.step {
            Step::SelectService => {
                self.service_cursor = selection
                    .service
                    .as_ref()
                    .and_then(|chosen| catalog.services().iter().position(|service| service.id == chosen.id))
                    .unwrap_or(0);
            }
            Step::SelectTime => {
                self.slot_cursor = selection
                    .time
                    .as_ref()
                    .and_then(|chosen| catalog.time_slots().iter().position(|slot| slot == chosen))
                    .unwrap_or(0);
            }
            Step::ConfirmDetails => {
                self.name.set_input(selection.name.clone());
                self.email.set_input(selection.email.clone());
                self.focus = DetailFocus::Name;
            }
            Step::Success => {
                self.name.clear();
                self.email.clear();
            }
        }
    }

    pub fn move_service(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.service_cursor = wrap(self.service_cursor, delta, len);
    }

    /// Move across the slot grid; horizontal moves wrap through rows.
    pub fn move_slot(&mut self, columns: isize, rows: isize, len: usize) {
        if len == 0 {
            return;
        }
        let target = self.slot_cursor as isize + columns + rows * SLOT_COLUMNS as isize;
        if rows != 0 && !(0..len as isize).contains(&target) {
            return;
        }
        self.slot_cursor = wrap(self.slot_cursor, target - self.slot_cursor as isize, len);
    }

    /// The text input under focus, if focus is on a field.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInputState> {
        match self.focus {
            DetailFocus::Name => Some(&mut self.name),
            DetailFocus::Email => Some(&mut self.email),
            DetailFocus::Submit => None,
        }
    }

    pub fn is_editing(&self, step: Step) -> bool {
        step == Step::ConfirmDetails && self.focus != DetailFocus::Submit
    }

    pub fn submission(&self) -> Trigger {
        Trigger::SubmitDetails {
            name: self.name.input().to_string(),
            email: self.email.input().to_string(),
        }
    }

    /// Flag the fields a submission was missing and move focus to the first.
    pub fn reject(&mut self, missing: &[DetailField]) {
        self.invalid = missing.to_vec();
        self.hint = Some(format!(
            "Please fill in {}.",
            missing.iter().map(|field| field.label()).collect::<Vec<_>>().join(" and ")
        ));
        if let Some(first) = missing.first() {
            self.focus = DetailFocus::from(*first);
        }
    }

    pub fn clear_hint(&mut self) {
        self.hint = None;
        self.invalid.clear();
    }
}

fn wrap(current: usize, delta: isize, len: usize) -> usize {
    (current as isize + delta).rem_euclid(len as isize) as usize
}
