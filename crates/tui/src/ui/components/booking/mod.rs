mod booking_component;
mod state;

pub use booking_component::BookingComponent;
pub use state::{BookingUiState, DetailFocus};
