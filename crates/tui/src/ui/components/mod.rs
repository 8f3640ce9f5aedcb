//! UI components: page, booking widget, nav bar, hint bar.

pub mod booking;
pub mod common;
pub mod component;
pub mod hint_bar;
pub mod nav_bar;
pub mod page;

pub use booking::BookingComponent;
pub(crate) use component::Component;
pub use hint_bar::HintBarComponent;
pub use nav_bar::NavBarComponent;
pub use page::PageComponent;
