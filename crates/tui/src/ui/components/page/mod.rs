mod page_component;
mod state;

pub use page_component::PageComponent;
pub use state::{NAV_ROWS, PageState, SECTIONS};
