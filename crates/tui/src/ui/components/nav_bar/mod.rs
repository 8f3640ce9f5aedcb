//! Fixed navigation bar overlaying the top of the page.
//!
//! Shows the brand and one link per page section. Past the scroll threshold
//! the bar switches to a compact surface with a bottom rule. On narrow
//! terminals the links collapse into a menu toggled with `m`; the dropdown
//! lists the same links and closes when one is followed.

mod nav_bar_component;

pub use nav_bar_component::NavBarComponent;
