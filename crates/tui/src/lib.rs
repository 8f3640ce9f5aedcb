//! # Concierge TUI
//!
//! Terminal front end for the appointment booking flow. A scrolling page
//! with a fixed nav bar hosts the four-step booking widget; forward steps
//! run behind a short loading delay driven by abortable tokio timers.
//!
//! ## Architecture
//!
//! - [`app`]: the `App` state and its message reducer.
//! - [`cmd`]: effects turned into side effects (timers, preference writes).
//! - [`ui`]: components, themes and the runtime event loop.

mod app;
mod cmd;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use concierge_engine::Catalog;
use concierge_types::FlowSettings;
use concierge_util::UserPreferences;

/// Everything the TUI needs from the caller.
pub struct TuiOptions {
    pub preferences: Arc<UserPreferences>,
    pub flow: FlowSettings,
    pub catalog: Catalog,
    /// Theme id or alias from the command line.
    pub theme: Option<String>,
}

/// Runs the TUI until the user quits.
///
/// # Errors
///
/// Fails when the terminal cannot be put into raw mode or drawn to.
pub async fn run(options: TuiOptions) -> Result<()> {
    ui::runtime::run_app(options).await
}
