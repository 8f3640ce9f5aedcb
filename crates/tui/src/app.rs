//! Application state and the message reducer for the Concierge TUI.
//!
//! [`App`] owns the booking controller, the widget's local UI state, the page
//! chrome and the running timers. [`App::update`] is the single place where
//! messages change state; it answers with [`Effect`]s for the command layer.

use std::sync::Arc;

use concierge_engine::{BookingFlow, Dispatch, TransitionError};
use concierge_types::{Effect, Msg, Trigger};
use concierge_util::UserPreferences;
use tracing::{debug, info, warn};

use crate::cmd::Timers;
use crate::ui::components::booking::BookingUiState;
use crate::ui::components::page::PageState;
use crate::ui::theme::{self, LoadedTheme, Theme, ThemeDefinition};

/// Cross-cutting context: preferences store and the active theme.
pub struct SharedCtx {
    pub preferences: Arc<UserPreferences>,
    pub theme: Box<dyn Theme>,
    pub theme_definition: &'static ThemeDefinition,
}

impl SharedCtx {
    pub fn new(preferences: Arc<UserPreferences>, loaded: LoadedTheme) -> Self {
        Self {
            preferences,
            theme: loaded.theme,
            theme_definition: loaded.definition,
        }
    }
}

pub struct App {
    pub ctx: SharedCtx,
    pub flow: BookingFlow,
    pub booking: BookingUiState,
    pub page: PageState,
    pub timers: Timers,
    /// Animation frame for the busy throbber
    pub throbber_idx: usize,
    /// Last status line from a background command
    pub status: Option<String>,
}

impl App {
    pub fn new(ctx: SharedCtx, flow: BookingFlow) -> Self {
        let mut booking = BookingUiState::default();
        booking.sync(flow.state(), flow.catalog());
        Self {
            ctx,
            flow,
            booking,
            page: PageState::default(),
            timers: Timers::default(),
            throbber_idx: 0,
            status: None,
        }
    }

    /// Whether the runtime should tick quickly.
    pub fn is_animating(&self) -> bool {
        self.flow.is_busy() || self.page.is_animating()
    }

    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.flow.is_busy() {
                    self.throbber_idx = self.throbber_idx.wrapping_add(1);
                }
                self.page.tick();
                Vec::new()
            }
            Msg::Resize(_, height) => {
                // The bottom row belongs to the hint bar.
                log_reveals(self.page.set_viewport(height.saturating_sub(1)));
                Vec::new()
            }
            Msg::Booking(trigger) => self.dispatch(trigger.clone()),
            Msg::TransitionElapsed(ticket) => {
                self.timers.forget(*ticket);
                if self.flow.complete(*ticket) {
                    self.throbber_idx = 0;
                    self.booking.sync(self.flow.state(), self.flow.catalog());
                } else {
                    debug!(%ticket, "ignoring stale transition timer");
                }
                Vec::new()
            }
            Msg::ScrollBy(rows) => {
                log_reveals(self.page.scroll_by(*rows));
                Vec::new()
            }
            Msg::ToggleMenu => {
                let open = self.page.nav.toggle_menu();
                debug!(open, "toggled navigation menu");
                Vec::new()
            }
            Msg::FollowLink(index) => {
                match self.page.follow_link(*index) {
                    Some(revealed) => log_reveals(revealed),
                    None => debug!(index, "no section for navigation link"),
                }
                Vec::new()
            }
        }
    }

    fn dispatch(&mut self, trigger: Trigger) -> Vec<Effect> {
        match self.flow.dispatch(trigger) {
            Ok(dispatch) => {
                let mut effects: Vec<Effect> = dispatch.cancelled().map(Effect::CancelTransition).into_iter().collect();
                self.booking.clear_hint();
                match dispatch {
                    Dispatch::Applied { .. } => {
                        self.booking.sync(self.flow.state(), self.flow.catalog());
                    }
                    Dispatch::Scheduled { scheduled, .. } => {
                        self.throbber_idx = 0;
                        effects.push(Effect::ScheduleTransition {
                            ticket: scheduled.ticket,
                            delay: scheduled.delay,
                        });
                    }
                }
                effects
            }
            Err(TransitionError::MissingDetails(missing)) => {
                self.booking.reject(&missing);
                Vec::new()
            }
            Err(error @ TransitionError::Busy(_)) => {
                debug!(%error, "trigger ignored while busy");
                Vec::new()
            }
            Err(error) => {
                warn!(%error, "trigger rejected");
                Vec::new()
            }
        }
    }

    /// Switch to the next theme and ask for it to be saved.
    pub fn cycle_theme(&mut self) -> Vec<Effect> {
        let next = theme::catalog::next_after(self.ctx.theme_definition.id);
        let loaded = LoadedTheme::from_definition(next);
        self.ctx.theme = loaded.theme;
        self.ctx.theme_definition = loaded.definition;
        info!(theme = next.id, "switched theme");
        vec![Effect::PersistTheme(next.id.to_string())]
    }

}

fn log_reveals(revealed: Vec<&'static str>) {
    for section in revealed {
        debug!(section, "revealed page section");
    }
}
