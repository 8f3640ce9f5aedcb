//! # Concierge Engine
//!
//! The booking flow controller and its pure projections.
//!
//! ## Architecture
//!
//! - **`catalog`**: the static service catalog and time slot list
//! - **`transition`**: pure transition planning (`plan`) and commitment (`apply`)
//! - **`flow`**: [`BookingFlow`], the owned controller that tracks the single
//!   pending (deferred) transition and issues cancellable tickets
//! - **`progress`**: the three-segment progress indicator
//! - **`view`**: declarative projection of the flow into a [`WidgetView`]
//! - **`chrome`**: page collaborators (nav bar, reveal-on-scroll, anchor offsets)
//!
//! ## Usage
//!
//! ```rust
//! use concierge_engine::{BookingFlow, Dispatch};
//! use concierge_types::{Step, Trigger};
//!
//! let mut flow = BookingFlow::default();
//! let dispatch = flow
//!     .dispatch(Trigger::PickService { service_id: "specialist".into() })
//!     .expect("service exists");
//! let Dispatch::Scheduled { scheduled, .. } = dispatch else {
//!     panic!("picking a service is deferred");
//! };
//! assert!(flow.complete(scheduled.ticket));
//! assert_eq!(flow.state().step, Step::SelectTime);
//! ```

pub mod catalog;
pub mod chrome;
pub mod flow;
pub mod progress;
pub mod transition;
pub mod view;

pub use catalog::Catalog;
pub use chrome::{ANCHOR_HEADER_OFFSET, NAV_SCROLL_THRESHOLD, NavState, RevealTracker, anchor_scroll_target};
pub use flow::{BookingFlow, Dispatch, ScheduledTransition};
pub use progress::{PROGRESS_SEGMENTS, ProgressMeta, SegmentStatus, progress_segments};
pub use transition::{Commit, DetailField, Plan, TransitionError, apply, plan};
pub use view::{FormField, ServiceOption, StepView, Summary, WidgetView, project};
