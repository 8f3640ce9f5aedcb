//! UI rendering module for the TUI application: components, themes, the root
//! view and the runtime loop.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
