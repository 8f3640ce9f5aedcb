//! Page collaborators around the widget: nav bar, reveal-on-scroll and
//! anchor jumps. None of them exchange data with the booking flow.
//!
//! Offsets are in abstract scroll units; renderers choose how many units a
//! row (or pixel) is worth.

use std::collections::BTreeMap;

/// Past this offset the nav bar switches to its compact "scrolled" style.
pub const NAV_SCROLL_THRESHOLD: u32 = 50;
/// Space kept free above an anchor target for the fixed header.
pub const ANCHOR_HEADER_OFFSET: u32 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub menu_open: bool,
}

impl NavState {
    pub fn on_scroll(&mut self, offset: u32) {
        self.scrolled = offset > NAV_SCROLL_THRESHOLD;
    }

    /// Flip the menu; returns the new expanded flag.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Following a menu link always closes the menu.
    pub fn follow_link(&mut self) {
        self.menu_open = false;
    }
}

/// One-shot reveal animations keyed by element id.
///
/// Observed elements start paused and are released the first time they
/// become visible; later visibility changes are ignored.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: BTreeMap<String, bool>,
}

impl RevealTracker {
    pub fn observe(&mut self, id: impl Into<String>) {
        self.revealed.entry(id.into()).or_insert(false);
    }

    /// Returns `true` only on the call that releases the element.
    pub fn on_visible(&mut self, id: &str) -> bool {
        match self.revealed.get_mut(id) {
            Some(revealed) if !*revealed => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    /// Observed but not yet visible. Unobserved ids are never paused.
    pub fn is_paused(&self, id: &str) -> bool {
        self.revealed.get(id).is_some_and(|revealed| !revealed)
    }
}

/// Absolute scroll position for an anchor whose top edge sits at
/// `element_top` relative to the viewport when the page is at `page_offset`.
pub fn anchor_scroll_target(element_top: i64, page_offset: u32) -> u32 {
    let target = element_top + i64::from(page_offset) - i64::from(ANCHOR_HEADER_OFFSET);
    u32::try_from(target.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_becomes_scrolled_past_threshold() {
        let mut nav = NavState::default();
        nav.on_scroll(50);
        assert!(!nav.scrolled);
        nav.on_scroll(51);
        assert!(nav.scrolled);
        nav.on_scroll(0);
        assert!(!nav.scrolled);
    }

    #[test]
    fn following_a_link_closes_the_menu() {
        let mut nav = NavState::default();
        assert!(nav.toggle_menu());
        nav.follow_link();
        assert!(!nav.menu_open);
        assert!(nav.toggle_menu());
        assert!(!nav.toggle_menu());
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut tracker = RevealTracker::default();
        tracker.observe("services");
        assert!(tracker.is_paused("services"));
        assert!(tracker.on_visible("services"));
        assert!(!tracker.on_visible("services"));
        assert!(!tracker.is_paused("services"));

        // Re-observing does not pause a released element again.
        tracker.observe("services");
        assert!(!tracker.is_paused("services"));
        assert!(!tracker.on_visible("unknown"));
    }

    #[test]
    fn anchor_target_leaves_room_for_the_header() {
        assert_eq!(anchor_scroll_target(400, 100), 380);
        assert_eq!(anchor_scroll_target(-300, 200), 0);
        assert_eq!(anchor_scroll_target(60, 0), 0);
    }
}
