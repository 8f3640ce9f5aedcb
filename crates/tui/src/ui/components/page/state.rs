//! Scrollable page state: offset, viewport, nav chrome and one-shot reveals.
//!
//! The page is a fixed stack of anchored sections below a header band that
//! the nav bar overlays. Offsets are kept in chrome units so the nav
//! threshold and anchor header offset apply unchanged; one terminal row is
//! [`ROW_UNITS`] units.

use std::collections::BTreeMap;

use concierge_engine::{ANCHOR_HEADER_OFFSET, NavState, RevealTracker, anchor_scroll_target};

/// Scroll units per terminal row.
pub const ROW_UNITS: u32 = 40;

/// Rows covered by the fixed nav bar.
pub const NAV_ROWS: u16 = (ANCHOR_HEADER_OFFSET / ROW_UNITS) as u16;

/// Ticks a freshly revealed section stays faded.
const FADE_TICKS: u8 = 4;

/// Share of a section that must be on screen before it reveals.
const REVEAL_THRESHOLD: f32 = 0.1;

/// Rows trimmed off the bottom of the viewport when testing visibility.
const REVEAL_BOTTOM_MARGIN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSection {
    pub id: &'static str,
    pub label: &'static str,
    pub rows: u16,
}

/// Page sections in document order; nav links point at them by index.
pub const SECTIONS: [PageSection; 3] = [
    PageSection {
        id: "services",
        label: "Services",
        rows: 14,
    },
    PageSection {
        id: "book",
        label: "Book",
        rows: 24,
    },
    PageSection {
        id: "contact",
        label: "Contact",
        rows: 9,
    },
];

#[derive(Debug, Clone)]
pub struct PageState {
    offset: u32,
    viewport_rows: u16,
    pub nav: NavState,
    reveal: RevealTracker,
    fading: BTreeMap<&'static str, u8>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PageState {
    pub fn new(viewport_rows: u16) -> Self {
        let mut reveal = RevealTracker::default();
        for section in SECTIONS {
            reveal.observe(section.id);
        }
        let mut page = Self {
            offset: 0,
            viewport_rows,
            nav: NavState::default(),
            reveal,
            fading: BTreeMap::new(),
        };
        page.refresh_reveals();
        page
    }

    /// Scroll position in whole rows.
    pub fn offset_rows(&self) -> u16 {
        u16::try_from(self.offset / ROW_UNITS).unwrap_or(u16::MAX)
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Total height of the page including the header band.
    pub fn document_rows() -> u16 {
        NAV_ROWS + SECTIONS.iter().map(|section| section.rows).sum::<u16>()
    }

    /// Document row where section `index` starts.
    pub fn section_top(index: usize) -> Option<u16> {
        (index < SECTIONS.len()).then(|| NAV_ROWS + SECTIONS[..index].iter().map(|section| section.rows).sum::<u16>())
    }

    fn max_offset(&self) -> u32 {
        u32::from(Self::document_rows().saturating_sub(self.viewport_rows)) * ROW_UNITS
    }

    /// Returns the ids of sections revealed by the new size.
    pub fn set_viewport(&mut self, rows: u16) -> Vec<&'static str> {
        self.viewport_rows = rows;
        self.scroll_to(self.offset)
    }

    /// Returns the ids of sections revealed by the move.
    pub fn scroll_to(&mut self, offset: u32) -> Vec<&'static str> {
        self.offset = offset.min(self.max_offset());
        self.nav.on_scroll(self.offset);
        self.refresh_reveals()
    }

    pub fn scroll_by(&mut self, rows: i32) -> Vec<&'static str> {
        let target = i64::from(self.offset) + i64::from(rows) * i64::from(ROW_UNITS);
        self.scroll_to(u32::try_from(target.max(0)).unwrap_or(u32::MAX))
    }

    /// Jump to the anchor of section `index`, leaving room for the nav bar.
    /// Closes the menu. `None` when the index has no section.
    pub fn follow_link(&mut self, index: usize) -> Option<Vec<&'static str>> {
        let top = Self::section_top(index)?;
        self.nav.follow_link();
        let element_top = i64::from(top) * i64::from(ROW_UNITS) - i64::from(self.offset);
        Some(self.scroll_to(anchor_scroll_target(element_top, self.offset)))
    }

    pub fn is_visible(&self, index: usize) -> bool {
        let (Some(top), Some(section)) = (Self::section_top(index), SECTIONS.get(index)) else {
            return false;
        };
        let window_start = self.offset_rows();
        let window_end = window_start.saturating_add(self.viewport_rows.saturating_sub(REVEAL_BOTTOM_MARGIN));
        let bottom = top + section.rows;
        let overlap = bottom.min(window_end).saturating_sub(top.max(window_start));
        overlap > 0 && f32::from(overlap) / f32::from(section.rows) >= REVEAL_THRESHOLD
    }

    fn refresh_reveals(&mut self) -> Vec<&'static str> {
        let mut revealed = Vec::new();
        for (index, section) in SECTIONS.iter().enumerate() {
            if self.is_visible(index) && self.reveal.on_visible(section.id) {
                self.fading.insert(section.id, FADE_TICKS);
                revealed.push(section.id);
            }
        }
        revealed
    }

    /// Section not yet scrolled into view.
    pub fn is_paused(&self, id: &str) -> bool {
        self.reveal.is_paused(id)
    }

    /// Remaining fade ticks for a just-revealed section.
    pub fn fade_level(&self, id: &str) -> u8 {
        self.fading.get(id).copied().unwrap_or(0)
    }

    pub fn is_animating(&self) -> bool {
        !self.fading.is_empty()
    }

    /// Advance reveal fades; returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if self.fading.is_empty() {
            return false;
        }
        self.fading.retain(|_, ticks| {
            *ticks = ticks.saturating_sub(1);
            *ticks > 0
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use concierge_engine::NAV_SCROLL_THRESHOLD;

    use super::*;

    #[test]
    fn nav_switches_style_past_threshold() {
        let mut page = PageState::new(20);
        page.scroll_by(1);
        assert_eq!(page.offset_rows(), 1);
        assert!(ROW_UNITS <= NAV_SCROLL_THRESHOLD);
        assert!(!page.nav.scrolled);
        page.scroll_by(1);
        assert!(page.nav.scrolled);
        page.scroll_by(-10);
        assert_eq!(page.offset_rows(), 0);
        assert!(!page.nav.scrolled);
    }

    #[test]
    fn scrolling_is_clamped_to_the_document() {
        let mut page = PageState::new(20);
        page.scroll_by(10_000);
        assert_eq!(page.offset_rows(), PageState::document_rows() - 20);

        // Growing the viewport pulls the offset back in.
        page.set_viewport(PageState::document_rows());
        assert_eq!(page.offset_rows(), 0);
    }

    #[test]
    fn following_a_link_parks_the_section_below_the_nav() {
        let mut page = PageState::new(20);
        page.nav.toggle_menu();
        page.follow_link(1).expect("book section exists");
        assert!(!page.nav.menu_open);
        let top = PageState::section_top(1).unwrap();
        assert_eq!(page.offset_rows(), top - NAV_ROWS);
        assert!(page.follow_link(7).is_none());
    }

    #[test]
    fn sections_reveal_once_when_scrolled_into_view() {
        let mut page = PageState::new(12);
        assert!(!page.is_paused("services"));
        assert!(page.is_paused("contact"));

        let revealed = page.scroll_by(100);
        assert!(revealed.contains(&"contact"));
        assert!(!page.is_paused("contact"));
        assert!(page.fade_level("contact") > 0);

        page.scroll_by(-100);
        assert!(page.scroll_by(100).is_empty());
    }

    #[test]
    fn fades_run_out_after_a_few_ticks() {
        let mut page = PageState::new(12);
        assert!(page.is_animating());
        for _ in 0..FADE_TICKS {
            assert!(page.tick());
        }
        assert!(!page.is_animating());
        assert!(!page.tick());
    }

    #[test]
    fn zero_height_viewport_reveals_nothing() {
        let page = PageState::new(0);
        assert!(SECTIONS.iter().all(|section| page.is_paused(section.id)));
    }
}
