use crate::{stage::layout::PageLayout, viewport::scroll::ScrollFrame};

const SCROLLED_PX: f64 = 20.0;
const HERO_FRACTION: f64 = 0.5;
const BOTTOM_MIN_SCROLL_PX: f64 = 100.0;
const BOTTOM_SLACK_PX: f64 = 10.0;
const TRIGGER_PX: f64 = 150.0;

/// Navigation bar state derived from scroll position.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct NavState {
    /// Solid background once the page has moved.
    pub scrolled: bool,
    /// Highlighted section id.
    pub active: Option<String>,
}

/// Scroll spy over the sections flagged `nav`.
///
/// Nothing is highlighted over the upper half of the first screen. At the very bottom of the page
/// the last nav section wins even if it is too short to reach the trigger line. Otherwise the
/// lowest section whose top has passed a line 150px below the viewport top is active.
pub fn nav_state(layout: &PageLayout, frame: ScrollFrame) -> NavState {
    let y = frame.scroll_y;
    let vh = frame.viewport_h;
    let scrolled = y > SCROLLED_PX;
    let nav = || layout.sections.iter().filter(|s| s.nav);

    let active = if !y.is_finite() || y < vh * HERO_FRACTION {
        None
    } else if y > BOTTOM_MIN_SCROLL_PX
        && (vh + y).ceil() >= layout.page_height() - BOTTOM_SLACK_PX
    {
        nav().next_back().map(|s| s.id.clone())
    } else {
        let trigger = y + TRIGGER_PX;
        nav()
            .rev()
            .find(|s| trigger >= s.span.start)
            .map(|s| s.id.clone())
    };

    NavState { scrolled, active }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/nav.rs"]
mod tests;
