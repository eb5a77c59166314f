use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::foundation::core::{Progress, Span};

/// Where a scroll anchor sits: a point on the container meeting a point on the viewport.
///
/// Both are fractions (`0` = top edge, `1` = bottom edge).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Point on the tracked container.
    pub target: f64,
    /// Point on the viewport.
    pub viewport: f64,
}

impl Offset {
    /// Container top meets viewport top.
    pub const START_START: Self = Self::new(0.0, 0.0);
    /// Container bottom meets viewport bottom.
    pub const END_END: Self = Self::new(1.0, 1.0);
    /// Container top meets viewport bottom.
    pub const START_END: Self = Self::new(0.0, 1.0);
    /// Container bottom meets viewport top.
    pub const END_START: Self = Self::new(1.0, 0.0);

    /// Build an offset from container and viewport fractions.
    pub const fn new(target: f64, viewport: f64) -> Self {
        Self { target, viewport }
    }
}

/// The scroll window over which a container's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollAnchors {
    /// Anchor at progress 0.
    pub start: Offset,
    /// Anchor at progress 1.
    pub end: Offset,
}

impl Default for ScrollAnchors {
    fn default() -> Self {
        Self::STICKY
    }
}

impl ScrollAnchors {
    /// Progress over the time a tall container is pinned: "start start" to "end end".
    pub const STICKY: Self = Self {
        start: Offset::START_START,
        end: Offset::END_END,
    };

    /// Progress over the whole pass through the viewport: "start end" to "end start".
    pub const PASS_THROUGH: Self = Self {
        start: Offset::START_END,
        end: Offset::END_START,
    };

    /// Document scroll offsets at which progress is 0 and 1.
    pub fn scroll_range(&self, container: Span, viewport_h: f64) -> (f64, f64) {
        let at = |o: Offset| container.start + container.len.max(0.0) * o.target - viewport_h * o.viewport;
        (at(self.start), at(self.end))
    }

    /// Clamped progress of `container` at `frame`.
    pub fn progress(&self, container: Span, frame: ScrollFrame) -> Progress {
        let (lo, hi) = self.scroll_range(container, frame.viewport_h);
        let y = frame.scroll_y;
        if !(lo.is_finite() && hi.is_finite() && y.is_finite()) {
            return Progress::START;
        }
        if hi <= lo {
            return if y >= hi { Progress::END } else { Progress::START };
        }
        Progress::new((y - lo) / (hi - lo))
    }
}

/// Raw scroll state reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollFrame {
    /// Document scroll offset of the viewport top.
    pub scroll_y: f64,
    /// Viewport height.
    pub viewport_h: f64,
}

impl ScrollFrame {
    /// Build a frame.
    pub fn new(scroll_y: f64, viewport_h: f64) -> Self {
        Self {
            scroll_y,
            viewport_h,
        }
    }

    /// The viewport as a document span.
    pub fn viewport(&self) -> Span {
        Span::new(self.scroll_y, self.viewport_h)
    }
}

/// Document extent of a `position: sticky` element at `scroll_y`.
///
/// The element sits at `natural` in flow, sticks `top_px` below the viewport top while its
/// `container` is in view, and never leaves the container.
pub fn sticky_span(natural: Span, container: Span, scroll_y: f64, top_px: f64) -> Span {
    let len = natural.len.max(0.0);
    let pinned = scroll_y + top_px;
    if !pinned.is_finite() {
        return natural;
    }
    let latest = (container.end() - len).max(natural.start);
    Span::new(pinned.clamp(natural.start, latest), len)
}

#[derive(Debug)]
struct TrackCell {
    container: Cell<Span>,
    anchors: ScrollAnchors,
    progress: Cell<Progress>,
}

/// Read handle on one container's scroll progress. Dropping it unsubscribes.
#[derive(Debug)]
pub struct ScrollTrack(Rc<TrackCell>);

impl ScrollTrack {
    /// Progress as of the last publish.
    pub fn progress(&self) -> Progress {
        self.0.progress.get()
    }

    /// Container extent used for the next publish.
    pub fn container(&self) -> Span {
        self.0.container.get()
    }

    /// Record a layout change; takes effect on the next publish.
    pub fn set_container(&self, container: Span) {
        self.0.container.set(container);
    }
}

/// Single source of truth for scroll position.
///
/// One writer publishes frames; each published frame refreshes every live [`ScrollTrack`] in one
/// pass, so all readers see progress derived from the same frame. Tracks are held weakly.
#[derive(Debug, Default)]
pub struct ScrollBus {
    frame: ScrollFrame,
    version: u64,
    tracks: Vec<Weak<TrackCell>>,
}

impl ScrollBus {
    /// A bus seeded with `frame`.
    pub fn new(frame: ScrollFrame) -> Self {
        Self {
            frame,
            version: 0,
            tracks: Vec::new(),
        }
    }

    /// Last published frame.
    pub fn frame(&self) -> ScrollFrame {
        self.frame
    }

    /// Number of publishes so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of subscriptions still registered.
    pub fn subscriptions(&self) -> usize {
        self.tracks.len()
    }

    /// Subscribe to `container`'s progress. The handle is up to date immediately.
    pub fn track(&mut self, container: Span, anchors: ScrollAnchors) -> ScrollTrack {
        let cell = Rc::new(TrackCell {
            container: Cell::new(container),
            anchors,
            progress: Cell::new(anchors.progress(container, self.frame)),
        });
        self.tracks.push(Rc::downgrade(&cell));
        ScrollTrack(cell)
    }

    /// Publish a new frame, refreshing live tracks and dropping dead ones.
    pub fn publish(&mut self, frame: ScrollFrame) {
        self.frame = frame;
        self.version += 1;
        self.tracks.retain(|weak| {
            let Some(cell) = weak.upgrade() else {
                return false;
            };
            cell.progress
                .set(cell.anchors.progress(cell.container.get(), frame));
            true
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/scroll.rs"]
mod tests;
