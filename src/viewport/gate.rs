use crate::{
    animation::ease::Ease,
    foundation::core::{Millis, Span},
    foundation::math::lerp,
};

/// Viewport margins as signed fractions of the viewport height.
///
/// Negative values shrink the viewport (the panel must travel further in before it counts as
/// visible), positive values grow it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GateMargins {
    /// Adjustment of the top edge.
    pub top: f64,
    /// Adjustment of the bottom edge.
    pub bottom: f64,
}

impl Default for GateMargins {
    fn default() -> Self {
        Self::uniform(-0.2)
    }
}

impl GateMargins {
    /// Same margin on both edges.
    pub fn uniform(fraction: f64) -> Self {
        Self {
            top: fraction,
            bottom: fraction,
        }
    }

    /// The viewport after applying the margins.
    pub fn apply(self, viewport: Span) -> Span {
        let h = viewport.len.max(0.0);
        let top = viewport.start - self.top * h;
        let bottom = viewport.end() + self.bottom * h;
        Span::new(top, (bottom - top).max(0.0))
    }
}

/// Activity edge reported by a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum GateEdge {
    /// The panel became active.
    Entered,
    /// The panel stopped being active.
    Exited,
}

/// Decides whether a panel's choreography should run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityGate {
    margins: GateMargins,
    active: bool,
}

impl VisibilityGate {
    /// An inactive gate.
    pub fn new(margins: GateMargins) -> Self {
        Self {
            margins,
            active: false,
        }
    }

    /// Whether the panel currently counts as visible.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Recompute activity for the current layout. Reports an edge only when activity flips.
    pub fn update(&mut self, panel: Span, viewport: Span) -> Option<GateEdge> {
        let now_active = panel.overlap(self.margins.apply(viewport)) > 0.0;
        self.set(now_active)
    }

    /// Force the gate closed, as on unmount.
    pub fn close(&mut self) -> Option<GateEdge> {
        self.set(false)
    }

    fn set(&mut self, active: bool) -> Option<GateEdge> {
        if active == self.active {
            return None;
        }
        self.active = active;
        Some(if active {
            GateEdge::Entered
        } else {
            GateEdge::Exited
        })
    }
}

/// Entrance style of a revealed section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub translate_y: f64,
    /// Uniform scale.
    pub scale: f64,
}

impl RevealStyle {
    /// Style before the section has been revealed.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        translate_y: 40.0,
        scale: 0.98,
    };

    /// Resting style.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
        scale: 1.0,
    };
}

/// Gate for one-shot section entrances: latches on first entry and never exits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGate {
    margins: GateMargins,
    duration_ms: u64,
    revealed_at: Option<Millis>,
}

impl Default for RevealGate {
    fn default() -> Self {
        Self::new(GateMargins::uniform(-0.1), 800)
    }
}

impl RevealGate {
    /// A gate that has not fired yet.
    pub fn new(margins: GateMargins, duration_ms: u64) -> Self {
        Self {
            margins,
            duration_ms,
            revealed_at: None,
        }
    }

    /// When the section was first revealed.
    pub fn revealed_at(&self) -> Option<Millis> {
        self.revealed_at
    }

    /// Returns `true` exactly once, on the first update that finds the section in view.
    pub fn update(&mut self, section: Span, viewport: Span, now: Millis) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        if section.overlap(self.margins.apply(viewport)) > 0.0 {
            self.revealed_at = Some(now);
            return true;
        }
        false
    }

    /// Entrance style at `now`.
    pub fn style(&self, now: Millis) -> RevealStyle {
        let Some(at) = self.revealed_at else {
            return RevealStyle::HIDDEN;
        };
        if self.duration_ms == 0 {
            return RevealStyle::SHOWN;
        }
        let t = Ease::REVEAL.apply(now.since(at) as f64 / self.duration_ms as f64);
        let (from, to) = (RevealStyle::HIDDEN, RevealStyle::SHOWN);
        RevealStyle {
            opacity: lerp(from.opacity, to.opacity, t),
            translate_y: lerp(from.translate_y, to.translate_y, t),
            scale: lerp(from.scale, to.scale, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/gate.rs"]
mod tests;
