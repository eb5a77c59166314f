use crate::foundation::error::{ReelError, ReelResult};

/// Scroll direction of a marquee row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarqueeDirection {
    /// Content travels from `0` to `-unit_width`.
    #[default]
    Left,
    /// Content travels from `-unit_width` to `0`.
    Right,
}

/// Endless horizontal loop over one repeated unit of content.
///
/// Time only accumulates while unpaused, so pausing freezes the offset and resuming continues
/// from the same spot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marquee {
    unit_width: f64,
    duration_ms: u64,
    direction: MarqueeDirection,
    elapsed_ms: u64,
    paused: bool,
}

impl Marquee {
    /// Loop `unit_width` pixels once every `duration_ms`.
    pub fn new(unit_width: f64, duration_ms: u64, direction: MarqueeDirection) -> ReelResult<Self> {
        if !unit_width.is_finite() || unit_width < 0.0 {
            return Err(ReelError::validation(
                "marquee unit width must be finite and >= 0",
            ));
        }
        if duration_ms == 0 {
            return Err(ReelError::validation("marquee duration must be > 0"));
        }
        Ok(Self {
            unit_width,
            duration_ms,
            direction,
            elapsed_ms: 0,
            paused: false,
        })
    }

    /// Record a re-measured unit width (e.g. after a resize). Ignored when not finite.
    pub fn set_unit_width(&mut self, unit_width: f64) {
        if unit_width.is_finite() && unit_width >= 0.0 {
            self.unit_width = unit_width;
        }
    }

    /// Hover pause.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether the row is frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by `dt_ms` of host time.
    pub fn tick(&mut self, dt_ms: u64) {
        if !self.paused {
            self.elapsed_ms = (self.elapsed_ms + dt_ms % self.duration_ms) % self.duration_ms;
        }
    }

    /// Horizontal translation in pixels.
    pub fn offset(&self) -> f64 {
        let phase = self.elapsed_ms as f64 / self.duration_ms as f64;
        match self.direction {
            MarqueeDirection::Left => -self.unit_width * phase,
            MarqueeDirection::Right => -self.unit_width * (1.0 - phase),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/marquee.rs"]
mod tests;
