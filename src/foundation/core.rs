use std::num::NonZeroUsize;

use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Vec2};

/// Host time in milliseconds.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// `self + ms`, saturating.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Normalized scroll or transition progress.
///
/// Always finite and inside `[0, 1]`: construction clamps, and NaN maps to `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Progress at the start anchor.
    pub const START: Self = Self(0.0);
    /// Progress at the end anchor.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`.
    pub fn new(v: f64) -> Self {
        Self(crate::foundation::math::clamp01(v))
    }

    /// Raw value in `[0, 1]`.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> serde::Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Progress::new)
    }
}

/// A vertical extent in document pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Top edge.
    pub start: f64,
    /// Height (negative values are treated as zero).
    pub len: f64,
}

impl Span {
    /// Build a span from its top edge and height.
    pub fn new(start: f64, len: f64) -> Self {
        Self { start, len }
    }

    /// Bottom edge.
    pub fn end(self) -> f64 {
        self.start + self.len.max(0.0)
    }

    /// Length of the overlap with `other` (zero when disjoint).
    pub fn overlap(self, other: Span) -> f64 {
        let lo = self.start.max(other.start);
        let hi = self.end().min(other.end());
        (hi - lo).max(0.0)
    }
}

/// Number of discrete steps a stepper partitions progress into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct StepCount(NonZeroUsize);

impl StepCount {
    /// Four steps.
    pub const FOUR: Self = match NonZeroUsize::new(4) {
        Some(n) => Self(n),
        None => panic!("4 is non-zero"),
    };

    /// Validate that `n > 0`.
    pub fn new(n: usize) -> ReelResult<Self> {
        NonZeroUsize::new(n)
            .map(Self)
            .ok_or_else(|| ReelError::validation("step count must be > 0"))
    }

    /// Step count as a plain integer (always >= 1).
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for StepCount {
    type Error = ReelError;

    fn try_from(n: usize) -> ReelResult<Self> {
        Self::new(n)
    }
}

impl From<StepCount> for usize {
    fn from(s: StepCount) -> usize {
        s.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
