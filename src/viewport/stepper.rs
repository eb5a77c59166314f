use crate::{
    foundation::core::{Progress, StepCount},
    foundation::error::{ReelError, ReelResult},
    foundation::math::map_range,
};

/// Discrete step for `progress` over `steps` equal bands.
///
/// Bands are closed-open, so an exact boundary belongs to the band being entered; progress 1.0
/// maps to the last step.
pub fn step_for_progress(progress: Progress, steps: StepCount) -> usize {
    let n = steps.get();
    let idx = (progress.get() * n as f64).floor() as usize;
    idx.min(n - 1)
}

/// Tracks the active step and reports changes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stepper {
    steps: StepCount,
    current: usize,
}

impl Stepper {
    /// Start at step 0.
    pub fn new(steps: StepCount) -> Self {
        Self { steps, current: 0 }
    }

    /// Active step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of steps.
    pub fn steps(&self) -> StepCount {
        self.steps
    }

    /// Feed new progress; `Some(step)` when the active step changed.
    pub fn update(&mut self, progress: Progress) -> Option<usize> {
        let next = step_for_progress(progress, self.steps);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

/// Scale of a stacked card: 1 at the start of `range`, `target` at its end, clamped outside.
pub fn card_scale(progress: Progress, range: (f64, f64), target: f64) -> f64 {
    map_range(progress.get(), range.0, range.1, 1.0, target)
}

/// Layered "stack of cards" where each later card starts shrinking later and shrinks less.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStack {
    count: StepCount,
    scale_step: f64,
    offset_px: f64,
}

impl CardStack {
    /// Build a stack of `count` cards.
    pub fn new(count: StepCount, scale_step: f64, offset_px: f64) -> ReelResult<Self> {
        if !(scale_step.is_finite() && offset_px.is_finite()) {
            return Err(ReelError::validation("card stack parameters must be finite"));
        }
        if scale_step < 0.0 || scale_step * count.get() as f64 > 1.0 {
            return Err(ReelError::validation(
                "card scale step must keep every target scale within [0, 1]",
            ));
        }
        Ok(Self {
            count,
            scale_step,
            offset_px,
        })
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.count.get()
    }

    /// Always false; a stack has at least one card.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Progress window over which card `i` shrinks.
    pub fn range(&self, i: usize) -> (f64, f64) {
        (i as f64 / self.count.get() as f64, 1.0)
    }

    /// Final scale of card `i`.
    pub fn target_scale(&self, i: usize) -> f64 {
        let behind = self.count.get().saturating_sub(i) as f64;
        1.0 - behind * self.scale_step
    }

    /// Scale of card `i` at `progress`.
    pub fn scale(&self, i: usize, progress: Progress) -> f64 {
        card_scale(progress, self.range(i), self.target_scale(i))
    }

    /// Sticky top offset of card `i`, so the stack shows a sliver of each card behind.
    pub fn top_offset_px(&self, i: usize) -> f64 {
        i as f64 * self.offset_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/stepper.rs"]
mod tests;
