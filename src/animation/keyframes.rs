use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
    foundation::math::lerp,
};

/// A keyed value at a point in a looping track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Offset into the loop.
    pub at_ms: u64,
    /// Value at this key.
    pub value: f64,
    /// Ease applied toward the next key.
    pub ease: Ease,
}

/// How values between keys are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Keep the previous key's value.
    Hold,
    /// Ease between neighboring keys.
    Linear,
}

/// Keyframe track that repeats every `period_ms`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoopTrack {
    keys: Vec<Keyframe>, // sorted by at_ms
    mode: InterpMode,
    period_ms: u64,
}

impl LoopTrack {
    /// Validate and build a track.
    pub fn new(keys: Vec<Keyframe>, mode: InterpMode, period_ms: u64) -> ReelResult<Self> {
        if keys.is_empty() {
            return Err(ReelError::validation("loop track must have at least one key"));
        }
        if period_ms == 0 {
            return Err(ReelError::validation("loop track period must be > 0"));
        }
        if !keys.windows(2).all(|w| w[0].at_ms <= w[1].at_ms) {
            return Err(ReelError::validation("loop track keys must be sorted"));
        }
        if keys.iter().any(|k| k.at_ms > period_ms || !k.value.is_finite()) {
            return Err(ReelError::validation(
                "loop track keys must be finite and inside the period",
            ));
        }
        Ok(Self {
            keys,
            mode,
            period_ms,
        })
    }

    /// Keys at fractions of the period, all eased the same way.
    pub fn from_times(
        period_ms: u64,
        times: &[f64],
        values: &[f64],
        ease: Ease,
    ) -> ReelResult<Self> {
        if times.len() != values.len() {
            return Err(ReelError::validation(
                "loop track times and values must have equal length",
            ));
        }
        let keys = times
            .iter()
            .zip(values)
            .map(|(t, v)| Keyframe {
                at_ms: (crate::foundation::math::clamp01(*t) * period_ms as f64).round() as u64,
                value: *v,
                ease,
            })
            .collect();
        Self::new(keys, InterpMode::Linear, period_ms)
    }

    /// Loop length.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Value `elapsed_ms` after the track started.
    pub fn sample(&self, elapsed_ms: u64) -> f64 {
        let f = elapsed_ms % self.period_ms;
        let idx = self.keys.partition_point(|k| k.at_ms <= f);

        if idx == 0 {
            return self.keys[0].value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at_ms.saturating_sub(a.at_ms);
        if denom == 0 {
            return a.value;
        }

        match self.mode {
            InterpMode::Hold => a.value,
            InterpMode::Linear => {
                let t = ((f - a.at_ms) as f64) / (denom as f64);
                lerp(a.value, b.value, a.ease.apply(t))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
