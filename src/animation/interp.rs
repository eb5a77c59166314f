use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
    foundation::math::lerp,
};

/// Piecewise-linear map from input stops to output stops, clamped at both ends.
///
/// This is how scroll position drives continuous styles: `[0, 1000] -> [0, 150]` for a parallax
/// background, `[0.3, 0.5] -> [1, 0]` for a crossfade. Each segment is shaped by `ease`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "ScrollTransformDef")]
pub struct ScrollTransform {
    input: Vec<f64>,
    output: Vec<f64>,
    ease: Ease,
}

#[derive(serde::Deserialize)]
struct ScrollTransformDef {
    input: Vec<f64>,
    output: Vec<f64>,
    #[serde(default = "default_ease")]
    ease: Ease,
}

fn default_ease() -> Ease {
    Ease::Linear
}

impl TryFrom<ScrollTransformDef> for ScrollTransform {
    type Error = ReelError;

    fn try_from(def: ScrollTransformDef) -> ReelResult<Self> {
        Ok(Self::new(def.input, def.output)?.with_ease(def.ease))
    }
}

impl ScrollTransform {
    /// Validate and build a linear transform.
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> ReelResult<Self> {
        if input.len() < 2 {
            return Err(ReelError::validation(
                "scroll transform needs at least two stops",
            ));
        }
        if input.len() != output.len() {
            return Err(ReelError::validation(
                "scroll transform input and output stops must have equal length",
            ));
        }
        if !input.iter().chain(output.iter()).all(|v| v.is_finite()) {
            return Err(ReelError::validation("scroll transform stops must be finite"));
        }
        if !input.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ReelError::validation(
                "scroll transform input stops must be non-decreasing",
            ));
        }
        Ok(Self {
            input,
            output,
            ease: Ease::Linear,
        })
    }

    /// Two-stop convenience constructor.
    pub fn between(from: (f64, f64), to: (f64, f64)) -> ReelResult<Self> {
        Self::new(vec![from.0, to.0], vec![from.1, to.1])
    }

    /// Shape every segment with `ease`.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Sample at `v`. Values outside the input domain clamp to the first/last output.
    pub fn sample(&self, v: f64) -> f64 {
        let first = self.output[0];
        let last = self.output[self.output.len() - 1];
        if v.is_nan() || v <= self.input[0] {
            return first;
        }
        let idx = self.input.partition_point(|x| *x <= v);
        if idx >= self.input.len() {
            return last;
        }

        let (x0, x1) = (self.input[idx - 1], self.input[idx]);
        let (y0, y1) = (self.output[idx - 1], self.output[idx]);
        let t = self.ease.apply((v - x0) / (x1 - x0));
        lerp(y0, y1, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
