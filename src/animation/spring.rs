use crate::foundation::error::{ReelError, ReelResult};

const SUBSTEP_MS: f64 = 1.0;
const REST_DELTA: f64 = 1e-3;
const REST_SPEED: f64 = 1e-2;

/// Upper bound on `sqrt(stiffness / mass)` and `damping / mass`, in 1/s.
pub const MAX_SPRING_RATE: f64 = 10_000.0;

/// Longest stretch of time a single [`SpringValue::step`] call simulates.
pub const MAX_STEP_MS: f64 = 250.0;

/// Physical spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Spring constant.
    pub stiffness: f64,
    /// Velocity damping.
    pub damping: f64,
    /// Moving mass.
    pub mass: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 40.0,
            mass: 1.0,
        }
    }
}

impl SpringParams {
    /// Reject non-finite, non-physical or undamped parameters, and rates too fast to simulate.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.stiffness.is_finite() && self.damping.is_finite() && self.mass.is_finite()) {
            return Err(ReelError::validation("spring parameters must be finite"));
        }
        if self.stiffness <= 0.0 || self.mass <= 0.0 {
            return Err(ReelError::validation(
                "spring stiffness and mass must be > 0",
            ));
        }
        if self.damping <= 0.0 {
            return Err(ReelError::validation("spring damping must be > 0"));
        }
        if self.natural_rate() > MAX_SPRING_RATE || self.damping_rate() > MAX_SPRING_RATE {
            return Err(ReelError::validation(format!(
                "spring is too stiff: sqrt(stiffness / mass) and damping / mass must be <= {MAX_SPRING_RATE}"
            )));
        }
        Ok(())
    }

    /// Undamped angular frequency, in 1/s.
    pub fn natural_rate(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Velocity decay rate, in 1/s.
    pub fn damping_rate(&self) -> f64 {
        self.damping / self.mass
    }

    /// Integration substep that keeps semi-implicit Euler stable for these parameters.
    fn substep_ms(&self) -> f64 {
        let fastest = self.natural_rate().max(self.damping_rate());
        if fastest.is_finite() && fastest > 0.0 {
            SUBSTEP_MS.min(500.0 / fastest)
        } else {
            SUBSTEP_MS
        }
    }
}

/// A scalar animated toward a target by a damped spring.
///
/// Retargeting keeps the current value and velocity, so a change that lands mid-flight bends the
/// motion instead of restarting it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringValue {
    value: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
}

impl SpringValue {
    /// A spring resting at `value`.
    pub fn at_rest(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target the spring is moving toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Move toward `target` from wherever the spring currently is.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` with no motion.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// True once value and velocity have come to rest on the target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt_ms`, at most [`MAX_STEP_MS`] per call.
    pub fn step(&mut self, dt_ms: f64) {
        if self.is_settled() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }

        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        let substep = self.params.substep_ms();
        let mut remaining = dt_ms.min(MAX_STEP_MS);
        while remaining > 0.0 {
            let h_ms = remaining.min(substep);
            let h = h_ms / 1000.0;
            let accel = (-stiffness * (self.value - self.target) - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h_ms;

            if (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
                self.snap_to(self.target);
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
