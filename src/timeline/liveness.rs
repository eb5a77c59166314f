use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared liveness flag captured by every continuation a run schedules.
///
/// Cloning shares the flag. Once the owning [`RunGuard`] is cancelled or dropped, every clone
/// reports dead and any continuation holding one must do nothing.
#[derive(Clone, Debug)]
pub struct LivenessToken(Arc<AtomicBool>);

impl LivenessToken {
    /// Whether the run that issued this token is still live.
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Whether both tokens were issued by the same run.
    pub fn same_run(&self, other: &LivenessToken) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Owner side of a run's liveness flag. Cancels on drop.
#[derive(Debug)]
pub struct RunGuard {
    token: LivenessToken,
}

impl RunGuard {
    /// Start a new live run.
    pub fn new() -> Self {
        Self {
            token: LivenessToken(Arc::new(AtomicBool::new(true))),
        }
    }

    /// A token to hand to a scheduled continuation.
    pub fn token(&self) -> LivenessToken {
        self.token.clone()
    }

    /// Whether this run is still live.
    pub fn is_live(&self) -> bool {
        self.token.is_live()
    }

    /// Mark the run dead. Idempotent.
    pub fn cancel(&self) {
        self.token.0.store(false, Ordering::Release);
    }
}

impl Default for RunGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/liveness.rs"]
mod tests;
