pub(crate) mod clock;
pub(crate) mod liveness;
pub(crate) mod sequence;
pub(crate) mod subclock;
pub(crate) mod timers;

/// Shortest hold a cue or timer can have. A zero-length hold still yields one scheduling tick.
pub const MIN_HOLD_MS: u64 = 1;
