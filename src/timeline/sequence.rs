use crate::{
    foundation::error::{ReelError, ReelResult},
    timeline::MIN_HOLD_MS,
};

/// One timed step of a choreography: enter `phase`, run `apply` on the observed state, then hold.
///
/// The same phase may appear in several cues; a cursor that "moves, clicks, then waits" is three
/// cues sharing one phase with different state edits.
pub struct Cue<P, S> {
    /// Phase entered by this cue.
    pub phase: P,
    /// How long to hold before the next cue.
    pub hold_ms: u64,
    /// State edit applied when the cue is entered.
    pub apply: fn(&mut S),
}

// Manual impls: `fn(&mut S)` is Copy for every `S`, derives would demand `S: Clone`.
impl<P: Clone, S> Clone for Cue<P, S> {
    fn clone(&self) -> Self {
        Self {
            phase: self.phase.clone(),
            hold_ms: self.hold_ms,
            apply: self.apply,
        }
    }
}

impl<P: std::fmt::Debug, S> std::fmt::Debug for Cue<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cue")
            .field("phase", &self.phase)
            .field("hold_ms", &self.hold_ms)
            .finish_non_exhaustive()
    }
}

fn keep<S>(_: &mut S) {}

impl<P, S> Cue<P, S> {
    /// A cue that edits state on entry.
    pub fn new(phase: P, hold_ms: u64, apply: fn(&mut S)) -> Self {
        Self {
            phase,
            hold_ms,
            apply,
        }
    }

    /// A cue that only changes the phase.
    pub fn hold(phase: P, hold_ms: u64) -> Self {
        Self::new(phase, hold_ms, keep::<S>)
    }

    /// Hold actually used for scheduling.
    pub fn effective_hold_ms(&self) -> u64 {
        self.hold_ms.max(MIN_HOLD_MS)
    }
}

/// Ordered, cyclic list of cues.
///
/// An empty sequence is valid and never transitions.
pub struct Sequence<P, S> {
    cues: Vec<Cue<P, S>>,
}

impl<P: Clone, S> Clone for Sequence<P, S> {
    fn clone(&self) -> Self {
        Self {
            cues: self.cues.clone(),
        }
    }
}

impl<P: std::fmt::Debug, S> std::fmt::Debug for Sequence<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence").field("cues", &self.cues).finish()
    }
}

impl<P, S> Sequence<P, S> {
    /// Build a sequence from its cues.
    pub fn new(cues: Vec<Cue<P, S>>) -> Self {
        Self { cues }
    }

    /// Build from bare `(phase, hold_ms)` pairs.
    pub fn from_holds(holds: impl IntoIterator<Item = (P, u64)>) -> Self {
        Self::new(
            holds
                .into_iter()
                .map(|(phase, hold)| Cue::hold(phase, hold))
                .collect(),
        )
    }

    /// Number of cues.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// True when there is nothing to play.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue at `index`.
    pub fn cue(&self, index: usize) -> Option<&Cue<P, S>> {
        self.cues.get(index)
    }

    /// All cues in order.
    pub fn cues(&self) -> &[Cue<P, S>] {
        &self.cues
    }

    /// Length of one full cycle in milliseconds.
    pub fn cycle_ms(&self) -> u64 {
        self.cues
            .iter()
            .map(Cue::effective_hold_ms)
            .fold(0u64, u64::saturating_add)
    }

    /// Replace hold durations cue-for-cue. Missing entries keep their current hold.
    pub fn override_holds(&mut self, holds: &[u64]) -> ReelResult<()> {
        if holds.len() > self.cues.len() {
            return Err(ReelError::timeline(format!(
                "{} hold overrides given for a sequence of {} cues",
                holds.len(),
                self.cues.len()
            )));
        }
        for (cue, hold) in self.cues.iter_mut().zip(holds) {
            cue.hold_ms = *hold;
        }
        Ok(())
    }

    /// Offset of cue `index` from the start of a cycle.
    pub fn cue_start_ms(&self, index: usize) -> Option<u64> {
        if index >= self.cues.len() {
            return None;
        }
        Some(
            self.cues[..index]
                .iter()
                .map(Cue::effective_hold_ms)
                .fold(0u64, u64::saturating_add),
        )
    }

    /// Time since cue `from` was entered, given the clock sits `in_cue_ms` into cue `current` of
    /// the same cycle. `None` while `from` is still ahead.
    pub fn since_cue(&self, from: usize, current: usize, in_cue_ms: u64) -> Option<u64> {
        if from > current {
            return None;
        }
        let start = self.cue_start_ms(from)?;
        let here = self.cue_start_ms(current)?;
        Some((here - start).saturating_add(in_cue_ms))
    }

    /// Index of the cue showing `elapsed_ms` into a run, and the time already spent in it.
    pub fn cue_at(&self, elapsed_ms: u64) -> Option<(usize, u64)> {
        let cycle = self.cycle_ms();
        if cycle == 0 {
            return None;
        }
        let mut t = elapsed_ms % cycle;
        for (i, cue) in self.cues.iter().enumerate() {
            let hold = cue.effective_hold_ms();
            if t < hold {
                return Some((i, t));
            }
            t -= hold;
        }
        None
    }
}

impl<P: Clone, S: Clone> Sequence<P, S> {
    /// Observed state after entering cue `index` of a cycle, starting from `initial`.
    ///
    /// Every cycle starts from `initial`, so this matches what a live clock shows.
    pub fn replay(&self, initial: &S, index: usize) -> S {
        let mut state = initial.clone();
        for cue in self.cues.iter().take(index.saturating_add(1)) {
            (cue.apply)(&mut state);
        }
        state
    }

    /// Phase and state `elapsed_ms` into a run. `None` for an empty sequence.
    pub fn sample(&self, initial: &S, elapsed_ms: u64) -> Option<(P, S)> {
        let (index, _) = self.cue_at(elapsed_ms)?;
        let phase = self.cues[index].phase.clone();
        Some((phase, self.replay(initial, index)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequence.rs"]
mod tests;
