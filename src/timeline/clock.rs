use crate::{
    foundation::core::Millis,
    timeline::{
        liveness::{LivenessToken, RunGuard},
        sequence::Sequence,
        timers::TimerQueue,
    },
};

/// Continuation scheduled by a [`PhaseClock`] to end the hold of cue `cue`.
#[derive(Clone, Debug)]
pub struct Wakeup {
    token: LivenessToken,
    cue: usize,
}

impl Wakeup {
    /// Whether the run that scheduled this wakeup is still live.
    pub fn is_live(&self) -> bool {
        self.token.is_live()
    }

    /// Cue whose hold this wakeup ends.
    pub fn cue(&self) -> usize {
        self.cue
    }
}

/// Anything that can hold a [`Wakeup`] until it is due.
pub trait Schedule {
    /// Deliver `wakeup` back to its clock after `delay_ms`.
    fn schedule_wakeup(&mut self, delay_ms: u64, wakeup: Wakeup);
}

impl Schedule for TimerQueue<Wakeup> {
    fn schedule_wakeup(&mut self, delay_ms: u64, wakeup: Wakeup) {
        self.schedule(delay_ms, wakeup);
    }
}

/// Adapter that tags wakeups with an owner key so one queue can serve many clocks.
pub struct Routed<'a, K> {
    queue: &'a mut TimerQueue<(K, Wakeup)>,
    key: K,
}

impl<'a, K> Routed<'a, K> {
    /// Route wakeups scheduled through this adapter to `key`.
    pub fn new(queue: &'a mut TimerQueue<(K, Wakeup)>, key: K) -> Self {
        Self { queue, key }
    }
}

impl<K: Clone> Schedule for Routed<'_, K> {
    fn schedule_wakeup(&mut self, delay_ms: u64, wakeup: Wakeup) {
        self.queue.schedule(delay_ms, (self.key.clone(), wakeup));
    }
}

/// Observable record of a phase transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseEntered<P> {
    /// Phase entered.
    pub phase: P,
    /// Cue index within the sequence.
    pub cue: usize,
    /// Completed cycles in this run before this cue.
    pub cycle: u64,
    /// Time of the transition.
    pub at: Millis,
}

/// Plays a [`Sequence`] in a loop while active.
///
/// The clock never sleeps or spawns anything: it schedules exactly one [`Wakeup`] per cue and
/// advances when the host delivers it back through [`PhaseClock::fire`]. Each activation is a new
/// run with its own liveness token. Deactivation or drop kills the token, which turns every
/// outstanding wakeup of that run into a no-op.
pub struct PhaseClock<P, S> {
    sequence: Sequence<P, S>,
    initial: S,
    state: S,
    cue: usize,
    cycle: u64,
    entered_at: Millis,
    run: Option<RunGuard>,
}

impl<P, S> PhaseClock<P, S>
where
    P: Copy + std::fmt::Debug,
    S: Clone,
{
    /// An inactive clock showing `initial`.
    pub fn new(sequence: Sequence<P, S>, initial: S) -> Self {
        Self {
            sequence,
            state: initial.clone(),
            initial,
            cue: 0,
            cycle: 0,
            entered_at: Millis::ZERO,
            run: None,
        }
    }

    /// The sequence being played.
    pub fn sequence(&self) -> &Sequence<P, S> {
        &self.sequence
    }

    /// State shown before any run and after every reset.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Currently observed state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Current phase; `None` only for an empty sequence.
    pub fn phase(&self) -> Option<P> {
        self.sequence.cue(self.cue).map(|c| c.phase)
    }

    /// Current cue index.
    pub fn cue_index(&self) -> usize {
        self.cue
    }

    /// Completed cycles in the current run.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether a run is in progress.
    pub fn is_active(&self) -> bool {
        self.run.as_ref().is_some_and(RunGuard::is_live)
    }

    /// Milliseconds spent in the current cue at `now`. Zero while inactive.
    pub fn elapsed_in_cue(&self, now: Millis) -> u64 {
        if self.is_active() {
            now.since(self.entered_at)
        } else {
            0
        }
    }

    /// Start a new run at cue 0 from the initial state. No-op if already active.
    pub fn activate(
        &mut self,
        now: Millis,
        sched: &mut impl Schedule,
    ) -> Option<PhaseEntered<P>> {
        if self.is_active() {
            return None;
        }
        self.reset();
        let run = RunGuard::new();
        let token = run.token();
        self.run = Some(run);
        tracing::debug!(cues = self.sequence.len(), at = now.0, "phase clock activated");
        self.enter(0, now, token, sched)
    }

    /// Stop the current run and synchronously restore the initial state.
    ///
    /// Returns `false` if the clock was not active.
    pub fn deactivate(&mut self) -> bool {
        let Some(run) = self.run.take() else {
            return false;
        };
        run.cancel();
        self.reset();
        tracing::debug!("phase clock deactivated");
        true
    }

    /// Deliver a due wakeup. Wakeups from cancelled or foreign runs are ignored.
    pub fn fire(
        &mut self,
        wakeup: Wakeup,
        at: Millis,
        sched: &mut impl Schedule,
    ) -> Option<PhaseEntered<P>> {
        let run = self.run.as_ref()?;
        if !wakeup.token.is_live() || !wakeup.token.same_run(&run.token()) {
            return None;
        }
        if wakeup.cue != self.cue || self.sequence.is_empty() {
            return None;
        }

        let next = (self.cue + 1) % self.sequence.len();
        if next == 0 {
            self.cycle += 1;
            self.state = self.initial.clone();
        }
        self.enter(next, at, wakeup.token, sched)
    }

    fn enter(
        &mut self,
        index: usize,
        at: Millis,
        token: LivenessToken,
        sched: &mut impl Schedule,
    ) -> Option<PhaseEntered<P>> {
        let cue = self.sequence.cue(index)?;
        (cue.apply)(&mut self.state);
        let phase = cue.phase;
        let hold = cue.effective_hold_ms();
        self.cue = index;
        self.entered_at = at;
        sched.schedule_wakeup(hold, Wakeup { token, cue: index });

        tracing::debug!(?phase, cue = index, cycle = self.cycle, at = at.0, "phase entered");
        Some(PhaseEntered {
            phase,
            cue: index,
            cycle: self.cycle,
            at,
        })
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.cue = 0;
        self.cycle = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
