//! Concrete looping choreographies shown inside the landing page panels.
//!
//! Each showcase is a phase enum plus a state struct driven by a [`PhaseClock`]. [`Showcase`]
//! erases the concrete types behind a closed enum so a stage can hold a mixed list of them.

pub(crate) mod batch;
pub(crate) mod consistency;
pub(crate) mod editing;
pub(crate) mod features;
pub(crate) mod integrated;
pub(crate) mod workflow;

use std::str::FromStr;

use crate::{
    foundation::core::{Millis, Point},
    foundation::error::{ReelError, ReelResult},
    timeline::clock::{PhaseClock, PhaseEntered, Schedule, Wakeup},
    timeline::sequence::Sequence,
};

pub use batch::{BatchFrame, BatchPhase};
pub use consistency::{ConsistencyPhase, ConsistencyState};
pub use editing::{CameraPose, EditingFrame, EditingPhase, EditingState};
pub use features::{
    AutoModeFrame, AutoModePhase, AutoModeState, ManualEditPhase, ManualEditState,
};
pub use integrated::{
    CursorTarget, IntegratedFrame, IntegratedPhase, IntegratedState, SETTINGS, SettingMode,
};
pub use workflow::{ExportFrame, ExportPhase, ExportState};

/// The closed set of showcase choreographies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ShowcaseKind {
    /// Auto-scrolling list of generated episodes.
    BatchProduction,
    /// One character carried across six scenes.
    Consistency,
    /// Camera zooms onto prompt, voice and image editors.
    Editing,
    /// Post-production toggles followed by export clicks.
    IntegratedEditing,
    /// One-click generation then playback.
    AutoMode,
    /// Manual text edit and storyboard image pick.
    ManualEdit,
    /// Export settings walkthrough on the last workflow panel.
    ExportSettings,
}

impl ShowcaseKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::BatchProduction,
        Self::Consistency,
        Self::Editing,
        Self::IntegratedEditing,
        Self::AutoMode,
        Self::ManualEdit,
        Self::ExportSettings,
    ];

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BatchProduction => "batch_production",
            Self::Consistency => "consistency",
            Self::Editing => "editing",
            Self::IntegratedEditing => "integrated_editing",
            Self::AutoMode => "auto_mode",
            Self::ManualEdit => "manual_edit",
            Self::ExportSettings => "export_settings",
        }
    }
}

impl std::fmt::Display for ShowcaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShowcaseKind {
    type Err = ReelError;

    fn from_str(s: &str) -> ReelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ReelError::validation(format!("unknown showcase '{s}'")))
    }
}

/// Simulated mouse pointer. `at` is in percent of the showcase box (`x` from the left edge, `y`
/// from the top).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CursorPose {
    /// Pointer tip position.
    pub at: Point,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Pressed pointers shrink slightly.
    pub scale: f64,
    /// Whether a click ripple is playing.
    pub clicking: bool,
}

impl CursorPose {
    pub(crate) fn at(left: f64, top: f64) -> Self {
        Self {
            at: Point::new(left, top),
            opacity: 1.0,
            scale: 1.0,
            clicking: false,
        }
    }

    pub(crate) fn hidden(left: f64, top: f64) -> Self {
        Self {
            opacity: 0.0,
            ..Self::at(left, top)
        }
    }

    pub(crate) fn pressed(self) -> Self {
        Self {
            scale: 0.9,
            clicking: true,
            ..self
        }
    }
}

/// Showcase-specific part of a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "showcase", rename_all = "snake_case")]
pub enum ShowcaseDetail {
    /// See [`BatchFrame`].
    BatchProduction(BatchFrame),
    /// See [`ConsistencyState`].
    Consistency(ConsistencyState),
    /// See [`EditingFrame`].
    Editing(EditingFrame),
    /// See [`IntegratedFrame`].
    IntegratedEditing(IntegratedFrame),
    /// See [`AutoModeFrame`].
    AutoMode(AutoModeFrame),
    /// See [`ManualEditState`].
    ManualEdit(ManualEditState),
    /// See [`ExportFrame`].
    ExportSettings(ExportFrame),
}

/// Everything a renderer needs to draw one showcase at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShowcaseFrame {
    /// Which choreography.
    pub kind: ShowcaseKind,
    /// Whether its clock is running.
    pub active: bool,
    /// Current phase name; `None` while inactive.
    pub phase: Option<&'static str>,
    /// Index of the current cue.
    pub cue: usize,
    /// Completed loops in the current run.
    pub cycle: u64,
    /// Pointer overlay, if one is shown.
    pub cursor: Option<CursorPose>,
    /// Showcase-specific values.
    pub detail: ShowcaseDetail,
}

/// Position inside a running sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CuePoint {
    pub cue: usize,
    pub in_cue_ms: u64,
}

/// One concrete choreography: its phases, state, cue table and derived visuals.
pub(crate) trait Choreography: Copy + std::fmt::Debug + 'static {
    type State: Clone + std::fmt::Debug;
    /// Static animation data built once per showcase.
    type Rig;

    const KIND: ShowcaseKind;

    fn name(self) -> &'static str;
    fn sequence() -> Sequence<Self, Self::State>;
    fn initial() -> Self::State;
    fn rig() -> ReelResult<Self::Rig>;

    fn cursor(
        self,
        _rig: &Self::Rig,
        _state: &Self::State,
        _at: CuePoint,
    ) -> Option<CursorPose> {
        None
    }

    /// `at` is `None` while the showcase is inactive.
    fn detail(
        rig: &Self::Rig,
        sequence: &Sequence<Self, Self::State>,
        state: &Self::State,
        at: Option<CuePoint>,
    ) -> ShowcaseDetail;
}

struct Run<C: Choreography> {
    clock: PhaseClock<C, C::State>,
    rig: C::Rig,
}

impl<C: Choreography> Run<C> {
    fn build(holds: &[u64]) -> ReelResult<Self> {
        let mut sequence = C::sequence();
        sequence.override_holds(holds)?;
        Ok(Self {
            clock: PhaseClock::new(sequence, C::initial()),
            rig: C::rig()?,
        })
    }

    fn frame(&self, now: Millis) -> ShowcaseFrame {
        if !self.clock.is_active() {
            return self.idle();
        }
        let at = CuePoint {
            cue: self.clock.cue_index(),
            in_cue_ms: self.clock.elapsed_in_cue(now),
        };
        self.compose(self.clock.state(), at, self.clock.cycle())
    }

    fn sampled(&self, elapsed_ms: Option<u64>) -> ShowcaseFrame {
        let sequence = self.clock.sequence();
        let Some((cue, in_cue_ms)) = elapsed_ms.and_then(|e| sequence.cue_at(e)) else {
            return self.idle();
        };
        let cycle = elapsed_ms.unwrap_or(0) / sequence.cycle_ms().max(1);
        let state = sequence.replay(self.clock.initial(), cue);
        self.compose(&state, CuePoint { cue, in_cue_ms }, cycle)
    }

    fn idle(&self) -> ShowcaseFrame {
        let initial = self.clock.initial();
        ShowcaseFrame {
            kind: C::KIND,
            active: false,
            phase: None,
            cue: 0,
            cycle: 0,
            cursor: None,
            detail: C::detail(&self.rig, self.clock.sequence(), initial, None),
        }
    }

    fn compose(&self, state: &C::State, at: CuePoint, cycle: u64) -> ShowcaseFrame {
        let sequence = self.clock.sequence();
        let phase = sequence.cue(at.cue).map(|c| c.phase);
        ShowcaseFrame {
            kind: C::KIND,
            active: true,
            phase: phase.map(C::name),
            cue: at.cue,
            cycle,
            cursor: phase.and_then(|p| p.cursor(&self.rig, state, at)),
            detail: C::detail(&self.rig, sequence, state, Some(at)),
        }
    }
}

fn named<C: Choreography>(entered: PhaseEntered<C>) -> PhaseEntered<&'static str> {
    PhaseEntered {
        phase: entered.phase.name(),
        cue: entered.cue,
        cycle: entered.cycle,
        at: entered.at,
    }
}

enum AnyClock {
    BatchProduction(Run<BatchPhase>),
    Consistency(Run<ConsistencyPhase>),
    Editing(Run<EditingPhase>),
    IntegratedEditing(Run<IntegratedPhase>),
    AutoMode(Run<AutoModePhase>),
    ManualEdit(Run<ManualEditPhase>),
    ExportSettings(Run<ExportPhase>),
}

macro_rules! each_run {
    ($clock:expr, $run:ident => $body:expr) => {
        match $clock {
            AnyClock::BatchProduction($run) => $body,
            AnyClock::Consistency($run) => $body,
            AnyClock::Editing($run) => $body,
            AnyClock::IntegratedEditing($run) => $body,
            AnyClock::AutoMode($run) => $body,
            AnyClock::ManualEdit($run) => $body,
            AnyClock::ExportSettings($run) => $body,
        }
    };
}

impl AnyClock {
    fn build(kind: ShowcaseKind, holds: &[u64]) -> ReelResult<Self> {
        Ok(match kind {
            ShowcaseKind::BatchProduction => Self::BatchProduction(Run::build(holds)?),
            ShowcaseKind::Consistency => Self::Consistency(Run::build(holds)?),
            ShowcaseKind::Editing => Self::Editing(Run::build(holds)?),
            ShowcaseKind::IntegratedEditing => Self::IntegratedEditing(Run::build(holds)?),
            ShowcaseKind::AutoMode => Self::AutoMode(Run::build(holds)?),
            ShowcaseKind::ManualEdit => Self::ManualEdit(Run::build(holds)?),
            ShowcaseKind::ExportSettings => Self::ExportSettings(Run::build(holds)?),
        })
    }
}

/// A showcase choreography with its own phase clock.
pub struct Showcase {
    kind: ShowcaseKind,
    clock: AnyClock,
}

impl Showcase {
    /// Build `kind` with default timings, overriding the first `holds.len()` cue durations.
    pub fn new(kind: ShowcaseKind, holds: &[u64]) -> ReelResult<Self> {
        Ok(Self {
            kind,
            clock: AnyClock::build(kind, holds)?,
        })
    }

    /// Which choreography this is.
    pub fn kind(&self) -> ShowcaseKind {
        self.kind
    }

    /// Whether the clock is running.
    pub fn is_active(&self) -> bool {
        each_run!(&self.clock, r => r.clock.is_active())
    }

    /// Current phase name, `None` while inactive.
    pub fn phase_name(&self) -> Option<&'static str> {
        if !self.is_active() {
            return None;
        }
        each_run!(&self.clock, r => r.clock.phase().map(|p| p.name()))
    }

    /// Number of cues in one loop.
    pub fn cue_count(&self) -> usize {
        each_run!(&self.clock, r => r.clock.sequence().len())
    }

    /// Length of one loop.
    pub fn cycle_ms(&self) -> u64 {
        each_run!(&self.clock, r => r.clock.sequence().cycle_ms())
    }

    /// Start a fresh run from the first cue. No-op while already active.
    pub fn activate(
        &mut self,
        now: Millis,
        sched: &mut impl Schedule,
    ) -> Option<PhaseEntered<&'static str>> {
        each_run!(&mut self.clock, r => r.clock.activate(now, sched).map(named))
    }

    /// Cancel the run and reset to the initial state.
    pub fn deactivate(&mut self) -> bool {
        each_run!(&mut self.clock, r => r.clock.deactivate())
    }

    /// Deliver a due wakeup. Stale wakeups are ignored.
    pub fn fire(
        &mut self,
        wakeup: Wakeup,
        at: Millis,
        sched: &mut impl Schedule,
    ) -> Option<PhaseEntered<&'static str>> {
        each_run!(&mut self.clock, r => r.clock.fire(wakeup, at, sched).map(named))
    }

    /// Live frame at `now`.
    pub fn frame(&self, now: Millis) -> ShowcaseFrame {
        each_run!(&self.clock, r => r.frame(now))
    }

    /// Frame derived purely from `elapsed_ms` since activation (`None` when not visible).
    pub fn sample(&self, elapsed_ms: Option<u64>) -> ShowcaseFrame {
        each_run!(&self.clock, r => r.sampled(elapsed_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/showcase/showcase.rs"]
mod tests;
