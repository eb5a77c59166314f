//! StoryReel animation core: phase-timed showcase choreographies and scroll-driven transitions
//! for the StoryReel landing page, evaluated deterministically from host time and scroll samples.
//!
//! The public API is stage-oriented:
//!
//! - Build a [`PageLayout`] (or use [`PageLayout::landing`]) and a [`StageConfig`]
//! - Create a [`Stage`]
//! - Feed it `(time, scroll)` samples through [`Stage::frame`] and render the [`FrameStyles`]
//!
//! The lower layers are usable on their own: [`PhaseClock`] over a [`TimerQueue`] for looping
//! timelines, [`VisibilityGate`] for viewport gating, [`ScrollBus`] for scroll progress and
//! [`PanelStack`] for spring-animated step transitions.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod showcase;
pub(crate) mod stage;
pub(crate) mod storyboard;
pub(crate) mod timeline;
pub(crate) mod viewport;

pub use crate::foundation::core::{Millis, Point, Progress, Span, StepCount, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interp::ScrollTransform;
pub use crate::animation::keyframes::{InterpMode, Keyframe, LoopTrack};
pub use crate::animation::spring::{MAX_SPRING_RATE, MAX_STEP_MS, SpringParams, SpringValue};

pub use crate::timeline::MIN_HOLD_MS;
pub use crate::timeline::clock::{PhaseClock, PhaseEntered, Routed, Schedule, Wakeup};
pub use crate::timeline::liveness::{LivenessToken, RunGuard};
pub use crate::timeline::sequence::{Cue, Sequence};
pub use crate::timeline::subclock::{interval_index, typewriter};
pub use crate::timeline::timers::{Fired, TimerQueue};

pub use crate::viewport::gate::{GateEdge, GateMargins, RevealGate, RevealStyle, VisibilityGate};
pub use crate::viewport::scroll::{
    Offset, ScrollAnchors, ScrollBus, ScrollFrame, ScrollTrack, sticky_span,
};
pub use crate::viewport::stepper::{CardStack, Stepper, card_scale, step_for_progress};

pub use crate::showcase::batch::BATCH_LOOP_MS;
pub use crate::showcase::consistency::SCENES;
pub use crate::showcase::editing::{ORIGINAL_PROMPT, ORIGINAL_VOICE, REVISED_PROMPT, REVISED_VOICE};
pub use crate::showcase::integrated::SUBTITLE;
pub use crate::showcase::workflow::{ENTRANCE_MS, ScriptEntrance, script_entrance};
pub use crate::showcase::{
    AutoModeFrame, AutoModePhase, AutoModeState, BatchFrame, BatchPhase, CameraPose,
    ConsistencyPhase, ConsistencyState, CursorPose, CursorTarget, EditingFrame, EditingPhase,
    EditingState, ExportFrame, ExportPhase, ExportState, IntegratedFrame, IntegratedPhase,
    IntegratedState, ManualEditPhase, ManualEditState, SETTINGS, SettingMode, Showcase,
    ShowcaseDetail, ShowcaseFrame, ShowcaseKind,
};

pub use crate::stage::director::{
    CardSlot, FrameStyles, SectionStyle, Stage, StyleRecord, showcase_style,
};
pub use crate::stage::layout::{
    Interactivity, LayerLayout, PageLayout, PanelLayout, ScrollSource, SectionKind, SectionLayout,
    LANDING_CARDS, StepShowcase,
};
pub use crate::stage::marquee::{Marquee, MarqueeDirection};
pub use crate::stage::nav::{NavState, nav_state};
pub use crate::stage::panels::{PanelPose, PanelStack, PanelTag};

pub use crate::config::{MarqueeConfig, RevealConfig, StageConfig};

pub use crate::storyboard::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, Fallback, GeminiClient, GeneratorConfig, MockStoryboard,
    Scene, Storyboard, StoryboardError, StoryboardGenerator, StoryboardOutput,
    generator_from_config, storyboard_prompt,
};
