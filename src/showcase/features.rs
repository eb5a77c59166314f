use crate::{
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::{Cue, Sequence},
    timeline::subclock::interval_index,
};

const PLAYBACK_FRAMES: usize = 2;
const PLAYBACK_FRAME_MS: u64 = 3000;
const GENERATE_PRESS_MS: u64 = 500;
const POINTER_TRAVEL_MS: u64 = 800;

/// Phases of the one-click generation showcase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoModePhase {
    /// Inputs on screen.
    Setup,
    /// Pointer clicks the generate button.
    Clicking,
    /// Generated video plays.
    Playing,
}

/// Marker state; everything visible derives from the phase and time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AutoModeState;

/// Playback frame of the generated video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AutoModeFrame {
    /// Index of the frame on screen; switches every 3s while playing.
    pub frame: usize,
}

impl Choreography for AutoModePhase {
    type State = AutoModeState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::AutoMode;

    fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Clicking => "clicking",
            Self::Playing => "playing",
        }
    }

    fn sequence() -> Sequence<Self, AutoModeState> {
        Sequence::from_holds([
            (Self::Setup, 2500),
            (Self::Clicking, 1500),
            (Self::Playing, 6000),
        ])
    }

    fn initial() -> AutoModeState {
        AutoModeState
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), _state: &AutoModeState, at: CuePoint) -> Option<CursorPose> {
        if self != Self::Clicking {
            return None;
        }
        let pose = CursorPose::at(50.0, 50.0);
        Some(if at.in_cue_ms >= GENERATE_PRESS_MS {
            pose.pressed()
        } else {
            pose
        })
    }

    fn detail(
        _rig: &(),
        sequence: &Sequence<Self, AutoModeState>,
        _state: &AutoModeState,
        at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        let playing = at.filter(|at| {
            sequence
                .cue(at.cue)
                .is_some_and(|c| c.phase == Self::Playing)
        });
        let frame = playing.map_or(0, |at| {
            interval_index(at.in_cue_ms, PLAYBACK_FRAME_MS, PLAYBACK_FRAMES)
        });
        ShowcaseDetail::AutoMode(AutoModeFrame { frame })
    }
}

/// Phases of the manual editing showcase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualEditPhase {
    /// Pointer hidden.
    Idle,
    /// Pointer rewrites the narration text.
    EditingText,
    /// Pointer picks a storyboard image.
    SelectingImage,
}

/// Narration text version and picked image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ManualEditState {
    /// `0` for the original narration, `1` once edited.
    pub text_version: u8,
    /// Picked storyboard image.
    pub selected_image: usize,
}

fn reset(s: &mut ManualEditState) {
    *s = ManualEditState::default();
}

fn edit_text(s: &mut ManualEditState) {
    s.text_version = 1;
}

fn pick_image(s: &mut ManualEditState) {
    s.selected_image = 2;
}

impl Choreography for ManualEditPhase {
    type State = ManualEditState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::ManualEdit;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::EditingText => "editing_text",
            Self::SelectingImage => "selecting_image",
        }
    }

    fn sequence() -> Sequence<Self, ManualEditState> {
        use ManualEditPhase::*;
        Sequence::new(vec![
            Cue::new(Idle, 2000, reset),
            Cue::hold(EditingText, 1000),
            Cue::new(EditingText, 1000, edit_text),
            Cue::hold(SelectingImage, 1000),
            Cue::new(SelectingImage, 2000, pick_image),
        ])
    }

    fn initial() -> ManualEditState {
        ManualEditState::default()
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), state: &ManualEditState, at: CuePoint) -> Option<CursorPose> {
        let (pose, done) = match self {
            Self::Idle => return Some(CursorPose::hidden(100.0, 100.0)),
            Self::EditingText => (CursorPose::at(15.0, 55.0), state.text_version == 1),
            Self::SelectingImage => (CursorPose::at(65.0, 75.0), state.selected_image == 2),
        };
        let clicking = done || at.in_cue_ms >= POINTER_TRAVEL_MS;
        Some(if clicking { pose.pressed() } else { pose })
    }

    fn detail(
        _rig: &(),
        _sequence: &Sequence<Self, ManualEditState>,
        state: &ManualEditState,
        _at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        ShowcaseDetail::ManualEdit(*state)
    }
}
