use crate::{
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::{Cue, Sequence},
};

/// Character prompt before the edit.
pub const ORIGINAL_PROMPT: &str = "28岁东亚女性，身高165cm，及肩微卷黑发，神情冷漠...";
/// Character prompt after the edit.
pub const REVISED_PROMPT: &str = "28岁东亚女性，身高165cm，及肩微卷黑发，神情温柔，嘴角上扬...";
/// Narrator voice before the edit.
pub const ORIGINAL_VOICE: &str = "影视解说小帅";
/// Narrator voice after the edit.
pub const REVISED_VOICE: &str = "情感治愈 · 暖暖";

/// Phases of the editor walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditingPhase {
    /// Full view, pointer hidden.
    Idle,
    /// Camera zooms onto the prompt box.
    FocusPrompt,
    /// Prompt text is being rewritten.
    EditingPrompt,
    /// Camera zooms onto the voice picker.
    FocusVoice,
    /// Voice picker is clicked.
    EditingVoice,
    /// Camera zooms onto the image grid.
    FocusImages,
    /// An image is clicked.
    SelectingImage,
}

/// Editable values shown in the editor.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct EditingState {
    /// Character prompt.
    pub prompt: &'static str,
    /// Narrator voice.
    pub voice: &'static str,
    /// Selected reference image.
    pub selected_image: usize,
}

impl Default for EditingState {
    fn default() -> Self {
        Self {
            prompt: ORIGINAL_PROMPT,
            voice: ORIGINAL_VOICE,
            selected_image: 0,
        }
    }
}

/// Zoom applied to the whole editor, translations in percent of its size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraPose {
    /// Horizontal translation.
    pub x_pct: f64,
    /// Vertical translation.
    pub y_pct: f64,
    /// Zoom factor.
    pub scale: f64,
}

impl CameraPose {
    const FULL: Self = Self {
        x_pct: 0.0,
        y_pct: 0.0,
        scale: 1.0,
    };

    /// Camera framing for `phase`.
    pub fn for_phase(phase: EditingPhase) -> Self {
        use EditingPhase::*;
        match phase {
            Idle => Self::FULL,
            FocusPrompt | EditingPrompt => Self {
                x_pct: 32.0,
                y_pct: -35.0,
                scale: 1.8,
            },
            FocusVoice | EditingVoice => Self {
                x_pct: 32.0,
                y_pct: 25.0,
                scale: 1.8,
            },
            FocusImages | SelectingImage => Self {
                x_pct: -20.0,
                y_pct: 20.0,
                scale: 1.5,
            },
        }
    }
}

/// Editor state plus camera framing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditingFrame {
    /// Current values.
    #[serde(flatten)]
    pub state: EditingState,
    /// Camera framing.
    pub camera: CameraPose,
}

fn reset(s: &mut EditingState) {
    *s = EditingState::default();
}

fn revise_prompt(s: &mut EditingState) {
    s.prompt = REVISED_PROMPT;
}

fn revise_voice(s: &mut EditingState) {
    s.voice = REVISED_VOICE;
}

fn select_image(s: &mut EditingState) {
    s.selected_image = 1;
}

impl Choreography for EditingPhase {
    type State = EditingState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::Editing;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FocusPrompt => "focus_prompt",
            Self::EditingPrompt => "editing_prompt",
            Self::FocusVoice => "focus_voice",
            Self::EditingVoice => "editing_voice",
            Self::FocusImages => "focus_images",
            Self::SelectingImage => "selecting_image",
        }
    }

    fn sequence() -> Sequence<Self, EditingState> {
        use EditingPhase::*;
        Sequence::new(vec![
            Cue::new(Idle, 2000, reset),
            Cue::hold(FocusPrompt, 1000),
            Cue::hold(EditingPrompt, 300),
            Cue::new(EditingPrompt, 1000, revise_prompt),
            Cue::hold(FocusVoice, 1000),
            Cue::hold(EditingVoice, 300),
            Cue::new(EditingVoice, 800, revise_voice),
            Cue::hold(FocusImages, 1000),
            Cue::hold(SelectingImage, 500),
            Cue::new(SelectingImage, 1000, select_image),
            Cue::hold(Idle, 3000),
        ])
    }

    fn initial() -> EditingState {
        EditingState::default()
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), _state: &EditingState, _at: CuePoint) -> Option<CursorPose> {
        use EditingPhase::*;
        Some(match self {
            Idle => CursorPose::hidden(100.0, 100.0),
            FocusPrompt => CursorPose::at(15.0, 85.0),
            EditingPrompt => CursorPose::at(20.0, 85.0),
            FocusVoice => CursorPose::at(15.0, 25.0),
            EditingVoice => CursorPose::at(15.0, 25.0).pressed(),
            FocusImages => CursorPose::at(79.0, 22.0),
            SelectingImage => CursorPose::at(79.0, 22.0).pressed(),
        })
    }

    fn detail(
        _rig: &(),
        sequence: &Sequence<Self, EditingState>,
        state: &EditingState,
        at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        let phase = at
            .and_then(|at| sequence.cue(at.cue))
            .map_or(EditingPhase::Idle, |c| c.phase);
        ShowcaseDetail::Editing(EditingFrame {
            state: state.clone(),
            camera: CameraPose::for_phase(phase),
        })
    }
}
