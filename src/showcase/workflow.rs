use crate::{
    foundation::core::Vec2,
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::Sequence,
};

const RIPPLE_MS: u64 = 800;
const DRAFT_PRESS_SCALE: f64 = 0.95;

/// Phases of the export settings walkthrough on the last workflow panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    /// Pointer parked below the panel.
    Hidden,
    /// Video cover toggle.
    Cover,
    /// Transition presets.
    Transitions,
    /// Keyframe sliders.
    Keyframes,
    /// Background music bar.
    Music,
    /// Subtitle styles.
    Subtitles,
    /// Pointer presses the "export draft" button in the fixed footer.
    ExportDraft,
}

impl ExportPhase {
    /// Offset of the scrolling settings list, in pixels.
    pub fn scroll_y(self) -> f64 {
        match self {
            Self::Hidden | Self::Cover => 0.0,
            Self::Transitions => -50.0,
            Self::Keyframes => -180.0,
            Self::Music => -300.0,
            Self::Subtitles => -420.0,
            Self::ExportDraft => -480.0,
        }
    }

    fn pointer(self) -> CursorPose {
        match self {
            Self::Hidden => CursorPose::hidden(50.0, 120.0),
            Self::Cover => CursorPose::at(85.0, 15.0),
            Self::Transitions => CursorPose::at(40.0, 40.0),
            Self::Keyframes => CursorPose::at(70.0, 45.0),
            Self::Music => CursorPose::at(80.0, 40.0),
            Self::Subtitles => CursorPose::at(50.0, 45.0),
            Self::ExportDraft => CursorPose::at(62.0, 92.0),
        }
    }

    fn highlights_section(self) -> bool {
        !matches!(self, Self::Hidden | Self::ExportDraft)
    }
}

/// Marker state; the frame derives from the phase alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExportState;

/// Settings list position and highlighted setting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ExportFrame {
    /// Offset of the settings list, in pixels.
    pub scroll_y: f64,
    /// Setting drawn with an active border.
    pub highlight: Option<ExportPhase>,
    /// Scale of the "export draft" button.
    pub draft_button_scale: f64,
}

impl Choreography for ExportPhase {
    type State = ExportState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::ExportSettings;

    fn name(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Cover => "cover",
            Self::Transitions => "transitions",
            Self::Keyframes => "keyframes",
            Self::Music => "music",
            Self::Subtitles => "subtitles",
            Self::ExportDraft => "export_draft",
        }
    }

    fn sequence() -> Sequence<Self, ExportState> {
        Sequence::from_holds([
            (Self::Hidden, 1000),
            (Self::Cover, 1500),
            (Self::Transitions, 1500),
            (Self::Keyframes, 1500),
            (Self::Music, 1500),
            (Self::Subtitles, 1500),
            (Self::ExportDraft, 2000),
        ])
    }

    fn initial() -> ExportState {
        ExportState
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), _state: &ExportState, at: CuePoint) -> Option<CursorPose> {
        let pose = self.pointer();
        // The cover toggle is only pointed at.
        let ripple = !matches!(self, Self::Hidden | Self::Cover) && at.in_cue_ms < RIPPLE_MS;
        Some(CursorPose {
            clicking: ripple,
            ..pose
        })
    }

    fn detail(
        _rig: &(),
        sequence: &Sequence<Self, ExportState>,
        _state: &ExportState,
        at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        let phase = at
            .and_then(|at| sequence.cue(at.cue))
            .map_or(Self::Hidden, |c| c.phase);
        ShowcaseDetail::ExportSettings(ExportFrame {
            scroll_y: phase.scroll_y(),
            highlight: phase.highlights_section().then_some(phase),
            draft_button_scale: if phase == Self::ExportDraft {
                DRAFT_PRESS_SCALE
            } else {
                1.0
            },
        })
    }
}

/// How long the script input pointer takes to appear after the workflow is first revealed.
pub const ENTRANCE_MS: u64 = 800;

/// One-shot pointer entrance on the first workflow panel.
///
/// `cursor_offset` is measured from the centre of the generate button, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScriptEntrance {
    /// Pointer offset from the generate button.
    pub cursor_offset: Vec2,
    /// Pointer opacity.
    pub cursor_opacity: f64,
    /// Whether the generate menu is open above the button.
    pub menu_open: bool,
}

/// Entrance state `elapsed_ms` after the workflow section was revealed (`None` before that).
pub fn script_entrance(elapsed_ms: Option<u64>) -> ScriptEntrance {
    match elapsed_ms {
        Some(t) if t >= ENTRANCE_MS => ScriptEntrance {
            cursor_offset: Vec2::new(20.0, 20.0),
            cursor_opacity: 1.0,
            menu_open: true,
        },
        _ => ScriptEntrance {
            cursor_offset: Vec2::new(100.0, 100.0),
            cursor_opacity: 0.0,
            menu_open: false,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/showcase/workflow.rs"]
mod tests;
