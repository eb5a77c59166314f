use crate::{
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::{Cue, Sequence},
    timeline::subclock::{interval_index, typewriter},
};

/// Post-production settings in the order the pointer visits them.
pub const SETTINGS: [&str; 5] = ["cover", "subs", "bgm", "trans", "keyframe"];

const SUBS: usize = 1;
const TRANS: usize = 3;

/// Subtitle typed out once subtitles are switched on.
pub const SUBTITLE: &str = "这一刻，我终于明白了...";
const SUBTITLE_CHAR_MS: u64 = 100;

const PREVIEW_IMAGES: usize = 3;
const PREVIEW_PERIOD_MS: u64 = 1200;
const EXPORT_PRESS_MS: u64 = 800;

/// Phases of the integrated editing showcase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratedPhase {
    /// Everything switched off.
    Reset,
    /// Pointer travels to a setting row.
    PointSetting,
    /// The setting is switched to automatic.
    EnableSetting,
    /// Pointer clicks the primary export button.
    ExportVideo,
    /// Pointer clicks the draft export button.
    ExportDraft,
    /// Pointer leaves; the finished preview stays up.
    Rest,
}

/// State of one setting toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingMode {
    /// Disabled.
    #[default]
    Off,
    /// Applied automatically.
    Auto,
}

/// What the pointer is hovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorTarget {
    /// A row of [`SETTINGS`].
    Setting(usize),
    /// Primary export button.
    ExportVideo,
    /// Draft export button.
    ExportDraft,
}

impl CursorTarget {
    fn pose(self) -> CursorPose {
        match self {
            Self::Setting(i) => CursorPose::at(75.0, 15.0 + i as f64 * 13.0),
            Self::ExportVideo => CursorPose::at(75.0, 88.0),
            Self::ExportDraft => CursorPose::at(25.0, 88.0),
        }
    }
}

/// Toggles and pointer target.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IntegratedState {
    /// One entry per [`SETTINGS`] row.
    pub settings: [SettingMode; 5],
    /// Hovered control, if the pointer is shown.
    pub cursor: Option<CursorTarget>,
}

impl IntegratedState {
    /// Mode of the setting named `name`.
    pub fn setting(&self, name: &str) -> Option<SettingMode> {
        let idx = SETTINGS.iter().position(|s| *s == name)?;
        Some(self.settings[idx])
    }
}

/// Toggles plus the effects they switch on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IntegratedFrame {
    /// Current toggles.
    #[serde(flatten)]
    pub state: IntegratedState,
    /// Preview image, cycling while transitions are on.
    pub preview_image: usize,
    /// Subtitle revealed so far.
    pub subtitle: &'static str,
}

fn reset(s: &mut IntegratedState) {
    *s = IntegratedState::default();
}

fn point<const I: usize>(s: &mut IntegratedState) {
    s.cursor = Some(CursorTarget::Setting(I));
}

fn enable<const I: usize>(s: &mut IntegratedState) {
    s.settings[I] = SettingMode::Auto;
}

fn aim_export_video(s: &mut IntegratedState) {
    s.cursor = Some(CursorTarget::ExportVideo);
}

fn aim_export_draft(s: &mut IntegratedState) {
    s.cursor = Some(CursorTarget::ExportDraft);
}

fn release(s: &mut IntegratedState) {
    s.cursor = None;
}

/// Cue at which setting `i` is switched on.
fn enable_cue(i: usize) -> usize {
    2 + 2 * i
}

/// Time since setting `i` was switched on, if it is on.
fn time_enabled(
    sequence: &Sequence<IntegratedPhase, IntegratedState>,
    state: &IntegratedState,
    i: usize,
    at: Option<CuePoint>,
) -> Option<u64> {
    let at = at?;
    if state.settings[i] != SettingMode::Auto {
        return None;
    }
    sequence.since_cue(enable_cue(i), at.cue, at.in_cue_ms)
}

impl Choreography for IntegratedPhase {
    type State = IntegratedState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::IntegratedEditing;

    fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::PointSetting => "point_setting",
            Self::EnableSetting => "enable_setting",
            Self::ExportVideo => "export_video",
            Self::ExportDraft => "export_draft",
            Self::Rest => "rest",
        }
    }

    fn sequence() -> Sequence<Self, IntegratedState> {
        use IntegratedPhase::*;
        type Apply = fn(&mut IntegratedState);
        // (point, enable, hold after enabling)
        let rows: [(Apply, Apply, u64); 5] = [
            (point::<0>, enable::<0>, 800),
            (point::<1>, enable::<1>, 800),
            (point::<2>, enable::<2>, 800),
            (point::<3>, enable::<3>, 2000),
            (point::<4>, enable::<4>, 2000),
        ];

        let mut cues = vec![Cue::new(Reset, 1500, reset)];
        for (aim, toggle, hold) in rows {
            cues.push(Cue::new(PointSetting, 600, aim));
            cues.push(Cue::new(EnableSetting, hold, toggle));
        }
        cues.push(Cue::new(ExportVideo, 1200, aim_export_video));
        cues.push(Cue::new(ExportDraft, 1200, aim_export_draft));
        cues.push(Cue::new(Rest, 4000, release));
        Sequence::new(cues)
    }

    fn initial() -> IntegratedState {
        IntegratedState::default()
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), state: &IntegratedState, at: CuePoint) -> Option<CursorPose> {
        let pose = state.cursor?.pose();
        let pressed = match self {
            Self::EnableSetting => true,
            Self::ExportVideo | Self::ExportDraft => at.in_cue_ms >= EXPORT_PRESS_MS,
            Self::Reset | Self::PointSetting | Self::Rest => false,
        };
        Some(if pressed { pose.pressed() } else { pose })
    }

    fn detail(
        _rig: &(),
        sequence: &Sequence<Self, IntegratedState>,
        state: &IntegratedState,
        at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        let preview_image = time_enabled(sequence, state, TRANS, at)
            .map_or(0, |t| interval_index(t, PREVIEW_PERIOD_MS, PREVIEW_IMAGES));
        let subtitle = time_enabled(sequence, state, SUBS, at)
            .map_or("", |t| typewriter(SUBTITLE, t, SUBTITLE_CHAR_MS));
        ShowcaseDetail::IntegratedEditing(IntegratedFrame {
            state: state.clone(),
            preview_image,
            subtitle,
        })
    }
}
