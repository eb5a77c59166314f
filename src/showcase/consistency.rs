use crate::{
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::{Cue, Sequence},
};

/// Scene captions cycled behind the character, in order.
pub const SCENES: [&str; 6] = [
    "SCENE 01: NEO TOKYO",
    "SCENE 02: ANCIENT RUINS",
    "SCENE 03: FROST PEAKS",
    "SCENE 04: RED DESERT",
    "SCENE 05: CYBER LAB",
    "SCENE 06: DEEP SPACE",
];

const CARD_PRESS_MS: u64 = 800;
const VIDEO_PRESS_MS: u64 = 300;

/// Phases of the character consistency showcase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyPhase {
    /// Character card at rest.
    Card,
    /// Pointer moves onto the card and clicks.
    CardClicking,
    /// Card expanded into a video frame.
    Video,
    /// Pointer clicks to advance the scene.
    VideoClicking,
}

/// Which scene the character is placed in.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConsistencyState {
    /// Index into [`SCENES`].
    pub scene: usize,
    /// Whether the card has expanded into the video frame.
    pub video: bool,
}

impl ConsistencyState {
    /// Caption of the current scene.
    pub fn scene_name(&self) -> &'static str {
        SCENES[self.scene.min(SCENES.len() - 1)]
    }
}

fn show_card(s: &mut ConsistencyState) {
    *s = ConsistencyState::default();
}

fn expand(s: &mut ConsistencyState) {
    s.video = true;
}

fn show_scene<const N: usize>(s: &mut ConsistencyState) {
    s.scene = N;
}

impl Choreography for ConsistencyPhase {
    type State = ConsistencyState;
    type Rig = ();

    const KIND: ShowcaseKind = ShowcaseKind::Consistency;

    fn name(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::CardClicking => "card_clicking",
            Self::Video => "video",
            Self::VideoClicking => "video_clicking",
        }
    }

    fn sequence() -> Sequence<Self, ConsistencyState> {
        use ConsistencyPhase::*;
        let mut cues = vec![
            Cue::new(Card, 2500, show_card),
            Cue::hold(CardClicking, 1000),
            Cue::new(Video, 800, expand),
            Cue::hold(Video, 1500),
        ];
        let scenes: [(fn(&mut ConsistencyState), u64); 5] = [
            (show_scene::<1>, 1500),
            (show_scene::<2>, 1500),
            (show_scene::<3>, 1500),
            (show_scene::<4>, 1500),
            (show_scene::<5>, 2000),
        ];
        for (apply, hold) in scenes {
            cues.push(Cue::hold(VideoClicking, 500));
            cues.push(Cue::new(Video, hold, apply));
        }
        Sequence::new(cues)
    }

    fn initial() -> ConsistencyState {
        ConsistencyState::default()
    }

    fn rig() -> ReelResult<()> {
        Ok(())
    }

    fn cursor(self, _rig: &(), _state: &ConsistencyState, at: CuePoint) -> Option<CursorPose> {
        let press_at = match self {
            Self::CardClicking => CARD_PRESS_MS,
            Self::VideoClicking => VIDEO_PRESS_MS,
            Self::Card | Self::Video => return None,
        };
        let pose = CursorPose::at(50.0, 50.0);
        Some(if at.in_cue_ms >= press_at {
            pose.pressed()
        } else {
            pose
        })
    }

    fn detail(
        _rig: &(),
        _sequence: &Sequence<Self, ConsistencyState>,
        state: &ConsistencyState,
        _at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        ShowcaseDetail::Consistency(state.clone())
    }
}
