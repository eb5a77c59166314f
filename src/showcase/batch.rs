use crate::{
    animation::ease::Ease,
    animation::keyframes::LoopTrack,
    foundation::error::ReelResult,
    showcase::{Choreography, CuePoint, CursorPose, ShowcaseDetail, ShowcaseKind},
    timeline::sequence::{Cue, Sequence},
};

/// Length of the batch list loop.
pub const BATCH_LOOP_MS: u64 = 12_000;

/// The batch showcase is one continuous keyframed loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPhase {
    /// List scrolls, zooms on a finished item, and a completion toast pops.
    Scrolling,
}

/// Keyframed values of the batch list.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BatchFrame {
    /// List translation in pixels.
    pub list_y: f64,
    /// List zoom.
    pub list_scale: f64,
    /// Completion toast opacity.
    pub toast_opacity: f64,
    /// Completion toast scale.
    pub toast_scale: f64,
    /// Completion toast vertical offset in pixels.
    pub toast_y: f64,
}

impl BatchFrame {
    const RESTING: Self = Self {
        list_y: 0.0,
        list_scale: 1.0,
        toast_opacity: 0.0,
        toast_scale: 0.9,
        toast_y: -20.0,
    };
}

pub(crate) struct BatchRig {
    list_y: LoopTrack,
    list_scale: LoopTrack,
    toast_opacity: LoopTrack,
    toast_scale: LoopTrack,
    toast_y: LoopTrack,
    cursor_opacity: LoopTrack,
    cursor_top: LoopTrack,
    cursor_left: LoopTrack,
}

fn track(times: &[f64], values: &[f64]) -> ReelResult<LoopTrack> {
    LoopTrack::from_times(BATCH_LOOP_MS, times, values, Ease::IN_OUT)
}

impl Choreography for BatchPhase {
    type State = ();
    type Rig = BatchRig;

    const KIND: ShowcaseKind = ShowcaseKind::BatchProduction;

    fn name(self) -> &'static str {
        "scrolling"
    }

    fn sequence() -> Sequence<Self, ()> {
        Sequence::new(vec![Cue::hold(Self::Scrolling, BATCH_LOOP_MS)])
    }

    fn initial() {}

    fn rig() -> ReelResult<BatchRig> {
        let list = [0.0, 0.5, 0.85, 1.0];
        let toast = [0.0, 0.6, 0.65, 0.85, 0.95];
        let cursor = [0.0, 0.5, 0.6, 0.8, 1.0];
        Ok(BatchRig {
            list_y: track(&list, &[0.0, -320.0, -320.0, 0.0])?,
            list_scale: track(&list, &[1.0, 1.0, 1.35, 1.0])?,
            toast_opacity: track(&toast, &[0.0, 0.0, 1.0, 1.0, 0.0])?,
            toast_scale: track(&toast, &[0.9, 0.9, 1.0, 1.0, 0.9])?,
            toast_y: track(&toast, &[-20.0, -20.0, 50.0, 50.0, -20.0])?,
            cursor_opacity: track(&cursor, &[0.0, 0.0, 1.0, 1.0, 0.0])?,
            cursor_top: track(&cursor, &[60.0, 60.0, 58.0, 58.0, 60.0])?,
            cursor_left: track(&cursor, &[80.0, 80.0, 30.0, 70.0, 80.0])?,
        })
    }

    fn cursor(self, rig: &BatchRig, _state: &(), at: CuePoint) -> Option<CursorPose> {
        let t = at.in_cue_ms;
        Some(CursorPose {
            opacity: rig.cursor_opacity.sample(t),
            ..CursorPose::at(rig.cursor_left.sample(t), rig.cursor_top.sample(t))
        })
    }

    fn detail(
        rig: &BatchRig,
        _sequence: &Sequence<Self, ()>,
        _state: &(),
        at: Option<CuePoint>,
    ) -> ShowcaseDetail {
        let frame = match at {
            None => BatchFrame::RESTING,
            Some(at) => {
                let t = at.in_cue_ms;
                BatchFrame {
                    list_y: rig.list_y.sample(t),
                    list_scale: rig.list_scale.sample(t),
                    toast_opacity: rig.toast_opacity.sample(t),
                    toast_scale: rig.toast_scale.sample(t),
                    toast_y: rig.toast_y.sample(t),
                }
            }
        };
        ShowcaseDetail::BatchProduction(frame)
    }
}
