use super::*;
use crate::timeline::timers::TimerQueue;

fn pump(show: &mut Showcase, q: &mut TimerQueue<Wakeup>, until: u64) -> Vec<&'static str> {
    let mut entered = Vec::new();
    while let Some(f) = q.pop_until(Millis(until)) {
        if let Some(e) = show.fire(f.payload, f.at, q) {
            entered.push(e.phase);
        }
    }
    entered
}

fn sample(kind: ShowcaseKind, t: u64) -> ShowcaseFrame {
    Showcase::new(kind, &[]).unwrap().sample(Some(t))
}

#[test]
fn kind_names_round_trip() {
    for kind in ShowcaseKind::ALL {
        assert_eq!(kind.name().parse::<ShowcaseKind>().unwrap(), kind);
        assert_eq!(
            serde_json::to_value(kind).unwrap(),
            serde_json::json!(kind.name())
        );
    }
    assert!("carousel".parse::<ShowcaseKind>().is_err());
}

#[test]
fn editing_walks_its_phases() {
    let mut show = Showcase::new(ShowcaseKind::Editing, &[]).unwrap();
    let mut q = TimerQueue::new();
    assert_eq!(
        show.activate(Millis(0), &mut q).map(|e| e.phase),
        Some("idle")
    );
    let entered = pump(&mut show, &mut q, 11_900);
    assert_eq!(
        entered,
        vec![
            "focus_prompt",
            "editing_prompt",
            "editing_prompt",
            "focus_voice",
            "editing_voice",
            "editing_voice",
            "focus_images",
            "selecting_image",
            "selecting_image",
            "idle",
            "idle",
        ]
    );
    assert_eq!(show.cycle_ms(), 11_900);
}

#[test]
fn editing_values_change_on_their_cues() {
    let at = |t| match sample(ShowcaseKind::Editing, t).detail {
        ShowcaseDetail::Editing(f) => f,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(at(3_299).state.prompt, editing::ORIGINAL_PROMPT);
    assert_eq!(at(3_300).state.prompt, editing::REVISED_PROMPT);
    assert_eq!(at(5_599).state.voice, editing::ORIGINAL_VOICE);
    assert_eq!(at(5_600).state.voice, editing::REVISED_VOICE);
    assert_eq!(at(7_900).state.selected_image, 1);
    assert_eq!(at(2_500).camera.scale, 1.8);
    assert_eq!(at(9_000).camera, CameraPose::for_phase(EditingPhase::Idle));

    // Next loop starts from scratch.
    let wrapped = at(11_900 + 10);
    assert_eq!(wrapped.state, EditingState::default());
}

#[test]
fn editing_cursor_follows_phase_table() {
    let frame = sample(ShowcaseKind::Editing, 5_400);
    assert_eq!(frame.phase, Some("editing_voice"));
    let cursor = frame.cursor.unwrap();
    assert_eq!(cursor.at, Point::new(15.0, 25.0));
    assert!(cursor.clicking);
    assert_eq!(cursor.scale, 0.9);

    let idle = sample(ShowcaseKind::Editing, 100).cursor.unwrap();
    assert_eq!(idle.opacity, 0.0);
}

#[test]
fn consistency_cycles_scenes() {
    let at = |t| match sample(ShowcaseKind::Consistency, t).detail {
        ShowcaseDetail::Consistency(s) => s,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(at(0), ConsistencyState::default());
    assert!(at(3_600).video);
    assert_eq!(at(6_299).scene, 0);
    assert_eq!(at(7_000).scene, 1);
    assert_eq!(at(14_300).scene, 5);
    assert_eq!(at(14_300).scene_name(), "SCENE 06: DEEP SPACE");

    let show = Showcase::new(ShowcaseKind::Consistency, &[]).unwrap();
    assert_eq!(show.cycle_ms(), 16_300);
    assert_eq!(show.cue_count(), 14);
}

#[test]
fn consistency_cursor_clicks_after_arriving() {
    let approaching = sample(ShowcaseKind::Consistency, 2_600).cursor.unwrap();
    assert!(!approaching.clicking);
    let pressed = sample(ShowcaseKind::Consistency, 3_400).cursor.unwrap();
    assert!(pressed.clicking);
    assert!(sample(ShowcaseKind::Consistency, 1_000).cursor.is_none());
}

#[test]
fn integrated_effects_run_from_their_toggle() {
    let at = |t| match sample(ShowcaseKind::IntegratedEditing, t).detail {
        ShowcaseDetail::IntegratedEditing(f) => f,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(at(3_400).subtitle, "");
    assert_eq!(at(3_800).subtitle, "这一刻");
    assert_eq!(at(3_800).state.setting("subs"), Some(SettingMode::Auto));
    assert_eq!(at(3_800).state.setting("trans"), Some(SettingMode::Off));

    assert_eq!(at(6_200).preview_image, 0);
    assert_eq!(at(7_600).preview_image, 1);
    assert_eq!(at(8_800).preview_image, 2);
    assert_eq!(at(10_000).preview_image, 0);

    let rest = at(14_000);
    assert!(rest.state.settings.iter().all(|m| *m == SettingMode::Auto));
    assert_eq!(rest.state.cursor, None);
    assert_eq!(rest.subtitle, integrated::SUBTITLE);
}

#[test]
fn integrated_cursor_targets() {
    let row = sample(ShowcaseKind::IntegratedEditing, 1_600).cursor.unwrap();
    assert_eq!(row.at, Point::new(75.0, 15.0));
    let export = sample(ShowcaseKind::IntegratedEditing, 11_800).cursor.unwrap();
    assert_eq!(export.at, Point::new(75.0, 88.0));
    assert!(export.clicking);
    assert!(sample(ShowcaseKind::IntegratedEditing, 14_000).cursor.is_none());
}

#[test]
fn auto_mode_switches_frames_while_playing() {
    let frame = |t| match sample(ShowcaseKind::AutoMode, t).detail {
        ShowcaseDetail::AutoMode(f) => f.frame,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(frame(1_000), 0);
    assert_eq!(frame(4_100), 0);
    assert_eq!(frame(7_500), 1);
    assert_eq!(frame(9_999), 1);
    assert_eq!(frame(10_100), 0);
    assert!(sample(ShowcaseKind::AutoMode, 3_000).cursor.unwrap().clicking);
}

#[test]
fn manual_edit_applies_text_then_image() {
    let state = |t| match sample(ShowcaseKind::ManualEdit, t).detail {
        ShowcaseDetail::ManualEdit(s) => s,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(state(2_500).text_version, 0);
    assert_eq!(state(3_000).text_version, 1);
    assert_eq!(state(5_000).selected_image, 2);
    assert_eq!(state(7_000), ManualEditState::default());
}

#[test]
fn batch_list_follows_keyframes() {
    let detail = |t| match sample(ShowcaseKind::BatchProduction, t).detail {
        ShowcaseDetail::BatchProduction(f) => f,
        other => panic!("unexpected detail {other:?}"),
    };
    assert_eq!(detail(0).list_y, 0.0);
    assert_eq!(detail(6_000).list_y, -320.0);
    assert_eq!(detail(10_200).list_scale, 1.35);
    assert_eq!(detail(12_000 + 6_000).list_y, -320.0);
    let cursor = sample(ShowcaseKind::BatchProduction, 0).cursor.unwrap();
    assert_eq!(cursor.opacity, 0.0);
}

#[test]
fn inactive_frames_show_initial_state() {
    for kind in ShowcaseKind::ALL {
        let show = Showcase::new(kind, &[]).unwrap();
        let frame = show.frame(Millis(5_000));
        assert!(!frame.active);
        assert_eq!(frame.phase, None);
        assert_eq!(frame.cursor, None);
        assert_eq!(frame, show.sample(None));
    }
}

#[test]
fn live_clock_matches_pure_sampling() {
    for kind in ShowcaseKind::ALL {
        let mut show = Showcase::new(kind, &[]).unwrap();
        let mut q = TimerQueue::new();
        show.activate(Millis(0), &mut q);
        let mut t = 0;
        while t < 2 * show.cycle_ms() + 500 {
            pump(&mut show, &mut q, t);
            assert_eq!(show.frame(Millis(t)), show.sample(Some(t)), "{kind} at {t}");
            t += 250;
        }
    }
}

#[test]
fn deactivate_then_reactivate_restarts_from_first_phase() {
    let mut show = Showcase::new(ShowcaseKind::Consistency, &[]).unwrap();
    let mut q = TimerQueue::new();
    show.activate(Millis(0), &mut q);
    pump(&mut show, &mut q, 7_000);
    assert_eq!(show.phase_name(), Some("video"));

    assert!(show.deactivate());
    assert!(!show.is_active());
    assert_eq!(show.frame(Millis(7_000)), show.sample(None));
    // Stale wakeups from the cancelled run change nothing.
    for f in q.drain_all() {
        assert!(show.fire(f.payload, f.at, &mut q).is_none());
    }

    let mut q = TimerQueue::starting_at(Millis(9_000));
    let entered = show.activate(Millis(9_000), &mut q).unwrap();
    assert_eq!((entered.phase, entered.cue, entered.cycle), ("card", 0, 0));
}

#[test]
fn hold_overrides_apply_cue_for_cue() {
    let show = Showcase::new(ShowcaseKind::AutoMode, &[100, 100, 100]).unwrap();
    assert_eq!(show.cycle_ms(), 300);
    assert!(Showcase::new(ShowcaseKind::AutoMode, &[1, 2, 3, 4]).is_err());
}
