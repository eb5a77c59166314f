use super::*;

fn list_scroll() -> LoopTrack {
    LoopTrack::from_times(
        12_000,
        &[0.0, 0.5, 0.85, 1.0],
        &[0.0, -320.0, -320.0, 0.0],
        Ease::Linear,
    )
    .unwrap()
}

#[test]
fn linear_track_interpolates_and_holds_flat_segments() {
    let t = list_scroll();
    assert_eq!(t.sample(0), 0.0);
    assert_eq!(t.sample(3000), -160.0);
    assert_eq!(t.sample(6000), -320.0);
    assert_eq!(t.sample(8000), -320.0);
    assert_eq!(t.sample(11_100), -160.0);
}

#[test]
fn track_loops() {
    let t = list_scroll();
    assert_eq!(t.sample(12_000 + 3000), t.sample(3000));
}

#[test]
fn hold_mode_steps() {
    let keys = vec![
        Keyframe {
            at_ms: 0,
            value: 1.0,
            ease: Ease::Linear,
        },
        Keyframe {
            at_ms: 10,
            value: 3.0,
            ease: Ease::Linear,
        },
    ];
    let t = LoopTrack::new(keys, InterpMode::Hold, 20).unwrap();
    assert_eq!(t.sample(5), 1.0);
    assert_eq!(t.sample(10), 3.0);
    assert_eq!(t.sample(19), 3.0);
}

#[test]
fn rejects_invalid_tracks() {
    assert!(LoopTrack::new(vec![], InterpMode::Linear, 10).is_err());
    assert!(LoopTrack::from_times(0, &[0.0], &[1.0], Ease::Linear).is_err());
    assert!(LoopTrack::from_times(10, &[0.0, 1.0], &[1.0], Ease::Linear).is_err());
}
