use super::*;

fn stack(n: usize) -> PanelStack {
    PanelStack::new(StepCount::new(n).unwrap(), SpringParams::default()).unwrap()
}

fn settle(s: &mut PanelStack) {
    for _ in 0..200 {
        if s.is_settled() {
            return;
        }
        s.step(16.0);
    }
}

#[test]
fn tags_partition_around_active() {
    assert_eq!(PanelTag::of(0, 2), PanelTag::Past);
    assert_eq!(PanelTag::of(2, 2), PanelTag::Active);
    assert_eq!(PanelTag::of(3, 2), PanelTag::Future);
}

#[test]
fn target_poses_match_tag_table() {
    let past = PanelPose::target(0, 2);
    assert_eq!((past.y_pct, past.scale, past.opacity), (-120.0, 0.9, 0.0));
    assert_eq!(past.brightness, 0.5);
    assert!(!past.overlay && !past.interactive);

    let active = PanelPose::target(2, 2);
    assert_eq!((active.y_pct, active.scale, active.opacity), (0.0, 1.0, 1.0));
    assert_eq!(active.brightness, 1.0);
    assert!(active.interactive);
    assert_eq!(active.z_index, 10);

    let future = PanelPose::target(3, 1);
    assert_eq!((future.y_pct, future.scale, future.opacity), (220.0, 0.9, 0.4));
    assert!(future.overlay);
    assert_eq!(future.z_index, 8);
}

#[test]
fn active_panel_is_always_on_top() {
    for active in 0..4 {
        let z: Vec<i32> = (0..4).map(|i| PanelPose::target(i, active).z_index).collect();
        let top = *z.iter().max().unwrap();
        assert_eq!(z[active], top);
        assert_eq!(z.iter().filter(|&&v| v == top).count(), 1);
    }
}

#[test]
fn new_stack_rests_on_first_panel() {
    let s = stack(4);
    assert!(s.is_settled());
    assert_eq!(s.active(), 0);
    let poses = s.poses();
    assert_eq!(poses[0], PanelPose::target(0, 0));
    assert_eq!(poses[3].y_pct, 330.0);
}

#[test]
fn set_active_clamps_and_reports_changes() {
    let mut s = stack(4);
    assert!(!s.set_active(0));
    assert!(s.set_active(99));
    assert_eq!(s.active(), 3);
    assert!(!s.set_active(3));
}

#[test]
fn springs_settle_on_target_poses() {
    let mut s = stack(4);
    s.set_active(2);
    assert!(!s.is_settled());
    // Discrete attributes switch immediately.
    assert_eq!(s.poses()[2].z_index, 10);
    assert!(s.poses()[2].interactive);

    settle(&mut s);
    assert!(s.is_settled());
    for (i, pose) in s.poses().into_iter().enumerate() {
        assert_eq!(pose, PanelPose::target(i, 2));
    }
}

#[test]
fn retarget_mid_flight_keeps_position() {
    let mut s = stack(4);
    s.set_active(1);
    s.step(50.0);
    let mid = s.poses()[1].y_pct;
    assert!(mid > 0.0 && mid < 110.0, "mid = {mid}");

    s.set_active(0);
    // No snap: the pose continues from where it was.
    assert_eq!(s.poses()[1].y_pct, mid);
    settle(&mut s);
    assert_eq!(s.poses()[1], PanelPose::target(1, 0));
}

#[test]
fn rejects_invalid_springs() {
    let params = SpringParams {
        stiffness: 0.0,
        ..SpringParams::default()
    };
    assert!(PanelStack::new(StepCount::new(2).unwrap(), params).is_err());
}
