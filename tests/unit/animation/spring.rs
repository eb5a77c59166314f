use super::*;

fn params() -> SpringParams {
    SpringParams::default()
}

#[test]
fn settles_on_target() {
    let mut s = SpringValue::at_rest(0.0, params());
    s.set_target(100.0);
    for _ in 0..200 {
        s.step(16.0);
    }
    assert!(s.is_settled());
    assert_eq!(s.value(), 100.0);
}

#[test]
fn retarget_keeps_position_and_velocity() {
    let mut s = SpringValue::at_rest(0.0, params());
    s.set_target(100.0);
    s.step(50.0);
    let (value, velocity) = (s.value(), s.velocity());
    assert!(value > 0.0 && value < 100.0);
    assert!(velocity > 0.0);

    s.set_target(-100.0);
    assert_eq!(s.value(), value);
    assert_eq!(s.velocity(), velocity);

    // Momentum carries it further up briefly before turning around.
    s.step(1.0);
    assert!(s.value() > value);
}

#[test]
fn ignores_non_finite_input() {
    let mut s = SpringValue::at_rest(1.0, params());
    s.set_target(f64::NAN);
    assert_eq!(s.target(), 1.0);
    s.step(f64::INFINITY);
    assert_eq!(s.value(), 1.0);
}

#[test]
fn params_validation() {
    assert!(SpringParams::default().validate().is_ok());
    let bad = SpringParams {
        stiffness: 0.0,
        ..SpringParams::default()
    };
    assert!(bad.validate().is_err());
    let bad = SpringParams {
        damping: f64::NAN,
        ..SpringParams::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn stiff_springs_stay_bounded_and_settle() {
    let stiff = SpringParams {
        stiffness: 1e7,
        ..SpringParams::default()
    };
    stiff.validate().unwrap();
    let mut s = SpringValue::at_rest(0.0, stiff);
    s.set_target(100.0);
    s.step(200.0);
    assert!(s.value().is_finite());
    assert!((s.value() - 100.0).abs() < 10.0, "value {}", s.value());

    for _ in 0..100 {
        s.step(16.0);
    }
    assert!(s.is_settled());
}

#[test]
fn rejects_undamped_and_unsimulable_springs() {
    let undamped = SpringParams {
        damping: 0.0,
        ..SpringParams::default()
    };
    assert!(undamped.validate().is_err());

    let too_stiff = SpringParams {
        stiffness: 1e9,
        ..SpringParams::default()
    };
    let err = too_stiff.validate().unwrap_err();
    assert!(err.to_string().contains("too stiff"), "{err}");

    let overdamped = SpringParams {
        damping: 2.0 * MAX_SPRING_RATE,
        ..SpringParams::default()
    };
    assert!(overdamped.validate().is_err());
}

#[test]
fn long_gaps_advance_at_most_one_capped_step() {
    let mut a = SpringValue::at_rest(0.0, params());
    a.set_target(100.0);
    let mut b = a;
    a.step(5e7);
    b.step(MAX_STEP_MS);
    assert_eq!(a, b);
}
