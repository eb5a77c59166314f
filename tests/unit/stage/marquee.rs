use super::*;

#[test]
fn left_runs_from_zero_to_minus_width() {
    let mut m = Marquee::new(1000.0, 50_000, MarqueeDirection::Left).unwrap();
    assert_eq!(m.offset(), 0.0);
    m.tick(25_000);
    assert_eq!(m.offset(), -500.0);
    m.tick(25_000);
    assert_eq!(m.offset(), 0.0);
}

#[test]
fn right_runs_from_minus_width_to_zero() {
    let mut m = Marquee::new(1000.0, 50_000, MarqueeDirection::Right).unwrap();
    assert_eq!(m.offset(), -1000.0);
    m.tick(12_500);
    assert_eq!(m.offset(), -750.0);
}

#[test]
fn pause_freezes_and_resume_continues() {
    let mut m = Marquee::new(1000.0, 10_000, MarqueeDirection::Left).unwrap();
    m.tick(1_000);
    m.set_paused(true);
    m.tick(5_000);
    assert_eq!(m.offset(), -100.0);
    m.set_paused(false);
    m.tick(1_000);
    assert_eq!(m.offset(), -200.0);
}

#[test]
fn unmeasured_row_stays_put() {
    let mut m = Marquee::new(0.0, 10_000, MarqueeDirection::Left).unwrap();
    m.tick(3_000);
    assert_eq!(m.offset(), 0.0);
    m.set_unit_width(f64::NAN);
    assert_eq!(m.offset(), 0.0);
}

#[test]
fn rejects_zero_duration() {
    assert!(Marquee::new(10.0, 0, MarqueeDirection::Left).is_err());
    assert!(Marquee::new(-1.0, 10, MarqueeDirection::Right).is_err());
}
