use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::OutCirc,
        Ease::REVEAL,
    ] {
        assert!((ease.apply(0.0)).abs() < 1e-9, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::Linear.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(9.0), 1.0);
    assert_eq!(Ease::InQuad.apply(f64::NAN), 0.0);
}

#[test]
fn linear_bezier_is_identity() {
    let ease = Ease::CubicBezier(0.25, 0.25, 0.75, 0.75);
    for t in [0.1, 0.33, 0.5, 0.9] {
        assert!((ease.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn reveal_curve_front_loads_motion() {
    // Strong ease-out: well past halfway by a quarter of the duration.
    assert!(Ease::REVEAL.apply(0.25) > 0.6);
    let mut prev = 0.0;
    for i in 1..=20 {
        let v = Ease::REVEAL.apply(f64::from(i) / 20.0);
        assert!(v >= prev - 1e-9);
        prev = v;
    }
}
