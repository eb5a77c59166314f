use super::*;

#[test]
fn map_range_clamps_outside_domain() {
    assert_eq!(map_range(0.5, 0.75, 1.0, 1.0, 0.9), 1.0);
    assert_eq!(map_range(1.0, 0.75, 1.0, 1.0, 0.9), 0.9);
    assert_eq!(map_range(2.0, 0.75, 1.0, 1.0, 0.9), 0.9);
    assert!((map_range(0.875, 0.75, 1.0, 1.0, 0.9) - 0.95).abs() < 1e-12);
}

#[test]
fn map_range_handles_degenerate_and_nan() {
    assert_eq!(map_range(0.4, 0.5, 0.5, 0.0, 1.0), 0.0);
    assert_eq!(map_range(0.5, 0.5, 0.5, 0.0, 1.0), 1.0);
    assert_eq!(map_range(f64::NAN, 0.0, 1.0, 3.0, 5.0), 3.0);
}

#[test]
fn clamp01_maps_nan_to_zero() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(finite_or(f64::NEG_INFINITY, 7.0), 7.0);
}
