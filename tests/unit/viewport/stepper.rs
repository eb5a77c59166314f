use super::*;

fn four() -> StepCount {
    StepCount::new(4).unwrap()
}

#[test]
fn concrete_band_mapping() {
    let s = four();
    assert_eq!(step_for_progress(Progress::new(0.10), s), 0);
    assert_eq!(step_for_progress(Progress::new(0.30), s), 1);
    assert_eq!(step_for_progress(Progress::new(0.60), s), 2);
    assert_eq!(step_for_progress(Progress::new(0.90), s), 3);
}

#[test]
fn boundaries_resolve_to_entering_band() {
    let s = four();
    assert_eq!(step_for_progress(Progress::new(0.25), s), 1);
    assert_eq!(step_for_progress(Progress::new(0.5), s), 2);
    assert_eq!(step_for_progress(Progress::new(0.75), s), 3);
    assert_eq!(step_for_progress(Progress::END, s), 3);
    assert_eq!(step_for_progress(Progress::START, s), 0);
}

#[test]
fn mapping_is_total_and_monotonic() {
    for n in 1..=7 {
        let steps = StepCount::new(n).unwrap();
        let mut prev = 0;
        for i in 0..=1000 {
            let idx = step_for_progress(Progress::new(f64::from(i) / 1000.0), steps);
            assert!(idx < n);
            assert!(idx >= prev);
            prev = idx;
        }
        assert_eq!(prev, n - 1);
    }
}

#[test]
fn stepper_reports_changes_only() {
    let mut st = Stepper::new(four());
    assert_eq!(st.update(Progress::new(0.1)), None);
    assert_eq!(st.update(Progress::new(0.25)), Some(1));
    assert_eq!(st.update(Progress::new(0.26)), None);
    assert_eq!(st.update(Progress::new(0.1)), Some(0));
    assert_eq!(st.current(), 0);
}

#[test]
fn card_scale_window() {
    let range = (0.75, 1.0);
    assert_eq!(card_scale(Progress::new(0.75), range, 0.9), 1.0);
    assert!((card_scale(Progress::new(1.0), range, 0.9) - 0.9).abs() < 1e-12);
    assert_eq!(card_scale(Progress::new(0.5), range, 0.9), 1.0);
}

#[test]
fn stack_layers_shrink_more_for_earlier_cards() {
    let stack = CardStack::new(four(), 0.05, 25.0).unwrap();
    assert_eq!(stack.range(1), (0.25, 1.0));
    assert!((stack.target_scale(0) - 0.8).abs() < 1e-12);
    assert!((stack.target_scale(3) - 0.95).abs() < 1e-12);
    assert_eq!(stack.top_offset_px(2), 50.0);

    let end = Progress::END;
    let scales: Vec<f64> = (0..4).map(|i| stack.scale(i, end)).collect();
    assert!(scales.windows(2).all(|w| w[0] < w[1]));
    // A card has not started shrinking before its window opens.
    assert_eq!(stack.scale(3, Progress::new(0.7)), 1.0);
}

#[test]
fn stack_rejects_overshrinking() {
    assert!(CardStack::new(four(), 0.3, 0.0).is_err());
    assert!(CardStack::new(four(), f64::NAN, 0.0).is_err());
}
