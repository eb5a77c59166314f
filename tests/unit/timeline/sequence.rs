use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum P {
    A,
    B,
    C,
}

fn abc() -> Sequence<P, u32> {
    Sequence::from_holds([(P::A, 100), (P::B, 200), (P::C, 50)])
}

#[test]
fn cue_at_walks_and_loops() {
    let s = abc();
    assert_eq!(s.cycle_ms(), 350);
    assert_eq!(s.cue_at(0), Some((0, 0)));
    assert_eq!(s.cue_at(99), Some((0, 99)));
    assert_eq!(s.cue_at(100), Some((1, 0)));
    assert_eq!(s.cue_at(300), Some((2, 0)));
    assert_eq!(s.cue_at(350), Some((0, 0)));
    assert_eq!(s.cue_at(351), Some((0, 1)));
}

#[test]
fn empty_sequence_has_no_cue() {
    let s: Sequence<P, u32> = Sequence::new(vec![]);
    assert_eq!(s.cycle_ms(), 0);
    assert_eq!(s.cue_at(1234), None);
    assert!(s.sample(&0, 10).is_none());
}

#[test]
fn zero_holds_take_one_tick() {
    let s: Sequence<P, u32> = Sequence::from_holds([(P::A, 0), (P::B, 0)]);
    assert_eq!(s.cycle_ms(), 2);
    assert_eq!(s.cue_at(1), Some((1, 0)));
}

#[test]
fn replay_applies_cues_from_initial() {
    let s = Sequence::new(vec![
        Cue::new(P::A, 10, |n: &mut u32| *n = 0),
        Cue::new(P::B, 10, |n: &mut u32| *n += 5),
        Cue::new(P::C, 10, |n: &mut u32| *n *= 2),
    ]);
    assert_eq!(s.replay(&7, 0), 0);
    assert_eq!(s.replay(&7, 2), 10);
    assert_eq!(s.sample(&7, 15), Some((P::B, 5)));
    assert_eq!(s.sample(&7, 35), Some((P::A, 0)));
}

#[test]
fn override_holds_rejects_extra_entries() {
    let mut s = abc();
    s.override_holds(&[10, 20]).unwrap();
    assert_eq!(s.cycle_ms(), 80);
    assert!(s.override_holds(&[1, 2, 3, 4]).is_err());
}

#[test]
fn cue_offsets_and_time_since_cue() {
    let s = abc();
    assert_eq!(s.cue_start_ms(0), Some(0));
    assert_eq!(s.cue_start_ms(2), Some(300));
    assert_eq!(s.cue_start_ms(3), None);
    assert_eq!(s.since_cue(1, 2, 20), Some(220));
    assert_eq!(s.since_cue(2, 1, 0), None);
}
