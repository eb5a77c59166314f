use super::*;

#[test]
fn pops_in_due_then_schedule_order() {
    let mut q = TimerQueue::new();
    q.schedule(50, "b");
    q.schedule(10, "a");
    q.schedule(50, "c");

    let mut seen = Vec::new();
    while let Some(f) = q.pop_until(Millis(100)) {
        seen.push((f.at.0, f.payload));
    }
    assert_eq!(seen, vec![(10, "a"), (50, "b"), (50, "c")]);
    assert_eq!(q.now(), Millis(100));
}

#[test]
fn clock_tracks_delivered_timer() {
    let mut q = TimerQueue::new();
    q.schedule(100, 1);
    let f = q.pop_until(Millis(1000)).unwrap();
    assert_eq!(f.at, Millis(100));
    assert_eq!(q.now(), Millis(100));

    // Chained from the boundary, not from the horizon.
    assert_eq!(q.schedule(200, 2), Millis(300));
    assert_eq!(q.pop_until(Millis(1000)).unwrap().at, Millis(300));
    assert!(q.pop_until(Millis(1000)).is_none());
    assert_eq!(q.now(), Millis(1000));
}

#[test]
fn zero_delay_still_waits_one_tick() {
    let mut q = TimerQueue::starting_at(Millis(5));
    assert_eq!(q.schedule(0, ()), Millis(6));
    assert!(q.pop_until(Millis(5)).is_none());
    assert!(q.pop_until(Millis(6)).is_some());
}

#[test]
fn drain_and_retain() {
    let mut q = TimerQueue::new();
    for i in 0..5u32 {
        q.schedule(u64::from(i) * 10, i);
    }
    q.retain(|v| v % 2 == 0);
    assert_eq!(q.len(), 3);
    let drained: Vec<u32> = q.drain_all().into_iter().map(|f| f.payload).collect();
    assert_eq!(drained, vec![0, 2, 4]);
    assert!(q.is_empty());
    assert_eq!(q.now(), Millis::ZERO);
}
