use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::foundation::core::Millis;
use crate::timeline::MIN_HOLD_MS;

/// A timer that came due.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    /// Time the timer was due.
    pub at: Millis,
    /// What was scheduled.
    pub payload: T,
}

#[derive(Debug)]
struct Entry<T> {
    due: Millis,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Deterministic virtual timer queue driven by an external clock.
///
/// Determinism rule: timers pop in `(due, scheduling order)` order. While a timer is being
/// delivered, [`TimerQueue::now`] equals its due time, so continuations scheduled from it chain
/// from the exact boundary rather than from whenever the host happened to poll.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::starting_at(Millis::ZERO)
    }

    /// An empty queue whose clock starts at `now`.
    pub fn starting_at(now: Millis) -> Self {
        Self {
            now,
            seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current queue time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.heap.peek().map(|Reverse(e)| e.due)
    }

    /// Schedule `payload` to fire `delay_ms` after [`TimerQueue::now`] (at least one tick later).
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> Millis {
        let due = self.now.after(delay_ms.max(MIN_HOLD_MS));
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            due,
            seq: self.seq,
            payload,
        }));
        due
    }

    /// Pop the earliest timer due at or before `horizon`.
    ///
    /// Returns `None` once nothing else is due; the queue clock then rests at `horizon`.
    /// Hosts loop on this so timers scheduled during delivery are honored within the same jump.
    pub fn pop_until(&mut self, horizon: Millis) -> Option<Fired<T>> {
        match self.next_due() {
            Some(due) if due <= horizon => {
                let Reverse(entry) = self.heap.pop()?;
                self.now = self.now.max(entry.due);
                Some(Fired {
                    at: entry.due,
                    payload: entry.payload,
                })
            }
            _ => {
                self.now = self.now.max(horizon);
                None
            }
        }
    }

    /// Pop every pending timer regardless of due time, in due order. The clock is not moved.
    pub fn drain_all(&mut self) -> Vec<Fired<T>> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(Reverse(entry)) = self.heap.pop() {
            out.push(Fired {
                at: entry.due,
                payload: entry.payload,
            });
        }
        out
    }

    /// Drop pending timers whose payload fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.heap.retain(|Reverse(e)| keep(&e.payload));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timers.rs"]
mod tests;
