//! Deferred callbacks on the single-threaded UI loop.
//!
//! The host loop owns the clock and calls [`TimerQueue::drain_due`] on every
//! tick. A [`TimerId`] is the cancellation token for one scheduled callback.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: BTreeMap<TimerId, Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = now.checked_add(delay).unwrap_or(now);
        self.pending.insert(id, Pending { deadline, payload });
        id
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest deadline first (ties in scheduling order).
    pub fn drain_due(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let due: Vec<TimerId> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(id, _)| *id)
            .collect();

        let mut fired: Vec<(TimerId, Instant, T)> = due
            .into_iter()
            .filter_map(|id| {
                self.pending
                    .remove(&id)
                    .map(|pending| (id, pending.deadline, pending.payload))
            })
            .collect();
        fired.sort_by_key(|(id, deadline, _)| (*deadline, *id));
        fired
            .into_iter()
            .map(|(id, _, payload)| (id, payload))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, for hosts that sleep until the next timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use std::time::{Duration, Instant};

    #[test]
    fn fires_only_after_deadline() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start, Duration::from_millis(100), "a");

        assert!(timers.drain_due(start + Duration::from_millis(99)).is_empty());
        let fired = timers.drain_due(start + Duration::from_millis(100));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "a");
        assert!(timers.is_empty());
    }

    #[test]
    fn fires_in_deadline_order() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        timers.schedule(start, Duration::from_millis(300), "late");
        timers.schedule(start, Duration::from_millis(100), "early");
        timers.schedule(start, Duration::from_millis(100), "early-second");

        let fired: Vec<_> = timers
            .drain_due(start + Duration::from_secs(1))
            .into_iter()
            .map(|(_, payload)| payload)
            .collect();
        assert_eq!(fired, ["early", "early-second", "late"]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let id = timers.schedule(start, Duration::from_millis(10), 1);
        timers.schedule(start, Duration::from_millis(10), 2);

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.len(), 1);

        let fired = timers.drain_due(start + Duration::from_secs(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, 2);
    }

    #[test]
    fn next_deadline_tracks_earliest_pending() {
        let start = Instant::now();
        let mut timers = TimerQueue::new();
        let first = timers.schedule(start, Duration::from_millis(10), ());
        timers.schedule(start, Duration::from_millis(20), ());
        assert_eq!(timers.next_deadline(), Some(start + Duration::from_millis(10)));
        assert!(timers.cancel(first));
        assert_eq!(timers.next_deadline(), Some(start + Duration::from_millis(20)));
        assert_eq!(timers.drain_due(start + Duration::from_secs(1)).len(), 1);
        assert_eq!(timers.next_deadline(), None);
    }
}
