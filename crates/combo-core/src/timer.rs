//! Deadline queue for the widget's three timers.
//!
//! Time is a `Duration` since mount, supplied by the host, so the queue never
//! reads a clock. At most one timer of each kind is pending: scheduling a kind
//! replaces its previous deadline.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Second phase of the input-blur commit.
    BlurCommit,
    /// Status announcement settle delay.
    StatusSettle,
    /// External mutation poll of the input value.
    InputPoll,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(TimerKind, Duration)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, deadline: Duration) {
        self.cancel(kind);
        self.pending.push((kind, deadline));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|(k, _)| *k != kind);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _)| *k == kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<Duration> {
        self.pending
            .iter()
            .find_map(|(k, at)| (*k == kind).then_some(*at))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// Remove and return the earliest timer due at `now`. Ties fire in the
    /// order they were scheduled.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerKind, Duration)> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= now)
            .min_by_key(|(i, (_, at))| (*at, *i))?;
        Some(self.pending.remove(pos))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
