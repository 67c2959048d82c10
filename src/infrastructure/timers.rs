//! Deadline bookkeeping for host timers.
//!
//! Zellij's `set_timeout` fires an anonymous `Timer` event, so several toast
//! timers in flight cannot be told apart by the event alone. [`TimerQueue`]
//! records each timer's deadline; when any host timer fires, every timer whose
//! deadline has passed is drained and fed back to the handler in deadline
//! order.

use crate::notify::{ScheduledTimer, ToastTimer};
use chrono::{DateTime, Duration, Utc};

/// Host timers may fire marginally early; deadlines this close count as due.
const TIMER_SLACK_MS: i64 = 15;

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<(DateTime<Utc>, ToastTimer)>,
}

impl TimerQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Records a timer scheduled at `now`.
    pub fn schedule(&mut self, now: DateTime<Utc>, scheduled: ScheduledTimer) {
        let after = Duration::from_std(scheduled.after).unwrap_or_else(|_| Duration::zero());
        self.pending.push((now + after, scheduled.timer));
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<ToastTimer> {
        let cutoff = now + Duration::milliseconds(TIMER_SLACK_MS);
        let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(deadline, _)| *deadline <= cutoff);
        self.pending = pending;

        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, timer)| timer).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Severity, ToastQueue};
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + millis).unwrap()
    }

    #[test]
    fn test_only_due_timers_are_drained() {
        let mut toasts = ToastQueue::default();
        let mut queue = TimerQueue::new();

        let first = toasts.notify("first", Severity::Success);
        queue.schedule(at(0), first);
        let second = toasts.notify("second", Severity::Success);
        queue.schedule(at(1000), second);

        assert!(queue.drain_due(at(2000)).is_empty());
        assert_eq!(queue.drain_due(at(3000)), vec![first.timer]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(at(4000)), vec![second.timer]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_slightly_early_fire_counts_as_due() {
        let mut toasts = ToastQueue::default();
        let mut queue = TimerQueue::new();
        let scheduled = toasts.notify("hello", Severity::Warning);
        queue.schedule(at(0), scheduled);

        assert_eq!(queue.drain_due(at(2995)), vec![scheduled.timer]);
    }

    #[test]
    fn test_drained_in_deadline_order() {
        let mut toasts = ToastQueue::new(std::time::Duration::from_millis(500));
        let mut queue = TimerQueue::new();

        let late = ScheduledTimer {
            after: std::time::Duration::from_millis(900),
            ..toasts.notify("late", Severity::Success)
        };
        let early = toasts.notify("early", Severity::Success);
        queue.schedule(at(0), late);
        queue.schedule(at(0), early);

        assert_eq!(queue.drain_due(at(1000)), vec![early.timer, late.timer]);
    }
}
