//! Notification channel: queued, auto-dismissing toasts.
//!
//! Each call to [`ToastQueue::notify`] appends a toast and hands back the timer
//! that will expire it. Toasts go through two phases:
//!
//! ```text
//! notify ──▶ Visible ──(visible duration)──▶ Leaving ──(exit phase)──▶ removed
//! ```
//!
//! The queue never reads a clock. The plugin host schedules the returned
//! [`ScheduledTimer`]s and feeds the [`ToastTimer`]s back when they fire, which
//! keeps the queue deterministic under test. Identical messages are not
//! de-duplicated and any number of toasts may be visible at once.

use std::time::Duration;

/// How long a toast stays fully visible by default.
pub const DEFAULT_VISIBLE_FOR: Duration = Duration::from_millis(3000);

/// Length of the exit phase before a toast is removed.
pub const EXIT_PHASE: Duration = Duration::from_millis(300);

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Glyph prefixed to the toast message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
        }
    }
}

/// Identifier of a toast, unique for the lifetime of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// Lifecycle phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

/// Timer events that drive toast lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTimer {
    /// The visible duration elapsed; start the exit phase.
    Expire(ToastId),
    /// The exit phase elapsed; remove the toast.
    Remove(ToastId),
}

/// A timer the host must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub after: Duration,
    pub timer: ToastTimer,
}

/// Ordered queue of live toasts (oldest first).
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    visible_for: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_FOR)
    }
}

impl ToastQueue {
    #[must_use]
    pub const fn new(visible_for: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            visible_for,
        }
    }

    /// Appends a visible toast.
    ///
    /// # Returns
    ///
    /// The timer that will move the toast into its exit phase.
    ///
    /// # Example
    ///
    /// ```
    /// use atlasphere::notify::{Severity, ToastQueue, ToastTimer};
    ///
    /// let mut queue = ToastQueue::default();
    /// let scheduled = queue.notify("Location found!", Severity::Success);
    /// assert_eq!(queue.toasts().len(), 1);
    ///
    /// let removal = queue.on_timer(scheduled.timer).unwrap();
    /// assert!(matches!(removal.timer, ToastTimer::Remove(_)));
    /// queue.on_timer(removal.timer);
    /// assert!(queue.toasts().is_empty());
    /// ```
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> ScheduledTimer {
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!(toast_id = id.0, message = %message, "error notification"),
            Severity::Success | Severity::Warning => {
                tracing::debug!(toast_id = id.0, severity = ?severity, message = %message, "notification");
            }
        }

        self.toasts.push(Toast {
            id,
            message,
            severity,
            phase: ToastPhase::Visible,
        });

        ScheduledTimer {
            after: self.visible_for,
            timer: ToastTimer::Expire(id),
        }
    }

    /// Advances a toast's lifecycle.
    ///
    /// # Returns
    ///
    /// The follow-up timer when a toast entered its exit phase, `None` when a
    /// toast was removed or the timer refers to a toast that no longer exists.
    pub fn on_timer(&mut self, timer: ToastTimer) -> Option<ScheduledTimer> {
        match timer {
            ToastTimer::Expire(id) => {
                let toast = self.toasts.iter_mut().find(|toast| toast.id == id)?;
                toast.phase = ToastPhase::Leaving;
                Some(ScheduledTimer {
                    after: EXIT_PHASE,
                    timer: ToastTimer::Remove(id),
                })
            }
            ToastTimer::Remove(id) => {
                self.toasts.retain(|toast| toast.id != id);
                None
            }
        }
    }

    /// Live toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Number of live toasts with `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.toasts.iter().filter(|toast| toast.severity == severity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_schedules_expiry_after_visible_duration() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let scheduled = queue.notify("hello", Severity::Success);

        assert_eq!(scheduled.after, Duration::from_secs(5));
        assert_eq!(queue.toasts()[0].phase, ToastPhase::Visible);
    }

    #[test]
    fn test_expire_enters_exit_phase() {
        let mut queue = ToastQueue::default();
        let scheduled = queue.notify("bye", Severity::Warning);

        let removal = queue.on_timer(scheduled.timer).unwrap();
        assert_eq!(removal.after, EXIT_PHASE);
        assert_eq!(queue.toasts()[0].phase, ToastPhase::Leaving);
    }

    #[test]
    fn test_identical_messages_are_not_deduplicated() {
        let mut queue = ToastQueue::default();
        queue.notify("Location not found", Severity::Error);
        queue.notify("Location not found", Severity::Error);

        assert_eq!(queue.toasts().len(), 2);
        assert_eq!(queue.count(Severity::Error), 2);
        assert_ne!(queue.toasts()[0].id, queue.toasts()[1].id);
    }

    #[test]
    fn test_removing_one_toast_keeps_the_others() {
        let mut queue = ToastQueue::default();
        let first = queue.notify("first", Severity::Success);
        queue.notify("second", Severity::Success);

        let removal = queue.on_timer(first.timer).unwrap();
        assert!(queue.on_timer(removal.timer).is_none());

        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "second");
    }

    #[test]
    fn test_timer_for_removed_toast_is_ignored() {
        let mut queue = ToastQueue::default();
        let scheduled = queue.notify("gone", Severity::Success);
        let removal = queue.on_timer(scheduled.timer).unwrap();
        queue.on_timer(removal.timer);

        assert!(queue.on_timer(scheduled.timer).is_none());
        assert!(queue.toasts().is_empty());
    }
}
