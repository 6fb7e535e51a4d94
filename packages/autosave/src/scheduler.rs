//! # Debounce Scheduler
//!
//! The cancellable deferred-fire primitive behind autosave. Keeping the
//! deadline arithmetic in a plain struct (rather than buried in timer
//! APIs) makes cancellation-on-navigation and cancellation-on-lock
//! ordinary method calls that unit tests can drive with hand-made
//! instants.

use std::time::Duration;
use tokio::time::Instant;

/// Quiet period after the last edit before an autosave fires.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// Tunables for the autosave path.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Debounce window restarted by every edit.
    pub debounce: Duration,

    /// Capacity of the coordinator's command and event channels.
    pub channel_capacity: usize,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: AUTOSAVE_DEBOUNCE,
            channel_capacity: 64,
        }
    }
}

/// One restartable debounce window.
///
/// `restart` arms (or re-arms) the deadline; `cancel` disarms it. The
/// window never fires by itself: the owner polls [`deadline`] into its
/// timer and calls [`cancel`] once it acts.
///
/// [`deadline`]: DebounceWindow::deadline
/// [`cancel`]: DebounceWindow::cancel
#[derive(Debug)]
pub struct DebounceWindow {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceWindow {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm the window: it now elapses `delay` after `now`, regardless of
    /// any earlier deadline.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn has_elapsed(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}
