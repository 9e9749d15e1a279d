//! Repeat timer scheduling
//!
//! Timers are identified by [`TimerToken`]s that are unique for the whole
//! process. Cancelling is by token, so a callback queued for a cancelled
//! timer can be told apart from the timer that replaced it.
//!
//! [`TimerQueue`] is a virtual-clock implementation. Whoever owns the event
//! loop pops due tokens from it and feeds them back to the engine on the same
//! path as touch events (see [`crate::session::Session`]).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of a scheduled callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    /// A fresh token, greater than every token handed out before
    pub fn next() -> Self {
        TimerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Delayed, cancellable callbacks keyed by token
pub trait TimerService {
    /// Deliver `token` back to the engine after `delay`. Scheduling a token
    /// that is already pending replaces its deadline.
    fn schedule(&mut self, token: TimerToken, delay: Duration);

    /// Make sure `token` is never delivered, even if it is already due
    fn cancel(&mut self, token: TimerToken);
}

/// Deterministic timer service driven by an explicit clock
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    pending: HashMap<TimerToken, Duration>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time of the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of `token`, if it is still pending
    pub fn deadline(&self, token: TimerToken) -> Option<Duration> {
        self.pending.get(&token).copied()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.pending.contains_key(&token)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The earliest pending timer; ties go to the older token
    pub fn next_due(&self) -> Option<(Duration, TimerToken)> {
        self.pending
            .iter()
            .map(|(&token, &deadline)| (deadline, token))
            .min()
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// The clock moves to the popped deadline, so a timer rescheduled from its
    /// own callback is relative to when it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (deadline, token) = self.next_due().filter(|(deadline, _)| *deadline <= until)?;
        self.pending.remove(&token);
        self.now = self.now.max(deadline);
        Some(token)
    }

    /// Move the clock forward; never moves backwards
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl TimerService for TimerQueue {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        tracing::trace!("Scheduling {} in {:?}", token, delay);
        self.pending.insert(token, self.now.saturating_add(delay));
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.pending.remove(&token).is_some() {
            tracing::trace!("Cancelled {}", token);
        }
    }
}

impl<T: TimerService + ?Sized> TimerService for &mut T {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        (**self).schedule(token, delay)
    }

    fn cancel(&mut self, token: TimerToken) {
        (**self).cancel(token)
    }
}
