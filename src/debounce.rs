//! Debounce: cancel-and-replace of a single deferred action.
//!
//! The debouncer does not own a timer thread. The event loop asks how long
//! until the deadline (`time_until_due`) and calls `fire_if_due` after
//! waking, so there is never more than one pending invocation.

use std::time::{Duration, Instant};

/// Deferred effect keyed by a dependency value
#[derive(Debug)]
pub struct Debounce<D> {
    deps: D,
    delay: Duration,
    deadline: Option<Instant>,
}

impl<D: PartialEq + Clone> Debounce<D> {
    /// Create a debouncer and schedule its first run, as on mount
    pub fn new(deps: D, delay: Duration, now: Instant) -> Self {
        Self {
            deps,
            delay,
            deadline: Some(now + delay),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new dependencies. Returns `true` if the pending run was
    /// replaced; identical dependencies leave the schedule untouched.
    pub fn update(&mut self, deps: D, now: Instant) -> bool {
        if deps == self.deps {
            return false;
        }
        self.deps = deps;
        self.reschedule(now);
        true
    }

    /// The delay is part of the dependency set: changing it reschedules.
    pub fn set_delay(&mut self, delay: Duration, now: Instant) {
        if delay != self.delay {
            self.delay = delay;
            self.reschedule(now);
        }
    }

    fn reschedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending run; its effect never fires
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending run fires, `None` if nothing is pending
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Run `effect` if the deadline has passed. Returns whether it ran.
    pub fn fire_if_due<F: FnOnce(&D)>(&mut self, now: Instant, effect: F) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                effect(&self.deps);
                true
            }
            _ => false,
        }
    }

    /// Run a pending effect immediately instead of waiting out the delay
    pub fn flush<F: FnOnce(&D)>(&mut self, effect: F) -> bool {
        if self.deadline.take().is_some() {
            effect(&self.deps);
            true
        } else {
            false
        }
    }
}
