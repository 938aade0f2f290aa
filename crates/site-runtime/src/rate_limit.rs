use std::time::Duration;

use crate::scheduler::{Scheduler, TimerId};

/// Runs only the last of a burst of calls, `delay` after the burst goes quiet.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending call with `task`.
    pub fn call<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> TimerId {
        self.cancel(scheduler);
        let id = scheduler.schedule(self.delay, task);
        self.pending = Some(id);
        id
    }

    pub fn cancel<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.pending.take().is_some_and(|id| scheduler.cancel(id))
    }

    pub fn is_pending<T>(&self, scheduler: &Scheduler<T>) -> bool {
        self.pending.is_some_and(|id| scheduler.is_pending(id))
    }
}

/// Runs at most once per `interval`; calls inside the cooldown are dropped, not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ready(&self, now: Duration) -> bool {
        self.last
            .is_none_or(|last| now.saturating_sub(last) >= self.interval)
    }

    pub fn call<R>(&mut self, now: Duration, action: impl FnOnce() -> R) -> Option<R> {
        if !self.ready(now) {
            return None;
        }
        self.last = Some(now);
        Some(action())
    }
}
