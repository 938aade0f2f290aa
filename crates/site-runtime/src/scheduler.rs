use std::time::Duration;

use crate::toast::ToastId;

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    id: TimerId,
    task: T,
}

/// Virtual-time task list: `{delay, action}` pairs that only run when the clock is advanced.
///
/// Tasks with the same due time run in the order they were scheduled.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry {
            due: self.now + delay,
            id,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|entry| entry.id == id)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Removes the earliest task due at or before `until` and moves the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(idx, _)| idx)?;
        let entry = self.pending.remove(idx);
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Moves the clock forward without running anything.
    pub fn jump_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advances the clock by `by` and returns every task that came due, in due order.
    pub fn advance(&mut self, by: Duration) -> Vec<T> {
        let until = self.now + by;
        let mut due = Vec::new();
        while let Some(task) = self.pop_due(until) {
            due.push(task);
        }
        self.jump_to(until);
        due
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deferred work the site runtime schedules on itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Revalidate { form: String, field: String },
    ClearAnimation { form: String, field: String },
    FocusField { form: String, field: String },
    ToastExpire(ToastId),
    ToastRemove(ToastId),
}
