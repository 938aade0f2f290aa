//! Stacked, self-expiring notifications.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scheduler::{Scheduler, Task, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

/// Toast severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Danger => "alert-danger",
        }
    }
}

/// Whether a toast is on screen or playing its exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Duration,
    pub phase: ToastPhase,
    expiry: Option<TimerId>,
}

/// Ordered stack of toasts; every entry is removed by timeout or dismissal.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    timeout: Duration,
    exit: Duration,
}

impl ToastQueue {
    pub fn new(timeout: Duration, exit: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            timeout,
            exit,
        }
    }

    /// Longest time a toast can stay in the stack.
    pub fn lifetime(&self) -> Duration {
        self.timeout + self.exit
    }

    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        scheduler: &mut Scheduler<Task>,
    ) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let expiry = scheduler.schedule(self.timeout, Task::ToastExpire(id));
        let message = message.into();
        debug!(toast = id.0, ?severity, %message, "toast shown");
        self.toasts.push(Toast {
            id,
            message,
            severity,
            created_at: scheduler.now(),
            phase: ToastPhase::Visible,
            expiry: Some(expiry),
        });
        id
    }

    /// Starts the exit animation of a visible toast ahead of its timeout.
    pub fn dismiss(&mut self, id: ToastId, scheduler: &mut Scheduler<Task>) -> bool {
        let Some(toast) = self.visible_mut(id) else {
            return false;
        };
        if let Some(expiry) = toast.expiry.take() {
            scheduler.cancel(expiry);
        }
        self.begin_exit(id, scheduler);
        true
    }

    pub fn expire(&mut self, id: ToastId, scheduler: &mut Scheduler<Task>) {
        if let Some(toast) = self.visible_mut(id) {
            toast.expiry = None;
            self.begin_exit(id, scheduler);
        }
    }

    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    fn visible_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts
            .iter_mut()
            .find(|toast| toast.id == id && toast.phase == ToastPhase::Visible)
    }

    fn begin_exit(&mut self, id: ToastId, scheduler: &mut Scheduler<Task>) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
            toast.phase = ToastPhase::Leaving;
            scheduler.schedule(self.exit, Task::ToastRemove(id));
        }
    }
}
