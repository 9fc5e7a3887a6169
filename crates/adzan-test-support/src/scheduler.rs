//! Manual scheduler — a `Scheduler` that never fires on its own.
//!
//! Tests inspect what was scheduled and decide when deferred work runs,
//! which makes settle delays and timer ticks fully deterministic.

use std::time::Duration;

use adzan_core::scheduler::{Scheduler, TaskHandle};

/// One recorded `schedule_*` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEntry<T> {
    /// Handle returned to the caller.
    pub handle: TaskHandle,
    /// Delay (one-shot) or period (repeating).
    pub delay: Duration,
    /// Whether the entry was scheduled with `schedule_repeating`.
    pub repeating: bool,
    /// The task value to deliver.
    pub task: T,
}

/// A scheduler that records entries until the test takes them.
#[derive(Debug)]
pub struct ManualScheduler<T> {
    next_id: u64,
    entries: Vec<ScheduledEntry<T>>,
    cancelled: Vec<TaskHandle>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            cancelled: Vec::new(),
        }
    }
}

impl<T: Clone> ManualScheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every uncancelled one-shot task, in schedule order.
    pub fn take_one_shots(&mut self) -> Vec<T> {
        let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| !entry.repeating);
        self.entries = kept;
        fired.into_iter().map(|entry| entry.task).collect()
    }

    /// Repeating entries that have not been cancelled.
    #[must_use]
    pub fn active_repeating(&self) -> Vec<&ScheduledEntry<T>> {
        self.entries.iter().filter(|entry| entry.repeating).collect()
    }

    /// One-shot entries that have not fired or been cancelled.
    #[must_use]
    pub fn pending_one_shots(&self) -> Vec<&ScheduledEntry<T>> {
        self.entries.iter().filter(|entry| !entry.repeating).collect()
    }

    /// Every handle passed to `cancel`, in order.
    #[must_use]
    pub fn cancelled(&self) -> &[TaskHandle] {
        &self.cancelled
    }

    fn push(&mut self, delay: Duration, repeating: bool, task: T) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle::new(self.next_id);
        self.entries.push(ScheduledEntry {
            handle,
            delay,
            repeating,
            task,
        });
        handle
    }
}

impl<T: Clone> Scheduler<T> for ManualScheduler<T> {
    fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.push(delay, false, task)
    }

    fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskHandle {
        self.push(period, true, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.cancelled.push(handle);
        self.entries.retain(|entry| entry.handle != handle);
    }
}
