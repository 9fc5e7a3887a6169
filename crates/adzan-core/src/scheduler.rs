//! Deferred task scheduling abstraction.
//!
//! Domain code never sleeps. It asks a [`Scheduler`] to deliver a task value
//! back to the event loop later, and keeps the returned [`TaskHandle`] so the
//! delivery can be cancelled.

use std::time::Duration;

/// Opaque identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Delivers task values of type `T` back to the owning event loop.
pub trait Scheduler<T> {
    /// Delivers `task` once, after `delay`.
    fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle;

    /// Delivers a copy of `task` every `period`, first after one period.
    fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskHandle;

    /// Stops future deliveries for `handle`. Unknown or finished handles are
    /// ignored.
    fn cancel(&mut self, handle: TaskHandle);
}
