//! Wall-clock time for event timestamps.
//!
//! Game timing never reads this clock. Delays and ticks go through
//! [`crate::scheduler::Scheduler`]; the clock only stamps `occurred_at`.

use chrono::{DateTime, Utc};

/// Source of event timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
