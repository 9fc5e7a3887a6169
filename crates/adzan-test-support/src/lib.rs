//! Shared test mocks and utilities for the Adzan learning widget.

mod clock;
mod preferences;
mod rng;
mod scheduler;

pub use clock::FixedClock;
pub use preferences::{FailingPreferenceStore, InMemoryPreferenceStore};
pub use rng::{MockRng, SequenceRng};
pub use scheduler::{ManualScheduler, ScheduledEntry};
