//! Commands: user input or a fired timer, addressed to one aggregate.

use uuid::Uuid;

/// Implemented by every command the controllers accept.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name such as `competition.start`, used in log fields.
    fn command_type(&self) -> &'static str;

    /// Copied into the metadata of every event the command records.
    fn correlation_id(&self) -> Uuid;
}
