//! Preference store abstraction.
//!
//! The widget keeps exactly one persisted setting today (the backsound
//! toggle); the store is keyed so a second flag does not need a new trait.

use crate::error::DomainError;

/// Key under which the backsound toggle is stored.
pub const BACKSOUND_ENABLED_KEY: &str = "backsound_enabled";

/// Store for small boolean user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Reads a flag; `None` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store is unreadable.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError>;

    /// Writes a flag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store is unwritable.
    fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError>;
}
