//! Test preference stores — in-memory `PreferenceStore` implementations.

use std::collections::BTreeMap;
use std::sync::Mutex;

use adzan_core::error::DomainError;
use adzan_core::preferences::PreferenceStore;

/// A preference store that keeps values in memory and records every write.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: Mutex<BTreeMap<String, bool>>,
    writes: Mutex<Vec<(String, bool)>>,
}

impl InMemoryPreferenceStore {
    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(entries: &[(&str, bool)]) -> Self {
        let values = entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), *value))
            .collect();
        Self {
            values: Mutex::new(values),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all `set_bool` calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<(String, bool)> {
        self.writes.lock().unwrap().clone()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError> {
        Ok(self.values.lock().unwrap().get(key).copied())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError> {
        self.values.lock().unwrap().insert(key.to_owned(), value);
        self.writes.lock().unwrap().push((key.to_owned(), value));
        Ok(())
    }
}

/// A preference store that always fails. Useful for testing that storage
/// problems never break the caller.
#[derive(Debug)]
pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn get_bool(&self, _key: &str) -> Result<Option<bool>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    fn set_bool(&self, _key: &str, _value: bool) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}
