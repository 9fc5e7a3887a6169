//! JSON-file preference store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use adzan_core::error::DomainError;
use adzan_core::preferences::PreferenceStore;
use tracing::debug;

/// Environment variable that overrides the preference file location.
pub const PREFERENCES_PATH_ENV: &str = "ADZAN_PREFERENCES";

/// Stores flags as a flat JSON object, e.g. `{"backsound_enabled": true}`.
///
/// Unknown keys already in the file are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Uses the file at `path`. It need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the path from `ADZAN_PREFERENCES`, then
    /// `$XDG_CONFIG_HOME/adzan-widget/preferences.json`, then
    /// `$HOME/.config/adzan-widget/preferences.json`.
    #[must_use]
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(PREFERENCES_PATH_ENV) {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(base.join("adzan-widget").join("preferences.json"))
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>, DomainError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Infrastructure(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, values: &BTreeMap<String, serde_json::Value>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get_bool(&self, key: &str) -> Result<Option<bool>, DomainError> {
        let values = self.read_all()?;
        Ok(values.get(key).and_then(serde_json::Value::as_bool))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), DomainError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_owned(), serde_json::Value::Bool(value));
        self.write_all(&values).map_err(|e| {
            DomainError::Infrastructure(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(key, value, path = %self.path.display(), "preference stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use adzan_core::preferences::BACKSOUND_ENABLED_KEY;
    use uuid::Uuid;

    use super::*;

    fn temp_store() -> JsonFilePreferenceStore {
        let dir = std::env::temp_dir().join(format!("adzan-prefs-{}", Uuid::new_v4()));
        JsonFilePreferenceStore::new(dir.join("preferences.json"))
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let store = temp_store();
        assert_eq!(store.get_bool(BACKSOUND_ENABLED_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips_through_file() {
        let store = temp_store();

        store.set_bool(BACKSOUND_ENABLED_KEY, false).unwrap();

        assert_eq!(store.get_bool(BACKSOUND_ENABLED_KEY).unwrap(), Some(false));
        let text = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json, serde_json::json!({ "backsound_enabled": false }));
    }

    #[test]
    fn test_write_preserves_other_keys() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"theme":"dark","backsound_enabled":true}"#).unwrap();

        store.set_bool(BACKSOUND_ENABLED_KEY, false).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["backsound_enabled"], false);
    }

    #[test]
    fn test_corrupt_file_is_infrastructure_error_on_read() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let result = store.get_bool(BACKSOUND_ENABLED_KEY);

        match result {
            Err(DomainError::Infrastructure(msg)) => assert!(msg.contains("failed to parse")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[test]
    fn test_non_boolean_value_reads_as_absent() {
        let store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"backsound_enabled":"yes"}"#).unwrap();

        assert_eq!(store.get_bool(BACKSOUND_ENABLED_KEY).unwrap(), None);
    }
}
