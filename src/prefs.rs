//! Preference store backends.
//!
//! The registry's sole durability mechanism is the [`PreferenceStore`]
//! capability: a string-keyed store of strings, booleans, string lists,
//! and string sets. Two backends ship with the crate: an in-memory store
//! for tests and embedding, and a JSON-file store backed by a cache that
//! is written through on every modification.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{RegistryError, RegistryResult};

/// Abstract persisted key-value backend.
///
/// A value read back under the wrong type is reported as absent rather
/// than an error; only genuine store failures surface as
/// [`RegistryError::Persistence`].
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> RegistryResult<Option<String>>;
    fn set_string(&mut self, key: &str, value: &str) -> RegistryResult<()>;

    fn get_bool(&self, key: &str) -> RegistryResult<Option<bool>>;
    fn set_bool(&mut self, key: &str, value: bool) -> RegistryResult<()>;

    fn get_string_list(&self, key: &str) -> RegistryResult<Option<Vec<String>>>;
    fn set_string_list(&mut self, key: &str, values: &[String]) -> RegistryResult<()>;

    fn get_string_set(&self, key: &str) -> RegistryResult<Option<HashSet<String>>>;
    fn set_string_set(&mut self, key: &str, values: &HashSet<String>) -> RegistryResult<()>;
}

fn value_as_string(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

fn value_as_string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

fn string_list_value(values: &[String]) -> Value {
    Value::Array(values.iter().map(|s| Value::String(s.clone())).collect())
}

/// In-memory preference store.
///
/// `Clone` yields a handle to the same underlying map, so two registry
/// instances constructed over clones of one `MemoryPrefs` observe each
/// other's writes, just like two instances sharing a prefs file.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, key: &str) -> Option<Value> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get_string(&self, key: &str) -> RegistryResult<Option<String>> {
        Ok(self.get(key).as_ref().and_then(value_as_string))
    }

    fn set_string(&mut self, key: &str, value: &str) -> RegistryResult<()> {
        self.set(key, Value::String(value.to_string()));
        Ok(())
    }

    fn get_bool(&self, key: &str) -> RegistryResult<Option<bool>> {
        Ok(self.get(key).and_then(|v| v.as_bool()))
    }

    fn set_bool(&mut self, key: &str, value: bool) -> RegistryResult<()> {
        self.set(key, Value::Bool(value));
        Ok(())
    }

    fn get_string_list(&self, key: &str) -> RegistryResult<Option<Vec<String>>> {
        Ok(self.get(key).as_ref().and_then(value_as_string_list))
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) -> RegistryResult<()> {
        self.set(key, string_list_value(values));
        Ok(())
    }

    fn get_string_set(&self, key: &str) -> RegistryResult<Option<HashSet<String>>> {
        Ok(self
            .get(key)
            .as_ref()
            .and_then(value_as_string_list)
            .map(|list| list.into_iter().collect()))
    }

    fn set_string_set(&mut self, key: &str, values: &HashSet<String>) -> RegistryResult<()> {
        let mut sorted: Vec<String> = values.iter().cloned().collect();
        sorted.sort();
        self.set(key, string_list_value(&sorted));
        Ok(())
    }
}

/// JSON-file preference store.
///
/// Values are cached in memory and written to disk on every modification,
/// so a store failure is reported on the set call that caused it. A
/// missing or unreadable file loads as an empty store (first-run state).
pub struct FilePrefs {
    /// Path to the prefs file.
    path: PathBuf,
    /// In-memory cache of stored values.
    cache: HashMap<String, Value>,
    /// Whether the cache has uncommitted changes.
    dirty: bool,
}

impl FilePrefs {
    /// Open a prefs file, loading its contents if it exists.
    pub fn new(path: PathBuf) -> Self {
        let cache = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                    eprintln!("[searchprefs] Failed to parse {}: {}", path.display(), e);
                    HashMap::new()
                }),
                Err(e) => {
                    eprintln!("[searchprefs] Failed to read {}: {}", path.display(), e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Self {
            path,
            cache,
            dirty: false,
        }
    }

    /// Open the prefs file at the default location.
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// Default prefs file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("searchprefs")
            .join("prefs.json")
    }

    fn set(&mut self, key: &str, value: Value) -> RegistryResult<()> {
        self.cache.insert(key.to_string(), value);
        self.dirty = true;
        self.flush()
    }

    /// Flush cached changes to disk.
    pub fn flush(&mut self) -> RegistryResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RegistryError::persistence)?;
        }

        let contents =
            serde_json::to_string_pretty(&self.cache).map_err(RegistryError::persistence)?;
        fs::write(&self.path, contents).map_err(RegistryError::persistence)?;

        self.dirty = false;
        Ok(())
    }
}

impl Drop for FilePrefs {
    fn drop(&mut self) {
        // Best-effort flush on drop
        let _ = self.flush();
    }
}

impl PreferenceStore for FilePrefs {
    fn get_string(&self, key: &str) -> RegistryResult<Option<String>> {
        Ok(self.cache.get(key).and_then(value_as_string))
    }

    fn set_string(&mut self, key: &str, value: &str) -> RegistryResult<()> {
        self.set(key, Value::String(value.to_string()))
    }

    fn get_bool(&self, key: &str) -> RegistryResult<Option<bool>> {
        Ok(self.cache.get(key).and_then(|v| v.as_bool()))
    }

    fn set_bool(&mut self, key: &str, value: bool) -> RegistryResult<()> {
        self.set(key, Value::Bool(value))
    }

    fn get_string_list(&self, key: &str) -> RegistryResult<Option<Vec<String>>> {
        Ok(self.cache.get(key).and_then(value_as_string_list))
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) -> RegistryResult<()> {
        self.set(key, string_list_value(values))
    }

    fn get_string_set(&self, key: &str) -> RegistryResult<Option<HashSet<String>>> {
        Ok(self
            .cache
            .get(key)
            .and_then(value_as_string_list)
            .map(|list| list.into_iter().collect()))
    }

    fn set_string_set(&mut self, key: &str, values: &HashSet<String>) -> RegistryResult<()> {
        let mut sorted: Vec<String> = values.iter().cloned().collect();
        sorted.sort();
        self.set(key, string_list_value(&sorted))
    }
}
