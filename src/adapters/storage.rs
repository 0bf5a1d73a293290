use crate::domain::ports::TokenStore;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const STORAGE_FILE: &str = "storage.json";
const TOKEN_KEY: &str = "token";

/// Small persisted key/value store, the client's equivalent of browser local storage.
///
/// Values are kept as JSON in memory and flushed to `<dir>/storage.json` on every
/// write when the store is file-backed.
#[derive(Debug)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl LocalStorage {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(STORAGE_FILE);
        let entries = if path.exists() {
            let data = fs::read(&path)?;
            if data.is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_slice(&data)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!("Opened local storage at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, serde_json::Value>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn flush(&self, entries: &BTreeMap<String, serde_json::Value>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries().get(key).cloned()?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Ignoring unreadable local storage entry '{}': {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    /// Memory only changes once the file write succeeded.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl TokenStore for LocalStorage {
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.set(TOKEN_KEY, &token)
    }

    fn clear_token(&self) -> Result<()> {
        self.remove(TOKEN_KEY)
    }
}
