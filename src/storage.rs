use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;

/// Key under which the user's acceptance of the disclaimer is recorded.
pub const KEY_USER_AGREE_DISCLAIMER: &str = "USER_AGREE_DISCLAIMER";

/// Small string key-value persistence, handed to whatever needs it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A flat JSON object on disk. Every `set` rewrites the file.
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, format!("{json}\n"))?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn has_agreed_disclaimer(store: &dyn KeyValueStore) -> bool {
    store.get(KEY_USER_AGREE_DISCLAIMER).as_deref() == Some("true")
}

pub fn record_disclaimer_agreement(store: &mut dyn KeyValueStore) -> Result<()> {
    store.set(KEY_USER_AGREE_DISCLAIMER, "true")
}
