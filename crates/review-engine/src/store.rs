//! Key-value persistence of the dossier and the reference limits

use crate::error::Result;
use std::collections::HashMap;

pub const LIMITS_KEY: &str = "pozocheck.limits";
pub const DOSSIER_KEY: &str = "pozocheck.dossier";

/// String key-value storage, e.g. browser `localStorage`
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and native tools
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_last_write_wins() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(DOSSIER_KEY).unwrap(), None);
        store.set(DOSSIER_KEY, "a").unwrap();
        store.set(DOSSIER_KEY, "b").unwrap();
        assert_eq!(store.get(DOSSIER_KEY).unwrap().as_deref(), Some("b"));
        store.remove(DOSSIER_KEY).unwrap();
        assert_eq!(store.get(DOSSIER_KEY).unwrap(), None);
    }
}
