//! メモリ上のキー・バリューストア（テスト・オフライン用）

use crate::error::Error;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// HashMap を Mutex で包んだ KeyValueStore 実装
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, Error> {
        self.entries
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<String, Error>,
    ) -> Result<(), Error> {
        let mut entries = self.lock()?;
        let next = f(entries.get(key).cloned())?;
        entries.insert(key.to_string(), next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let kv = MemoryKeyValueStore::new();
        assert_eq!(kv.get("a").unwrap(), None);
        kv.set("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_update_failure_keeps_value() {
        let kv = MemoryKeyValueStore::new();
        kv.set("a", "1").unwrap();
        let res = kv.update("a", &mut |_| Err(Error::json("bad")));
        assert!(res.is_err());
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    }
}
