use async_trait::async_trait;
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::KvStore;
use crate::Result;

#[derive(Default)]
struct Inner {
    values: HashMap<String, String>,
    sets: HashMap<String, IndexSet<String>>,
}

/// In-process store used when no Redis URL is configured, and in tests.
///
/// Set members keep insertion order. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryKvStore {
    inner: RwLock<Inner>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryKvStore")
            .field("values", &inner.values.len())
            .field("sets", &inner.sets.len())
            .finish()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .write()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write();
        inner.values.remove(key);
        inner.sets.remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        self.inner
            .write()
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if let Some(set) = inner.sets.get_mut(key) {
            set.shift_remove(member);
            if set.is_empty() {
                inner.sets.remove(key);
            }
        }
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        Ok(self
            .inner
            .read()
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }
}
