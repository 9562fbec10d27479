use async_trait::async_trait;
use dashmap::DashMap;

use crate::StoreResult;

/// A scoped key-value backend for raw configuration values.
///
/// Keys are full storage paths (`<scope-prefix>/<section>/<group>/<field>`);
/// values are the raw wire strings. Typed decoding lives in
/// `vitrine-model`, not here. An empty stored string is distinct from an
/// absent key.
#[async_trait]
pub trait ConfigStorage: Send + Sync {
    /// Read a raw value.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a raw value, replacing any existing one.
    async fn set(&self, key: &str, value: String) -> StoreResult<()>;

    /// Delete a key; returns whether it existed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// All pairs whose key starts with `prefix`, sorted by key.
    ///
    /// An empty prefix returns everything.
    async fn list(&self, prefix: &str) -> StoreResult<Vec<(String, String)>>;
}

/// In-memory storage on a concurrent map; the default backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ConfigStorage for MemoryStorage {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        tracing::trace!(key, "storage set");
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        tracing::trace!(key, "storage delete");
        Ok(self.entries.remove(key).is_some())
    }

    async fn list(&self, prefix: &str) -> StoreResult<Vec<(String, String)>> {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        pairs.sort();
        Ok(pairs)
    }
}
