use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::kv::{KvEntry, KvStore};

/// Process-local key-value map. Contents vanish with the process.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryKvStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| KvEntry { key: k.clone(), value: v.clone() })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_get_set_and_prefix() -> Result<(), anyhow::Error> {
        let kv = MemoryKvStore::new();
        assert_eq!(kv.get("store:a").await?, None);

        kv.set("store:a", json!({"n": 1})).await?;
        kv.set("store:b", json!({"n": 2})).await?;
        kv.set("other:c", json!({"n": 3})).await?;
        kv.set("store:a", json!({"n": 10})).await?;

        assert_eq!(kv.get("store:a").await?, Some(json!({"n": 10})));
        assert_eq!(kv.len().await, 3);

        let mut keys: Vec<_> = kv.get_by_prefix("store:").await?.into_iter().map(|e| e.key).collect();
        keys.sort();
        assert_eq!(keys, vec!["store:a", "store:b"]);
        assert!(kv.get_by_prefix("nothing:").await?.is_empty());
        Ok(())
    }
}
