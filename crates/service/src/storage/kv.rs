use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ServiceError;

/// One `(key, value)` pair returned by a prefix scan.
#[derive(Clone, Debug, PartialEq)]
pub struct KvEntry {
    pub key: String,
    pub value: Value,
}

/// Trait abstraction for the key-value substrate.
/// Implementations can be in-memory, file-backed, or remote KV.
///
/// No ordering is promised by `get_by_prefix`, and nothing is transactional across keys.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError>;
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>, ServiceError>;
}
