use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::kv::{KvEntry, KvStore};

/// JSON file-backed key-value map.
///
/// Holds the whole map in memory and rewrites the file on every `set`. Writes go to a
/// sibling temp file first and are renamed into place, so a crash mid-write leaves the
/// previous snapshot intact.
#[derive(Clone)]
pub struct JsonMapStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
    file_path: PathBuf,
}

impl JsonMapStore {
    /// Open the store at `path`. Creates the file with an empty map if missing; a file
    /// that exists but does not parse is an error.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let map: HashMap<String, Value> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("{} is not a valid store file: {}", file_path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<String, Value> = HashMap::new();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        debug!(path = %file_path.display(), entries = map.len(), "opened json map store");

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }
}

async fn write_atomic(path: &std::path::Path, map: &HashMap<String, Value>) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(map).map_err(ServiceError::storage)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(ServiceError::storage)?;
    fs::rename(&tmp, path).await.map_err(ServiceError::storage)?;
    Ok(())
}

#[async_trait]
impl KvStore for JsonMapStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        // The write guard is held through the flush so snapshots hit the disk in order.
        let mut map = self.inner.write().await;
        let previous = map.insert(key.to_string(), value);
        if let Err(e) = write_atomic(&self.file_path, &map).await {
            match previous {
                Some(v) => { map.insert(key.to_string(), v); }
                None => { map.remove(key); }
            }
            return Err(e);
        }
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
