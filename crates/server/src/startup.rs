use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend, StorageConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{metrics, routes};
use service::{
    runtime,
    storage::{JsonMapStore, KvStore, MemoryKvStore},
    StoreRegistry,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured key-value backend.
pub async fn open_kv(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn KvStore>> {
    let kv = match cfg.backend {
        StorageBackend::File => {
            if let Some(dir) = cfg.data_dir() {
                runtime::ensure_env(&dir).await?;
            }
            let store = JsonMapStore::new(&cfg.path).await?;
            info!(path = %store.path().display(), "using json file storage");
            store as Arc<dyn KvStore>
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; data is lost on restart");
            MemoryKvStore::new() as Arc<dyn KvStore>
        }
    };
    Ok(kv)
}

/// Wire a registry over `kv` into the full router.
pub fn build_app(kv: Arc<dyn KvStore>) -> Router {
    metrics::init();
    let state = routes::ServerState { registry: Arc::new(StoreRegistry::new(kv)) };
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Open storage, bind the configured address and serve until Ctrl+C.
///
/// A store file that cannot be read fails here, before the listener is bound.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let kv = open_kv(&cfg.storage).await?;
    let app = build_app(kv);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "seating registry listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_memory_backend() -> anyhow::Result<()> {
        let cfg = StorageConfig { backend: StorageBackend::Memory, path: String::new() };
        let kv = open_kv(&cfg).await?;
        assert!(kv.get_by_prefix("").await?.is_empty());
        Ok(())
    }

    #[test]
    fn bind_addr_from_config() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.port = 9100;
        assert_eq!(bind_addr(&cfg)?.port(), 9100);
        Ok(())
    }
}
