use std::process::ExitCode;

use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

const SERVICE: &str = "seating-registry";

fn init_logging() {
    // .env first so RUST_LOG, LOG_FORMAT and the config fallbacks see it
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = SERVICE, event = "logger_init", "tracing subscriber initialized");
}

/// config.toml when present, otherwise SERVER_* / STORAGE_* / TOKIO_WORKER_THREADS.
fn load_config() -> Option<AppConfig> {
    match AppConfig::load_or_env() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "invalid configuration");
            None
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();

    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let Some(cfg) = load_config() else {
        return ExitCode::FAILURE;
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = SERVICE, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = SERVICE,
        event = "start",
        %service_id,
        pid,
        version = env!("CARGO_PKG_VERSION"),
        host = %cfg.server.host,
        port = cfg.server.port,
        backend = ?cfg.storage.backend,
        storage_path = %cfg.storage.path,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "seating registry starting"
    );

    // serve() owns the Ctrl+C handling and drains in-flight requests before returning
    match rt.block_on(server::serve(cfg)) {
        Ok(()) => {
            info!(service = SERVICE, event = "stop", %service_id, pid, "server stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, event = "serve_failed", %service_id, error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
