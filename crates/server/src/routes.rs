use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service::StoreRegistry;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod stores;
pub mod system;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub registry: Arc<StoreRegistry>,
}

/// Build the full application router: store endpoints plus health, seeding, metrics and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route("/api-docs/openapi.json", get(system::openapi_json))
        .route("/init-sample-data", post(system::init_sample_data))
        .route("/stores", get(stores::list).post(stores::create))
        .route("/stores/:id", get(stores::get).put(stores::update))
        .fallback(system::not_found)
        .with_state(state)
        .layer(middleware::map_response(system::method_not_allowed_body))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
