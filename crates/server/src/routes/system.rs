use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use common::types::Health;
use serde::Serialize;
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::metrics;
use crate::openapi::ApiDoc;
use crate::routes::ServerState;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

#[utoipa::path(
    post, path = "/init-sample-data", tag = "stores",
    responses(
        (status = 200, description = "Sample stores written", body = crate::openapi::SeedResponseDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn init_sample_data(State(state): State<ServerState>) -> Result<Json<SeedResponse>, ApiError> {
    let count = state.registry.seed_samples().await?;
    Ok(Json(SeedResponse { message: "sample stores added".into(), count }))
}

pub async fn metrics() -> (StatusCode, String) {
    metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Unmatched paths answer with the same `{error}` body as every other failure.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}

/// Give axum's bare 405 an `{error}` body, keeping its `Allow` header.
pub async fn method_not_allowed_body(resp: Response) -> Response {
    if resp.status() != StatusCode::METHOD_NOT_ALLOWED {
        return resp;
    }
    let mut out = ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into_response();
    if let Some(allow) = resp.headers().get(header::ALLOW) {
        out.headers_mut().insert(header::ALLOW, allow.clone());
    }
    out
}
