use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::{Store, StorePatch, StoreReport};
use serde::Deserialize;
use service::ReportOutcome;
use tracing::info;

use crate::errors::ApiError;
use crate::metrics::{REPORTS_CREATED_TOTAL, REPORTS_MERGED_TOTAL, UPDATES_TOTAL};
use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring of the name or address.
    #[serde(default)]
    pub q: Option<String>,
}

#[utoipa::path(
    get, path = "/stores", tag = "stores",
    params(ListQuery),
    responses(
        (status = 200, description = "Stores, most recently updated first", body = [crate::openapi::StoreDoc]),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Store>>, ApiError> {
    let stores = match query.q.as_deref() {
        Some(q) => state.registry.search(q).await?,
        None => state.registry.list().await?,
    };
    Ok(Json(stores))
}

#[utoipa::path(
    post, path = "/stores", tag = "stores",
    request_body = crate::openapi::StoreReportDoc,
    responses(
        (status = 200, description = "Merged into an existing store", body = crate::openapi::StoreDoc),
        (status = 201, description = "Created", body = crate::openapi::StoreDoc),
        (status = 400, description = "Name or address missing", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<StoreReport>, JsonRejection>,
) -> Result<(StatusCode, Json<Store>), ApiError> {
    let Json(report) = payload?;
    let outcome = state.registry.report(report).await?;
    info!(id = %outcome.store().id, created = outcome.is_created(), "store report accepted via api");
    match outcome {
        ReportOutcome::Created(store) => {
            REPORTS_CREATED_TOTAL.inc();
            Ok((StatusCode::CREATED, Json(store)))
        }
        ReportOutcome::Merged(store) => {
            REPORTS_MERGED_TOTAL.inc();
            Ok((StatusCode::OK, Json(store)))
        }
    }
}

#[utoipa::path(
    get, path = "/stores/{id}", tag = "stores",
    params(("id" = String, Path, description = "Store id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StoreDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Store>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.registry.get(&id).await?))
}

#[utoipa::path(
    put, path = "/stores/{id}", tag = "stores",
    params(("id" = String, Path, description = "Store id")),
    request_body = crate::openapi::StorePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StoreDoc),
        (status = 400, description = "Malformed body or invalid hasSeating", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<StorePatch>, JsonRejection>,
) -> Result<Json<Store>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let store = state.registry.update(&id, patch).await?;
    UPDATES_TOTAL.inc();
    info!(id = %store.id, "store patched via api");
    Ok(Json(store))
}
