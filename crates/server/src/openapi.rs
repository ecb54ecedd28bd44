use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String, pub message: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(Serialize, ToSchema)]
pub struct SeedResponseDoc { pub message: String, pub count: usize }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDoc {
    pub id: String,
    pub name: String,
    pub address: String,
    /// `yes`, `no` or `unknown`
    pub has_seating: String,
    /// RFC 3339 timestamp
    pub last_updated: String,
    pub reported_by: Option<String>,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreReportDoc {
    pub name: String,
    pub address: String,
    pub has_seating: Option<String>,
    pub reporter_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePatchDoc {
    pub name: Option<String>,
    pub address: Option<String>,
    pub has_seating: Option<String>,
    pub reported_by: Option<String>,
    pub notes: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::system::health,
        crate::routes::system::init_sample_data,
        crate::routes::stores::list,
        crate::routes::stores::create,
        crate::routes::stores::get,
        crate::routes::stores::update,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            SeedResponseDoc,
            StoreDoc,
            StoreReportDoc,
            StorePatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "stores")
    )
)]
pub struct ApiDoc;
