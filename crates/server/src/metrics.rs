use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REPORTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seating_store_reports_created_total",
        "Reports that created a new store record"
    )
    .expect("register reports_created_total")
});

pub static REPORTS_MERGED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seating_store_reports_merged_total",
        "Reports merged into an existing store record"
    )
    .expect("register reports_merged_total")
});

pub static UPDATES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seating_store_updates_total",
        "Direct store updates by id"
    )
    .expect("register updates_total")
});

pub static STORAGE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seating_store_storage_errors_total",
        "Requests failed by the key-value substrate"
    )
    .expect("register storage_errors_total")
});

/// Touch every metric so they show up on `/metrics` before the first event.
pub fn init() {
    Lazy::force(&REPORTS_CREATED_TOTAL);
    Lazy::force(&REPORTS_MERGED_TOTAL);
    Lazy::force(&UPDATES_TOTAL);
    Lazy::force(&STORAGE_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
