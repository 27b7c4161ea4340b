use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::domains::vendors::Vendor;
use crate::server::app::AppState;

const DB_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: StoreHealth,
    /// Requests currently tracked on the status board
    tracked_requests: usize,
}

#[derive(Serialize)]
pub struct StoreHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendors: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// GET /health
///
/// Counts stored vendors (5s timeout). 200 when the store answers, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.deps;

    let database = match tokio::time::timeout(DB_TIMEOUT, Vendor::count(&deps.db_pool)).await {
        Ok(Ok(count)) => StoreHealth {
            status: "ok",
            vendors: Some(count),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            status: "error",
            vendors: None,
            error: Some(format!("{:#}", e)),
        },
        Err(_) => StoreHealth {
            status: "error",
            vendors: None,
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    let (code, status) = if database.vendors.is_some() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            tracked_requests: deps.status.len().await,
        }),
    )
}
