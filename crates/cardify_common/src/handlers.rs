// --- File: crates/cardify_common/src/handlers.rs ---
use axum::Json;

use crate::error::{not_found, CardifyError};
use crate::models::HealthResponse;

/// Liveness probe.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health", // Path relative to /api
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Cardify"
))]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Fallback for unmatched routes, rendered as a JSON 404.
pub async fn not_found_handler(uri: axum::http::Uri) -> CardifyError {
    not_found(format!("No route for {}", uri.path()))
}
