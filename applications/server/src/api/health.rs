/// Health check API routes
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /api/health
/// Liveness check; reports the service name and build version so deploys
/// can be told apart.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "watchplan",
        version: env!("CARGO_PKG_VERSION"),
    })
}
