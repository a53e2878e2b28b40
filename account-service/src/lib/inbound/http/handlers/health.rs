use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

/// Liveness probe at the root path.
pub async fn root() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Account service is running",
            "version": env!("CARGO_PKG_VERSION"),
            "status": "healthy"
        })),
    )
}

/// Detailed status endpoint.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "status": "running",
            "timestamp": Utc::now().to_rfc3339()
        })),
    )
}
