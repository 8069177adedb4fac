use axum::Json;
use serde::Serialize;

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the service answers
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
}

/// Health check endpoint
///
/// Returns the current status and version information of the service.
#[allow(clippy::unused_async)]
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
    })
}
