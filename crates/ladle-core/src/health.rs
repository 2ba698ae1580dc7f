use axum::http::StatusCode;

/// Liveness probe (`GET /healthz`). 200 while the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe (`GET /readyz`). Ladle services have no warm-up phase, so
/// readiness mirrors liveness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
