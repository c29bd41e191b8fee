//! Health check endpoint.

/// GET /health — liveness check.
pub async fn health() -> &'static str {
    "Service is healthy!"
}
