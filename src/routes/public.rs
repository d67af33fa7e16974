use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints that carry no inventory data.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
}
