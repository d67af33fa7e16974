use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Motorcycle Router Module
///
/// The inventory endpoints. All of them speak JSON and report failures with
/// the `ErrorResponse` body.
pub fn motorcycle_routes() -> Router<AppState> {
    Router::new()
        // GET /api/motorcycles?brand=...&model=...&active=...
        // POST /api/motorcycles
        .route(
            "/api/motorcycles",
            get(handlers::list_motorcycles).post(handlers::create_motorcycle),
        )
        // GET/PUT/DELETE /api/motorcycles/{id}
        .route(
            "/api/motorcycles/{id}",
            get(handlers::get_motorcycle)
                .put(handlers::update_motorcycle)
                .delete(handlers::delete_motorcycle),
        )
        // --- Lookup by attribute ---
        // Two-segment paths, so they never collide with `/{id}`.
        .route("/api/motorcycles/brand/{brand}", get(handlers::get_by_brand))
        .route("/api/motorcycles/model/{model}", get(handlers::get_by_model))
        .route("/api/motorcycles/active/{active}", get(handlers::get_by_active))
        .route("/api/motorcycles/plate/{plate}", get(handlers::get_by_plate))
}
