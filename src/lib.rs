use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub mod routes;
use routes::{motorcycles, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, RepositoryError};
pub use repository::{MotorcycleRepository, PostgresRepository, RepositoryState};
pub use service::MotorcycleService;

/// ApiDoc
///
/// Aggregates every `#[utoipa::path]` handler and `ToSchema` model into the
/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_motorcycles, handlers::get_motorcycle, handlers::create_motorcycle,
        handlers::update_motorcycle, handlers::delete_motorcycle, handlers::get_by_brand,
        handlers::get_by_model, handlers::get_by_active, handlers::get_by_plate
    ),
    components(
        schemas(
            models::Motorcycle, models::MotorcycleRequest, models::FieldError,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "moto-inventory", description = "Repair-shop motorcycle inventory API")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// The single container shared across all requests: the business layer and
/// the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub service: MotorcycleService,
    pub config: AppConfig,
}

impl AppState {
    /// Wires the service on top of the given repository.
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        Self {
            service: MotorcycleService::new(repo),
            config,
        }
    }
}

// Lets handlers take `State<AppConfig>` or `State<MotorcycleService>` directly.
impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for MotorcycleService {
    fn from_ref(state: &AppState) -> Self {
        state.service.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the observability and CORS
/// layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API, as with the shop's browser front-end.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(motorcycles::motorcycle_routes())
        .with_state(state);

    // Request id first, so the trace span can record it; propagated back on the response.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span with method, uri and the `x-request-id`
/// header so every log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
