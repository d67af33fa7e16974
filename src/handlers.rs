use crate::{
    AppState,
    error::{AppError, ErrorResponse},
    models::{Motorcycle, MotorcycleFilter, MotorcycleRequest},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

// Extractor rejections are taken as `Result` so they go through `AppError`
// and produce the same JSON error body as every other failure.

/// list_motorcycles
///
/// Lists every motorcycle, optionally narrowed by exact-match filters on
/// brand, model and active flag.
#[utoipa::path(
    get,
    path = "/api/motorcycles",
    params(MotorcycleFilter),
    responses(
        (status = 200, description = "Matching motorcycles", body = [Motorcycle]),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    )
)]
pub async fn list_motorcycles(
    State(state): State<AppState>,
    filter: Result<Query<MotorcycleFilter>, QueryRejection>,
) -> Result<Json<Vec<Motorcycle>>, AppError> {
    let Query(filter) = filter?;
    Ok(Json(state.service.list(filter).await?))
}

/// get_motorcycle
#[utoipa::path(
    get,
    path = "/api/motorcycles/{id}",
    params(("id" = i64, Path, description = "Motorcycle ID")),
    responses(
        (status = 200, description = "Found", body = Motorcycle),
        (status = 404, description = "Not Found", body = ErrorResponse)
    )
)]
pub async fn get_motorcycle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Motorcycle>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.service.get(id).await?))
}

/// create_motorcycle
///
/// Registers a new motorcycle. The license plate must not belong to any
/// motorcycle already in the inventory.
#[utoipa::path(
    post,
    path = "/api/motorcycles",
    request_body = MotorcycleRequest,
    responses(
        (status = 201, description = "Created", body = Motorcycle),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Duplicate license plate", body = ErrorResponse)
    )
)]
pub async fn create_motorcycle(
    State(state): State<AppState>,
    payload: Result<Json<MotorcycleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Motorcycle>), AppError> {
    let Json(payload) = payload?;
    let created = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// update_motorcycle
///
/// Replaces the fields of an existing motorcycle. The registered license
/// plate is kept.
#[utoipa::path(
    put,
    path = "/api/motorcycles/{id}",
    params(("id" = i64, Path, description = "Motorcycle ID")),
    request_body = MotorcycleRequest,
    responses(
        (status = 200, description = "Updated", body = Motorcycle),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse)
    )
)]
pub async fn update_motorcycle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MotorcycleRequest>, JsonRejection>,
) -> Result<Json<Motorcycle>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    Ok(Json(state.service.update(id, payload).await?))
}

/// delete_motorcycle
#[utoipa::path(
    delete,
    path = "/api/motorcycles/{id}",
    params(("id" = i64, Path, description = "Motorcycle ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = ErrorResponse)
    )
)]
pub async fn delete_motorcycle(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// get_by_brand
#[utoipa::path(
    get,
    path = "/api/motorcycles/brand/{brand}",
    params(("brand" = String, Path, description = "Exact brand name")),
    responses((status = 200, description = "Motorcycles of the brand", body = [Motorcycle]))
)]
pub async fn get_by_brand(
    State(state): State<AppState>,
    brand: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Motorcycle>>, AppError> {
    let Path(brand) = brand?;
    Ok(Json(state.service.by_brand(&brand).await?))
}

/// get_by_model
#[utoipa::path(
    get,
    path = "/api/motorcycles/model/{model}",
    params(("model" = String, Path, description = "Exact model name")),
    responses((status = 200, description = "Motorcycles of the model", body = [Motorcycle]))
)]
pub async fn get_by_model(
    State(state): State<AppState>,
    model: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Motorcycle>>, AppError> {
    let Path(model) = model?;
    Ok(Json(state.service.by_model(&model).await?))
}

/// get_by_active
///
/// Lists motorcycles whose active flag equals the path segment (`true` or `false`).
#[utoipa::path(
    get,
    path = "/api/motorcycles/active/{active}",
    params(("active" = bool, Path, description = "Active flag")),
    responses(
        (status = 200, description = "Motorcycles with the flag", body = [Motorcycle]),
        (status = 400, description = "Not a boolean", body = ErrorResponse)
    )
)]
pub async fn get_by_active(
    State(state): State<AppState>,
    active: Result<Path<bool>, PathRejection>,
) -> Result<Json<Vec<Motorcycle>>, AppError> {
    let Path(active) = active?;
    Ok(Json(state.service.by_active(active).await?))
}

/// get_by_plate
#[utoipa::path(
    get,
    path = "/api/motorcycles/plate/{plate}",
    params(("plate" = String, Path, description = "License plate")),
    responses(
        (status = 200, description = "Found", body = Motorcycle),
        (status = 404, description = "Not Found", body = ErrorResponse)
    )
)]
pub async fn get_by_plate(
    State(state): State<AppState>,
    plate: Result<Path<String>, PathRejection>,
) -> Result<Json<Motorcycle>, AppError> {
    let Path(plate) = plate?;
    Ok(Json(state.service.by_plate(&plate).await?))
}
