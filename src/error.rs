//! Error types for the persistence and business layers, and their mapping
//! to HTTP status codes and JSON response bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::FieldError;

/// Failures surfaced by a `MotorcycleRepository` implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The `license_plate` unique constraint rejected a write.
    #[error("license plate already registered: {0}")]
    DuplicatePlate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// AppError
///
/// The single error type returned by the service layer and the handlers.
/// Each variant maps to exactly one status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("motorcycle not found with id: {0}")]
    NotFound(i64),

    #[error("motorcycle not found with license plate: {0}")]
    PlateNotFound(String),

    #[error("a motorcycle with license plate {0} already exists")]
    DuplicatePlate(String),

    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Malformed body, query string or path segment.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // The constraint caught a race the service-level check missed.
            RepositoryError::DuplicatePlate(plate) => AppError::DuplicatePlate(plate),
            other => AppError::Repository(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// ErrorResponse
///
/// JSON body sent with every non-2xx reply.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
    /// Present only for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::PlateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicatePlate(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, fields) = match self {
            AppError::Validation(fields) => ("validation failed".to_string(), fields),
            AppError::Repository(err) => {
                // Keep driver details out of the response body.
                tracing::error!("repository failure: {:?}", err);
                ("internal server error".to_string(), Vec::new())
            }
            other => (other.to_string(), Vec::new()),
        };

        let body = ErrorResponse {
            error: message,
            status: status.as_u16(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}
