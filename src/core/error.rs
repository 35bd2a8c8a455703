// Centralized error handling for the backend

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record with id {0} already exists")]
    Duplicate(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify a write failure, turning primary key violations into `Duplicate`
    pub fn from_write(err: sqlx::Error, id: i64) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(id),
            _ => StoreError::Database(err),
        }
    }
}

/// Errors returned by the users and favorites resources
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Path id {path_id} does not match body id {body_id}")]
    IdMismatch { path_id: i64, body_id: i64 },

    #[error("{entity} {id} already exists")]
    Conflict { entity: &'static str, id: i64 },

    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error("Unknown endpoint: {0}")]
    UnknownRoute(String),

    #[error("Internal server error")]
    Storage(#[source] StoreError),
}

impl ResourceError {
    pub fn from_store(entity: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => ResourceError::Conflict { entity, id },
            other => ResourceError::Storage(other),
        }
    }
}

/// Every body that fails to parse is a 400 with the usual JSON error shape
impl From<JsonRejection> for ResourceError {
    fn from(rejection: JsonRejection) -> Self {
        ResourceError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        use crate::models::response::ErrorResponse;

        let status = match &self {
            ResourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ResourceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ResourceError::Conflict { .. } => StatusCode::CONFLICT,
            ResourceError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            ResourceError::Storage(e) => {
                error!(error = %e, "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors from the weather proxy
///
/// Upstream failures are relayed with the provider's status and reason phrase,
/// everything else collapses into a generic 500.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Upstream returned {status}: {reason}")]
    Upstream { status: StatusCode, reason: String },

    #[error("Failed to reach upstream: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed upstream response: missing {0}")]
    MalformedResponse(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        match self {
            WeatherError::Upstream { status, reason } => (status, reason).into_response(),
            invalid @ WeatherError::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, invalid.to_string()).into_response()
            }
            other => {
                error!(error = %other, "Weather proxy failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
