//! Error Types
//!
//! Domain-specific error types with HTTP status code mapping. Every failure
//! reaches the client as `{"message": "..."}`; upstream detail is logged only.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for every rejected bearer token
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// Reasons a bearer token was rejected by the identity provider adapter.
///
/// These never reach the client; they are collapsed into a 401.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing key id")]
    MissingKeyId,

    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    #[error("signing key not found")]
    KeyNotFound,

    #[error("missing claim: {0}")]
    MissingClaim(&'static str),

    #[error("key fetch failed: {0}")]
    KeyFetch(#[from] reqwest::Error),

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Rejected(&'static str),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("You can only list up to {limit} cars")]
    QuotaExceeded { limit: u64 },

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("{operation}")]
    Upstream {
        operation: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl UseCaseError {
    /// Wrap a repository failure with the operation-level message shown to clients
    #[must_use]
    pub fn upstream(operation: &'static str, source: RepositoryError) -> Self {
        tracing::error!(error = %source, operation, "Upstream store call failed");
        Self::Upstream { operation, source }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound { resource, .. } => format!("{resource} not found"),
            other => other.to_string(),
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid car id: {0}")]
    InvalidId(String),

    /// Request could not be served; only `operation` reaches the client
    #[error("{operation}: {detail}")]
    Failed {
        operation: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// Generic failure of `operation`, keeping `detail` for the logs only
    #[must_use]
    pub fn failed(operation: &'static str, detail: impl ToString) -> Self {
        ApiError::Failed {
            operation,
            detail: detail.to_string(),
        }
    }
}

/// Error response body structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UseCase(uc_error) => (uc_error.status_code(), uc_error.public_message()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE.to_string()),
            ApiError::InvalidId(id) => {
                tracing::debug!(car_id = %id, "Rejected malformed car id");
                (StatusCode::NOT_FOUND, "Car not found".to_string())
            }
            ApiError::Failed { operation, detail } => {
                tracing::warn!(operation, detail = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, (*operation).to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UseCase(UseCaseError::InvalidPayload(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl From<bson::oid::Error> for ApiError {
    fn from(err: bson::oid::Error) -> Self {
        ApiError::InvalidId(err.to_string())
    }
}
