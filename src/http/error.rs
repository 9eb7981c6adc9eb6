//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::db::repository::RepositoryError;

/// API error response body.
///
/// The wire contract is a single human-readable `error` field; clients
/// display it verbatim without classifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => {
                warn!("Request rejected: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorBody::new(msg))
            }
            AppError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorBody::new(msg))
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
            AppError::Repository(e) => match e {
                RepositoryError::ValidationError { ref message, .. } => {
                    warn!("Validation failed: {}", e);
                    (StatusCode::BAD_REQUEST, ErrorBody::new(message.clone()))
                }
                RepositoryError::NotFound { ref message, .. } => {
                    warn!("Not found: {}", e);
                    (StatusCode::NOT_FOUND, ErrorBody::new(message.clone()))
                }
                // Details stay in the log; the client gets a generic message
                other => {
                    error!("Repository error: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("Internal server error"),
                    )
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
