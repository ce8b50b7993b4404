//! Unified error handling for the JSON API.
//!
//! Provides an `ApiError` type that maps every failure at the operation
//! boundary to an HTTP status and an `{"error": ...}` body. Route handlers
//! return `Result<T, ApiError>`.
//!
//! Mapping: validation problems and malformed identifiers are client errors
//! (400), an absent document is 404, and only persistence failures are 500 -
//! with an operation-specific message that never leaks database detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use clientele_core::{MalformedIdError, ValidationError};

use crate::db::RepositoryError;

/// Application-level error type for the customer API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field was missing or empty on a create/update payload.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request body could not be decoded into the allowed field set.
    #[error("{0}")]
    BadPayload(String),

    /// The route identifier is not syntactically valid.
    #[error("{0}")]
    MalformedId(#[from] MalformedIdError),

    /// No customer exists for the given identifier.
    #[error("Customer not found")]
    NotFound,

    /// Persistence-layer failure. `message` is the client-facing text.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ApiError {
    /// Build a mapper from a repository failure to an internal error with
    /// the given client-facing message.
    pub fn internal(message: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Internal { message, source }
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadPayload(_) | Self::MalformedId(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body, `{"error": "..."}` throughout the API.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
