//! API error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hubdb_storage::StorageError;
use serde::Serialize;

/// Errors surfaced by route handlers.
///
/// Nothing is retried; every error becomes the response of the request that
/// produced it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A path identifier failed syntax validation.
    #[error("{0}")]
    InvalidId(String),
    /// The request body is not a usable JSON object.
    #[error("{0}")]
    InvalidBody(String),
    /// A field the route needs is absent from the body.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The filter matched no document.
    #[error("{0}")]
    NotFound(String),
    /// The store failed to execute the operation.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    /// Wraps a store failure with a description of the attempted operation.
    pub fn store(context: impl Into<String>) -> impl FnOnce(StorageError) -> Self {
        let context = context.into();
        move |source| ApiError::Store { context, source }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) | ApiError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                ErrorResponse {
                    error: context,
                    details: Some(source.to_string()),
                }
            }
            other => ErrorResponse {
                error: other.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
