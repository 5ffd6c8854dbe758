//! Custom error types for the gateway
//!
//! Handlers return structured errors; logging and the mapping to a
//! caller-safe message both happen here, at the HTTP boundary.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::{catalog::CatalogError, remote::RemoteError, repositories::RepositoryError};

/// Custom error type for the gateway
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A remote dependency failed and the endpoint cannot degrade
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: RemoteError,
    },

    /// Local fault; `message` is what the caller sees
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Map a catalog failure, using `message` for local faults
    pub fn catalog(message: &'static str, err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(reason) => ApiError::BadRequest(reason.to_string()),
            CatalogError::Repository(source) => ApiError::internal(message, source),
        }
    }

    pub fn internal(message: &'static str, source: RepositoryError) -> Self {
        ApiError::Internal {
            message,
            source: source.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream { message, source } => {
                error!("{}: {}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Internal { message, source } => {
                error!("{}: {:#}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
