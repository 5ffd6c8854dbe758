//! Error types for the auth registry

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised by user storage backends
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A user with this email is already registered
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The backing store failed
    #[error("user storage failure: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Which operation an internal failure happened in; selects the message
/// returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    ListUsers,
}

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// One or more required fields were missing or blank
    #[error("{0}")]
    MissingFields(&'static str),

    /// The body is not a JSON object of the expected shape
    #[error("Invalid request body")]
    MalformedBody,

    /// Registration with an email that is already taken
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; deliberately undifferentiated
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Unexpected local fault
    #[error("{operation:?} failed: {source}")]
    Internal {
        operation: Operation,
        #[source]
        source: anyhow::Error,
    },
}

impl AuthError {
    pub fn internal(operation: Operation, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            operation,
            source: source.into(),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected auth request body: {}", rejection.body_text());
        AuthError::MalformedBody
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingFields(message) => (StatusCode::BAD_REQUEST, *message),
            AuthError::MalformedBody => (StatusCode::BAD_REQUEST, "Invalid request body"),
            AuthError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "User with this email already exists",
            ),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthError::Internal { operation, source } => {
                error!("Auth {:?} error: {:#}", operation, source);
                let message = match operation {
                    Operation::Register => "Registration failed. Please try again.",
                    Operation::Login => "Login failed. Please try again.",
                    Operation::ListUsers => "Failed to fetch users",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for auth results
pub type AuthResult<T> = Result<T, AuthError>;
