//! Errors raised by the storefront client library

use common::error::StorageError;
use thiserror::Error;

/// Custom error type for storefront operations
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Client-local storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Checkout was attempted with nothing in the cart
    #[error("Your cart is empty")]
    EmptyCart,

    /// A required form field is missing or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The gateway could not be reached or returned an undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with an error status
    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Type alias for storefront results
pub type StorefrontResult<T> = Result<T, StorefrontError>;
