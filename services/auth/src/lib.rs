//! Auth registry for the storefront gateway
//!
//! In-memory user directory with argon2 password hashing. Users register and
//! log in by email; the email is the uniqueness key. There are no sessions or
//! tokens: a successful login simply returns the user record.

pub mod error;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod validation;

pub use service::AuthService;
