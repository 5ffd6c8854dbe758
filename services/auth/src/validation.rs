//! Input validation utilities

use crate::models::{LoginRequest, RegisterRequest};

/// Registration fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Login fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A field counts as present when it is non-empty after trimming.
/// Present values are kept as sent.
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Validate a registration payload: all four fields are required
pub fn validate_registration(payload: &RegisterRequest) -> Result<Registration, &'static str> {
    match (
        present(&payload.first_name),
        present(&payload.last_name),
        present(&payload.email),
        present(&payload.password),
    ) {
        (Some(first_name), Some(last_name), Some(email), Some(password)) => Ok(Registration {
            first_name,
            last_name,
            email,
            password,
        }),
        _ => Err("All fields are required"),
    }
}

/// Validate a login payload: email and password are required
pub fn validate_login(payload: &LoginRequest) -> Result<Credentials, &'static str> {
    match (present(&payload.email), present(&payload.password)) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err("Email and password are required"),
    }
}
