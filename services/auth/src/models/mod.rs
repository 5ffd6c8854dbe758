//! Authentication models

pub mod user;

// Re-export for convenience
pub use user::{LoginRequest, NewUser, PublicUser, RegisterRequest, User, UserId};
