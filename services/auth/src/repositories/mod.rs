//! Repositories for user storage

pub mod user;

pub use user::{InMemoryUserRepository, UserRepository};
