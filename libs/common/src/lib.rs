//! Common library for the storefront workspace
//!
//! This crate provides functionality shared by the gateway and the client
//! library: the product model, shared request/response payloads, and the
//! client-local key/value storage backends with their error type.

pub mod error;
pub mod lenient;
pub mod models;
pub mod product;
pub mod storage;

/// Example usage of the storage module
///
/// ```rust
/// use common::storage::{LocalStorage, MemoryStorage};
///
/// fn main() -> Result<(), common::error::StorageError> {
///     let storage = MemoryStorage::new();
///     storage.set("cartItems", "[]")?;
///     assert_eq!(storage.get("cartItems")?.as_deref(), Some("[]"));
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
