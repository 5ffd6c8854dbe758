//! Storefront client library
//!
//! The state a storefront view layer works with: the cart, saved-for-later
//! items and the signed-in user, each persisted to client-local storage;
//! catalog filtering; checkout; and an HTTP client for the gateway.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use common::storage::MemoryStorage;
//! use storefront::{cart::CartStore, saved::SavedItemsStore};
//!
//! # fn main() -> Result<(), common::error::StorageError> {
//! let storage = Arc::new(MemoryStorage::new());
//! let mut cart = CartStore::open(storage.clone())?;
//! let mut saved = SavedItemsStore::open(storage)?;
//!
//! let product = serde_json::from_str(r#"{"id": 1, "title": "Mug", "price": 4.5}"#)?;
//! saved.add(product)?;
//! saved.move_to_cart(1, |product, quantity| cart.add(product, quantity))?;
//!
//! assert_eq!(cart.quantity_of(1), Some(1));
//! assert!(saved.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod client;
pub mod error;
pub mod persistence;
pub mod saved;
pub mod session;

pub use cart::CartStore;
pub use client::GatewayClient;
pub use error::{StorefrontError, StorefrontResult};
pub use saved::SavedItemsStore;
pub use session::SessionStore;
