//! Repositories for gateway-owned state
//!
//! Each repository is a trait with an in-memory implementation; the
//! gateway only ever holds `Arc<dyn ...>` handles, so a database-backed
//! implementation can be swapped in at construction time.

use thiserror::Error;

pub mod product;
pub mod shipping;

pub use product::{InMemoryProductRepository, ProductRepository};
pub use shipping::{InMemoryShippingRepository, ShippingRepository};

/// Failure of a storage backend
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The id counter cannot advance any further
    #[error("product id space exhausted")]
    IdsExhausted,

    /// The backing store failed
    #[error("storage backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}
