//! Catalog gateway: merges the remote catalog with locally created products
//!
//! Remote failures never reach the caller. Listing degrades to local
//! products only; writes against ids that are not local fall through to the
//! remote catalog and degrade to an echo of the request.

use std::collections::HashSet;
use std::sync::Arc;

use common::product::{Product, ProductId, ProductPatch};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{DeleteResponse, ProductView},
    remote::CatalogSource,
    repositories::{ProductRepository, RepositoryError, product::NewProduct},
};

/// Catalog operation failure
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request payload is invalid
    #[error("{0}")]
    Invalid(&'static str),

    /// Local storage failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Values filled in for fields a created product omits
#[derive(Debug, Clone)]
pub struct ProductDefaults {
    pub category: String,
    pub image: String,
}

/// Unified product view over the remote catalog and the local repository
#[derive(Clone)]
pub struct Catalog {
    remote: Arc<dyn CatalogSource>,
    local: Arc<dyn ProductRepository>,
    defaults: ProductDefaults,
}

fn validate_price(price: Option<f64>) -> Result<(), CatalogError> {
    match price {
        Some(price) if !price.is_finite() || price < 0.0 => {
            Err(CatalogError::Invalid("Price must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

/// Explicit ids must leave room for the local counter to move past them
fn validate_id(id: Option<ProductId>) -> Result<(), CatalogError> {
    match id {
        Some(id) if id < 0 || id == ProductId::MAX => {
            Err(CatalogError::Invalid("Product id is out of range"))
        }
        _ => Ok(()),
    }
}

impl Catalog {
    /// Create a new catalog
    pub fn new(
        remote: Arc<dyn CatalogSource>,
        local: Arc<dyn ProductRepository>,
        defaults: ProductDefaults,
    ) -> Self {
        Self {
            remote,
            local,
            defaults,
        }
    }

    /// Remote products followed by local products.
    ///
    /// A local product shadows a remote one with the same id, so ids stay
    /// unique in the merged view. When the remote is unreachable only local
    /// products are returned.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let local = self.local.get_all().await?;

        let remote = match self.remote.list_products().await {
            Ok(remote) => remote,
            Err(e) => {
                warn!("Remote catalog unavailable, returning local products only: {}", e);
                return Ok(local);
            }
        };

        let local_ids: HashSet<ProductId> = local.iter().map(|product| product.id).collect();
        let remote_count = remote.len();

        let mut merged: Vec<Product> = remote
            .into_iter()
            .filter(|product| !local_ids.contains(&product.id))
            .collect();
        let shadowed = remote_count - merged.len();
        merged.extend(local);

        info!(
            "Returning {} products ({} from API, {} local, {} shadowed)",
            merged.len(),
            remote_count,
            local_ids.len(),
            shadowed
        );
        Ok(merged)
    }

    /// Create a local product from a partial payload
    pub async fn create(&self, payload: ProductPatch) -> Result<Product, CatalogError> {
        validate_price(payload.price)?;
        validate_id(payload.id)?;

        let product = self
            .local
            .create(NewProduct {
                id: payload.id,
                title: payload.title.unwrap_or_default(),
                description: payload.description.unwrap_or_default(),
                price: payload.price.unwrap_or(0.0),
                category: payload
                    .category
                    .unwrap_or_else(|| self.defaults.category.clone()),
                image: payload.image.unwrap_or_else(|| self.defaults.image.clone()),
                rating: payload.rating,
                brand: payload.brand,
                stock: payload.stock,
            })
            .await?;

        info!("Product added: {} ({})", product.id, product.title);
        Ok(product)
    }

    /// Update a product.
    ///
    /// Local products are merged and stamped. Anything else goes to the
    /// remote catalog, whose answer is returned as-is; if that fails the
    /// request is echoed back with the id.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductView, CatalogError> {
        validate_price(patch.price)?;

        if let Some(updated) = self.local.update(id, &patch).await? {
            info!("Local product updated: {}", id);
            return Ok(ProductView::Stored(updated));
        }

        match self.remote.update_product(id, &patch).await {
            Ok(remote) => {
                info!("Remote product update accepted for {}", id);
                Ok(ProductView::Partial(remote))
            }
            Err(e) => {
                warn!("Remote update of {} failed, echoing request: {}", id, e);
                Ok(ProductView::Partial(patch.with_id(id)))
            }
        }
    }

    /// Delete a product. Always reports success unless local storage fails.
    pub async fn delete(&self, id: ProductId) -> Result<DeleteResponse, CatalogError> {
        if let Some(deleted) = self.local.delete(id).await? {
            info!("Local product deleted: {}", id);
            return Ok(DeleteResponse::new(Some(ProductView::Stored(deleted))));
        }

        match self.remote.delete_product(id).await {
            Ok(remote) => {
                info!("Remote product delete accepted for {}", id);
                Ok(DeleteResponse::new(remote.map(ProductView::Partial)))
            }
            Err(e) => {
                warn!("Remote delete of {} failed, reporting success: {}", id, e);
                Ok(DeleteResponse::new(None))
            }
        }
    }
}
