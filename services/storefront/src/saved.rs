//! Saved-for-later items
//!
//! A product id appears at most once. Persisted under `savedItems`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{
    error::StorageResult,
    product::{Product, ProductId},
    storage::LocalStorage,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::persistence::Persisted;

/// Storage key for saved items
pub const SAVED_KEY: &str = "savedItems";

/// A saved product and when it was saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    #[serde(flatten)]
    pub product: Product,
    pub saved_at: DateTime<Utc>,
}

/// Saved-items state container
pub struct SavedItemsStore {
    items: Vec<SavedItem>,
    persisted: Persisted<Vec<SavedItem>>,
}

impl SavedItemsStore {
    /// Open the store, hydrating it from storage when an entry exists
    pub fn open(storage: Arc<dyn LocalStorage>) -> StorageResult<Self> {
        let persisted = Persisted::new(storage, SAVED_KEY);
        let mut items: Vec<SavedItem> = persisted.load()?.unwrap_or_default();

        let mut seen = Vec::with_capacity(items.len());
        items.retain(|item| {
            let first = !seen.contains(&item.product.id);
            seen.push(item.product.id);
            first
        });

        debug!("Saved items hydrated with {} entries", items.len());
        Ok(Self { items, persisted })
    }

    fn persist(&self) -> StorageResult<()> {
        self.persisted.save(&self.items)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }

    pub fn items(&self) -> &[SavedItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&SavedItem> {
        self.position(id).map(|index| &self.items[index])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_saved(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: Product) -> StorageResult<bool> {
        if self.is_saved(product.id) {
            return Ok(false);
        }

        self.items.push(SavedItem {
            product,
            saved_at: Utc::now(),
        });
        self.persist()?;
        Ok(true)
    }

    pub fn remove(&mut self, id: ProductId) -> StorageResult<()> {
        self.items.retain(|item| item.product.id != id);
        self.persist()
    }

    pub fn clear(&mut self) -> StorageResult<()> {
        self.items.clear();
        self.persist()
    }

    /// Save the product if absent, unsave it if present. Returns whether it
    /// is saved afterwards.
    pub fn toggle(&mut self, product: Product) -> StorageResult<bool> {
        if self.is_saved(product.id) {
            self.remove(product.id)?;
            Ok(false)
        } else {
            self.add(product)
        }
    }

    /// Hand a saved product to a cart's add function with quantity 1, then
    /// unsave it.
    ///
    /// Returns `false` and leaves both sides untouched when the id is not
    /// saved. If `add_to_cart` fails the item stays saved.
    pub fn move_to_cart<F>(&mut self, id: ProductId, add_to_cart: F) -> StorageResult<bool>
    where
        F: FnOnce(Product, u32) -> StorageResult<()>,
    {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        add_to_cart(self.items[index].product.clone(), 1)?;
        self.items.remove(index);
        self.persist()?;
        Ok(true)
    }
}
