//! Shopping cart
//!
//! Lines are kept in insertion order and keyed by product id. Every
//! mutation rewrites the whole collection under the `cartItems` key.

use std::sync::Arc;

use common::{
    error::StorageResult,
    product::{Product, ProductId},
    storage::LocalStorage,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::persistence::Persisted;

/// Storage key for the cart
pub const CART_KEY: &str = "cartItems";

/// A product in the cart with its quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Cart state container
pub struct CartStore {
    items: Vec<CartItem>,
    persisted: Persisted<Vec<CartItem>>,
}

impl CartStore {
    /// Open the cart, hydrating it from storage when an entry exists
    pub fn open(storage: Arc<dyn LocalStorage>) -> StorageResult<Self> {
        let persisted = Persisted::new(storage, CART_KEY);
        let mut items: Vec<CartItem> = persisted.load()?.unwrap_or_default();

        // Stored lines must keep the one-line-per-id, positive-quantity shape
        let mut seen = Vec::with_capacity(items.len());
        items.retain(|item| {
            let keep = item.quantity > 0 && !seen.contains(&item.product.id);
            seen.push(item.product.id);
            keep
        });

        debug!("Cart hydrated with {} lines", items.len());
        Ok(Self { items, persisted })
    }

    fn persist(&self) -> StorageResult<()> {
        self.persisted.save(&self.items)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add `quantity` units of a product, appending a line if it is new.
    /// Adding zero units does nothing.
    pub fn add(&mut self, product: Product, quantity: u32) -> StorageResult<()> {
        if quantity == 0 {
            return Ok(());
        }

        match self.position(product.id) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(CartItem { product, quantity }),
        }

        self.persist()
    }

    pub fn remove(&mut self, id: ProductId) -> StorageResult<()> {
        self.items.retain(|item| item.product.id != id);
        self.persist()
    }

    /// Set the quantity of a line; zero or less removes it
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> StorageResult<()> {
        if quantity <= 0 {
            return self.remove(id);
        }

        if let Some(index) = self.position(id) {
            self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.persist()
    }

    pub fn clear(&mut self) -> StorageResult<()> {
        self.items.clear();
        self.persist()
    }

    /// Sum of price times quantity over all lines
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.position(id).map(|index| self.items[index].quantity)
    }

    /// Hand a line's product to `save` and drop the line.
    ///
    /// Returns `false` and changes nothing when the product is not in the
    /// cart. If `save` fails the line is kept.
    pub fn move_to_saved<F>(&mut self, id: ProductId, save: F) -> StorageResult<bool>
    where
        F: FnOnce(Product) -> StorageResult<()>,
    {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        save(self.items[index].product.clone())?;
        self.items.remove(index);
        self.persist()?;
        Ok(true)
    }
}
