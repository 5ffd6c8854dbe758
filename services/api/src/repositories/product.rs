//! Local product repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::product::{Product, ProductId, ProductPatch, Rating};
use tokio::sync::RwLock;
use tracing::info;

use super::RepositoryError;

/// A product to store, defaults already applied. `id: None` asks the
/// repository to allocate one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub rating: Option<Rating>,
    pub brand: Option<String>,
    pub stock: Option<u32>,
}

/// Storage boundary for locally created products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All local products in creation order
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Store a new product, stamping its creation time.
    ///
    /// Allocated ids come from a counter; an explicit id moves the counter
    /// past it so later allocations never reuse it. An explicit id of 0
    /// counts as absent. An explicit id that is already stored replaces that
    /// product in place. Fails with `IdsExhausted` when the counter cannot
    /// advance; nothing is stored in that case.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Shallow-merge a patch into a stored product and stamp its update
    /// time. `None` when the id is not stored locally.
    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Remove a stored product, returning it
    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

#[derive(Debug)]
struct ProductTable {
    products: Vec<Product>,
    next_id: ProductId,
}

impl ProductTable {
    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }
}

/// In-memory product repository; contents are lost on restart
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    /// Create an empty repository whose counter starts at `first_id`
    pub fn new(first_id: ProductId) -> Self {
        Self {
            table: Arc::new(RwLock::new(ProductTable {
                products: Vec::new(),
                next_id: first_id,
            })),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.products.clone())
    }

    async fn create(&self, new_product: NewProduct) -> Result<Product, RepositoryError> {
        let mut table = self.table.write().await;

        let (id, next_id) = match new_product.id.filter(|id| *id != 0) {
            Some(id) => {
                let after = id.checked_add(1).ok_or(RepositoryError::IdsExhausted)?;
                (id, table.next_id.max(after))
            }
            None => {
                let id = table.next_id;
                let after = id.checked_add(1).ok_or(RepositoryError::IdsExhausted)?;
                (id, after)
            }
        };
        table.next_id = next_id;

        let product = Product {
            id,
            title: new_product.title,
            description: new_product.description,
            price: new_product.price,
            category: new_product.category,
            image: new_product.image,
            rating: new_product.rating,
            brand: new_product.brand,
            stock: new_product.stock,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        match table.position(id) {
            Some(index) => table.products[index] = product.clone(),
            None => table.products.push(product.clone()),
        }

        info!("Total local products: {}", table.products.len());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.table.write().await;

        let Some(product) = table.products.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };

        product.apply(patch);
        product.updated_at = Some(Utc::now());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut table = self.table.write().await;

        let removed = table.position(id).map(|index| table.products.remove(index));
        Ok(removed)
    }
}
