//! Shipping intake repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::models::ShippingAddress;
use tokio::sync::RwLock;

use super::RepositoryError;

/// A stored shipping submission
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRecord {
    pub address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}

/// Append-only storage for shipping submissions
#[async_trait]
pub trait ShippingRepository: Send + Sync {
    /// Append a submission, stamping its creation time
    async fn append(&self, address: ShippingAddress) -> Result<ShippingRecord, RepositoryError>;

    /// Number of stored submissions
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// In-memory shipping repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingRepository {
    records: Arc<RwLock<Vec<ShippingRecord>>>,
}

impl InMemoryShippingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShippingRepository for InMemoryShippingRepository {
    async fn append(&self, address: ShippingAddress) -> Result<ShippingRecord, RepositoryError> {
        let record = ShippingRecord {
            address,
            created_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.records.read().await.len())
    }
}
