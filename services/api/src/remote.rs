//! Clients for the third-party services the gateway fronts
//!
//! Both sources sit behind traits so the gateway can be exercised without
//! network access. Every call is single-attempt; callers decide how to
//! degrade.

use std::time::Duration;

use async_trait::async_trait;
use common::{
    models::Post,
    product::{Product, ProductId, ProductPatch},
};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::debug;

/// Failure talking to a remote service
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport failure, timeout, or undecodable body
    #[error("remote request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("remote returned status {0}")]
    Status(u16),
}

/// Remote product catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full remote catalog
    async fn list_products(&self) -> Result<Vec<Product>, RemoteError>;

    /// Ask the remote to update a product. The remote does not persist it.
    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductPatch, RemoteError>;

    /// Ask the remote to delete a product. The remote does not persist it.
    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductPatch>, RemoteError>;
}

/// Remote post feed
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostsSource: Send + Sync {
    /// Fetch all posts
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError>;
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status(status.as_u16()))
    }
}

/// Client for a fakestoreapi-compatible catalog
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl FakeStoreClient {
    /// Create a new catalog client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

#[async_trait]
impl CatalogSource for FakeStoreClient {
    async fn list_products(&self) -> Result<Vec<Product>, RemoteError> {
        let url = format!("{}/products", self.base_url);
        let response = check_status(self.http.get(&url).send().await?)?;
        let products: Vec<Product> = response.json().await?;

        debug!("Fetched {} remote products", products.len());
        Ok(products)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductPatch, RemoteError> {
        let response = self
            .http
            .put(self.product_url(id))
            .json(patch)
            .send()
            .await?;
        let echoed: ProductPatch = check_status(response)?.json().await?;

        Ok(echoed)
    }

    async fn delete_product(&self, id: ProductId) -> Result<Option<ProductPatch>, RemoteError> {
        let response = self.http.delete(self.product_url(id)).send().await?;
        let deleted: Option<ProductPatch> = check_status(response)?.json().await?;

        Ok(deleted)
    }
}

/// Client for a jsonplaceholder-compatible post feed
#[derive(Debug, Clone)]
pub struct JsonPlaceholderClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
    api_key: String,
}

impl JsonPlaceholderClient {
    /// Create a new post feed client. Missing credentials are sent empty.
    pub fn new(
        base_url: &str,
        bearer_token: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.unwrap_or_default(),
            api_key: api_key.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl PostsSource for JsonPlaceholderClient {
    async fn list_posts(&self) -> Result<Vec<Post>, RemoteError> {
        let response = self
            .http
            .get(format!("{}/posts", self.base_url))
            .bearer_auth(&self.bearer_token)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;
        let posts: Vec<Post> = check_status(response)?.json().await?;

        Ok(posts)
    }
}
