//! Application state shared across handlers

use std::sync::Arc;

use anyhow::Result;
use auth::{
    AuthService, password::PasswordHasher, repositories::InMemoryUserRepository,
};
use axum::extract::FromRef;

use crate::{
    catalog::{Catalog, ProductDefaults},
    config::GatewayConfig,
    remote::{FakeStoreClient, JsonPlaceholderClient, PostsSource},
    repositories::{InMemoryProductRepository, InMemoryShippingRepository, ShippingRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub posts: Arc<dyn PostsSource>,
    pub shipping: Arc<dyn ShippingRepository>,
    pub auth: AuthService,
}

impl AppState {
    /// Wire the remote clients and in-memory repositories from configuration
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let timeout = config.request_timeout();

        let catalog = Catalog::new(
            Arc::new(FakeStoreClient::new(&config.catalog_url, timeout)?),
            Arc::new(InMemoryProductRepository::new(config.local_id_start)),
            ProductDefaults {
                category: config.default_category.clone(),
                image: config.placeholder_image.clone(),
            },
        );

        let posts = JsonPlaceholderClient::new(
            &config.posts_url,
            config.bearer_token.clone(),
            config.api_key.clone(),
            timeout,
        )?;

        let auth = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::default(),
        );

        Ok(Self {
            catalog,
            posts: Arc::new(posts),
            shipping: Arc::new(InMemoryShippingRepository::new()),
            auth,
        })
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
