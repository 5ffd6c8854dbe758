//! Gateway configuration
//!
//! Defaults are overlaid with `GATEWAY_*` environment variables, e.g.
//! `GATEWAY_PORT=8080` or `GATEWAY_CATALOG_URL=http://localhost:9000`.

use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Base URL of the remote product catalog
    pub catalog_url: String,
    /// Base URL of the remote post feed
    pub posts_url: String,
    /// Bearer token forwarded to the post feed
    pub bearer_token: Option<String>,
    /// API key forwarded to the post feed as `x-api-key`
    pub api_key: Option<String>,
    /// Timeout for every remote call, in seconds
    pub request_timeout_secs: u64,
    /// First id handed out to locally created products
    pub local_id_start: i64,
    /// Image used when a created product has none
    pub placeholder_image: String,
    /// Category used when a created product has none
    pub default_category: String,
}

impl GatewayConfig {
    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("catalog_url", "https://fakestoreapi.com")?
            .set_default("posts_url", "https://jsonplaceholder.typicode.com")?
            .set_default("request_timeout_secs", 10)?
            .set_default("local_id_start", 1000)?
            .set_default(
                "placeholder_image",
                "https://via.placeholder.com/200x200?text=Product",
            )?
            .set_default("default_category", "custom")?
            .add_source(Environment::with_prefix("GATEWAY"))
            .build()?
            .try_deserialize()
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Remote call timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
