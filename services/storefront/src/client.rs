//! HTTP client for the storefront gateway

use std::time::Duration;

use common::{
    models::{MenuItem, Post, ShippingAddress},
    product::{Product, ProductId, ProductPatch},
};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{StorefrontError, StorefrontResult},
    session::SessionUser,
};

/// Registration form
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Gateway answer to a product delete
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deleted {
    pub message: String,
    #[serde(default)]
    pub product: Option<ProductPatch>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: SessionUser,
}

#[derive(Deserialize)]
struct ShippingEnvelope {
    data: ShippingAddress,
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base_url`, e.g. `http://localhost:3001`
    pub fn new(base_url: &str, timeout: Duration) -> StorefrontResult<Self> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> StorefrontResult<()> {
        let response = self.http.get(self.url("/health")).send().await?;
        decode::<Value>(response).await.map(|_| ())
    }

    pub async fn products(&self) -> StorefrontResult<Vec<Product>> {
        let response = self.http.get(self.url("/api/products")).send().await?;
        decode(response).await
    }

    pub async fn create_product(&self, product: &ProductPatch) -> StorefrontResult<Product> {
        let response = self
            .http
            .post(self.url("/api/products"))
            .json(product)
            .send()
            .await?;
        decode(response).await
    }

    /// The gateway may answer with a partial record for remote products
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> StorefrontResult<ProductPatch> {
        let response = self
            .http
            .put(self.url(&format!("/api/products/{id}")))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_product(&self, id: ProductId) -> StorefrontResult<Deleted> {
        let response = self
            .http
            .delete(self.url(&format!("/api/products/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn posts(&self) -> StorefrontResult<Vec<Post>> {
        let response = self.http.get(self.url("/api/posts")).send().await?;
        decode(response).await
    }

    pub async fn menu(&self) -> StorefrontResult<Vec<MenuItem>> {
        let response = self.http.get(self.url("/api/menu")).send().await?;
        decode(response).await
    }

    pub async fn register(&self, form: &RegisterForm) -> StorefrontResult<SessionUser> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(form)
            .send()
            .await?;
        let envelope: UserEnvelope = decode(response).await?;
        Ok(envelope.user)
    }

    pub async fn login(&self, email: &str, password: &str) -> StorefrontResult<SessionUser> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let envelope: UserEnvelope = decode(response).await?;
        Ok(envelope.user)
    }

    /// Submit a shipping address. Incomplete addresses are rejected locally
    /// without a request.
    pub async fn submit_shipping(
        &self,
        address: &ShippingAddress,
    ) -> StorefrontResult<ShippingAddress> {
        if let Some(field) = address.missing_field() {
            return Err(StorefrontError::MissingField(field));
        }

        let response = self
            .http
            .post(self.url("/api/shipping"))
            .json(address)
            .send()
            .await?;
        let envelope: ShippingEnvelope = decode(response).await?;
        Ok(envelope.data)
    }
}

/// Decode a success body, or turn an error status into
/// [`StorefrontError::Api`] using the body's `message` or `error` field
async fn decode<T: DeserializeOwned>(response: Response) -> StorefrontResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = error_message(status, &body);
    debug!("Gateway error {}: {}", status, message);

    Err(StorefrontError::Api {
        status: status.as_u16(),
        message,
    })
}

fn error_message(status: StatusCode, body: &Value) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_message_then_error() {
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, &json!({"success": false, "message": "Invalid email or password"})),
            "Invalid email or password"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, &json!({"error": "All fields are required"})),
            "All fields are required"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, &Value::Null),
            "Bad Gateway"
        );
    }

    #[tokio::test]
    async fn test_incomplete_shipping_is_rejected_locally() {
        // Nothing listens here; a request would fail with Http instead
        let client = GatewayClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();

        let result = client.submit_shipping(&ShippingAddress::default()).await;
        assert!(matches!(result, Err(StorefrontError::MissingField("name"))));
    }
}
