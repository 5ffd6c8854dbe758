//! Request and response payloads shared by the gateway and its clients

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Shipping address as submitted at checkout.
///
/// Fields are optional on the wire so that a partially filled form still
/// deserializes and can be rejected with a validation message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub zip: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub phone: Option<String>,
}

impl ShippingAddress {
    /// Name of the first missing or blank field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        let fields = [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("phone", &self.phone),
        ];

        fields
            .into_iter()
            .find(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| name)
    }
}

/// Navigation menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

impl MenuItem {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

/// Post from the remote post feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}
