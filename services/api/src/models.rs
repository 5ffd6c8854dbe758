//! API models for request and response payloads

use common::{
    models::{MenuItem, ShippingAddress},
    product::{Product, ProductPatch},
};
use serde::Serialize;

/// A product as returned from a write: either a full stored record or
/// whatever partial view the remote catalog (or the echo fallback) produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductView {
    Stored(Product),
    Partial(ProductPatch),
}

/// Response for product deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductView>,
}

impl DeleteResponse {
    pub fn new(product: Option<ProductView>) -> Self {
        Self {
            message: "Product deleted successfully".to_string(),
            product,
        }
    }
}

/// Response for shipping submissions
#[derive(Debug, Clone, Serialize)]
pub struct ShippingResponse {
    pub success: bool,
    pub message: String,
    pub data: ShippingAddress,
}

/// Static navigation menu
pub fn navigation_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Home", "/"),
        MenuItem::new("Shop", "/shop"),
        MenuItem::new("Categories", "/categories"),
        MenuItem::new("Cart", "/cart"),
        MenuItem::new("Profile", "/profile"),
        MenuItem::new("Cards", "/cards"),
        MenuItem::new("Products", "/products"),
    ]
}
