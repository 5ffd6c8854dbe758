//! Checkout: order summary and simulated payment
//!
//! No payment provider is contacted. Paying waits a fixed delay, then
//! empties the cart and hands back a receipt.

use std::time::Duration;

use chrono::{DateTime, Utc};
use common::models::ShippingAddress;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cart::CartStore,
    error::{StorefrontError, StorefrontResult},
};

/// Sales tax applied to the subtotal
pub const TAX_RATE: f64 = 0.08;

/// Delay standing in for payment authorization
pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// Totals shown at checkout
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: u32,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    /// Shipping is always free; tax is [`TAX_RATE`] of the subtotal
    pub fn for_cart(cart: &CartStore) -> Self {
        let subtotal = cart.total();
        let shipping = 0.0;
        let tax = subtotal * TAX_RATE;

        Self {
            item_count: cart.count(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Upi,
    NetBanking,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
        }
    }
}

/// Proof of a completed (simulated) payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub method: PaymentMethod,
    pub summary: OrderSummary,
    pub ship_to: ShippingAddress,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PaymentProcessor {
    delay: Duration,
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::with_delay(DEFAULT_PAYMENT_DELAY)
    }
}

impl PaymentProcessor {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pay for the cart and empty it.
    ///
    /// Fails without touching the cart when it is empty or the shipping
    /// address is incomplete.
    pub async fn pay(
        &self,
        cart: &mut CartStore,
        method: PaymentMethod,
        ship_to: &ShippingAddress,
    ) -> StorefrontResult<Receipt> {
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        if let Some(field) = ship_to.missing_field() {
            return Err(StorefrontError::MissingField(field));
        }

        let summary = OrderSummary::for_cart(cart);
        tokio::time::sleep(self.delay).await;

        cart.clear()?;
        info!(
            "Payment of {:.2} by {} completed",
            summary.total,
            method.label()
        );

        Ok(Receipt {
            method,
            summary,
            ship_to: ship_to.clone(),
            paid_at: Utc::now(),
        })
    }
}
