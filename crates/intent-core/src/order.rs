//! # Order Types and Pricing
//!
//! Order items posted by the checkout page, and the server-side pricing seam.
//! The client never dictates what it pays: handlers run the order items through
//! an [`OrderPricing`] implementation and send that amount to the provider.

use crate::error::PaymentResult;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A line item from the client's checkout request.
///
/// The shape is deliberately loose: the checkout page sends whatever it
/// considers an item (`{"id": "photo"}` in the sample client) and pricing
/// implementations decide what, if anything, to read from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Client-side item identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Quantity, defaults to 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Server-side order pricing.
///
/// Implementations must be pure functions of their own configuration and the
/// item list. Client-asserted totals never enter the calculation; this is the
/// invariant that keeps the amount sent to the payment provider trustworthy.
pub trait OrderPricing: Send + Sync {
    /// Compute the authoritative total for an order.
    fn order_amount(&self, items: &[OrderItem]) -> PaymentResult<Price>;
}

/// Pricing that charges a single configured price per order.
///
/// Stand-in for real catalog pricing: every order totals the configured
/// amount no matter what items arrive. Swap in a catalog-backed
/// implementation via the [`OrderPricing`] seam when real totals are needed.
#[derive(Debug, Clone)]
pub struct FixedAmountPricing {
    price: Price,
}

impl FixedAmountPricing {
    /// Create a fixed pricing function for the given price
    pub fn new(price: Price) -> Self {
        Self { price }
    }
}

impl OrderPricing for FixedAmountPricing {
    fn order_amount(&self, _items: &[OrderItem]) -> PaymentResult<Price> {
        Ok(self.price)
    }
}
