//! # Payment Gateway Trait
//!
//! Seam between the HTTP layer and the payment provider. The service consumes
//! exactly two provider operations: create an intent, and verify-and-parse an
//! inbound webhook. Implementations: Stripe (intent-stripe crate), mocks in
//! tests.

use crate::error::PaymentResult;
use crate::event::PaymentEvent;
use crate::money::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Transient reference to a provider-owned payment intent.
///
/// Held only for the duration of a single request/response cycle; the
/// provider owns the intent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's intent ID
    pub id: String,
    /// Single-use token the browser uses to complete this intent
    pub client_secret: String,
}

/// Payment provider operations consumed by this service.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for a server-computed price.
    ///
    /// # Arguments
    /// * `price` - Authoritative order total, computed server-side
    /// * `payment_method_types` - Allowed payment method set
    async fn create_intent(
        &self,
        price: &Price,
        payment_method_types: &[&str],
    ) -> PaymentResult<PaymentIntent>;

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes (unparsed, as signed)
    /// * `signature` - Signature header from the request
    async fn verify_webhook(&self, payload: &[u8], signature: &str)
        -> PaymentResult<PaymentEvent>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway trait object
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
