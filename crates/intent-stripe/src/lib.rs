//! # intent-stripe
//!
//! Stripe gateway for the intent-pay checkout service.
//!
//! This crate provides:
//!
//! 1. **StripeGateway** - PaymentIntents API client
//!    - Server-computed amounts, fixed payment method set
//!    - UUID idempotency keys per intent
//!
//! 2. **Webhook verification and dispatch**
//!    - HMAC-SHA256 signature verification over the raw payload
//!    - Unverified fallback for local development (no signing secret)
//!    - `FulfillmentHandler` hook for payment outcomes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intent_core::{Currency, PaymentGateway, Price};
//! use intent_stripe::{StripeGateway, FPX_PAYMENT_METHODS};
//!
//! let gateway = StripeGateway::from_env()?;
//! let price = Price::from_minor_units(2500, Currency::MYR);
//!
//! let intent = gateway.create_intent(&price, FPX_PAYMENT_METHODS).await?;
//! // Send intent.client_secret to the browser
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use intent_stripe::webhook::{dispatch_payment_event, FulfillmentHandler};
//!
//! struct MyFulfillment;
//!
//! impl FulfillmentHandler for MyFulfillment {
//!     fn on_payment_succeeded(&self, event: &PaymentEvent) -> PaymentResult<()> {
//!         // Fulfill the order, e-mail receipts, etc.
//!         Ok(())
//!     }
//! }
//!
//! // In your webhook endpoint:
//! let event = gateway.verify_webhook(&body, signature).await?;
//! dispatch_payment_event(&MyFulfillment, &event)?;
//! ```

pub mod config;
pub mod intent;
pub mod webhook;

// Re-exports
pub use config::StripeConfig;
pub use intent::{StripeGateway, FPX_PAYMENT_METHODS};
pub use webhook::{
    dispatch_payment_event, FulfillmentHandler, LoggingFulfillment,
};
