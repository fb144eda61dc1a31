//! # intent-core
//!
//! Core types and traits for the intent-pay checkout service.
//!
//! This crate provides:
//! - `PaymentGateway` trait for the payment provider seam
//! - `OrderItem` and `OrderPricing` for server-side amount calculation
//! - `PaymentEvent` and `PaymentEventType` for webhook dispatch
//! - `Currency` and `Price` money types
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use intent_core::{Currency, FixedAmountPricing, OrderPricing, Price};
//!
//! // Server-side pricing: the client's items never set the amount
//! let pricing = FixedAmountPricing::new(Price::from_minor_units(2500, Currency::MYR));
//! let price = pricing.order_amount(&items)?;
//!
//! // Create the intent through a gateway
//! let intent = gateway.create_intent(&price, &["fpx"]).await?;
//!
//! // Hand intent.client_secret to the browser
//! ```

pub mod error;
pub mod event;
pub mod gateway;
pub mod money;
pub mod order;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use event::{PaymentEvent, PaymentEventType};
pub use gateway::{BoxedPaymentGateway, PaymentGateway, PaymentIntent};
pub use money::{Currency, Price};
pub use order::{FixedAmountPricing, OrderItem, OrderPricing};
