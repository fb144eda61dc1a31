//! # Application State
//!
//! Shared state for the Axum application. Built once at startup from the
//! environment and injected into every handler; all fields are immutable for
//! the process lifetime, so requests never observe each other's state.

use intent_core::{
    BoxedPaymentGateway, Currency, FixedAmountPricing, OrderPricing, PaymentError, PaymentResult,
    Price,
};
use intent_stripe::{FulfillmentHandler, LoggingFulfillment, StripeConfig, StripeGateway};
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory the checkout page is served from
    pub static_dir: PathBuf,
    /// Displayed and charged order price
    pub order_price: Price,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Recognized: `HOST`, `PORT`, `STATIC_DIR`, `AMOUNT` (smallest currency
    /// unit), `CURRENCY`, `ENVIRONMENT`.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok();

        let amount = match std::env::var("AMOUNT") {
            Ok(raw) => raw.parse::<i64>().map_err(|_| {
                PaymentError::Configuration(format!("AMOUNT is not an integer: {}", raw))
            })?,
            Err(_) => 2500,
        };

        let currency = match std::env::var("CURRENCY") {
            Ok(raw) => raw.parse::<Currency>()?,
            Err(_) => Currency::MYR,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4242),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            order_price: Price::from_minor_units(amount, currency),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> PaymentResult<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                PaymentError::Configuration(format!(
                    "Invalid bind address {}:{}",
                    self.host, self.port
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Stripe configuration (publishable key, webhook mode)
    pub stripe: StripeConfig,
    /// Payment gateway
    pub gateway: BoxedPaymentGateway,
    /// Server-side order pricing
    pub pricing: Arc<dyn OrderPricing>,
    /// Fulfillment hook for webhook events
    pub fulfillment: Arc<dyn FulfillmentHandler>,
}

impl AppState {
    /// Create state from the environment with the Stripe gateway and
    /// fixed-amount pricing.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load app config: {}", e))?;
        let stripe = StripeConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        let gateway = Arc::new(StripeGateway::new(stripe.clone())) as BoxedPaymentGateway;
        let pricing = Arc::new(FixedAmountPricing::new(config.order_price));

        Ok(Self {
            config,
            stripe,
            gateway,
            pricing,
            fulfillment: Arc::new(LoggingFulfillment),
        })
    }

    /// Assemble state from explicit parts (tests, custom wiring)
    pub fn with_parts(
        config: AppConfig,
        stripe: StripeConfig,
        gateway: BoxedPaymentGateway,
        pricing: Arc<dyn OrderPricing>,
        fulfillment: Arc<dyn FulfillmentHandler>,
    ) -> Self {
        Self {
            config,
            stripe,
            gateway,
            pricing,
            fulfillment,
        }
    }

    /// Whether inbound webhooks get signature-verified
    pub fn verifies_webhooks(&self) -> bool {
        self.stripe.verifies_webhooks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("AMOUNT");
        std::env::remove_var("CURRENCY");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4242);
        assert_eq!(config.order_price.amount, 2500);
        assert_eq!(config.order_price.currency, Currency::MYR);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: "static".into(),
            order_price: Price::from_minor_units(2500, Currency::MYR),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            static_dir: "static".into(),
            order_price: Price::from_minor_units(2500, Currency::MYR),
            environment: "test".to_string(),
        };

        assert!(config.socket_addr().is_err());
    }
}
