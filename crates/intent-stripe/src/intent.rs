//! # Stripe PaymentIntents
//!
//! Implementation of the Stripe PaymentIntents API.
//! The service creates an intent for a server-computed amount and hands the
//! client secret back to the browser, which completes the payment against
//! Stripe directly.

use crate::config::StripeConfig;
use crate::webhook;
use async_trait::async_trait;
use intent_core::{
    PaymentError, PaymentEvent, PaymentGateway, PaymentIntent, PaymentResult, Price,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Payment methods offered on the checkout page.
///
/// FPX is the Malaysian online banking rail the sample checkout sells through;
/// the set is fixed here and passed through the gateway so callers could widen
/// it without touching the wire code.
pub const FPX_PAYMENT_METHODS: &[&str] = &["fpx"];

/// Stripe PaymentIntents gateway
///
/// Uses Stripe's PaymentIntents API with the browser-side confirmation flow.
pub struct StripeGateway {
    config: StripeConfig,
    client: Client,
}

impl StripeGateway {
    /// Create a new Stripe gateway
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// The configuration this gateway was built with
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self), fields(amount = price.amount, currency = %price.currency))]
    async fn create_intent(
        &self,
        price: &Price,
        payment_method_types: &[&str],
    ) -> PaymentResult<PaymentIntent> {
        if price.amount <= 0 {
            return Err(PaymentError::InvalidRequest(
                "Order amount must be positive".to_string(),
            ));
        }

        // Build form data for the Stripe API
        let mut form_params: Vec<(String, String)> = vec![
            ("amount".to_string(), price.amount.to_string()),
            ("currency".to_string(), price.currency.as_str().to_string()),
        ];
        for (i, method) in payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.to_string()));
        }

        debug!(
            "Creating Stripe payment intent: amount={}, methods={:?}",
            price.amount, payment_method_types
        );

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let idempotency_key = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &idempotency_key)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::ProviderError {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(PaymentError::ProviderError {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let intent_response: StripeIntentResponse =
            serde_json::from_str(&body).map_err(|e| {
                PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!("Created Stripe payment intent: id={}", intent_response.id);

        Ok(PaymentIntent {
            id: intent_response.id,
            client_secret: intent_response.client_secret,
        })
    }

    #[instrument(skip(self, payload, signature))]
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> PaymentResult<PaymentEvent> {
        let secret = self.config.webhook_secret.as_deref().ok_or_else(|| {
            PaymentError::Configuration("STRIPE_WEBHOOK_SECRET not set".to_string())
        })?;

        webhook::verify_and_parse(payload, signature, secret)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_core::Currency;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_gateway(base_url: &str) -> StripeGateway {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", None)
            .with_api_base_url(base_url);
        StripeGateway::new(config)
    }

    #[tokio::test]
    async fn test_create_intent_sends_server_amount() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("amount=2500"))
            .and(body_string_contains("currency=myr"))
            .and(body_string_contains("payment_method_types%5B0%5D=fpx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "pi_test_123",
                "client_secret": "pi_test_123_secret_456"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let price = Price::from_minor_units(2500, Currency::MYR);

        let intent = gateway
            .create_intent(&price, FPX_PAYMENT_METHODS)
            .await
            .unwrap();

        assert_eq!(intent.id, "pi_test_123");
        assert_eq!(intent.client_secret, "pi_test_123_secret_456");
    }

    #[tokio::test]
    async fn test_create_intent_surfaces_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Amount must convert to at least 50 cents" }
            })))
            .mount(&server)
            .await;

        let gateway = test_gateway(&server.uri());
        let price = Price::from_minor_units(1, Currency::MYR);

        let err = gateway
            .create_intent(&price, FPX_PAYMENT_METHODS)
            .await
            .unwrap_err();

        match err {
            PaymentError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert!(message.contains("at least 50 cents"));
            }
            other => panic!("Expected ProviderError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_intent_rejects_non_positive_amount() {
        let gateway = test_gateway("http://127.0.0.1:1");
        let price = Price::from_minor_units(0, Currency::MYR);

        let err = gateway
            .create_intent(&price, FPX_PAYMENT_METHODS)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_verify_webhook_requires_secret() {
        let gateway = test_gateway("http://127.0.0.1:1");

        let err = gateway
            .verify_webhook(b"{}", "t=0,v1=abc")
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Configuration(_)));
    }
}
