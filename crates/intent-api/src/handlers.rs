//! # Request Handlers
//!
//! Axum request handlers for the checkout service. The browser fetches
//! `/config`, posts its cart to `/create-payment-intent`, and completes the
//! payment against Stripe directly; Stripe reports the outcome back to
//! `/webhook`.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use intent_core::{OrderItem, PaymentEvent};
use intent_stripe::{dispatch_payment_event, webhook, FPX_PAYMENT_METHODS};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Public client configuration, consumed by the checkout page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Publishable key, safe to expose to the browser
    pub public_key: String,
    /// Display amount in smallest currency unit
    pub amount: i64,
    /// ISO currency code
    pub currency: String,
}

/// Create payment intent request
#[derive(Debug, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Items in the order. Opaque to the server; pricing never trusts them.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Create payment intent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Publishable key, safe to expose to the browser
    pub public_key: String,
    /// Single-use secret the browser uses to complete the intent
    pub client_secret: String,
}

/// Webhook acknowledgment body
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "intent-pay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Public client configuration
#[instrument(skip(state))]
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        public_key: state.stripe.publishable_key.clone(),
        amount: state.config.order_price.amount,
        currency: state.config.order_price.currency.to_string(),
    })
}

/// Create a payment intent for the posted order.
///
/// The amount is computed server-side from the configured pricing function;
/// whatever the client claims its items cost is ignored. Gateway failures are
/// flattened to a generic 403 so no provider detail reaches the wire.
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let price = state.pricing.order_amount(&request.items).map_err(|e| {
        error!("Order pricing failed: {}", e);
        generic_payment_failure()
    })?;

    let intent = state
        .gateway
        .create_intent(&price, FPX_PAYMENT_METHODS)
        .await
        .map_err(|e| {
            error!("Failed to create payment intent: {}", e);
            generic_payment_failure()
        })?;

    info!("Created payment intent: {}", intent.id);

    Ok(Json(CreatePaymentIntentResponse {
        public_key: state.stripe.publishable_key.clone(),
        client_secret: intent.client_secret,
    }))
}

fn generic_payment_failure() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new("Payment intent creation failed")),
    )
}

/// Handle a Stripe webhook.
///
/// With a signing secret configured, the raw body is verified before any
/// parsing; verification failures answer with a fixed 400 body and never the
/// internal error. Without a secret the payload is trusted as-is (local
/// development only). A 200 acknowledgment tells Stripe to stop redelivering.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, (StatusCode, Json<ErrorResponse>)> {
    let event: PaymentEvent = if state.verifies_webhooks() {
        let signature = headers
            .get("stripe-signature")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Missing Stripe-Signature header")),
                )
            })?;

        state
            .gateway
            .verify_webhook(&body, signature)
            .await
            .map_err(|e| {
                error!("Webhook verification failed: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Webhook verification failed")),
                )
            })?
    } else {
        webhook::parse_unverified(&body).map_err(|e| {
            error!("Webhook parse failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid webhook payload")),
            )
        })?
    };

    info!(
        "Received webhook: type={:?}, id={:?}",
        event.event_type, event.event_id
    );

    dispatch_payment_event(state.fulfillment.as_ref(), &event).map_err(|e| {
        error!("Fulfillment handler error: {}", e);
        let code = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(ErrorResponse::new("Webhook dispatch failed")))
    })?;

    Ok(Json(WebhookAck { status: "success" }))
}
