//! # Routes
//!
//! Axum router configuration for the checkout service.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /            - Static checkout page (from `STATIC_DIR`)
/// - GET  /config      - Public client configuration
/// - POST /create-payment-intent - Create a payment intent
/// - POST /webhook     - Stripe webhook receiver (raw body)
/// - GET  /health      - Health check
pub fn create_router(state: AppState) -> Router {
    // CORS: the checkout page is served from this same origin, but the config
    // and intent endpoints stay callable from separately hosted frontends.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Checkout page and its assets; unknown paths fall through to 404 here
    let site = ServeDir::new(&state.config.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/create-payment-intent", post(handlers::create_payment_intent))
        .route("/webhook", post(handlers::stripe_webhook))
        .fallback_service(site)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
