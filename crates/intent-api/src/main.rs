//! # Intent-Pay
//!
//! Checkout backend: serves the checkout page, creates Stripe payment
//! intents for server-computed amounts, and receives payment-status webhooks.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export AMOUNT=2500
//! export CURRENCY=myr
//!
//! # Run the server
//! intent-pay
//! ```

use intent_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Order price: {}", state.config.order_price.display());
    info!("Static dir: {}", state.config.static_dir.display());

    if state.verifies_webhooks() {
        info!("Webhook signature verification: enabled");
    } else {
        warn!("Webhook signature verification: DISABLED (no STRIPE_WEBHOOK_SECRET); local development only");
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Intent-Pay starting on http://{}", addr);

    if !is_prod {
        info!("🛒 Checkout page: http://{}/", addr);
        info!("💳 Intent: POST http://{}/create-payment-intent", addr);
        info!("🔔 Webhook: POST http://{}/webhook", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
