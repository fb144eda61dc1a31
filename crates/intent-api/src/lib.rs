//! # intent-api
//!
//! HTTP API layer for the intent-pay checkout service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Static checkout page serving
//! - Payment intent creation and webhook endpoints
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Static checkout page |
//! | GET | `/config` | Public client configuration |
//! | POST | `/create-payment-intent` | Create payment intent |
//! | POST | `/webhook` | Stripe webhook |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
