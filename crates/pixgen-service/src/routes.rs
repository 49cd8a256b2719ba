//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{credits, health, images, users, webhooks};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent image generations. Each request holds an upstream
/// rendering call open for seconds, so this is kept tight.
const GENERATION_MAX_CONCURRENT_REQUESTS: usize = 10;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `POST /v1/users/register` - Register an account
/// - `POST /v1/users/login` - Log in
///
/// ## Credits (bearer token auth)
/// - `GET /v1/credits/balance` - Get current balance
/// - `POST /v1/credits/purchase` - Initiate credit purchase
/// - `POST /v1/credits/verify` - Verify payment and credit the purchase
/// - `GET /v1/credits/purchases` - List purchase history
///
/// ## Images (bearer token auth, concurrency-limited)
/// - `POST /v1/images/generate` - Generate an image from a prompt
///
/// ## Webhooks (signature verification)
/// - `POST /webhooks/razorpay` - Razorpay payment webhooks
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Image generation proxies a slow upstream, so it carries its own
    // tighter concurrency limit.
    let image_routes = Router::new()
        .route("/generate", post(images::generate_image))
        .layer(ConcurrencyLimitLayer::new(GENERATION_MAX_CONCURRENT_REQUESTS));

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        // Users
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        // Credits
        .route("/credits/balance", get(credits::get_balance))
        .route("/credits/purchase", post(credits::purchase_credits))
        .route("/credits/verify", post(credits::verify_purchase))
        .route("/credits/purchases", get(credits::list_purchases))
        // Image generation (with its own concurrency limit)
        .nest("/images", image_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Webhooks (no rate limit - controlled by the gateway)
        .route("/webhooks/razorpay", post(webhooks::razorpay_webhook))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
