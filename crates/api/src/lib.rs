//! HTTP API server for the souq marketplace.
//!
//! Exposes the signup and checkout wizards, the fulfillment actions, and
//! the admin moderation queues over REST, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        // Signup wizard (draft-checkpointed, resumable)
        .route("/signup/start", post(routes::signup::start))
        .route("/signup/{user_id}/fields", post(routes::signup::update_field))
        .route("/signup/{user_id}/advance", post(routes::signup::advance))
        .route("/signup/{user_id}/retreat", post(routes::signup::retreat))
        // Checkout wizard (in-memory)
        .route("/checkout/start", post(routes::checkout::start))
        .route(
            "/checkout/{id}/fields",
            post(routes::checkout::update_field),
        )
        .route("/checkout/{id}/advance", post(routes::checkout::advance))
        .route("/checkout/{id}/retreat", post(routes::checkout::retreat))
        // Listings
        .route("/listings", get(routes::listings::browse))
        .route("/listings", post(routes::listings::submit))
        .route("/listings/{id}/close", post(routes::listings::close))
        // Orders
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/ship", post(routes::orders::ship))
        .route("/orders/{id}/deliver", post(routes::orders::deliver))
        .route("/orders/{id}/cancel", post(routes::orders::cancel))
        // Wallet
        .route("/wallet/{user_id}", get(routes::wallet::get))
        .route("/withdrawals", post(routes::wallet::request))
        // Admin moderation
        .route("/admin/listings", get(routes::admin::pending_listings))
        .route(
            "/admin/listings/{id}/accept",
            post(routes::admin::accept_listing),
        )
        .route(
            "/admin/listings/{id}/reject",
            post(routes::admin::reject_listing),
        )
        .route(
            "/admin/verifications",
            get(routes::admin::pending_verifications),
        )
        .route(
            "/admin/verifications/{id}/approve",
            post(routes::admin::approve_verification),
        )
        .route(
            "/admin/verifications/{id}/reject",
            post(routes::admin::reject_verification),
        )
        .route(
            "/admin/withdrawals",
            get(routes::admin::pending_withdrawals),
        )
        .route(
            "/admin/withdrawals/{id}/approve",
            post(routes::admin::approve_withdrawal),
        )
        .route(
            "/admin/withdrawals/{id}/reject",
            post(routes::admin::reject_withdrawal),
        )
        .route("/admin/escrow", get(routes::admin::on_hold_orders))
        .route(
            "/admin/orders/{id}/release",
            post(routes::admin::release_payment),
        )
        // Notifications
        .route("/notifications", get(routes::notifications::drain))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
