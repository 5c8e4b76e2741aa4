//! # Kasir API
//!
//! REST server for Kasir POS: checkout, sales reports and catalog CRUD.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir API Server                                 │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► request_logging ───► handlers            │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                          kasir-db repositories          │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                                     SQLite              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

pub use crate::config::AppConfig;
pub use crate::error::{ApiError, ErrorCode};
pub use crate::state::AppState;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,kasir=debug,sqlx=warn";

/// Builds the full router with shared state and request logging.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/checkout", post(handlers::checkout::checkout))
        .route("/report/hari-ini", get(handlers::report::today))
        .route("/report", get(handlers::report::range))
        .route(
            "/produk",
            get(handlers::product::list).post(handlers::product::create),
        )
        .route(
            "/produk/{id}",
            get(handlers::product::get)
                .put(handlers::product::update)
                .delete(handlers::product::delete),
        )
        .route(
            "/categories",
            get(handlers::category::list).post(handlers::category::create),
        )
        .route(
            "/categories/{id}",
            get(handlers::category::get)
                .put(handlers::category::update)
                .delete(handlers::category::delete),
        );

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health::health))
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();
}
