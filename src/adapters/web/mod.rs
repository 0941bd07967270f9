//! JSON HTTP adapter.
//!
//! Exposes the calculation core over a small read-only API. Every handler
//! loads holdings through the shared [`HoldingsPort`], so a cached source
//! keeps requests cheap.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;

pub struct AppState {
    pub holdings: Arc<dyn HoldingsPort + Send + Sync>,
    pub config: Arc<dyn ConfigPort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/data", get(handlers::data))
        .route("/api/portfolio", get(handlers::portfolio))
        .route("/api/projection", get(handlers::projection))
        .route("/api/timeline", get(handlers::timeline))
        .route("/api/movers", get(handlers::movers))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
