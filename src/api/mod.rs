//! REST API for scenario results.
//!
//! Provides three GET endpoints:
//! - `/state`: scenario inputs, LCOE, break-even year and verdict
//! - `/production`: yearly production records
//! - `/ledger`: cash-flow ledger with optional year range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::scenario::ScenarioOutcome;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the scenario run completes and wrapped in
/// `Arc`; no locks needed since all data is read-only.
pub struct AppState {
    /// Preset name or scenario file the results came from.
    pub source: String,
    /// Inputs and results of the run.
    pub outcome: ScenarioOutcome,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/production", get(handlers::get_production))
        .route("/ledger", get(handlers::get_ledger))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
