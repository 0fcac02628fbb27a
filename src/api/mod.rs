//! REST API over the simulation core.
//!
//! Provides three endpoints:
//! - `POST /simulate`: run a scenario sent as JSON
//! - `GET /summary`: summary and report of the startup scenario
//! - `GET /months`: monthly rows of the startup scenario with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::report::AnnualReport;
use crate::sim::types::AnnualSummary;

pub use types::{MonthsQuery, SimulationResponse, ValidationErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the startup simulation completes and wrapped in
/// `Arc`. No locks: every request either reads this data or runs its own
/// independent simulation.
pub struct AppState {
    /// Scenario the server was started with.
    pub scenario: ScenarioConfig,
    /// Summary of the startup scenario.
    pub summary: AnnualSummary,
    /// Derived report of the startup scenario.
    pub report: AnnualReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/simulate", post(handlers::post_simulate))
        .route("/summary", get(handlers::get_summary))
        .route("/months", get(handlers::get_months))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an error if the listener cannot bind to `addr` or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
