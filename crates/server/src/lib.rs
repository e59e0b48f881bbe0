//! # insight-server
//!
//! Local web dashboard over the business insight report tables.
//!
//! The input tables and the persisted report tables are read once at
//! startup. Views recompute monthly aggregates per request but never fit a
//! model; forecasts come only from the tables `insight analyze` wrote.
//!
//! - `/` overview, `/forecast?horizon=3|6|12`, `/comparison`
//! - `/api/v1/kpis`, `/api/v1/monthly`, `/api/v1/forecasts`
//! - `/health`, `/health/live`, `/health/ready`

mod dashboard;
pub mod routes;
mod state;
mod widgets;

pub use state::AppState;

use axum::{routing::get, Router};
use insight_facade::{AppConfig, InsightError, Result};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the router with middleware.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard views
        .route("/", get(routes::overview))
        .route("/forecast", get(routes::forecast))
        .route("/comparison", get(routes::comparison))
        // API endpoints
        .route("/api/v1/kpis", get(routes::kpis))
        .route("/api/v1/monthly", get(routes::monthly))
        .route("/api/v1/forecasts", get(routes::forecasts))
        // Health endpoints
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .route("/health", get(routes::liveness))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Load state from `config` and serve until the process is stopped.
pub async fn serve(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| InsightError::Config(format!("invalid server address: {e}")))?;

    let state = AppState::load(config)?;
    if let Some(warning) = state.data_warning() {
        tracing::warn!("{}", warning);
    }
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("insight-server v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| InsightError::Serve(e.to_string()))
}
