//! Route handlers: dashboard views, JSON API and health probes.

use crate::dashboard::{self, Tab};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use insight_facade::breakdown::overview_totals;
use insight_facade::{Persisted, HORIZON_CHOICES};
use serde::{Deserialize, Serialize};

/// Default forecast horizon of the dashboard selector.
pub const DEFAULT_HORIZON: usize = 6;

/// Request errors surfaced to the client.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Invalid horizon {0}: choose one of 3, 6 or 12 months")]
    InvalidHorizon(usize),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match self {
            RouteError::InvalidHorizon(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!("Rejected request: {}", self);
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub horizon: Option<usize>,
}

impl ForecastQuery {
    fn horizon(&self) -> Result<usize, RouteError> {
        let horizon = self.horizon.unwrap_or(DEFAULT_HORIZON);
        if HORIZON_CHOICES.contains(&horizon) {
            Ok(horizon)
        } else {
            Err(RouteError::InvalidHorizon(horizon))
        }
    }
}

// ============================================================================
// Dashboard views
// ============================================================================

pub async fn overview(State(state): State<AppState>) -> Html<String> {
    let body = dashboard::render_overview(&state);
    Html(dashboard::page(Tab::Overview, state.data_warning(), &body))
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Html<String>, RouteError> {
    let horizon = query.horizon()?;
    let body = dashboard::render_forecast(&state, horizon);
    Ok(Html(dashboard::page(Tab::Forecast, state.data_warning(), &body)))
}

pub async fn comparison(State(state): State<AppState>) -> Html<String> {
    let body = dashboard::render_comparison(&state);
    Html(dashboard::page(Tab::Comparison, state.data_warning(), &body))
}

// ============================================================================
// JSON API
// ============================================================================

pub async fn kpis(State(state): State<AppState>) -> Json<serde_json::Value> {
    let dataset = state.dataset();
    Json(serde_json::json!({
        "data_origin": dataset.origin,
        "warning": state.data_warning(),
        "overview": overview_totals(&dataset.sales, &dataset.customers),
        "saved": state.reports().kpis,
    }))
}

pub async fn monthly(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "months": state.monthly() }))
}

pub async fn forecasts(State(state): State<AppState>) -> Json<serde_json::Value> {
    let reports = state.reports();
    Json(serde_json::json!({
        "trend": reports.trend,
        "seasonal": reports.seasonal,
    }))
}

// ============================================================================
// Health
// ============================================================================

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
struct TableStatus {
    name: &'static str,
    status: &'static str,
}

fn table_status<T>(name: &'static str, table: &Persisted<T>) -> TableStatus {
    let status = match table {
        Persisted::Loaded(_) => "loaded",
        Persisted::Missing => "missing",
        Persisted::Invalid(_) => "invalid",
    };
    TableStatus { name, status }
}

/// Readiness probe - the dataset is cached; report tables may be absent.
pub async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    let reports = state.reports();
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "data_origin": state.dataset().origin,
        "sales_records": state.dataset().sales.len(),
        "reports": [
            table_status("kpis", &reports.kpis),
            table_status("trend", &reports.trend),
            table_status("seasonal", &reports.seasonal),
        ],
    }))
}
