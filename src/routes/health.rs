//! Health check endpoint for load balancers and container orchestration.
//!
//! Reports `200` while the database is reachable, with the Redis broker's
//! state included for information, and `503` once the database probe fails.

use axum::{extract::State, http::StatusCode, Json};
use tracing::instrument;

use crate::health::HealthReport;
use crate::state::AppState;

/// Health check handler.
#[instrument(name = "health::health", skip(state))]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.check().await;
    (report.status_code(), Json(report))
}
