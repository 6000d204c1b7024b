//! Hot-reload demo endpoint.
//!
//! Returns a fixed message with the current time, so a developer running the
//! server under a file watcher can confirm that a rebuild was picked up.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const RELOAD_MESSAGE: &str = "Hot reload is working!";

/// Body of the hot-reload check.
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Hot-reload check handler.
pub async fn hot_reload_test() -> Json<ReloadResponse> {
    Json(ReloadResponse {
        message: RELOAD_MESSAGE,
        timestamp: Utc::now(),
    })
}
