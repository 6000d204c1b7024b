//! Index page handler.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::{AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Renders `index.html` with the UI configuration in context.
#[instrument(name = "home::index", skip(state, request_id))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);

    let html = state
        .tera
        .render("index.html", &context)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}
