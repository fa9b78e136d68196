//! The status page handler and the not-found fallback.

use axum::{
    extract::{OriginalUri, State},
    response::Html,
};
use tracing::instrument;

use crate::config::{PRODUCT_NAME, PROJECT_HOME, STATUS_TEMPLATE};
use crate::error::AppError;
use crate::snapshot::PageSnapshot;
use crate::state::AppState;

/// Status page handler.
///
/// Always renders: failed checks show up as messages on the page. The only
/// error is a template failure, which becomes a 500.
#[instrument(name = "status::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = PageSnapshot::collect(&state).await;

    tracing::debug!(
        db_connected = snapshot.db_status.is_connected(),
        cache_connected = snapshot.cache_status.is_connected(),
        has_metadata = snapshot.metadata.is_some(),
        "Collected status snapshot"
    );

    let mut context = tera::Context::new();
    context.insert("product_name", PRODUCT_NAME);
    context.insert("project_home", PROJECT_HOME);
    context.insert("version", env!("CARGO_PKG_VERSION"));
    context.insert("page", &snapshot);

    let html = state.tera.render(STATUS_TEMPLATE, &context)?;
    Ok(Html(html))
}

/// Every path other than `/` is a 404.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
