//! HTTP route handlers.
//!
//! The router serves a single page at `/`; everything else falls through to a
//! 404. Request tracing is enabled via middleware that generates a unique
//! request ID for each incoming request, allowing correlation of all logs
//! within a request.

pub mod status;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_STATUS;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the status page and the not-found fallback.
pub fn create_router(state: AppState) -> Router {
    // Status page - live diagnostics, never cached
    let status_routes = Router::new()
        .route("/", any(status::index))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATUS),
        ));

    Router::new()
        .merge(status_routes)
        .fallback(status::not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
