//! BigDemo: a diagnostics webpage.
//!
//! Each request to `/` reports the deployment's display variables, probes the
//! optional database and cache, reads host uptime and process memory, and
//! fetches container metadata from the orchestrator, all rendered into a
//! single HTML page.

pub mod config;
pub mod environment;
pub mod error;
pub mod http;
pub mod metadata;
pub mod metrics;
pub mod middleware;
pub mod probes;
pub mod routes;
pub mod snapshot;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
