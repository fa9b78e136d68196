//! Shared application state for request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tera::Tera;

use crate::config::{EnvSource, PROBE_TIMEOUT};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Nothing in here changes after startup. Every request reads its
/// configuration through `env` afresh, so a handler never sees another
/// request's data.
#[derive(Clone)]
pub struct AppState {
    pub env: Arc<dyn EnvSource>,
    pub tera: Arc<Tera>,
    /// Client for the metadata endpoint, with the probe timeout applied
    pub http: reqwest::Client,
    pub uptime_source: Arc<PathBuf>,
}

impl AppState {
    /// Creates the application state, building an HTTP client bounded by the probe timeout.
    pub fn new(
        env: Arc<dyn EnvSource>,
        tera: Tera,
        uptime_source: impl Into<PathBuf>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            env,
            tera: Arc::new(tera),
            http,
            uptime_source: Arc::new(uptime_source.into()),
        })
    }
}
