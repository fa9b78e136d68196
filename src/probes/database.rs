//! Relational store probe.
//!
//! The SQL dialect is picked from the `DATABASE_URL` prefix. URLs that match
//! neither `postgres` nor `mysql` are treated as PostgreSQL.

use std::str::FromStr;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::instrument;

use super::{redact_url, StatusInfo};
use crate::config::{EnvSource, DATABASE_URL_VAR, PROBE_TIMEOUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
}

impl Dialect {
    /// Guess the dialect from the URL prefix, defaulting to PostgreSQL.
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("mysql") {
            Dialect::MySql
        } else {
            Dialect::Postgres
        }
    }
}

/// Probe the database named by `DATABASE_URL`.
#[instrument(name = "probe::database", skip_all)]
pub async fn check_database(env: &dyn EnvSource) -> StatusInfo {
    let Some(url) = env.get(DATABASE_URL_VAR) else {
        return StatusInfo::not_configured(DATABASE_URL_VAR);
    };

    let dialect = Dialect::from_url(&url);
    tracing::debug!(url = %redact_url(&url), ?dialect, "Probing database");

    let status = match dialect {
        Dialect::Postgres => match PgConnectOptions::from_str(&url) {
            Ok(options) => ping::<PgConnection>(&options).await,
            Err(e) => StatusInfo::unreachable(format!("Failed to open: {}", e)),
        },
        Dialect::MySql => match MySqlConnectOptions::from_str(&url) {
            Ok(options) => ping::<MySqlConnection>(&options).await,
            Err(e) => StatusInfo::unreachable(format!("Failed to open: {}", e)),
        },
    };

    if status.is_connected() {
        tracing::debug!("Database responded");
    } else {
        tracing::warn!(reason = status.message(), "Database probe failed");
    }
    status
}

/// Connect and ping within [`PROBE_TIMEOUT`].
///
/// On timeout the in-flight future is dropped along with any half-open
/// connection it holds.
async fn ping<C: Connection>(options: &C::Options) -> StatusInfo {
    match tokio::time::timeout(PROBE_TIMEOUT, connect_and_ping::<C>(options)).await {
        Ok(Ok(())) => StatusInfo::connected(),
        Ok(Err(e)) => StatusInfo::unreachable(format!("Ping failed: {}", e)),
        Err(_) => StatusInfo::unreachable(format!(
            "Ping failed: deadline of {}s exceeded",
            PROBE_TIMEOUT.as_secs()
        )),
    }
}

async fn connect_and_ping<C: Connection>(options: &C::Options) -> Result<(), sqlx::Error> {
    let mut conn = C::connect_with(options).await?;
    let result = conn.ping().await;
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Error closing database connection");
    }
    result
}
