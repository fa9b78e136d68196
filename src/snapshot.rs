//! The per-request page snapshot.
//!
//! Every check is independent, so they run concurrently and are joined before
//! rendering. None of them can fail the request; each one degrades its own
//! section of the page.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::environment::{environment_report, EnvVar};
use crate::metadata::{fetch_task_metadata, TaskMetadata};
use crate::metrics::{memory_used, read_uptime};
use crate::probes::{check_cache, check_database, StatusInfo};
use crate::state::AppState;

/// Everything the status page shows, computed once per request.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub env_vars: Vec<EnvVar>,
    pub db_status: StatusInfo,
    pub cache_status: StatusInfo,
    pub uptime: String,
    pub uptime_seconds: Option<f64>,
    pub memory_used: String,
    pub metadata: Option<TaskMetadata>,
    pub metadata_error: Option<String>,
    pub generated_at: String,
}

impl PageSnapshot {
    /// Run every check against the current configuration.
    pub async fn collect(state: &AppState) -> Self {
        let env = state.env.as_ref();

        let (db_status, cache_status, metadata, uptime) = tokio::join!(
            check_database(env),
            check_cache(env),
            fetch_task_metadata(env, &state.http),
            read_uptime(&state.uptime_source),
        );
        let (metadata, metadata_error) = metadata.into_parts();

        Self {
            env_vars: environment_report(env),
            db_status,
            cache_status,
            uptime: uptime.display,
            uptime_seconds: uptime.seconds,
            memory_used: memory_used(),
            metadata,
            metadata_error,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticEnv;
    use crate::templates::init_templates;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_collect_with_nothing_configured() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            Arc::new(StaticEnv::new()),
            init_templates().unwrap(),
            dir.path().join("uptime"),
        )
        .unwrap();

        let snapshot = PageSnapshot::collect(&state).await;

        assert_eq!(snapshot.env_vars.len(), 5);
        assert_eq!(snapshot.db_status, StatusInfo::not_configured("DATABASE_URL"));
        assert_eq!(snapshot.cache_status, StatusInfo::not_configured("REDIS_URL"));
        assert!(snapshot.metadata.is_none());
        assert_eq!(
            snapshot.metadata_error.as_deref(),
            Some("ECS_CONTAINER_METADATA_URI_V4 not set")
        );
        assert!(snapshot.uptime.starts_with("Unable to read"));
        assert!(snapshot.memory_used.contains("MB (Alloc)"));
    }
}
