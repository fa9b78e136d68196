//! Container orchestrator task metadata.
//!
//! Fetches `<ECS_CONTAINER_METADATA_URI_V4>/task` and decodes the few fields
//! the status page shows. Decoding is forgiving: unknown fields are ignored and
//! missing ones default to empty.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{EnvSource, METADATA_TASK_PATH, METADATA_URI_VAR};

/// The task-level metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskMetadata {
    #[serde(rename(deserialize = "AvailabilityZone"))]
    pub availability_zone: String,
    #[serde(rename(deserialize = "Containers"))]
    pub containers: Vec<ContainerMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerMetadata {
    #[serde(rename(deserialize = "ImageID"))]
    pub image_id: String,
    #[serde(rename(deserialize = "Name"))]
    pub name: String,
}

/// Either the decoded metadata or the reason it is unavailable, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Available(TaskMetadata),
    Unavailable(String),
}

impl MetadataOutcome {
    /// Split into the `(metadata, error)` pair the page template expects.
    pub fn into_parts(self) -> (Option<TaskMetadata>, Option<String>) {
        match self {
            MetadataOutcome::Available(metadata) => (Some(metadata), None),
            MetadataOutcome::Unavailable(error) => (None, Some(error)),
        }
    }
}

/// Fetch task metadata. `client` must carry the probe timeout.
#[instrument(name = "probe::metadata", skip_all)]
pub async fn fetch_task_metadata(env: &dyn EnvSource, client: &reqwest::Client) -> MetadataOutcome {
    let Some(base) = env.get(METADATA_URI_VAR) else {
        return MetadataOutcome::Unavailable(format!("{} not set", METADATA_URI_VAR));
    };

    let url = format!("{}/{}", base.trim_end_matches('/'), METADATA_TASK_PATH);
    tracing::debug!(%url, "Fetching task metadata");

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%url, error = %e, "Metadata fetch failed");
            return MetadataOutcome::Unavailable(format!("Failed to fetch: {}", e));
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "Metadata endpoint returned non-success status");
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(%url, error = %e, "Metadata response unreadable");
            return MetadataOutcome::Unavailable(format!("Failed to read response: {}", e));
        }
    };

    match serde_json::from_str::<TaskMetadata>(&body) {
        Ok(metadata) => {
            tracing::debug!(
                availability_zone = %metadata.availability_zone,
                containers = metadata.containers.len(),
                "Task metadata decoded"
            );
            MetadataOutcome::Available(metadata)
        }
        Err(e) => {
            tracing::warn!(%url, error = %e, "Metadata response is not valid JSON");
            MetadataOutcome::Unavailable(format!("Failed to parse JSON: {}", e))
        }
    }
}
