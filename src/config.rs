//! Configuration sources and constants.
//!
//! Process-level settings (port, logging) come from the command line with
//! environment fallbacks. Everything the status page displays or probes is read
//! per request through an [`EnvSource`], so handlers never touch process state
//! directly and tests can substitute their own values.

use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Display-only variables, shown in this order on the status page
pub const DISPLAY_ENV_VARS: [&str; 5] = [
    "TAP_DEPLOY_NUMBER",
    "TAP_DOCKER_TAG",
    "TAP_APP_URL",
    "TAP_APP_NAME",
    "TAP_TEAM_NAME",
];

/// Connection URL for the relational store probe
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Connection URL for the cache store probe
pub const REDIS_URL_VAR: &str = "REDIS_URL";

/// Base URI of the container orchestrator's task metadata endpoint
pub const METADATA_URI_VAR: &str = "ECS_CONTAINER_METADATA_URI_V4";

// =============================================================================
// Probe Constants
// =============================================================================

/// Deadline for every outbound connect, ping or fetch
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Message reported by a probe that got a healthy answer
pub const CONNECTED_MESSAGE: &str = "Connected and responding";

/// Path appended to the metadata base URI
pub const METADATA_TASK_PATH: &str = "task";

/// Host uptime source; first whitespace-delimited field is seconds since boot
pub const DEFAULT_UPTIME_SOURCE: &str = "/proc/uptime";

// =============================================================================
// Page Constants
// =============================================================================

/// Product name shown in the page header and title
pub const PRODUCT_NAME: &str = "BigDemo";

/// Footer link text
pub const PROJECT_HOME: &str = "github.com/tapitalee/bigdemo";

/// Name of the status page template
pub const STATUS_TEMPLATE: &str = "status.html";

/// The status page is a live diagnostic; never serve it from a cache
pub const CACHE_CONTROL_STATUS: &str = "no-store";

// Time unit constants (in seconds) for the humanize_seconds filter
/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;
/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3600;
/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86400;

// =============================================================================
// Process Defaults
// =============================================================================

/// Listen port when PORT is not set
pub const DEFAULT_PORT: u16 = 80;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "bigdemo=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Read-only view of configuration variables.
///
/// An empty value is treated the same as an unset one.
pub trait EnvSource: Send + Sync {
    /// Raw lookup of a variable.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Returns the value of `name`, or `None` if it is unset or empty.
    fn get(&self, name: &str) -> Option<String> {
        self.lookup(name).filter(|value| !value.is_empty())
    }

    /// Returns the value of `name`, or an empty string if it is unset.
    fn get_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default()
    }
}

/// Reads the live process environment on every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables, used in tests and anywhere the environment
/// should be pinned.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
