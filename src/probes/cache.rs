//! Cache store probe: open a Redis connection and send `PING`.

use tracing::instrument;

use super::{redact_url, StatusInfo};
use crate::config::{EnvSource, PROBE_TIMEOUT, REDIS_URL_VAR};

/// Probe the Redis server named by `REDIS_URL`.
#[instrument(name = "probe::cache", skip_all)]
pub async fn check_cache(env: &dyn EnvSource) -> StatusInfo {
    let Some(url) = env.get(REDIS_URL_VAR) else {
        return StatusInfo::not_configured(REDIS_URL_VAR);
    };

    // Parses the URL only; no connection is made yet
    let client = match redis::Client::open(url.as_str()) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid REDIS_URL");
            return StatusInfo::unreachable(format!("Invalid URL: {}", e));
        }
    };

    tracing::debug!(url = %redact_url(&url), "Probing cache");

    let status = match tokio::time::timeout(PROBE_TIMEOUT, ping(&client)).await {
        Ok(Ok(())) => StatusInfo::connected(),
        Ok(Err(e)) => StatusInfo::unreachable(format!("Ping failed: {}", e)),
        Err(_) => StatusInfo::unreachable(format!(
            "Ping failed: deadline of {}s exceeded",
            PROBE_TIMEOUT.as_secs()
        )),
    };

    if status.is_connected() {
        tracing::debug!("Cache responded");
    } else {
        tracing::warn!(reason = status.message(), "Cache probe failed");
    }
    status
}

/// The connection is dropped when this future completes or is cancelled.
async fn ping(client: &redis::Client) -> redis::RedisResult<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticEnv;
    use std::time::{Duration, Instant};

    /// Accepts connections and holds them open without ever answering.
    async fn silent_listener() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_unset_url() {
        let status = check_cache(&StaticEnv::new()).await;
        assert!(!status.is_present());
        assert!(!status.is_connected());
        assert_eq!(status.message(), "REDIS_URL not set");
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let env = StaticEnv::new().with(REDIS_URL_VAR, "not-a-valid-url");
        let status = check_cache(&env).await;
        assert!(status.is_present());
        assert!(!status.is_connected());
        assert!(
            status.message().contains("Invalid URL"),
            "unexpected message: {}",
            status.message()
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let env = StaticEnv::new().with(REDIS_URL_VAR, "redis://127.0.0.1:1/0");
        let status = check_cache(&env).await;
        assert!(status.is_present());
        assert!(!status.is_connected());
        assert!(
            status.message().starts_with("Ping failed"),
            "unexpected message: {}",
            status.message()
        );
    }

    #[tokio::test]
    async fn test_tls_url_is_accepted() {
        let env = StaticEnv::new().with(REDIS_URL_VAR, "rediss://:token@127.0.0.1:1/0");
        let status = check_cache(&env).await;
        assert!(status.is_present());
        assert!(!status.is_connected());
        assert!(
            status.message().starts_with("Ping failed"),
            "unexpected message: {}",
            status.message()
        );
    }

    #[tokio::test]
    async fn test_silent_server_hits_deadline() {
        let addr = silent_listener().await;
        let env = StaticEnv::new().with(REDIS_URL_VAR, format!("redis://{}/0", addr));

        let start = Instant::now();
        let status = check_cache(&env).await;
        let elapsed = start.elapsed();

        assert!(status.is_present());
        assert!(!status.is_connected());
        assert_eq!(status.message(), "Ping failed: deadline of 3s exceeded");
        assert!(elapsed >= PROBE_TIMEOUT, "returned early: {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
    }
}
