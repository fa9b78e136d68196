//! Host uptime and process memory.

use std::path::Path;

use sysinfo::{ProcessesToUpdate, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Host uptime as displayed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Uptime {
    /// `"<seconds> seconds"` or a description of why it could not be read
    pub display: String,
    /// Parsed seconds, when the source was readable
    pub seconds: Option<f64>,
}

/// Read host uptime from `source` (normally `/proc/uptime`).
///
/// Never fails; unreadable or malformed sources produce a message instead.
pub async fn read_uptime(source: &Path) -> Uptime {
    let contents = match tokio::fs::read_to_string(source).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(source = %source.display(), error = %e, "Uptime source unreadable");
            return Uptime {
                display: format!("Unable to read: {}", e),
                seconds: None,
            };
        }
    };
    parse_uptime(&contents)
}

fn parse_uptime(contents: &str) -> Uptime {
    let parsed = contents
        .split_whitespace()
        .next()
        .and_then(|field| field.parse::<f64>().ok().map(|secs| (field, secs)));

    match parsed {
        Some((field, secs)) => Uptime {
            display: format!("{} seconds", field),
            seconds: Some(secs),
        },
        None => Uptime {
            display: "Unable to parse".to_string(),
            seconds: None,
        },
    }
}

/// Resident and virtual memory of this process.
///
/// Formatted as `"X.XX MB (Alloc) / Y.YY MB (Sys)"`; both figures are zero if
/// the process cannot be inspected.
pub fn memory_used() -> String {
    let (resident, virt) = process_memory().unwrap_or((0, 0));
    format!(
        "{:.2} MB (Alloc) / {:.2} MB (Sys)",
        resident as f64 / BYTES_PER_MB,
        virt as f64 / BYTES_PER_MB
    )
}

fn process_memory() -> Option<(u64, u64)> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    let process = sys.process(pid)?;
    Some((process.memory(), process.virtual_memory()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_used_format() {
        let mem = memory_used();
        assert!(mem.contains("MB (Alloc)"), "got: {}", mem);
        assert!(mem.contains("MB (Sys)"), "got: {}", mem);
    }

    #[test]
    fn test_parse_uptime() {
        let uptime = parse_uptime("12345.67 54321.00\n");
        assert_eq!(uptime.display, "12345.67 seconds");
        assert_eq!(uptime.seconds, Some(12345.67));
    }

    #[test]
    fn test_parse_uptime_empty() {
        let uptime = parse_uptime("   \n");
        assert_eq!(uptime.display, "Unable to parse");
        assert_eq!(uptime.seconds, None);
    }

    #[test]
    fn test_parse_uptime_not_numeric() {
        assert_eq!(parse_uptime("up 3 days").display, "Unable to parse");
    }

    #[tokio::test]
    async fn test_read_uptime_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "350.12 700.40").unwrap();

        let uptime = read_uptime(file.path()).await;
        assert_eq!(uptime.display, "350.12 seconds");
    }

    #[tokio::test]
    async fn test_read_uptime_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let uptime = read_uptime(&dir.path().join("uptime")).await;
        assert!(uptime.display.starts_with("Unable to read"), "got: {}", uptime.display);
        assert_eq!(uptime.seconds, None);
    }
}
