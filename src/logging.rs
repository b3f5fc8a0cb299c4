use std::fs::File;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming an optional log file.
pub const LOG_FILE_ENV: &str = "CLOUD_PROXY_APP_LOG";

/// Initialize tracing.
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`). When
/// `CLOUD_PROXY_APP_LOG` is set, a copy is written to `{path}.{timestamp}.{pid}`
/// so instances launched side by side by the ICAP server never share a file.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true);

    let file_layer = open_log_file().map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
    });

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

fn open_log_file() -> Option<File> {
    let log_path = std::env::var(LOG_FILE_ENV).ok()?;
    let unique_path = unique_log_path(&log_path, std::process::id());

    match File::create(&unique_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to create log file {}: {}", unique_path, e);
            None
        }
    }
}

fn unique_log_path(base: &str, pid: u32) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}

#[cfg(test)]
mod tests {
    use super::unique_log_path;

    #[test]
    fn unique_log_path_appends_timestamp_and_pid() {
        let path = unique_log_path("/var/log/proxy.log", 4242);
        assert!(path.starts_with("/var/log/proxy.log."));
        assert!(path.ends_with(".4242"));
        let timestamp = path
            .trim_start_matches("/var/log/proxy.log.")
            .trim_end_matches(".4242");
        assert!(timestamp.parse::<u64>().is_ok(), "bad timestamp in {path}");
    }
}
