use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file base path.
pub const LOG_ENV: &str = "VIMGDB_LOG";

/// Initialize tracing with optional file output.
///
/// The terminal is in raw mode and shared with gdb, so nothing is logged
/// unless `VIMGDB_LOG` points at a file path. Log files get a
/// `{path}.{timestamp}.{pid}` suffix so concurrent sessions don't collide.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_ENV).ok() else {
        return;
    };

    let unique_path = unique_log_path(&log_path, std::process::id());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
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
    fn log_path_carries_pid_suffix() {
        let path = unique_log_path("/tmp/vimgdb.log", 4242);
        assert!(path.starts_with("/tmp/vimgdb.log."));
        assert!(path.ends_with(".4242"));
    }
}
