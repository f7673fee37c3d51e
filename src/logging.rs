use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file path.
pub const LOG_ENV: &str = "SSHFS_WIN_LOG";

/// Initialize tracing.
///
/// Logs go to stderr by default. Set `SSHFS_WIN_LOG` to a file path to log
/// there instead; the file is named `{path}.{timestamp}.{pid}` so that
/// concurrent mounts do not clobber each other. If that file cannot be
/// created, logging stays on stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_path) = std::env::var(LOG_ENV).ok().filter(|p| !p.is_empty()) else {
        init_stderr(filter);
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            init_stderr(filter);
            tracing::warn!(path = %unique_path, error = %e, "failed to create log file, logging to stderr");
            return;
        }
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

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

/// `{path}.{timestamp}.{pid}`
fn unique_log_path(log_path: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", log_path, timestamp, pid)
}
