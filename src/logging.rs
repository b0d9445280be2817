//! Logging setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a file.
//! The `eval` command logs to stderr, keeping stdout clean for reports.
//! Verbosity comes from `SCICALC_LOG` (EnvFilter syntax), default `warn`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "SCICALC_LOG";

/// Filter used when `SCICALC_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file, creating parent directories as needed.
    File(PathBuf),
    Stderr,
}

/// Default log file: `<data_local_dir>/scicalc/scicalc.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scicalc")
        .join("scicalc.log")
}

/// Build the filter from directive text, falling back to the default.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// # Errors
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init(target: &LogTarget) -> io::Result<()> {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(directives.as_deref());

    let result = match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
    };

    result.map_err(|e| io::Error::other(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
