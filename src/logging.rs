//! Diagnostic logging setup
//!
//! Logging is off unless `EXPENSE_MANAGER_LOG` names a file, so tracing
//! output never lands on top of the TUI. The level comes from `RUST_LOG`
//! and defaults to `info`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file
pub const LOG_ENV: &str = "EXPENSE_MANAGER_LOG";

/// Install the global subscriber if a log file is configured
pub fn init_tracing() {
    let Ok(log_path) = std::env::var(LOG_ENV) else {
        return;
    };
    if log_path.trim().is_empty() {
        return;
    }

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {}", log_path, e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
