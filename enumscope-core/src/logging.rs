//! Structured logging using **tracing**.
//!
//! What the audit logs:
//! - `info`: each project as its analysis starts, and the dump files loaded
//! - `warn`: projects skipped because their compilation is unavailable
//! - `debug`: each controller scanned and each action that yields findings
//! - `trace`: every enum reached by the type walker, with its path
//! - `error`: a failed run, logged by the CLI before it exits
//!
//! Library code only emits events; the binary installs the JSON subscriber,
//! so stderr stays machine-readable while stdout carries the report.

use tracing::{error, info, warn};

/// Initializes the global tracing subscriber.
///
/// Call once at startup. Output is JSON on stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=enumscope_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Logs a warning event.
pub fn log_warn(message: &str) {
    warn!(detail = %message);
}

/// Logs an info event.
pub fn log_info(message: &str) {
    info!(detail = %message);
}

/// Logs an error event.
pub fn log_error(message: &str) {
    error!(detail = %message);
}
