//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/crosshair/crosshair.log` (or the XDG equivalent)
//! with 10 MB size-based rotation. Set `DEBUG_LOGGING=1` to enable debug
//! output for the crosshair crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "crosshair.log";
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// Filter directives shared by the file and stdout layers
fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        // DEBUG_LOGGING=1: debug for crosshair crates, info for dependencies
        "info,crosshair=debug,crosshair_core=debug,crosshair_overlay=debug"
    } else {
        // Default: INFO+ level for everything
        "info"
    }
}

/// Initialize logging with dual output (file + stdout).
///
/// Returns a `WorkerGuard` that must be held for the process lifetime so
/// buffered lines are flushed on exit.
///
/// # Behavior
/// - **File output:** written to `~/.config/crosshair/crosshair.log`. A
///   daemonized run has no stdout, so this is where its logs end up.
/// - **Stdout output:** INFO+ by default, DEBUG+ for crosshair crates when
///   `DEBUG_LOGGING=1`
/// - **Rotation:** size-based at 10 MB, keeps only the latest rotated file
///
/// # Fallback
/// If the log directory or file cannot be created, falls back to stdout only
/// and returns `None`.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    // Create log directory if needed
    let log_dir = crosshair_core::config::config_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, using stdout only",
            log_dir, e
        );
        init_stdout_only(debug_logging);
        return None;
    }

    // Create size-based rolling file appender (10 MB, keep 1 rotated file)
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_SIZE),
        1, // crosshair.log and crosshair.log.1
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stdout_only(debug_logging);
            return None;
        }
    };

    // Wrap in non-blocking writer so the event loop never waits on disk
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: no ANSI colors
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // Stdout layer
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // Single filter for both layers
    let filter = EnvFilter::new(filter_directive(debug_logging));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(filter)
        .init();

    tracing::debug!(log_file = ?log_path, debug_logging, "Logging initialized");

    Some(guard)
}

/// Fallback: Initialize stdout-only logging when file logging fails.
fn init_stdout_only(debug_logging: bool) {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter = EnvFilter::new(filter_directive(debug_logging));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter)
        .init();

    tracing::debug!(debug_logging, "Logging initialized (stdout only)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_directive_covers_every_workspace_crate() {
        let directive = filter_directive(true);
        for target in ["crosshair", "crosshair_core", "crosshair_overlay"] {
            assert!(directive.contains(&format!("{target}=debug")), "{target}");
        }
        assert_eq!(filter_directive(false), "info");
        // both must be valid EnvFilter syntax
        assert!(EnvFilter::try_new(filter_directive(true)).is_ok());
        assert!(EnvFilter::try_new(filter_directive(false)).is_ok());
    }
}
