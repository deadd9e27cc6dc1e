use std::path::PathBuf;

use directories_next::ProjectDirs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes logging for the console.
///
/// Sets up two logging outputs:
/// - Console: compact human-readable lines on stderr
/// - File: JSON format in the per-user data directory, for troubleshooting
///
/// Log files are rotated daily to prevent unbounded growth.
///
/// The default level is "info" with service and api_client at debug; set
/// RUST_LOG to override.
///
/// Returns a guard that must be kept alive for the duration of the program.
/// Dropping this guard will cause file logging to stop.
pub fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = log_directory();
    if let Err(error) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: failed to create log directory at {}: {}",
            log_dir.display(),
            error
        );
        eprintln!("Logs will only be written to the console.");
    }

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "quote-admin.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_file(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,service=debug,api_client=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "quote-admin")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."))
}
