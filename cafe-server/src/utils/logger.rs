//! Logging Infrastructure
//!
//! Console output (plain or JSON) plus an optional daily rolling file.
//! `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initialize console logging only
pub fn init_logger(log_level: &str, json: bool) {
    // no file layer, so there is no guard to hold
    let _ = init_logger_with_file(log_level, json, None);
}

/// Initialize logging with optional file output
///
/// The returned guard must be held for the lifetime of the process, otherwise
/// buffered file output is lost.
pub fn init_logger_with_file(
    log_level: &str,
    json: bool,
    log_dir: Option<&str>,
) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console = if json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    let mut guard = None;
    let file = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(path) {
            eprintln!("Failed to create log directory {dir}: {e}");
            return None;
        }
        let appender = tracing_appender::rolling::daily(path, "cafe-server.log");
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);
        Some(fmt::layer().with_ansi(false).with_writer(writer).boxed())
    });

    if tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(filter)
        .try_init()
        .is_err()
    {
        // A subscriber is already installed (tests, embedding)
        return None;
    }

    guard
}
