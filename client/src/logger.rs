//! Logging initialization
//!
//! Human-readable logs go to stderr so stdout stays clean for command output.
//! When `CLIENT_LOG_DIR` is set, a daily-rotated `client.log` is written there
//! as well.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ClientConfig, DEFAULT_LOG_LEVEL};

pub const LOG_FILE_NAME: &str = "client.log";

/// Initialize the global subscriber.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes and stops the file writer. Calling this twice is harmless: the
/// second subscriber is discarded.
pub fn init(config: &ClientConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let mut guard = None;
    let file_layer = config.log_dir.as_ref().and_then(|dir| {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
            return None;
        }
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
        let (writer, worker) = tracing_appender::non_blocking(appender);
        guard = Some(worker);
        Some(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed(),
        )
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            log_dir = ?config.log_dir,
            api_base_url = %config.api_base_url,
            "Logging initialized"
        );
    }
    guard
}
