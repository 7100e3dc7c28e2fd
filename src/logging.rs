//! Tracing subscriber setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{GeneralConfig, LogFormat};

/// Log file name inside `general.log_path`
pub const LOG_FILE_NAME: &str = "sdk-resolver.log";

/// Install the global subscriber.
///
/// RUST_LOG takes precedence over `general.log_level`. Logs are written to
/// `<log_path>/sdk-resolver.log` when a log directory is configured and to
/// stderr otherwise. The returned guard must be held until exit so buffered
/// lines are flushed.
pub fn init(general: &GeneralConfig) -> std::io::Result<WorkerGuard> {
    let filter = build_filter(&general.log_level);

    let (writer, guard) = match &general.log_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE_NAME))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);

    match general.log_format {
        LogFormat::Json => builder.json().with_target(true).init(),
        LogFormat::Text => builder.with_target(false).init(),
    }

    Ok(guard)
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
