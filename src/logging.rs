//! Tracing setup.
//!
//! The menu redraws over stdout, so anything printed to the terminal while
//! it is open corrupts the frame. Full logs therefore go to a file; without
//! one only warnings reach stderr.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Flushes buffered file logs when dropped. Hold it for the life of the process.
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

/// Level used when `RUST_LOG` is unset.
pub fn default_directive(log_file: Option<&Path>, level: &str) -> String {
    match log_file {
        Some(_) => level.to_string(),
        None => "warn".to_string(),
    }
}

pub fn init(log_file: Option<&Path>, level: &str) -> anyhow::Result<LogGuard> {
    let directive = default_directive(log_file, level);
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) => EnvFilter::try_new(env).context("invalid RUST_LOG")?,
        Err(_) => EnvFilter::try_new(&directive).with_context(|| format!("invalid log level {directive:?}"))?,
    };

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()?;
        return Ok(LogGuard { _worker: None });
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file = path.file_name().with_context(|| format!("log path {} has no file name", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(false))
        .try_init()?;
    Ok(LogGuard { _worker: Some(guard) })
}
