//! Activity log setup.
//!
//! One line per event, appended to the configured file:
//!
//! ```text
//! 2026-10-19 14:02:11  INFO roster_core::store: Character created name=Aria class=Human variant=Hero
//! ```
//!
//! Writes go through a non-blocking appender. The returned [`WorkerGuard`]
//! must be held until shutdown; dropping it flushes and closes the file.

use std::fs::OpenOptions;

use roster_core::config::LoggingConfig;
use roster_core::error::{Result, RosterError};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Install the global activity-log subscriber described by `config`.
///
/// Returns `Ok(None)` when logging is disabled.
///
/// # Errors
///
/// Returns [`RosterError::Io`] if the log file cannot be opened, or
/// [`RosterError::Config`] if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    subscriber(&config.level, writer)
        .try_init()
        .map_err(|e| RosterError::Config(e.to_string()))?;

    Ok(Some(guard))
}

/// Build the log subscriber writing plain lines to `writer`.
///
/// Unrecognised levels fall back to `info`.
pub fn subscriber<W>(level: &str, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let filter = EnvFilter::new(level.to_string());

    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string())),
    )
}
