//! Logging setup
//!
//! Library code only emits `tracing` events (targets `parsekit::lexer` and
//! `parsekit::parser`). Binaries call [`init`] once to install a subscriber.

use crate::config::{LogFormat, LoggingConfig};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, Layer, Registry};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("a global subscriber is already installed")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Level for a configured name, `warn` when the name is not a level.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::WARN)
}

/// Install the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = parse_level(&config.level);

    let (writer, ansi) = if config.logs_to_stderr() {
        (BoxMakeWriter::new(io::stderr), true)
    } else {
        let path = PathBuf::from(&config.file);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::OpenFile { path, source })?;
        (BoxMakeWriter::new(Mutex::new(file)), false)
    };

    tracing_subscriber::registry()
        .with(format_layer(config.format, writer, ansi).with_filter(level))
        .try_init()?;
    Ok(())
}

fn format_layer(
    format: LogFormat,
    writer: BoxMakeWriter,
    ansi: bool,
) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level("off"), LevelFilter::OFF);
    }

    #[test]
    fn test_unknown_level_falls_back_to_warn() {
        assert_eq!(parse_level("chatty"), LevelFilter::WARN);
        assert_eq!(parse_level("warnings"), LevelFilter::WARN);
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let config = LoggingConfig {
            level: "info".to_string(),
            file: "/definitely/not/here/parsekit.log".to_string(),
            format: LogFormat::Compact,
        };
        assert!(matches!(init(&config), Err(LoggingError::OpenFile { .. })));
    }
}
