//! Structured logging infrastructure for the dashboard

use crate::{Result, SdgError};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self as tfmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human oriented output with colors
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = SdgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(SdgError::validation_field(
                format!("unknown log format '{other}' (expected pretty, compact or json)"),
                "logging.format",
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sdg_graphs=trace")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> EnvFilter {
        // RUST_LOG wins over the configured level
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// Fails if the log file cannot be opened or a global subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let span_events = config.span_events();

    let file = match &config.file_path {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    let result = match (config.format, file) {
        (LogFormat::Json, Some(file)) => registry
            .with(
                tfmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Json, None) => registry
            .with(
                tfmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(
                tfmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Pretty, None) => registry
            .with(
                tfmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(
                tfmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Compact, None) => registry
            .with(
                tfmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
    };

    result.map_err(|e| SdgError::config_with_source("Failed to install tracing subscriber", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(!config.include_spans);
        assert!(config.include_targets);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_span_events() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.span_events(), FmtSpan::NONE);
        config.include_spans = true;
        assert_eq!(config.span_events(), FmtSpan::NEW | FmtSpan::CLOSE);
    }
}
