//! Configuration schema definitions using serde.

use sdg_common::{LogFormat, LoggingConfig, SdgError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Smallest chart edge, in pixels, that still leaves room for axes.
pub const MIN_CHART_DIMENSION: u32 = 200;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Source dataset configuration.
    pub dataset: DatasetConfig,
    /// Aggregation pipeline configuration.
    pub pipeline: PipelineConfig,
    /// Chart rendering configuration.
    pub graphs: GraphsConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:5000`.
    pub bind_address: String,
    /// Title shown on every page.
    pub title: String,
}

/// Source dataset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Names of the columns the pipeline reads.
    pub columns: ColumnsConfig,
}

/// Header names of the four required dataset columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Indicator code column.
    pub indicator: String,
    /// Geographic entity label column.
    pub entity: String,
    /// Time period column.
    pub time_period: String,
    /// Observation value column.
    pub value: String,
}

/// Aggregation pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Whether pipeline results are memoized per selection.
    pub cache_enabled: bool,
    /// Maximum number of memoized selections.
    pub cache_capacity: u64,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphsConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Named color scheme: default, dark, light, vibrant or monochrome.
    pub color_scheme: String,
    /// Background color in `#rrggbb` form.
    pub background_color: String,
    /// Whether the dashboard renders the heatmap panel.
    pub enable_heatmap: bool,
    /// X axis caption.
    pub entity_axis_label: String,
    /// Y axis caption.
    pub value_axis_label: String,
}

/// Logging configuration as it appears in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter directive.
    pub level: String,
    /// Output format: pretty, compact or json.
    pub format: String,
    /// Optional log file.
    pub file_path: Option<String>,
    /// Whether span open/close events are logged.
    pub include_spans: bool,
}

impl LoggingSettings {
    /// Converts the file-level settings into the logging bootstrap config.
    pub fn to_logging_config(&self) -> Result<LoggingConfig, SdgError> {
        Ok(LoggingConfig {
            level: self.level.clone(),
            format: self.format.parse::<LogFormat>()?,
            file_path: self.file_path.clone(),
            include_spans: self.include_spans,
            ..LoggingConfig::default()
        })
    }
}

impl ServerConfig {
    /// Parses the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SdgError> {
        self.bind_address.parse().map_err(|_| {
            SdgError::validation_field(
                format!("'{}' is not a valid socket address", self.bind_address),
                "server.bind_address",
            )
        })
    }
}

impl ColumnsConfig {
    /// The four column names in loader order.
    pub fn as_array(&self) -> [&str; 4] {
        [
            self.indicator.as_str(),
            self.entity.as_str(),
            self.time_period.as_str(),
            self.value.as_str(),
        ]
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SdgError> {
        self.server.socket_addr()?;

        if self.dataset.path.as_os_str().is_empty() {
            return Err(SdgError::validation_field(
                "Dataset path cannot be empty",
                "dataset.path",
            ));
        }

        let columns = self.dataset.columns.as_array();
        for (i, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(SdgError::validation_field(
                    "Column names cannot be empty",
                    "dataset.columns",
                ));
            }
            if columns[..i].iter().any(|other| other.trim() == column.trim()) {
                return Err(SdgError::validation_field(
                    format!("Column '{column}' is mapped more than once"),
                    "dataset.columns",
                ));
            }
        }

        if self.pipeline.cache_enabled && self.pipeline.cache_capacity == 0 {
            return Err(SdgError::validation_field(
                "Cache capacity must be positive when the cache is enabled",
                "pipeline.cache_capacity",
            ));
        }

        if self.graphs.width < MIN_CHART_DIMENSION || self.graphs.height < MIN_CHART_DIMENSION {
            return Err(SdgError::validation_field(
                format!(
                    "Chart dimensions must be at least {MIN_CHART_DIMENSION}x{MIN_CHART_DIMENSION}"
                ),
                "graphs",
            ));
        }

        if !is_hex_color(&self.graphs.background_color) {
            return Err(SdgError::validation_field(
                format!("'{}' is not a #rrggbb color", self.graphs.background_color),
                "graphs.background_color",
            ));
        }

        self.logging.to_logging_config()?;

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_check() {
        assert!(is_hex_color("#ffffff"));
        assert!(is_hex_color("#1F77b4"));
        assert!(!is_hex_color("ffffff"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn test_socket_addr() {
        let mut server = ServerConfig::default();
        assert!(server.socket_addr().is_ok());

        server.bind_address = "localhost".to_string();
        assert!(server.socket_addr().is_err());
    }

    #[test]
    fn test_logging_settings_conversion() {
        let mut settings = LoggingSettings::default();
        settings.format = "json".to_string();
        settings.level = "debug".to_string();

        let logging = settings.to_logging_config().unwrap();
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.level, "debug");

        settings.format = "yaml".to_string();
        assert!(settings.to_logging_config().is_err());
    }
}
