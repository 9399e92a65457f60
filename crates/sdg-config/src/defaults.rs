//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// Dataset file name used when no path is configured.
pub const DEFAULT_DATASET_PATH: &str =
    "data/Sustainable Development Goal 08 - Decent Work and Economic Growth data.csv";

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dataset: DatasetConfig::default(),
            pipeline: PipelineConfig::default(),
            graphs: GraphsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            title: "Challenges and Opportunities in the Pacific Economy".to_string(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET_PATH),
            columns: ColumnsConfig::default(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            indicator: "INDICATOR".to_string(),
            entity: "Pacific Island Countries and territories".to_string(),
            time_period: "TIME_PERIOD".to_string(),
            value: "OBS_VALUE".to_string(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: 256,
        }
    }
}

impl Default for GraphsConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            color_scheme: "default".to_string(),
            background_color: "#ffffff".to_string(),
            enable_heatmap: true,
            entity_axis_label: "Pacific Island Countries and territories".to_string(),
            value_axis_label: "Observation Value".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
            include_spans: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_columns_match_dataset_export() {
        let columns = ColumnsConfig::default();
        assert_eq!(
            columns.as_array(),
            [
                "INDICATOR",
                "Pacific Island Countries and territories",
                "TIME_PERIOD",
                "OBS_VALUE"
            ]
        );
    }
}
