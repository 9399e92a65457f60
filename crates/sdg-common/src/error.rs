//! Error types and utilities for the SDG dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, SdgError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum SdgError {
    /// The source dataset is missing, unreadable, or not valid CSV
    #[error("Data unavailable: {message}")]
    DataUnavailable {
        /// What could not be read
        message: String,
        /// Underlying I/O or CSV error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The source dataset header lacks a required column
    #[error("Data unavailable: required column '{column}' not found in dataset header")]
    MissingColumn {
        /// Configured name of the absent column
        column: String,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart rendering errors
    #[error("Graph error: {message}")]
    Graph {
        /// What could not be drawn
        message: String,
        /// Backend error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or configuration values
    #[error("Validation error: {message}")]
    Validation {
        /// Why the value was rejected
        message: String,
        /// Name of the offending field or parameter
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// Error message
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SdgError {
    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new data-unavailable error
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new data-unavailable error with source
    pub fn data_unavailable_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataUnavailable {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new missing-column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error means the dataset could not be loaded at all
    pub const fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. } | Self::MissingColumn { .. })
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to SdgError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for SdgError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let graph_error = SdgError::graph("no segments");
        assert_eq!(graph_error.to_string(), "Graph error: no segments");

        let data_error = SdgError::data_unavailable("file missing");
        assert_eq!(data_error.to_string(), "Data unavailable: file missing");

        let column_error = SdgError::missing_column("OBS_VALUE");
        assert!(column_error.to_string().contains("'OBS_VALUE'"));

        let validation_error = SdgError::validation_field("Invalid input", "bind_address");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_data_unavailable_classification() {
        assert!(SdgError::data_unavailable("gone").is_data_unavailable());
        assert!(SdgError::missing_column("INDICATOR").is_data_unavailable());
        assert!(!SdgError::graph("no data").is_data_unavailable());
        assert!(!SdgError::validation_field("bad", "periods").is_data_unavailable());
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = SdgError::data_unavailable_with_source("Failed to open dataset", io_error);

        assert!(wrapped_error.to_string().contains("Failed to open dataset"));
        assert!(wrapped_error.source().is_some());

        let config_source_error = SdgError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Configuration error"));
        assert!(config_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sdg_error: SdgError = io_error.into();

        assert!(sdg_error.to_string().contains("I/O error"));
        assert!(sdg_error.source().is_some());
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = SdgError::config_with_source("Middle layer", root_error);
        let top_error = SdgError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
        assert_eq!(current_error.to_string(), "Root cause");
    }
}
