//! Application-wide error types using thiserror.

use sdg_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dataset could not be loaded, or startup otherwise failed.
    #[error(transparent)]
    Startup(#[from] sdg_common::SdgError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the dashboard application.
pub type DashboardResult<T> = Result<T, DashboardError>;

impl DashboardError {
    /// Whether the error comes from a missing or unreadable dataset.
    pub const fn is_data_unavailable(&self) -> bool {
        match self {
            Self::Startup(err) => err.is_data_unavailable(),
            Self::Config(_) | Self::Io(_) => false,
        }
    }
}
