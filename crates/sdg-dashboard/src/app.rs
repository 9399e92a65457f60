//! Startup sequence: dataset, router state, HTTP server.

use crate::error::DashboardResult;
use sdg_config::Config;
use sdg_data::load_table;
use sdg_web::AppState;
use tracing::info;

/// The dashboard application.
#[derive(Debug)]
pub struct Dashboard {
    config: Config,
}

impl Dashboard {
    /// Creates the application from a validated configuration.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration the application runs with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the dataset and builds the router state.
    ///
    /// A missing or unreadable dataset is fatal; there is nothing to serve
    /// without it.
    pub fn prepare(&self) -> DashboardResult<AppState> {
        let table = load_table(&self.config.dataset)?;

        info!(
            rows = table.len(),
            indicators = table.indicators().len(),
            malformed = table.malformed_values(),
            "Dataset ready"
        );

        Ok(AppState::new(table, self.config.clone()))
    }

    /// Loads the dataset and serves until interrupted.
    pub async fn run(self) -> DashboardResult<()> {
        let addr = self.config.server.socket_addr()?;
        let state = self.prepare()?;
        sdg_web::serve(state, addr).await?;
        Ok(())
    }
}
