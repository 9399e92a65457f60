//! Shared router state.

use sdg_config::Config;
use sdg_data::Table;
use sdg_graphs::CachedPipeline;
use std::sync::Arc;

/// State handed to every request handler.
///
/// Holds the one table snapshot loaded at startup. Nothing mutates it while
/// the server runs.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pipeline over the loaded table.
    pub pipeline: Arc<CachedPipeline>,
    /// Resolved configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the state from a loaded table.
    pub fn new(table: Table, config: Config) -> Self {
        let pipeline = CachedPipeline::new(Arc::new(table), &config.pipeline);
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        }
    }

    /// The table every request is answered from.
    pub fn table(&self) -> &Table {
        self.pipeline.table()
    }

    /// Title shown on every page.
    pub fn title(&self) -> &str {
        &self.config.server.title
    }
}
