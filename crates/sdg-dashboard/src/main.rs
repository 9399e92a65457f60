//! SDG Dashboard - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use sdg_common::init_logging;
use sdg_dashboard::{Args, Dashboard};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = args.load_config().context("Failed to load configuration")?;

    let logging = config.logging.to_logging_config()?;
    init_logging(&logging).context("Failed to initialize logging")?;

    info!("Starting SDG Dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {}", config.dataset.path.display());

    let dashboard = Dashboard::new(config);
    if let Err(e) = dashboard.run().await {
        error!("Dashboard stopped with an error: {}", e);
        return Err(e.into());
    }

    info!("SDG Dashboard shut down");
    Ok(())
}
