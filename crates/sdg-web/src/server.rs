//! HTTP server startup and shutdown.

use crate::routes::router;
use crate::state::AppState;
use sdg_common::{Result, SdgError};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Binds `addr` and serves the dashboard until Ctrl+C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| SdgError::with_source(format!("Failed to bind {addr}"), e))?;
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serves the dashboard on `listener` until `shutdown` completes.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    info!("Dashboard listening on http://{}", local);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Dashboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
