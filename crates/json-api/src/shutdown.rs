//! Termination signal handling

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownError {
    #[error("failed to listen for interrupt: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to listen for SIGTERM: {0}")]
    Terminate(#[source] io::Error),
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownError::Terminate)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownError> {
    std::future::pending().await
}

/// Wait for Ctrl+C or SIGTERM, then let in-flight requests drain.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownError::Interrupt)?;
            info!(signal = "interrupt", "shutting down");
        }
        result = terminate() => {
            result?;
            info!(signal = "terminate", "shutting down");
        }
    }

    handle.stop_graceful(None);

    Ok(())
}
