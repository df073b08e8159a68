//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT (Ctrl+C) and, on Unix, SIGTERM
//! - Report which one arrived so the caller can start shutdown

use std::io;

use thiserror::Error;
use tokio::signal;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

/// Wait until the process is asked to stop.
pub async fn wait_for_termination() -> Result<TerminationSignal, SignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(SignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(SignalError::SigTerm)?
            .recv()
            .await;
        Ok::<(), SignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), SignalError>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            tracing::info!("Interrupt signal received");
            Ok(TerminationSignal::Interrupt)
        }
        result = terminate => {
            result?;
            tracing::info!("Terminate signal received");
            Ok(TerminationSignal::Terminate)
        }
    }
}
