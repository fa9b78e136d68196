//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

/// Start the HTTP server on `port`.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, port: u16) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(ServerError::Bind)?;

    tracing::info!(%addr, "BigDemo listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(ServerError::Server)?;

    tracing::info!("Server stopped");
    Ok(())
}
