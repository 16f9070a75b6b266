//! HTTP Server
//!
//! Binds the listen address and serves the router until shutdown.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::store::Store;

use super::handlers::AppState;
use super::router::build_router;

/// HTTP server for a FlatKV store
pub struct Server {
    config: Config,
    store: Arc<Store>,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<Store>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the router (useful for testing)
    pub fn router(&self) -> Router {
        build_router(AppState::new(Arc::clone(&self.store), self.config.audit))
    }

    /// Serve on the configured address until Ctrl+C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let local_addr = listener.local_addr()?;
        tracing::info!("FlatKV listening on {}", local_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(FlatError::Io)?;

        tracing::info!("FlatKV server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::error!("Couldn't install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
