//! HTTP server wiring

use crate::api::build_router;
use crate::state::AppState;
use anyhow::Result;
use parley_core::Directory;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The Parley API server
pub struct ApiServer {
    state: Arc<AppState>,
    addr: SocketAddr,
}

impl ApiServer {
    pub fn new(directory: Arc<Directory>, addr: SocketAddr) -> Self {
        let state = Arc::new(AppState::new(directory));
        Self { state, addr }
    }

    /// Serve until a shutdown signal arrives. State is persisted on every
    /// mutation, so there is nothing left to flush at exit.
    pub async fn run(self) -> Result<()> {
        let router = build_router(self.state);

        let listener = TcpListener::bind(self.addr).await?;
        info!("Parley API listening on {}", self.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
