//! Coordinator server

use crate::common::{CoordinatorConfig, Result};
use crate::coordinator::core::Coordinator;
use crate::coordinator::http::{create_router, CoordState};
use crate::coordinator::registry::NodeRegistry;
use std::sync::Arc;

pub struct CoordinatorServer {
    config: CoordinatorConfig,
}

impl CoordinatorServer {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    pub async fn serve(self) -> Result<()> {
        tracing::info!("Starting coordinator");
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  Replication factor: {}", self.config.replication_factor);
        tracing::info!(
            "  Heartbeat timeout: {}s, reap every {}s",
            self.config.heartbeat_timeout_secs,
            self.config.reap_interval_secs
        );

        let registry = Arc::new(NodeRegistry::new(self.config.heartbeat_timeout()));
        let coordinator = Arc::new(Coordinator::new(registry, self.config.replication_factor));

        // Background reaper: the only path that removes dead nodes.
        let reap_interval = self.config.reap_interval();
        let reaper = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(reap_interval);
                loop {
                    ticker.tick().await;
                    coordinator.reap_dead_nodes();
                }
            })
        };

        let router = create_router(CoordState { coordinator });
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!("✓ Coordinator ready");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        reaper.abort();
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
