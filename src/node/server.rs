//! Storage node server

use crate::common::{Result, StorageNodeConfig};
use crate::coordinator::http::HeartbeatRequest;
use crate::node::http::{create_router, NodeState};
use crate::node::store::BlockStore;
use std::sync::Arc;

pub struct StorageNodeServer {
    config: StorageNodeConfig,
    node_id: String,
}

impl StorageNodeServer {
    pub fn new(config: StorageNodeConfig, node_id: String) -> Self {
        Self { config, node_id }
    }

    pub async fn serve(self) -> Result<()> {
        tracing::info!("Starting storage node: {}", self.node_id);
        tracing::info!("  HTTP API: {}", self.config.bind_addr);
        tracing::info!("  Advertise URL: {}", self.config.advertise_url);
        tracing::info!("  Coordinator: {}", self.config.coordinator_url);
        tracing::info!("  Data directory: {}", self.config.data_dir.display());

        let store = Arc::new(BlockStore::open(&self.config.data_dir)?);

        let heartbeats = tokio::spawn(heartbeat_loop(self.config.clone()));

        let router = create_router(NodeState {
            store,
            node_id: self.node_id.clone(),
        });
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!("✓ Storage node ready");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        heartbeats.abort();
        Ok(())
    }
}

/// Periodically announce liveness to the coordinator. A failed heartbeat is
/// logged and the loop keeps going; the coordinator only notices silence
/// longer than its timeout.
async fn heartbeat_loop(config: StorageNodeConfig) {
    let client = reqwest::Client::new();
    let url = format!("{}/heartbeat", config.coordinator_url);
    let body = HeartbeatRequest {
        address: config.advertise_url.clone(),
    };

    let mut ticker = tokio::time::interval(config.heartbeat_interval());
    loop {
        ticker.tick().await;
        match client.post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("Sent heartbeat from {}", config.advertise_url);
            }
            Ok(resp) => {
                tracing::warn!("Heartbeat rejected by coordinator: {}", resp.status());
            }
            Err(e) => {
                tracing::warn!("Failed to send heartbeat: {}", e);
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
