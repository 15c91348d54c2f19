//! Configuration for minidfs components

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Bind address for the HTTP API
    pub bind_addr: SocketAddr,

    /// Target number of replicas per block
    #[serde(default = "default_replication_factor")]
    pub replication_factor: usize,

    /// Seconds without a heartbeat before a node is considered dead
    #[serde(default = "default_heartbeat_timeout")]
    pub heartbeat_timeout_secs: u64,

    /// Interval between registry reap passes
    #[serde(default = "default_reap_interval")]
    pub reap_interval_secs: u64,
}

fn default_replication_factor() -> usize {
    3
}
fn default_heartbeat_timeout() -> u64 {
    10
}
fn default_reap_interval() -> u64 {
    5
}

impl CoordinatorConfig {
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs)
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            replication_factor: default_replication_factor(),
            heartbeat_timeout_secs: default_heartbeat_timeout(),
            reap_interval_secs: default_reap_interval(),
        }
    }
}

/// Storage node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageNodeConfig {
    /// Bind address for the HTTP API
    pub bind_addr: SocketAddr,

    /// Address other processes use to reach this node; this is the node's
    /// identity in the coordinator's registry
    pub advertise_url: String,

    /// Coordinator base URL
    pub coordinator_url: String,

    /// Directory blocks are persisted into
    pub data_dir: PathBuf,

    /// Interval between heartbeats to the coordinator
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_secs: u64,
}

fn default_heartbeat_interval() -> u64 {
    5
}

impl StorageNodeConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}
