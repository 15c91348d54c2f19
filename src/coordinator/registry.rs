//! Node registry: the coordinator's live view of storage nodes
//!
//! Liveness is signal-based. A node is alive because it recently said so;
//! a crashed node is detected only by silence, bounded by the heartbeat
//! timeout. Reads never mutate the table: expired entries are dropped only
//! by the periodic [`NodeRegistry::reap`] pass.

use crate::common::{timestamp_now_millis, validate_address, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::Duration;

/// Registry of storage nodes keyed by advertised address.
///
/// A sorted map keeps `live_nodes` output deterministic within a process
/// run without callers depending on anything beyond that.
pub struct NodeRegistry {
    timeout: Duration,
    nodes: RwLock<BTreeMap<String, u64>>,
}

impl NodeRegistry {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            nodes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Record a liveness signal for `address`, refreshing its last-seen time.
    ///
    /// Idempotent. A malformed address is rejected without mutating the
    /// table. Last-timestamp-wins: a reordered older signal never moves a
    /// node's last-seen time backwards.
    pub fn record_liveness(&self, address: &str) -> Result<()> {
        validate_address(address)?;
        self.record_liveness_at(address, timestamp_now_millis());
        Ok(())
    }

    fn record_liveness_at(&self, address: &str, ts: u64) {
        let mut nodes = self.nodes.write().unwrap();
        let last_seen = nodes.entry(address.to_string()).or_insert(ts);
        if ts > *last_seen {
            *last_seen = ts;
        }
    }

    /// Addresses of every node whose last signal is within the timeout.
    pub fn live_nodes(&self) -> Vec<String> {
        self.live_nodes_at(timestamp_now_millis())
    }

    fn live_nodes_at(&self, now: u64) -> Vec<String> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let nodes = self.nodes.read().unwrap();
        nodes
            .iter()
            .filter(|(_, &last_seen)| now.saturating_sub(last_seen) <= timeout_ms)
            .map(|(addr, _)| addr.clone())
            .collect()
    }

    /// Drop entries whose age exceeds the timeout. Returns the dropped
    /// addresses so the caller can log them. This is the only removal path.
    pub fn reap(&self) -> Vec<String> {
        self.reap_at(timestamp_now_millis())
    }

    fn reap_at(&self, now: u64) -> Vec<String> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let mut nodes = self.nodes.write().unwrap();
        let dead: Vec<String> = nodes
            .iter()
            .filter(|(_, &last_seen)| now.saturating_sub(last_seen) > timeout_ms)
            .map(|(addr, _)| addr.clone())
            .collect();
        for addr in &dead {
            nodes.remove(addr);
        }
        dead
    }

    /// Number of tracked entries, including ones past the timeout that have
    /// not been reaped yet.
    pub fn tracked_count(&self) -> usize {
        self.nodes.read().unwrap().len()
    }
}
