//! Block placement: choosing replica targets for new blocks
//!
//! Placement draws from the registry's current live set and degrades
//! gracefully: fewer live nodes than the replication factor yields an
//! under-replicated but usable placement, so a single-node deployment
//! still works. Zero live nodes fails the allocation outright.

use crate::common::{Error, Result};
use crate::coordinator::registry::NodeRegistry;
use std::sync::Arc;

/// Replica selection policy over the current live set.
///
/// The default takes registry order; load- or capacity-aware strategies can
/// be swapped in here without touching the metadata store.
pub trait PlacementStrategy: Send + Sync {
    /// Pick up to `factor` distinct addresses from `live`.
    fn select(&self, live: &[String], factor: usize) -> Vec<String>;
}

/// Takes the first `factor` nodes in registry order.
pub struct FirstAvailable;

impl PlacementStrategy for FirstAvailable {
    fn select(&self, live: &[String], factor: usize) -> Vec<String> {
        live.iter().take(factor).cloned().collect()
    }
}

/// BlockPlacer selects the replica set for each newly allocated block.
pub struct BlockPlacer {
    registry: Arc<NodeRegistry>,
    replication_factor: usize,
    strategy: Box<dyn PlacementStrategy>,
}

impl BlockPlacer {
    pub fn new(registry: Arc<NodeRegistry>, replication_factor: usize) -> Self {
        Self::with_strategy(registry, replication_factor, Box::new(FirstAvailable))
    }

    pub fn with_strategy(
        registry: Arc<NodeRegistry>,
        replication_factor: usize,
        strategy: Box<dyn PlacementStrategy>,
    ) -> Self {
        Self {
            registry,
            replication_factor,
            strategy,
        }
    }

    /// Select replica targets for one new block.
    ///
    /// Returns up to `replication_factor` live nodes, all of them when fewer
    /// are live, and `NoNodesAvailable` when none are.
    pub fn select_replicas(&self) -> Result<Vec<String>> {
        let live = self.registry.live_nodes();
        if live.is_empty() {
            return Err(Error::NoNodesAvailable);
        }

        let selected = self.strategy.select(&live, self.replication_factor);
        debug_assert!(!selected.is_empty());
        Ok(selected)
    }
}
