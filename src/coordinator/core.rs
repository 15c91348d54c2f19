//! Coordinator composition root
//!
//! Composes the node registry, block placer, and metadata store under one
//! concurrency discipline. The coordinator itself is stateless between
//! requests; all state lives in the registry and the metadata store.
//! It never touches the data path: allocation reserves placement metadata
//! only, and pushing bytes to replicas is the client's job.

use crate::common::{validate_file_name, Error, Result};
use crate::coordinator::metadata::{BlockDescriptor, MetadataStore};
use crate::coordinator::placement::BlockPlacer;
use crate::coordinator::registry::NodeRegistry;
use std::sync::Arc;
use uuid::Uuid;

pub struct Coordinator {
    registry: Arc<NodeRegistry>,
    placer: BlockPlacer,
    metadata: MetadataStore,
}

impl Coordinator {
    pub fn new(registry: Arc<NodeRegistry>, replication_factor: usize) -> Self {
        let placer = BlockPlacer::new(Arc::clone(&registry), replication_factor);
        Self {
            registry,
            placer,
            metadata: MetadataStore::new(),
        }
    }

    /// Record a liveness signal from a storage node.
    pub fn register_liveness(&self, address: &str) -> Result<()> {
        self.registry.record_liveness(address)
    }

    /// Allocate placement for a new file: pick a replica set, mint one block
    /// id, and record the mapping atomically. On any failure the metadata
    /// store is left untouched.
    ///
    /// Single-block-per-file is the current splitting policy; the metadata
    /// store itself handles multi-block files.
    pub fn allocate_file(&self, name: &str, size: u64) -> Result<BlockDescriptor> {
        validate_file_name(name)?;
        if size == 0 {
            return Err(Error::BadRequest("file size must be > 0".into()));
        }

        let replicas = self.placer.select_replicas()?;
        let descriptor = BlockDescriptor {
            block_id: Uuid::new_v4(),
            replicas,
        };
        self.metadata
            .create_file(name, size, std::slice::from_ref(&descriptor));

        tracing::info!(
            "Allocated {} ({} bytes) -> block {} on {:?}",
            name,
            size,
            descriptor.block_id,
            descriptor.replicas
        );
        Ok(descriptor)
    }

    /// Resolve a file to its declared size and block locations.
    pub fn resolve_file(&self, name: &str) -> Result<(u64, Vec<BlockDescriptor>)> {
        self.metadata.resolve_file(name)
    }

    pub fn list_files(&self) -> Vec<String> {
        self.metadata.list_files()
    }

    pub fn list_live_nodes(&self) -> Vec<String> {
        self.registry.live_nodes()
    }

    /// Run one reap pass over the registry, logging dropped nodes.
    pub fn reap_dead_nodes(&self) {
        for addr in self.registry.reap() {
            tracing::warn!("Node {} is dead (no heartbeat)", addr);
        }
    }

    pub fn file_count(&self) -> usize {
        self.metadata.file_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn coordinator() -> Coordinator {
        let registry = Arc::new(NodeRegistry::new(Duration::from_secs(10)));
        Coordinator::new(registry, 3)
    }

    #[test]
    fn test_allocate_without_nodes_is_unavailable() {
        let coord = coordinator();
        assert!(matches!(
            coord.allocate_file("f.txt", 100),
            Err(Error::NoNodesAvailable)
        ));
        // Failed allocation must not leave partial metadata behind.
        assert!(coord.list_files().is_empty());
    }

    #[test]
    fn test_allocate_rejects_bad_input() {
        let coord = coordinator();
        coord.register_liveness("http://n1:5001").unwrap();

        assert!(matches!(
            coord.allocate_file("", 100),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            coord.allocate_file("f.txt", 0),
            Err(Error::BadRequest(_))
        ));
        assert!(coord.list_files().is_empty());
    }

    #[test]
    fn test_allocate_and_resolve_round_trip() {
        let coord = coordinator();
        coord.register_liveness("http://n1:5001").unwrap();
        coord.register_liveness("http://n2:5002").unwrap();

        let desc = coord.allocate_file("f.txt", 1024).unwrap();
        assert!(desc
            .replicas
            .iter()
            .all(|r| r == "http://n1:5001" || r == "http://n2:5002"));

        let (size, blocks) = coord.resolve_file("f.txt").unwrap();
        assert_eq!(size, 1024);
        assert_eq!(blocks, vec![desc]);
        assert_eq!(coord.list_files(), vec!["f.txt"]);
    }

    #[test]
    fn test_each_allocation_gets_fresh_block_id() {
        let coord = coordinator();
        coord.register_liveness("http://n1:5001").unwrap();

        let a = coord.allocate_file("a.txt", 1).unwrap();
        let b = coord.allocate_file("b.txt", 1).unwrap();
        assert_ne!(a.block_id, b.block_id);
    }
}
