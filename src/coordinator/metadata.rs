//! Metadata store: file name → block list → replica locations
//!
//! The single authoritative mapping consulted by both write allocation and
//! read resolution. Both tables live behind one lock so an allocation is
//! atomic to readers: a resolved file never references a replica set the
//! store does not hold.
//!
//! State is process-memory-resident by design; nothing survives restart.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Opaque block identifier, unique across the system's lifetime.
pub type BlockId = Uuid;

/// A block and the ordered set of nodes holding its replicas.
///
/// The replica set is fixed at allocation time and immutable thereafter;
/// there is no re-replication in this scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    pub block_id: BlockId,
    pub replicas: Vec<String>,
}

/// File entry: declared size and ordered block list.
#[derive(Debug, Clone)]
struct FileEntry {
    size: u64,
    blocks: Vec<BlockId>,
}

#[derive(Default)]
struct Tables {
    files: HashMap<String, FileEntry>,
    block_replicas: HashMap<BlockId, Vec<String>>,
}

/// In-memory metadata store.
pub struct MetadataStore {
    tables: RwLock<Tables>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Create or overwrite the entry for `name` (last-write-wins) and record
    /// each block's replica set. A previous entry's blocks become orphaned,
    /// which is acceptable in this scope.
    pub fn create_file(&self, name: &str, size: u64, blocks: &[BlockDescriptor]) {
        let mut tables = self.tables.write().unwrap();
        for desc in blocks {
            tables
                .block_replicas
                .insert(desc.block_id, desc.replicas.clone());
        }
        tables.files.insert(
            name.to_string(),
            FileEntry {
                size,
                blocks: blocks.iter().map(|d| d.block_id).collect(),
            },
        );
    }

    /// Resolve a file to its declared size and ordered block descriptors.
    pub fn resolve_file(&self, name: &str) -> Result<(u64, Vec<BlockDescriptor>)> {
        let tables = self.tables.read().unwrap();
        let entry = tables
            .files
            .get(name)
            .ok_or_else(|| Error::FileNotFound(name.to_string()))?;

        let mut blocks = Vec::with_capacity(entry.blocks.len());
        for block_id in &entry.blocks {
            // Both tables are written under one lock, so a dangling block
            // reference indicates corrupted state rather than a race.
            let replicas = tables.block_replicas.get(block_id).ok_or_else(|| {
                Error::Internal(format!("dangling block reference: {}", block_id))
            })?;
            blocks.push(BlockDescriptor {
                block_id: *block_id,
                replicas: replicas.clone(),
            });
        }

        Ok((entry.size, blocks))
    }

    /// All file names currently recorded.
    pub fn list_files(&self) -> Vec<String> {
        let tables = self.tables.read().unwrap();
        let mut names: Vec<String> = tables.files.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn file_count(&self) -> usize {
        self.tables.read().unwrap().files.len()
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(replicas: &[&str]) -> BlockDescriptor {
        BlockDescriptor {
            block_id: Uuid::new_v4(),
            replicas: replicas.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_create_and_resolve() {
        let store = MetadataStore::new();
        let desc = descriptor(&["http://n1:5001", "http://n2:5002"]);

        store.create_file("report.txt", 1024, std::slice::from_ref(&desc));

        let (size, blocks) = store.resolve_file("report.txt").unwrap();
        assert_eq!(size, 1024);
        assert_eq!(blocks, vec![desc]);
    }

    #[test]
    fn test_resolve_missing_file() {
        let store = MetadataStore::new();
        assert!(matches!(
            store.resolve_file("missing.txt"),
            Err(Error::FileNotFound(_))
        ));
    }

    #[test]
    fn test_overwrite_is_last_write_wins() {
        let store = MetadataStore::new();
        let first = descriptor(&["http://n1:5001"]);
        let second = descriptor(&["http://n2:5002"]);

        store.create_file("f.txt", 100, std::slice::from_ref(&first));
        store.create_file("f.txt", 200, std::slice::from_ref(&second));

        let (size, blocks) = store.resolve_file("f.txt").unwrap();
        assert_eq!(size, 200);
        assert_eq!(blocks, vec![second]);
        assert_eq!(store.file_count(), 1);
    }

    #[test]
    fn test_list_files_sorted() {
        let store = MetadataStore::new();
        store.create_file("b.txt", 1, &[descriptor(&["http://n1:5001"])]);
        store.create_file("a.txt", 1, &[descriptor(&["http://n1:5001"])]);

        assert_eq!(store.list_files(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_multi_block_file_order_preserved() {
        let store = MetadataStore::new();
        let blocks = vec![
            descriptor(&["http://n1:5001"]),
            descriptor(&["http://n2:5002"]),
            descriptor(&["http://n1:5001"]),
        ];

        store.create_file("big.bin", 3 * 64, &blocks);

        let (_, resolved) = store.resolve_file("big.bin").unwrap();
        assert_eq!(resolved, blocks);
    }

    #[test]
    fn test_concurrent_create_and_resolve_never_dangles() {
        use std::sync::Arc;

        let store = Arc::new(MetadataStore::new());
        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..500 {
                    let desc = descriptor(&["http://n1:5001"]);
                    store.create_file("hot.txt", i, std::slice::from_ref(&desc));
                }
            })
        };
        let reader = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..500 {
                    match store.resolve_file("hot.txt") {
                        Ok((_, blocks)) => {
                            assert!(!blocks.is_empty());
                            assert!(!blocks[0].replicas.is_empty());
                        }
                        Err(Error::FileNotFound(_)) => {}
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
    }
}
