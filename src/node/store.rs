//! Block store: durable file-per-block persistence
//!
//! Each block lives in its own file named by block id. A put writes to a
//! temp file, fsyncs, then renames into place, so a block is never visible
//! half-written and `store` only acks after the bytes are durable.

use crate::common::{Error, Result};
use crate::coordinator::BlockId;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct BlockStore {
    root: PathBuf,
}

impl BlockStore {
    /// Open or create a block store rooted at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn block_path(&self, block_id: &BlockId) -> PathBuf {
        self.root.join(block_id.to_string())
    }

    /// Durably store `data` under `block_id`. Overwrites any previous
    /// content for the same id.
    pub fn put(&self, block_id: &BlockId, data: &[u8]) -> Result<()> {
        let final_path = self.block_path(block_id);
        let tmp_path = self.root.join(format!("{}.tmp", block_id));

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &final_path)?;

        tracing::debug!("Stored block {} ({} bytes)", block_id, data.len());
        Ok(())
    }

    /// Fetch the bytes last stored under `block_id`.
    pub fn get(&self, block_id: &BlockId) -> Result<Vec<u8>> {
        match fs::read(self.block_path(block_id)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::BlockNotFound(block_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Number of blocks currently held.
    pub fn block_count(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().extension().is_none() {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn test_put_and_get() {
        let dir = TempDir::new().unwrap();
        let store = BlockStore::open(dir.path().join("blocks")).unwrap();

        let id = Uuid::new_v4();
        store.put(&id, b"hello blocks").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"hello blocks");
    }

    #[test]
    fn test_get_missing_block() {
        let dir = TempDir::new().unwrap();
        let store = BlockStore::open(dir.path().join("blocks")).unwrap();

        assert!(matches!(
            store.get(&Uuid::new_v4()),
            Err(Error::BlockNotFound(_))
        ));
    }

    #[test]
    fn test_overwrite_returns_latest() {
        let dir = TempDir::new().unwrap();
        let store = BlockStore::open(dir.path().join("blocks")).unwrap();

        let id = Uuid::new_v4();
        store.put(&id, b"v1").unwrap();
        store.put(&id, b"v2").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"v2");
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blocks");
        let id = Uuid::new_v4();

        {
            let store = BlockStore::open(&path).unwrap();
            store.put(&id, b"persisted").unwrap();
        }
        {
            let store = BlockStore::open(&path).unwrap();
            assert_eq!(store.get(&id).unwrap(), b"persisted");
            assert_eq!(store.block_count().unwrap(), 1);
        }
    }
}
