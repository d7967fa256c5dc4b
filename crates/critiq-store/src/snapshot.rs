//! Durable key-value snapshot backing.
//!
//! The [`SnapshotStore`] is the local-storage analogue: each key maps to a
//! single JSON file holding a whole-collection snapshot, fully overwritten
//! on every write.  There is no incremental or append persistence and no
//! schema version tag; a missing key simply means "empty".

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Handle to a snapshot directory.  Cheap to clone; both stores hold one
/// over the same root and write disjoint keys.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Open (or create) the default application snapshot directory.
    ///
    /// Snapshots are placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/critiq/`
    /// - macOS:   `~/Library/Application Support/com.critiq.critiq/`
    /// - Windows: `{FOLDERID_RoamingAppData}\critiq\critiq\data\`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "critiq", "critiq").ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) a snapshot directory at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        tracing::debug!(path = %root.display(), "opening snapshot store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Load the snapshot stored under `key`.
    ///
    /// Absence is `Ok(None)`, never an error.  A snapshot that exists but
    /// cannot be parsed back into `T` propagates the parse error so the
    /// boot sequence can decide between fatal and reset-to-empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// Serialize `value` and fully overwrite the snapshot under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let data = serde_json::to_vec(value)?;
        fs::write(self.key_path(key), data)?;
        tracing::debug!(key, "snapshot written");
        Ok(())
    }

    /// Erase the snapshot under `key`.  Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Filesystem root of this snapshot store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open_at(dir.path()).unwrap();
        let loaded: Option<Vec<String>> = store.load("absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open_at(dir.path()).unwrap();

        store.save("names", &vec!["a".to_string(), "b".to_string()]).unwrap();
        let loaded: Option<Vec<String>> = store.load("names").unwrap();
        assert_eq!(loaded.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn save_overwrites_whole_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open_at(dir.path()).unwrap();

        store.save("n", &vec![1, 2, 3]).unwrap();
        store.save("n", &vec![9]).unwrap();
        let loaded: Vec<i32> = store.load("n").unwrap().unwrap();
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open_at(dir.path()).unwrap();

        store.save("n", &1).unwrap();
        store.remove("n").unwrap();
        store.remove("n").unwrap();
        let loaded: Option<i32> = store.load("n").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_snapshot_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open_at(dir.path()).unwrap();

        std::fs::write(dir.path().join("bad.json"), b"{not json").unwrap();
        let loaded: Result<Option<Vec<i32>>> = store.load("bad");
        assert!(matches!(loaded, Err(StoreError::Json(_))));
    }
}
