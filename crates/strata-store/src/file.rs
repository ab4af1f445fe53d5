//! File-based snapshot store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::key::SnapshotKey;
use crate::traits::SnapshotStore;

/// Stores each snapshot as `<root>/<key>.json`.
///
/// Writes go to a temporary sibling file that is renamed into place, so a
/// reader never sees a partially written snapshot.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    #[must_use]
    pub fn path_for(&self, key: &SnapshotKey) -> PathBuf {
        self.root.join(format!("{}.json", key.render()))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    fn load(&self, key: &SnapshotKey) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn store(&self, key: &SnapshotKey, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::io(path, e));
        }

        log::debug!("wrote snapshot {}", path.display());
        Ok(())
    }

    fn contains(&self, key: &SnapshotKey) -> StoreResult<bool> {
        Ok(self.path_for(key).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SnapshotKind;
    use strata_core::Date;

    fn key() -> SnapshotKey {
        SnapshotKey::for_underlying(
            SnapshotKind::DividendCurve,
            "SPY",
            Date::from_ymd(2025, 5, 15).unwrap(),
        )
    }

    #[test]
    fn test_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("snapshots");

        let store = FileSnapshotStore::new(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }

    #[test]
    fn test_path_for_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();

        assert_eq!(
            store.path_for(&key()),
            dir.path().join("dividend_curve_SPY_2025-05-15.json")
        );
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();

        assert!(store.load(&key()).unwrap().is_none());
        assert!(!store.contains(&key()).unwrap());

        store.store(&key(), br#"{"a":1}"#).unwrap();

        assert!(store.contains(&key()).unwrap());
        assert_eq!(store.load(&key()).unwrap().unwrap(), br#"{"a":1}"#);
        assert!(!dir.path().join("dividend_curve_SPY_2025-05-15.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path()).unwrap();
        // A non-empty directory at the target path makes the rename fail
        let target = store.path_for(&key());
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), b"x").unwrap();

        let result = store.store(&key(), br#"{"a":1}"#);

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!dir.path().join("dividend_curve_SPY_2025-05-15.json.tmp").exists());
        assert!(target.join("occupied").is_file());
    }

    #[test]
    fn test_root_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = FileSnapshotStore::new(file.path());
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
