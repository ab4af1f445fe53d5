//! In-memory snapshot store.
//!
//! Useful for tests and for sharing built factors between engines within one
//! process. Data is not persisted across restarts.

use dashmap::DashMap;

use crate::error::StoreResult;
use crate::key::SnapshotKey;
use crate::traits::SnapshotStore;

/// In-memory snapshot store backed by a concurrent map.
///
/// # Example
///
/// ```rust
/// use strata_core::Date;
/// use strata_store::{MemorySnapshotStore, SnapshotKey, SnapshotKind, SnapshotStore};
///
/// let store = MemorySnapshotStore::new();
/// let key = SnapshotKey::new(SnapshotKind::ParCurve, Date::from_ymd(2025, 5, 15).unwrap());
///
/// store.store(&key, b"{}").unwrap();
/// assert!(store.contains(&key).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    snapshots: DashMap<SnapshotKey, Vec<u8>>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Removes a snapshot, returning true if it existed.
    pub fn remove(&self, key: &SnapshotKey) -> bool {
        self.snapshots.remove(key).is_some()
    }

    /// Clears all snapshots.
    pub fn clear(&self) {
        self.snapshots.clear();
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn load(&self, key: &SnapshotKey) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.snapshots.get(key).map(|entry| entry.value().clone()))
    }

    fn store(&self, key: &SnapshotKey, bytes: &[u8]) -> StoreResult<()> {
        log::debug!("memory store: {} ({} bytes)", key, bytes.len());
        self.snapshots.insert(key.clone(), bytes.to_vec());
        Ok(())
    }

    fn contains(&self, key: &SnapshotKey) -> StoreResult<bool> {
        Ok(self.snapshots.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SnapshotKind;
    use crate::traits::{load_json, store_json};
    use crate::StoreError;
    use strata_core::Date;

    fn key(kind: SnapshotKind) -> SnapshotKey {
        SnapshotKey::for_underlying(kind, "SPY", Date::from_ymd(2025, 5, 15).unwrap())
    }

    #[test]
    fn test_missing_key_loads_none() {
        let store = MemorySnapshotStore::new();
        assert!(store.load(&key(SnapshotKind::VolSurface)).unwrap().is_none());
        assert!(!store.contains(&key(SnapshotKind::VolSurface)).unwrap());
    }

    #[test]
    fn test_store_replaces() {
        let store = MemorySnapshotStore::new();
        let k = key(SnapshotKind::DividendCurve);

        store.store(&k, b"first").unwrap();
        store.store(&k, b"second").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&k).unwrap().unwrap(), b"second");
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemorySnapshotStore::new();
        store.store(&key(SnapshotKind::DividendCurve), b"d").unwrap();

        assert!(!store.contains(&key(SnapshotKind::VolSurface)).unwrap());
        assert!(store.remove(&key(SnapshotKind::DividendCurve)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemorySnapshotStore::new();
        let k = key(SnapshotKind::OptionChains);
        let values = vec![1.5_f64, 2.25, -0.125];

        store_json(&store, &k, &values).unwrap();
        let loaded: Vec<f64> = load_json(&store, &k).unwrap().unwrap();

        assert_eq!(loaded, values);
    }

    #[test]
    fn test_load_json_rejects_garbage() {
        let store = MemorySnapshotStore::new();
        let k = key(SnapshotKind::SpotCurve);
        store.store(&k, b"not json").unwrap();

        let result: Result<Option<Vec<f64>>, StoreError> = load_json(&store, &k);
        assert!(result.unwrap_err().is_codec());
    }
}
