//! The snapshot store seam.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::key::SnapshotKey;

/// Persistence for risk-factor snapshots.
///
/// Implementations store opaque bytes by [`SnapshotKey`]; they know nothing
/// about what the bytes encode. Typed access goes through [`load_json`] and
/// [`store_json`].
pub trait SnapshotStore: Send + Sync {
    /// Short name of the backend, for logging.
    fn backend_name(&self) -> &'static str;

    /// Loads the bytes stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &SnapshotKey) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous snapshot.
    fn store(&self, key: &SnapshotKey, bytes: &[u8]) -> StoreResult<()>;

    /// Returns true if a snapshot exists under `key`.
    fn contains(&self, key: &SnapshotKey) -> StoreResult<bool> {
        Ok(self.load(key)?.is_some())
    }
}

/// Loads and decodes a JSON snapshot.
///
/// # Errors
///
/// Returns `StoreError::Codec` if the stored bytes do not decode as `T`, and
/// propagates backend errors.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn SnapshotStore,
    key: &SnapshotKey,
) -> StoreResult<Option<T>> {
    let Some(bytes) = store.load(key)? else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::codec(key.render(), e.to_string()))
}

/// Encodes a value as JSON and stores it.
///
/// # Errors
///
/// Returns `StoreError::Codec` if `value` cannot be serialized, and
/// propagates backend errors.
pub fn store_json<T: Serialize + ?Sized>(
    store: &dyn SnapshotStore,
    key: &SnapshotKey,
    value: &T,
) -> StoreResult<()> {
    let bytes =
        serde_json::to_vec_pretty(value).map_err(|e| StoreError::codec(key.render(), e.to_string()))?;
    store.store(key, &bytes)
}
