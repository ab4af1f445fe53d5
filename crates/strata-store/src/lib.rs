//! Strata Snapshot Storage
//!
//! Persistence for built risk factors. A [`SnapshotStore`] holds opaque
//! bytes under a [`SnapshotKey`] (kind, optional underlying, snapshot date);
//! [`load_json`] and [`store_json`] add typed JSON access on top.
//!
//! # Backends
//!
//! - [`FileSnapshotStore`]: one `<key>.json` file per snapshot under a root
//!   directory
//! - [`MemorySnapshotStore`]: concurrent in-memory map, nothing persisted
//!
//! # Example
//!
//! ```rust
//! use strata_core::Date;
//! use strata_store::{load_json, store_json, MemorySnapshotStore, SnapshotKey, SnapshotKind};
//!
//! let store = MemorySnapshotStore::new();
//! let key = SnapshotKey::for_underlying(
//!     SnapshotKind::DividendCurve,
//!     "SPY",
//!     Date::from_ymd(2025, 5, 15).unwrap(),
//! );
//!
//! store_json(&store, &key, &vec![0.012, 0.013]).unwrap();
//! let rates: Option<Vec<f64>> = load_json(&store, &key).unwrap();
//! assert_eq!(rates, Some(vec![0.012, 0.013]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod file;
pub mod key;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileSnapshotStore;
pub use key::{SnapshotKey, SnapshotKind};
pub use memory::MemorySnapshotStore;
pub use traits::{load_json, store_json, SnapshotStore};
