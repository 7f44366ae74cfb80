//! Persistence layer for SafeZone.
//!
//! This crate contains:
//! - The key-value preference store seam and its implementations
//! - The geofence collection adapter (whole-list load/save)

pub mod geofences;
pub mod store;

pub use geofences::{GeofenceStore, SAVED_GEOFENCES_KEY};
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError};
