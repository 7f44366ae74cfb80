//! Geofence collection persistence.
//!
//! The whole collection is the unit of persistence: one serialized list
//! under one store key, rewritten on every change. There is no
//! partial-update API.

use std::sync::Arc;

use domain::models::GeofenceRecord;
use tracing::warn;

use crate::store::PreferenceStore;

/// Preference-store key holding the serialized geofence list.
pub const SAVED_GEOFENCES_KEY: &str = "saved_geofences";

/// Loads and saves the ordered geofence collection.
#[derive(Clone)]
pub struct GeofenceStore {
    store: Arc<dyn PreferenceStore>,
}

impl GeofenceStore {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Reads the persisted collection.
    ///
    /// A missing key or an undecodable value degrades to an empty
    /// collection; decode failures are logged, never propagated.
    pub fn load_all(&self) -> Vec<GeofenceRecord> {
        let Some(raw) = self.store.get(SAVED_GEOFENCES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Discarding undecodable geofence list");
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted collection in a single store write.
    ///
    /// Best-effort: encode and write failures are logged and swallowed.
    pub fn save_all(&self, records: &[GeofenceRecord]) {
        let serialized = match serde_json::to_string(records) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "Could not encode geofence list; save dropped");
                return;
            }
        };
        if let Err(err) = self.store.set(SAVED_GEOFENCES_KEY, &serialized) {
            warn!(error = %err, "Could not write geofence list; save dropped");
        }
    }
}
