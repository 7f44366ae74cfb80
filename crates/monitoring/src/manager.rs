//! Geofence lifecycle manager.
//!
//! Owns the in-memory collection and keeps it converged with the
//! monitored-region set and the persisted list: no monitor outlives its
//! record, and every record has had monitoring attempted.

use domain::models::{CreateGeofenceRequest, GeofenceRecord};
use domain::GeofenceError;
use persistence::GeofenceStore;
use tracing::{info, warn};
use validator::Validate;

use crate::coordinator::MonitoringCoordinator;

/// Cap on concurrently tracked geofences, matching the platform's monitored
/// region limit.
pub const MAX_GEOFENCES: usize = 20;

/// Result of adding a geofence.
#[derive(Debug)]
pub struct AddOutcome {
    /// The stored record, with its generated identifier and the radius that
    /// is actually enforced.
    pub record: GeofenceRecord,
    /// Non-fatal condition the presentation layer should surface, if any.
    pub warning: Option<GeofenceError>,
}

/// The geofence collection and its add/remove/restore lifecycle.
pub struct GeofenceManager {
    records: Vec<GeofenceRecord>,
    coordinator: MonitoringCoordinator,
    store: GeofenceStore,
}

impl GeofenceManager {
    pub fn new(coordinator: MonitoringCoordinator, store: GeofenceStore) -> Self {
        Self {
            records: Vec::new(),
            coordinator,
            store,
        }
    }

    /// Restores the persisted collection and re-submits every record to
    /// monitoring. Per-record failures are logged, never fatal.
    pub async fn restore(&mut self) {
        self.records = self.store.load_all();
        for record in &mut self.records {
            if let Err(err) = self.coordinator.start_monitoring(record).await {
                warn!(
                    identifier = %record.identifier,
                    error = %err,
                    "Restored geofence is not actively monitored"
                );
            }
        }
        // Radii may have been clamped against a different platform maximum
        // than the one they were saved under.
        self.store.save_all(&self.records);
        info!(count = self.records.len(), "Restored geofence collection");
    }

    /// Creates a record from validated input, starts monitoring and
    /// persists the updated collection.
    ///
    /// Monitoring problems that the original flow treats as warnings
    /// (unsupported platform, missing permission) still add the record and
    /// are returned in [`AddOutcome::warning`].
    pub async fn add(&mut self, request: CreateGeofenceRequest) -> Result<AddOutcome, GeofenceError> {
        if self.records.len() >= MAX_GEOFENCES {
            return Err(GeofenceError::LimitReached);
        }
        request.validate()?;

        let mut record = request.into_record();
        let warning = match self.coordinator.start_monitoring(&mut record).await {
            Ok(()) => None,
            Err(err) => {
                warn!(identifier = %record.identifier, "{err}");
                Some(err)
            }
        };

        self.records.push(record.clone());
        self.store.save_all(&self.records);
        info!(identifier = %record.identifier, note = %record.note, "Added geofence");
        Ok(AddOutcome { record, warning })
    }

    /// Stops monitoring and removes the record with `identifier`, then
    /// rewrites the persisted collection. No-op for unknown identifiers.
    pub async fn remove(&mut self, identifier: &str) {
        let Some(index) = self
            .records
            .iter()
            .position(|record| record.identifier == identifier)
        else {
            return;
        };
        let record = self.records.remove(index);
        self.coordinator.stop_monitoring(&record).await;
        self.store.save_all(&self.records);
        info!(identifier = %record.identifier, "Removed geofence");
    }

    pub fn records(&self) -> &[GeofenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the presentation layer should refuse further additions.
    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_GEOFENCES
    }
}
