//! Monitoring coordinator: geofence records in, platform regions out.

use std::sync::Arc;

use domain::models::{AuthorizationStatus, GeofenceRecord};
use domain::GeofenceError;
use tracing::debug;

use crate::monitor::LocationMonitor;
use crate::region::CircularRegion;

/// Translates geofence records into region-monitoring requests.
#[derive(Clone)]
pub struct MonitoringCoordinator {
    monitor: Arc<dyn LocationMonitor>,
}

impl MonitoringCoordinator {
    pub fn new(monitor: Arc<dyn LocationMonitor>) -> Self {
        Self { monitor }
    }

    /// Registers `record` with the location subsystem.
    ///
    /// The radius is clamped to the platform maximum in place, so the caller
    /// persists the radius actually being enforced. When location permission
    /// is missing the region is still registered (the platform activates it
    /// once permission arrives) and [`GeofenceError::PermissionPending`] is
    /// returned so the caller can surface the warning; the record is kept
    /// either way.
    pub async fn start_monitoring(
        &self,
        record: &mut GeofenceRecord,
    ) -> Result<(), GeofenceError> {
        if !self.monitor.is_monitoring_available() {
            return Err(GeofenceError::MonitoringUnsupported);
        }

        let max = self.monitor.maximum_region_distance();
        if record.radius_meters > max {
            debug!(
                identifier = %record.identifier,
                requested = record.radius_meters,
                clamped = max,
                "Clamping region radius to platform maximum"
            );
            record.radius_meters = max;
        }

        let region = CircularRegion::from_record(record);
        self.monitor.start_monitoring(region).await;

        if self.monitor.authorization_status() != AuthorizationStatus::Granted {
            return Err(GeofenceError::PermissionPending);
        }
        Ok(())
    }

    /// Deregisters the monitored region matching `record`'s identifier.
    /// No-op when none is found.
    pub async fn stop_monitoring(&self, record: &GeofenceRecord) {
        for region in self.monitor.monitored_regions() {
            if region.identifier == record.identifier {
                self.monitor.stop_monitoring(&region.identifier).await;
            }
        }
    }

    /// Snapshot of the currently monitored regions.
    pub fn monitored_regions(&self) -> Vec<CircularRegion> {
        self.monitor.monitored_regions()
    }
}
