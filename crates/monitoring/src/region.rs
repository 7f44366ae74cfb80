//! Circular monitoring regions.

use domain::models::{EventType, GeofenceRecord};
use geo::{HaversineDistance, Point};

/// Circular region descriptor handed to the location subsystem.
///
/// The notify flags are mutually exclusive: exactly one of them is set,
/// derived from the record's trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    pub identifier: String,
    pub notify_on_entry: bool,
    pub notify_on_exit: bool,
}

impl CircularRegion {
    /// Builds the monitoring descriptor for a record.
    pub fn from_record(record: &GeofenceRecord) -> Self {
        let notify_on_entry = record.event_type == EventType::OnEntry;
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            radius_meters: record.radius_meters,
            identifier: record.identifier.clone(),
            notify_on_entry,
            notify_on_exit: !notify_on_entry,
        }
    }

    /// Whether a coordinate lies within the region boundary.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let center = Point::new(self.longitude, self.latitude);
        let position = Point::new(longitude, latitude);
        center.haversine_distance(&position) <= self.radius_meters
    }
}
