//! Domain models for SafeZone.

pub mod geofence;
pub mod region_event;

pub use geofence::{CreateGeofenceRequest, EventType, GeofenceRecord};
pub use region_event::{AuthorizationStatus, RegionEvent};
