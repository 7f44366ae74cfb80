//! Domain layer for SafeZone.
//!
//! This crate contains:
//! - Domain models (GeofenceRecord, RegionEvent)
//! - Validation helpers for the creation boundary
//! - The geofencing error taxonomy

pub mod error;
pub mod models;
pub mod validation;

pub use error::GeofenceError;
pub use models::{
    AuthorizationStatus, CreateGeofenceRequest, EventType, GeofenceRecord, RegionEvent,
};
