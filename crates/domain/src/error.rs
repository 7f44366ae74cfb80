//! Geofencing error taxonomy.
//!
//! None of these are fatal to the process: every variant degrades to a
//! visible-but-non-blocking warning or a log line at the call site.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeofenceError {
    /// The platform cannot perform region monitoring at all. The record is
    /// still kept; it simply never becomes active.
    #[error("geofencing is not supported on this device")]
    MonitoringUnsupported,

    /// Location permission has not been granted yet. The region is already
    /// registered and the platform activates it once permission arrives.
    #[error(
        "your geofence is saved but will only be activated once you grant \
         permission to access the device location"
    )]
    PermissionPending,

    /// The platform rejected a specific region. Logged only; the record
    /// remains in the list but unmonitored.
    #[error("monitoring failed for region {identifier}: {reason}")]
    MonitoringFailed { identifier: String, reason: String },

    /// The creation request failed field validation.
    #[error("validation error: {0}")]
    InvalidInput(String),

    /// The presentation-side cap on tracked geofences was hit.
    #[error("the geofence limit has been reached")]
    LimitReached,
}

impl From<validator::ValidationErrors> for GeofenceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {message}")
                })
            })
            .collect();
        GeofenceError::InvalidInput(details.join("; "))
    }
}
