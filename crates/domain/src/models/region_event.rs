//! Region events delivered by the location subsystem.

use serde::{Deserialize, Serialize};

/// Location authorization state, read live from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Granted,
}

impl AuthorizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "not_determined",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Granted => "granted",
        }
    }
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Asynchronous signal from the location subsystem, tagged by kind.
///
/// Crossing events carry only the region identifier; whether the boundary
/// was entered or exited is implicit in the variant, and the handler treats
/// both the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEvent {
    Entered { identifier: String },
    Exited { identifier: String },
    AuthorizationChanged { status: AuthorizationStatus },
    MonitoringFailed { identifier: String, reason: String },
    LocationFailed { reason: String },
}

impl RegionEvent {
    /// The region identifier for crossing and failure events.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            RegionEvent::Entered { identifier }
            | RegionEvent::Exited { identifier }
            | RegionEvent::MonitoringFailed { identifier, .. } => Some(identifier),
            RegionEvent::AuthorizationChanged { .. } | RegionEvent::LocationFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_status_display() {
        assert_eq!(AuthorizationStatus::NotDetermined.to_string(), "not_determined");
        assert_eq!(AuthorizationStatus::Denied.to_string(), "denied");
        assert_eq!(AuthorizationStatus::Granted.to_string(), "granted");
    }

    #[test]
    fn test_event_identifier() {
        let entered = RegionEvent::Entered {
            identifier: "A".into(),
        };
        assert_eq!(entered.identifier(), Some("A"));

        let changed = RegionEvent::AuthorizationChanged {
            status: AuthorizationStatus::Granted,
        };
        assert_eq!(changed.identifier(), None);
    }
}
