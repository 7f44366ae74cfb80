//! Geofence record domain model.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Boundary crossing that triggers a notification for a record.
///
/// The two triggers are mutually exclusive: a record notifies on entry or on
/// exit, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    #[default]
    OnEntry,
    OnExit,
}

impl EventType {
    /// Converts to the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::OnEntry => "onEntry",
            EventType::OnExit => "onExit",
        }
    }

    /// Parses from the persisted string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "onEntry" => Some(EventType::OnEntry),
            "onExit" => Some(EventType::OnExit),
            _ => None,
        }
    }

    /// Human-readable trigger description used in subtitles.
    pub fn description(&self) -> &'static str {
        match self {
            EventType::OnEntry => "on entry",
            EventType::OnExit => "on exit",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Unrecognized values decode to OnEntry instead of erroring, so records
// written by a newer format version still load. Kept from the original
// persisted format.
impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(EventType::from_str(&raw).unwrap_or_default())
    }
}

/// One monitored zone: a circular region around a coordinate, a note and the
/// crossing that should raise a notification.
///
/// Serializes to a flat record with keys `latitude`, `longitude`, `radius`,
/// `identifier`, `note` and `eventType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters. Clamped to the platform maximum before monitoring
    /// starts, so the persisted value is the radius actually enforced.
    #[serde(rename = "radius")]
    pub radius_meters: f64,
    /// Join key between this record, its platform region and delivered
    /// crossing events. Unique across the collection.
    pub identifier: String,
    pub note: String,
    #[serde(rename = "eventType", default)]
    pub event_type: EventType,
}

impl GeofenceRecord {
    /// Creates a record with a freshly generated identifier.
    pub fn new(
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        note: impl Into<String>,
        event_type: EventType,
    ) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
            identifier: Uuid::new_v4().to_string(),
            note: note.into(),
            event_type,
        }
    }

    /// Display title: the note, or a default label when the note is empty.
    pub fn title(&self) -> &str {
        if self.note.is_empty() {
            "No note"
        } else {
            &self.note
        }
    }

    /// Display subtitle combining radius and trigger.
    pub fn subtitle(&self) -> String {
        format!(
            "Radius: {}m - {}",
            self.radius_meters,
            self.event_type.description()
        )
    }
}

/// Validated input from the presentation collaborator for creating a record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeofenceRequest {
    #[validate(custom(function = "crate::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "crate::validation::validate_longitude"))]
    pub longitude: f64,

    #[validate(custom(function = "crate::validation::validate_radius"))]
    pub radius_meters: f64,

    #[serde(default)]
    pub note: String,

    #[serde(default)]
    pub event_type: EventType,
}

impl CreateGeofenceRequest {
    /// Builds the record this request describes, generating its identifier.
    pub fn into_record(self) -> GeofenceRecord {
        GeofenceRecord::new(
            self.latitude,
            self.longitude,
            self.radius_meters,
            self.note,
            self.event_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_record() -> GeofenceRecord {
        GeofenceRecord {
            latitude: 45.5,
            longitude: -73.6,
            radius_meters: 100.0,
            identifier: "A".to_string(),
            note: "Home".to_string(),
            event_type: EventType::OnEntry,
        }
    }

    #[test]
    fn test_event_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EventType::OnEntry).unwrap(),
            "\"onEntry\""
        );
        assert_eq!(
            serde_json::to_string(&EventType::OnExit).unwrap(),
            "\"onExit\""
        );
    }

    #[test]
    fn test_event_type_from_str() {
        assert_eq!(EventType::from_str("onEntry"), Some(EventType::OnEntry));
        assert_eq!(EventType::from_str("onExit"), Some(EventType::OnExit));
        assert_eq!(EventType::from_str("onDwell"), None);
    }

    #[test]
    fn test_event_type_unknown_decodes_to_on_entry() {
        // Deliberate fail-soft kept from the original persisted format:
        // unrecognized trigger strings decode to OnEntry rather than failing
        // the whole record.
        let decoded: EventType = serde_json::from_str("\"onDwell\"").unwrap();
        assert_eq!(decoded, EventType::OnEntry);

        let decoded: EventType = serde_json::from_str("\"\"").unwrap();
        assert_eq!(decoded, EventType::OnEntry);
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let decoded: GeofenceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_record_serialized_keys() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"latitude\":45.5"));
        assert!(json.contains("\"longitude\":-73.6"));
        assert!(json.contains("\"radius\":100.0"));
        assert!(json.contains("\"identifier\":\"A\""));
        assert!(json.contains("\"note\":\"Home\""));
        assert!(json.contains("\"eventType\":\"onEntry\""));
    }

    #[test]
    fn test_record_missing_event_type_decodes_to_on_entry() {
        let json = r#"{
            "latitude": 45.5,
            "longitude": -73.6,
            "radius": 100.0,
            "identifier": "A",
            "note": "Home"
        }"#;
        let decoded: GeofenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.event_type, EventType::OnEntry);
    }

    #[test]
    fn test_new_generates_distinct_identifiers() {
        let a = GeofenceRecord::new(0.0, 0.0, 10.0, "", EventType::OnEntry);
        let b = GeofenceRecord::new(0.0, 0.0, 10.0, "", EventType::OnEntry);
        assert_ne!(a.identifier, b.identifier);
    }

    #[test]
    fn test_title_defaults_when_note_empty() {
        let mut record = sample_record();
        assert_eq!(record.title(), "Home");
        record.note.clear();
        assert_eq!(record.title(), "No note");
    }

    #[test]
    fn test_subtitle() {
        let record = sample_record();
        assert_eq!(record.subtitle(), "Radius: 100m - on entry");
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateGeofenceRequest {
            latitude: 45.5,
            longitude: -73.6,
            radius_meters: 5000.0,
            note: "Home".to_string(),
            event_type: EventType::OnEntry,
        };
        assert!(request.validate().is_ok());

        let bad_latitude = CreateGeofenceRequest {
            latitude: 91.0,
            ..request.clone()
        };
        assert!(bad_latitude.validate().is_err());

        let bad_radius = CreateGeofenceRequest {
            radius_meters: 0.0,
            ..request
        };
        assert!(bad_radius.validate().is_err());
    }

    #[test]
    fn test_create_request_deserialization_defaults() {
        let json = r#"{"latitude": 45.5, "longitude": -73.6, "radiusMeters": 250.0}"#;
        let request: CreateGeofenceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.note, "");
        assert_eq!(request.event_type, EventType::OnEntry);
    }

    #[test]
    fn test_into_record_carries_fields() {
        let request = CreateGeofenceRequest {
            latitude: 45.5,
            longitude: -73.6,
            radius_meters: 250.0,
            note: "Work".to_string(),
            event_type: EventType::OnExit,
        };
        let record = request.into_record();
        assert_eq!(record.latitude, 45.5);
        assert_eq!(record.longitude, -73.6);
        assert_eq!(record.radius_meters, 250.0);
        assert_eq!(record.note, "Work");
        assert_eq!(record.event_type, EventType::OnExit);
        assert!(!record.identifier.is_empty());
    }
}
