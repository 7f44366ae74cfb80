use domain::models::{CreateGeofenceRequest, EventType};
use domain::validation;
use monitoring::NotificationSound;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub platform: PlatformConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON preference file holding the saved geofence list.
    #[serde(default = "default_store_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Whether the simulated platform supports region monitoring at all.
    #[serde(default = "default_true")]
    pub monitoring_available: bool,

    /// Platform maximum for a single region's radius, in meters.
    #[serde(default = "default_max_region_distance")]
    pub max_region_distance: f64,

    /// Whether the app runs foregrounded during replay.
    #[serde(default = "default_true")]
    pub foreground: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_alert_title")]
    pub title: String,

    #[serde(default = "default_notification_delay_secs")]
    pub delay_secs: u64,

    /// Notification sound: "default" or "none".
    #[serde(default = "default_notification_sound")]
    pub sound: String,
}

impl NotificationsConfig {
    pub fn notification_sound(&self) -> NotificationSound {
        match self.sound.as_str() {
            "none" => NotificationSound::None,
            _ => NotificationSound::Default,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            title: default_alert_title(),
            delay_secs: default_notification_delay_secs(),
            sound: default_notification_sound(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Seed geofences and a position track to replay against them.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Geofences added on first run, when the store is empty.
    #[serde(default)]
    pub geofences: Vec<GeofenceSeed>,

    /// Positions fed to the simulated location subsystem, in order.
    #[serde(default)]
    pub track: Vec<TrackPoint>,

    /// Pause between track positions, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            geofences: Vec::new(),
            track: Vec::new(),
            step_delay_ms: default_step_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeofenceSeed {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub event_type: EventType,
}

impl GeofenceSeed {
    pub fn to_request(&self) -> CreateGeofenceRequest {
        CreateGeofenceRequest {
            latitude: self.latitude,
            longitude: self.longitude,
            radius_meters: self.radius_meters,
            note: self.note.clone(),
            event_type: self.event_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_store_path() -> String {
    "data/safezone_prefs.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_region_distance() -> f64 {
    400_000.0
}

fn default_alert_title() -> String {
    "Attention".to_string()
}

fn default_notification_delay_secs() -> u64 {
    1
}

fn default_notification_sound() -> String {
    "default".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_step_delay_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SZ__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SZ").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        if self.platform.max_region_distance <= 0.0 {
            return Err("platform.max_region_distance must be positive".to_string());
        }
        for (i, seed) in self.simulation.geofences.iter().enumerate() {
            validation::validate_latitude(seed.latitude)
                .and_then(|()| validation::validate_longitude(seed.longitude))
                .and_then(|()| validation::validate_radius(seed.radius_meters))
                .map_err(|e| format!("simulation.geofences[{i}]: {}", e.code))?;
        }
        for (i, point) in self.simulation.track.iter().enumerate() {
            validation::validate_latitude(point.latitude)
                .and_then(|()| validation::validate_longitude(point.longitude))
                .map_err(|e| format!("simulation.track[{i}]: {}", e.code))?;
        }
        Ok(())
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Creates a config entirely from embedded defaults and overrides,
    /// without relying on config files.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [store]
            path = "data/safezone_prefs.json"

            [platform]
            monitoring_available = true
            max_region_distance = 100.0
            foreground = true

            [notifications]
            title = "Attention"
            delay_secs = 1

            [logging]
            level = "info"
            format = "pretty"

            [simulation]
            step_delay_ms = 0
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_for_test(&[]).unwrap();
        assert_eq!(cfg.store.path, "data/safezone_prefs.json");
        assert!(cfg.platform.monitoring_available);
        assert_eq!(cfg.platform.max_region_distance, 100.0);
        assert_eq!(cfg.notifications.title, "Attention");
        assert_eq!(cfg.notifications.delay_secs, 1);
        assert!(cfg.simulation.geofences.is_empty());
        assert!(cfg.simulation.track.is_empty());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::load_for_test(&[
            ("platform.foreground", "false"),
            ("logging.format", "json"),
        ])
        .unwrap();
        assert!(!cfg.platform.foreground);
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn test_notification_sound_mapping() {
        let cfg = Config::load_for_test(&[]).unwrap();
        assert_eq!(cfg.notifications.sound, "default");
        assert_eq!(
            cfg.notifications.notification_sound(),
            NotificationSound::Default
        );

        let cfg = Config::load_for_test(&[("notifications.sound", "none")]).unwrap();
        assert_eq!(
            cfg.notifications.notification_sound(),
            NotificationSound::None
        );

        // Unrecognized values fall back to the default sound.
        let cfg = Config::load_for_test(&[("notifications.sound", "klaxon")]).unwrap();
        assert_eq!(
            cfg.notifications.notification_sound(),
            NotificationSound::Default
        );
    }

    #[test]
    fn test_rejects_nonpositive_max_region_distance() {
        let result = Config::load_for_test(&[("platform.max_region_distance", "0.0")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_seed_converts_to_request() {
        let seed = GeofenceSeed {
            latitude: 45.5,
            longitude: -73.6,
            radius_meters: 5000.0,
            note: "Home".to_string(),
            event_type: EventType::OnExit,
        };
        let request = seed.to_request();
        assert_eq!(request.note, "Home");
        assert_eq!(request.event_type, EventType::OnExit);
    }
}
