//! Geofence monitoring layer for SafeZone.
//!
//! This crate contains:
//! - The location subsystem seam and its simulated implementation
//! - The monitoring coordinator (records in, platform regions out)
//! - The event notifier (crossing signals in, alerts/notifications out)
//! - The lifecycle manager keeping collection, monitors and storage converged

pub mod coordinator;
pub mod events;
pub mod manager;
pub mod monitor;
pub mod notifier;
pub mod region;

pub use coordinator::MonitoringCoordinator;
pub use events::spawn_event_loop;
pub use manager::{AddOutcome, GeofenceManager, MAX_GEOFENCES};
pub use monitor::{LocationMonitor, SimulatedLocationMonitor, MAX_MONITORED_REGIONS};
pub use notifier::{
    AlertPresenter, AppStateProvider, EventNotifier, LocalNotification, MockAlertPresenter,
    MockNotificationScheduler, NotificationScheduler, NotificationSound, NotifierSettings,
    ProcessAppState,
};
pub use region::CircularRegion;
