//! Location subsystem seam.
//!
//! [`LocationMonitor`] is the boundary the coordinator talks to. The real
//! host platform lives behind it; [`SimulatedLocationMonitor`] is an
//! in-process stand-in that evaluates position updates against registered
//! regions and delivers crossing events on the region event channel, the
//! same way the platform calls back into the app.

use std::sync::Mutex;

use async_trait::async_trait;
use domain::models::{AuthorizationStatus, RegionEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::region::CircularRegion;

/// Hard platform cap on concurrently monitored regions.
pub const MAX_MONITORED_REGIONS: usize = 20;

/// Default platform maximum for a single region's radius, in meters.
pub const DEFAULT_MAX_REGION_DISTANCE: f64 = 400_000.0;

/// Boundary to the platform's region-monitoring subsystem.
#[async_trait]
pub trait LocationMonitor: Send + Sync {
    /// Whether the platform can perform region monitoring at all.
    fn is_monitoring_available(&self) -> bool;

    /// Current location authorization, read live.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Maximum radius the platform will monitor, in meters.
    fn maximum_region_distance(&self) -> f64;

    /// Prompts the user for location permission.
    async fn request_permission(&self);

    /// Registers a region. Platform-side rejection (for example the region
    /// cap) is reported asynchronously as a `MonitoringFailed` event, not
    /// as a return value.
    async fn start_monitoring(&self, region: CircularRegion);

    /// Deregisters the region with the given identifier, if monitored.
    async fn stop_monitoring(&self, identifier: &str);

    /// Snapshot of the currently monitored regions.
    fn monitored_regions(&self) -> Vec<CircularRegion>;
}

struct MonitoredRegion {
    region: CircularRegion,
    inside: bool,
}

struct SimulatorState {
    authorization: AuthorizationStatus,
    regions: Vec<MonitoredRegion>,
}

/// Simulated location subsystem for development and testing.
pub struct SimulatedLocationMonitor {
    state: Mutex<SimulatorState>,
    events: mpsc::UnboundedSender<RegionEvent>,
    monitoring_available: bool,
    max_region_distance: f64,
}

impl SimulatedLocationMonitor {
    /// Creates a monitor that delivers region events on `events`.
    pub fn new(events: mpsc::UnboundedSender<RegionEvent>) -> Self {
        Self {
            state: Mutex::new(SimulatorState {
                authorization: AuthorizationStatus::NotDetermined,
                regions: Vec::new(),
            }),
            events,
            monitoring_available: true,
            max_region_distance: DEFAULT_MAX_REGION_DISTANCE,
        }
    }

    /// Simulates a device without region monitoring support.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.monitoring_available = available;
        self
    }

    /// Overrides the platform radius maximum.
    pub fn with_max_region_distance(mut self, meters: f64) -> Self {
        self.max_region_distance = meters;
        self
    }

    /// Starts out with the given authorization instead of `NotDetermined`.
    pub fn with_authorization(self, status: AuthorizationStatus) -> Self {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.authorization = status;
        }
        self
    }

    /// Changes the authorization status, emitting `AuthorizationChanged`.
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.authorization == status {
                return;
            }
            state.authorization = status;
        }
        self.emit(RegionEvent::AuthorizationChanged { status });
    }

    /// Moves the simulated device, delivering crossing events for every
    /// region boundary transition whose notify flag matches.
    pub fn advance_to(&self, latitude: f64, longitude: f64) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state.authorization {
            AuthorizationStatus::Granted => {}
            AuthorizationStatus::Denied => {
                drop(state);
                self.emit(RegionEvent::LocationFailed {
                    reason: "location updates are not authorized".to_string(),
                });
                return;
            }
            AuthorizationStatus::NotDetermined => {
                debug!("Position update before authorization; dropping");
                return;
            }
        }

        let mut crossings = Vec::new();
        for monitored in &mut state.regions {
            let inside = monitored.region.contains(latitude, longitude);
            if inside == monitored.inside {
                continue;
            }
            monitored.inside = inside;
            if inside && monitored.region.notify_on_entry {
                crossings.push(RegionEvent::Entered {
                    identifier: monitored.region.identifier.clone(),
                });
            } else if !inside && monitored.region.notify_on_exit {
                crossings.push(RegionEvent::Exited {
                    identifier: monitored.region.identifier.clone(),
                });
            }
        }
        drop(state);

        for event in crossings {
            self.emit(event);
        }
    }

    fn emit(&self, event: RegionEvent) {
        if self.events.send(event).is_err() {
            debug!("Region event channel closed; event dropped");
        }
    }
}

#[async_trait]
impl LocationMonitor for SimulatedLocationMonitor {
    fn is_monitoring_available(&self) -> bool {
        self.monitoring_available
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.authorization
    }

    fn maximum_region_distance(&self) -> f64 {
        self.max_region_distance
    }

    async fn request_permission(&self) {
        // The simulated user always grants the prompt.
        let previous = self.authorization_status();
        if previous == AuthorizationStatus::NotDetermined {
            self.set_authorization(AuthorizationStatus::Granted);
        }
    }

    async fn start_monitoring(&self, region: CircularRegion) {
        let identifier = region.identifier.clone();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        // At most one monitored region per identifier: re-registering
        // replaces the previous descriptor.
        if let Some(existing) = state
            .regions
            .iter_mut()
            .find(|m| m.region.identifier == identifier)
        {
            existing.region = region;
            existing.inside = false;
            return;
        }

        if state.regions.len() >= MAX_MONITORED_REGIONS {
            drop(state);
            warn!(identifier = %identifier, "Region registration rejected: monitored region limit reached");
            self.emit(RegionEvent::MonitoringFailed {
                identifier,
                reason: "monitored region limit reached".to_string(),
            });
            return;
        }

        state.regions.push(MonitoredRegion {
            region,
            inside: false,
        });
    }

    async fn stop_monitoring(&self, identifier: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.regions.retain(|m| m.region.identifier != identifier);
    }

    fn monitored_regions(&self) -> Vec<CircularRegion> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.regions.iter().map(|m| m.region.clone()).collect()
    }
}
