use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use monitoring::{
    spawn_event_loop, EventNotifier, GeofenceManager, LocationMonitor, MonitoringCoordinator,
    NotificationScheduler, NotifierSettings, ProcessAppState, SimulatedLocationMonitor,
};
use persistence::{GeofenceStore, JsonFileStore};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

mod config;
mod logging;
mod platform;

use platform::{ConsoleAlertPresenter, ConsoleNotificationScheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting SafeZone geofence manager v{}", env!("CARGO_PKG_VERSION"));

    // Persistence: one JSON preference file holding the saved list.
    let store = GeofenceStore::new(Arc::new(JsonFileStore::new(&config.store.path)));

    // Simulated platform location subsystem delivering events on a channel.
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let monitor = Arc::new(
        SimulatedLocationMonitor::new(events_tx)
            .with_availability(config.platform.monitoring_available)
            .with_max_region_distance(config.platform.max_region_distance),
    );
    monitor.request_permission().await;

    // Notification surfaces and live app state.
    let app_state = Arc::new(ProcessAppState::new(config.platform.foreground));
    let scheduler = Arc::new(ConsoleNotificationScheduler);
    let granted = scheduler.request_authorization().await;
    if !granted {
        warn!("Notifications not authorized; background crossings will be silent");
    }
    let notifier = Arc::new(EventNotifier::new(
        store.clone(),
        Arc::new(ConsoleAlertPresenter),
        scheduler,
        app_state.clone(),
        NotifierSettings {
            alert_title: config.notifications.title.clone(),
            notification_delay: Duration::from_secs(config.notifications.delay_secs),
            sound: config.notifications.notification_sound(),
        },
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let event_loop = spawn_event_loop(events_rx, notifier, shutdown_rx);

    // Restore persisted geofences and resume monitoring them.
    let mut manager = GeofenceManager::new(
        MonitoringCoordinator::new(monitor.clone()),
        store.clone(),
    );
    manager.restore().await;

    // First run: seed the configured demo geofences.
    if manager.is_empty() {
        for seed in &config.simulation.geofences {
            match manager.add(seed.to_request()).await {
                Ok(outcome) => {
                    if let Some(warning) = outcome.warning {
                        warn!(identifier = %outcome.record.identifier, "{warning}");
                    }
                }
                Err(err) => warn!(note = %seed.note, error = %err, "Could not add seed geofence"),
            }
        }
    }
    info!(count = manager.len(), "Monitoring geofences");

    // Replay the configured track against the simulated platform.
    for point in &config.simulation.track {
        info!(latitude = point.latitude, longitude = point.longitude, "Position update");
        monitor.advance_to(point.latitude, point.longitude);
        tokio::time::sleep(Duration::from_millis(config.simulation.step_delay_ms)).await;
    }

    // Give deferred notifications time to fire before shutting down.
    tokio::time::sleep(Duration::from_secs(config.notifications.delay_secs) + Duration::from_millis(100)).await;
    shutdown_tx.send(true).ok();
    event_loop.await?;

    info!(count = manager.len(), "SafeZone finished; collection persisted");
    Ok(())
}
