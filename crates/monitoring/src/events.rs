//! Region event dispatch loop.

use std::sync::Arc;

use domain::models::RegionEvent;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use crate::notifier::EventNotifier;

/// Spawns the single consumer task that drains region events and hands them
/// to the notifier.
///
/// The task ends when every event sender is dropped or when `true` is sent
/// on the shutdown channel. Handlers only read the record set; the
/// collection itself is never mutated from this task.
pub fn spawn_event_loop(
    mut events: mpsc::UnboundedReceiver<RegionEvent>,
    notifier: Arc<EventNotifier>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => notifier.handle_event(event).await,
                        None => {
                            info!("Region event channel closed; event loop ending");
                            break;
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Region event loop shutting down");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{
        MockAlertPresenter, MockNotificationScheduler, NotifierSettings, ProcessAppState,
    };
    use domain::models::{EventType, GeofenceRecord};
    use persistence::{GeofenceStore, MemoryStore};

    fn notifier_with_alerts() -> (Arc<EventNotifier>, Arc<MockAlertPresenter>) {
        let store = GeofenceStore::new(Arc::new(MemoryStore::new()));
        store.save_all(&[GeofenceRecord {
            latitude: 45.5,
            longitude: -73.6,
            radius_meters: 100.0,
            identifier: "A".to_string(),
            note: "Home".to_string(),
            event_type: EventType::OnEntry,
        }]);
        let alerts = Arc::new(MockAlertPresenter::new());
        let notifier = Arc::new(EventNotifier::new(
            store,
            alerts.clone(),
            Arc::new(MockNotificationScheduler::new()),
            Arc::new(ProcessAppState::new(true)),
            NotifierSettings::default(),
        ));
        (notifier, alerts)
    }

    #[tokio::test]
    async fn test_events_flow_through_to_notifier() {
        let (notifier, alerts) = notifier_with_alerts();
        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_event_loop(rx, notifier, shutdown_rx);

        tx.send(RegionEvent::Entered {
            identifier: "A".to_string(),
        })
        .unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(
            alerts.shown(),
            vec![("Attention".to_string(), "Home".to_string())]
        );
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_loop() {
        let (notifier, _alerts) = notifier_with_alerts();
        let (tx, rx) = mpsc::unbounded_channel::<RegionEvent>();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_event_loop(rx, notifier, shutdown_rx);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
        drop(tx);
    }
}
