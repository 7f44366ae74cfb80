//! Event notifier: region crossings in, alerts or local notifications out.
//!
//! Whether a crossing becomes an immediate in-app alert or a deferred local
//! notification depends solely on the app's foreground state at the moment
//! the event arrives; the state is read live, never cached.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use domain::models::RegionEvent;
use persistence::GeofenceStore;
use tracing::{debug, error, info, warn};

/// Sound attached to a scheduled notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationSound {
    #[default]
    Default,
    None,
}

/// Deferred local notification request handed to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
    /// Badge count the app icon should display once this fires.
    pub badge: u32,
    /// Delay before the notification fires.
    pub delay: Duration,
}

/// Presents an immediate in-app alert while the app is foregrounded.
pub trait AlertPresenter: Send + Sync {
    fn show_alert(&self, title: &str, message: &str);
}

/// Schedules deferred local notifications with the platform.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Prompts for notification permission. Returns whether it was granted.
    async fn request_authorization(&self) -> bool;

    /// Hands a notification to the platform; fire-and-forget.
    async fn schedule(&self, notification: LocalNotification);
}

/// Live process-wide state, exposed through accessors rather than ambient
/// globals.
pub trait AppStateProvider: Send + Sync {
    fn is_foreground(&self) -> bool;
    fn badge_count(&self) -> u32;
    fn set_badge_count(&self, count: u32);
}

/// Process-wide app state backed by atomics.
#[derive(Debug)]
pub struct ProcessAppState {
    foreground: AtomicBool,
    badge: AtomicU32,
}

impl ProcessAppState {
    pub fn new(foreground: bool) -> Self {
        Self {
            foreground: AtomicBool::new(foreground),
            badge: AtomicU32::new(0),
        }
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.foreground.store(foreground, Ordering::SeqCst);
    }
}

impl AppStateProvider for ProcessAppState {
    fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::SeqCst)
    }

    fn badge_count(&self) -> u32 {
        self.badge.load(Ordering::SeqCst)
    }

    fn set_badge_count(&self, count: u32) {
        self.badge.store(count, Ordering::SeqCst);
    }
}

/// Tunables for how crossings are surfaced.
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// Fixed title for alerts and notifications.
    pub alert_title: String,
    /// Short fixed delay before a deferred notification fires.
    pub notification_delay: Duration,
    /// Sound attached to deferred notifications.
    pub sound: NotificationSound,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            alert_title: "Attention".to_string(),
            notification_delay: Duration::from_secs(1),
            sound: NotificationSound::Default,
        }
    }
}

/// Resolves region events against the persisted record set and surfaces
/// them to the user.
pub struct EventNotifier {
    records: GeofenceStore,
    alerts: Arc<dyn AlertPresenter>,
    scheduler: Arc<dyn NotificationScheduler>,
    app_state: Arc<dyn AppStateProvider>,
    settings: NotifierSettings,
}

impl EventNotifier {
    pub fn new(
        records: GeofenceStore,
        alerts: Arc<dyn AlertPresenter>,
        scheduler: Arc<dyn NotificationScheduler>,
        app_state: Arc<dyn AppStateProvider>,
        settings: NotifierSettings,
    ) -> Self {
        Self {
            records,
            alerts,
            scheduler,
            app_state,
            settings,
        }
    }

    /// Handles one event from the location subsystem. Never blocks on
    /// anything beyond the scheduling call itself and never mutates the
    /// record collection.
    pub async fn handle_event(&self, event: RegionEvent) {
        match event {
            RegionEvent::Entered { identifier } | RegionEvent::Exited { identifier } => {
                self.handle_crossing(&identifier).await;
            }
            RegionEvent::AuthorizationChanged { status } => {
                // Monitoring resumes platform-side once permission arrives;
                // nothing to do here beyond recording the change.
                info!(status = %status, "Location authorization changed");
            }
            RegionEvent::MonitoringFailed { identifier, reason } => {
                warn!(identifier = %identifier, reason = %reason, "Monitoring failed for region");
            }
            RegionEvent::LocationFailed { reason } => {
                error!(reason = %reason, "Location subsystem failed");
            }
        }
    }

    async fn handle_crossing(&self, identifier: &str) {
        // An identifier without a record is a stale region, not an error: a
        // crossing may arrive arbitrarily late, after its record was removed.
        let Some(body) = self.note_for(identifier) else {
            debug!(identifier = %identifier, "Crossing for unknown region; ignoring");
            return;
        };

        if self.app_state.is_foreground() {
            self.alerts.show_alert(&self.settings.alert_title, &body);
        } else {
            let badge = self.app_state.badge_count() + 1;
            self.scheduler
                .schedule(LocalNotification {
                    title: self.settings.alert_title.clone(),
                    body,
                    sound: self.settings.sound,
                    badge,
                    delay: self.settings.notification_delay,
                })
                .await;
            self.app_state.set_badge_count(badge);
        }
    }

    /// Resolves an identifier against the full persisted record set.
    fn note_for(&self, identifier: &str) -> Option<String> {
        self.records
            .load_all()
            .into_iter()
            .find(|record| record.identifier == identifier)
            .map(|record| record.note)
    }
}

/// Alert presenter that records alerts instead of showing them.
///
/// For development and testing.
#[derive(Debug, Default)]
pub struct MockAlertPresenter {
    shown: Mutex<Vec<(String, String)>>,
}

impl MockAlertPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl AlertPresenter for MockAlertPresenter {
    fn show_alert(&self, title: &str, message: &str) {
        let mut shown = self.shown.lock().unwrap_or_else(|e| e.into_inner());
        shown.push((title.to_string(), message.to_string()));
    }
}

/// Notification scheduler that records requests instead of scheduling them.
///
/// For development and testing.
#[derive(Debug, Default)]
pub struct MockNotificationScheduler {
    scheduled: Mutex<Vec<LocalNotification>>,
}

impl MockNotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<LocalNotification> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl NotificationScheduler for MockNotificationScheduler {
    async fn request_authorization(&self) -> bool {
        true
    }

    async fn schedule(&self, notification: LocalNotification) {
        let mut scheduled = self.scheduled.lock().unwrap_or_else(|e| e.into_inner());
        scheduled.push(notification);
    }
}
