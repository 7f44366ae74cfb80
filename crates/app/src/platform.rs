//! Console-backed alert and notification surfaces.
//!
//! The demo binary has no UI; alerts and local notifications land in the
//! log, with the notification delay honored by a spawned timer task.

use async_trait::async_trait;
use monitoring::{AlertPresenter, LocalNotification, NotificationScheduler};
use tracing::info;

/// Shows in-app alerts as log lines.
pub struct ConsoleAlertPresenter;

impl AlertPresenter for ConsoleAlertPresenter {
    fn show_alert(&self, title: &str, message: &str) {
        info!(title = %title, message = %message, "In-app alert");
    }
}

/// Schedules notifications as delayed log lines.
pub struct ConsoleNotificationScheduler;

#[async_trait]
impl NotificationScheduler for ConsoleNotificationScheduler {
    async fn request_authorization(&self) -> bool {
        info!("Notification authorization granted");
        true
    }

    async fn schedule(&self, notification: LocalNotification) {
        // Fire-and-forget: the caller does not wait for delivery.
        tokio::spawn(async move {
            tokio::time::sleep(notification.delay).await;
            info!(
                title = %notification.title,
                body = %notification.body,
                badge = notification.badge,
                sound = ?notification.sound,
                "Local notification delivered"
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitoring::NotificationSound;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_console_scheduler_through_trait_object() {
        // The wiring in main holds the scheduler behind an Arc and calls it
        // through the trait, so exercise exactly that shape.
        let scheduler: Arc<dyn NotificationScheduler> = Arc::new(ConsoleNotificationScheduler);
        assert!(scheduler.request_authorization().await);

        scheduler
            .schedule(LocalNotification {
                title: "Attention".to_string(),
                body: "Home".to_string(),
                sound: NotificationSound::Default,
                badge: 1,
                delay: Duration::from_millis(0),
            })
            .await;
    }
}
