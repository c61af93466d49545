//! NotificationListener - routes delivered notifications to navigation.
//!
//! `subscribe` starts a task that feeds every delivered payload through a
//! `NotificationRouter` and hands resulting intents to the `NavigationSink`.
//! The returned handle owns the task: `shutdown` stops it and waits, and
//! dropping the handle stops it without waiting.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::navigation::{NotificationRouter, RouteOutcome};
use crate::ports::NavigationSink;

/// Subscription handle for delivered-notification routing.
pub struct NotificationListener {
    task: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl NotificationListener {
    pub fn subscribe(
        mut deliveries: mpsc::Receiver<Value>,
        sink: Arc<dyn NavigationSink>,
    ) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut router = NotificationRouter::new();
            loop {
                tokio::select! {
                    _ = stop.changed() => break,
                    delivery = deliveries.recv() => {
                        let Some(payload) = delivery else { break };
                        if let RouteOutcome::Navigate(intent) = router.route(&payload) {
                            let pathname = intent.pathname.clone();
                            if let Err(e) = sink.navigate(intent).await {
                                tracing::warn!(pathname = %pathname, error = %e, "Navigation failed");
                            }
                        }
                    }
                }
            }
            tracing::debug!("Notification listener stopped");
        });

        Self { task, shutdown }
    }

    /// True once the task has exited (shutdown or closed channel).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops routing and waits for the task to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Notification listener task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingNavigationSink;
    use crate::domain::navigation::{DeepLink, DASHBOARD_SCREEN, INSIGHTS_SCREEN};
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn forwards_valid_payloads_and_drops_malformed() {
        let sink = RecordingNavigationSink::new();
        let (tx, rx) = mpsc::channel(8);
        let listener = NotificationListener::subscribe(rx, Arc::new(sink.clone()));

        tx.send(json!({ "ping": true })).await.unwrap();
        tx.send(DeepLink::new(INSIGHTS_SCREEN)
            .with_param("cardId", "amex-plat")
            .with_param("showRenewalInfo", "true")
            .to_delivered_payload())
            .await
            .unwrap();
        tx.send(DeepLink::new(DASHBOARD_SCREEN).to_delivered_payload())
            .await
            .unwrap();

        let intents = tokio::time::timeout(Duration::from_secs(5), sink.wait_for(2))
            .await
            .unwrap();
        assert_eq!(intents[0].pathname, INSIGHTS_SCREEN);
        assert_eq!(intents[0].params.card_id.as_deref(), Some("amex-plat"));
        assert_eq!(intents[1].pathname, DASHBOARD_SCREEN);

        listener.shutdown().await;
    }

    #[tokio::test]
    async fn sink_failure_does_not_stop_listener() {
        let sink = RecordingNavigationSink::not_ready();
        let (tx, rx) = mpsc::channel(8);
        let listener = NotificationListener::subscribe(rx, Arc::new(sink));

        tx.send(DeepLink::new(DASHBOARD_SCREEN).to_delivered_payload())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!listener.is_finished());
        listener.shutdown().await;
    }

    #[tokio::test]
    async fn closing_delivery_channel_ends_task() {
        let (tx, rx) = mpsc::channel(1);
        let listener =
            NotificationListener::subscribe(rx, Arc::new(RecordingNavigationSink::new()));

        drop(tx);
        tokio::time::timeout(Duration::from_secs(5), async {
            while !listener.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }
}
