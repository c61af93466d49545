//! Recording Navigation Sink
//!
//! Collects every navigation intent it receives. Hosts without a UI (the CLI,
//! tests) use it in place of a real navigation layer.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use crate::domain::navigation::NavigationIntent;
use crate::ports::{NavigationError, NavigationSink};

#[derive(Debug, Clone, Default)]
pub struct RecordingNavigationSink {
    intents: Arc<Mutex<Vec<NavigationIntent>>>,
    received: Arc<Notify>,
    not_ready: bool,
}

impl RecordingNavigationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every navigation with `NotReady`.
    pub fn not_ready() -> Self {
        Self {
            not_ready: true,
            ..Self::default()
        }
    }

    pub async fn intents(&self) -> Vec<NavigationIntent> {
        self.intents.lock().await.clone()
    }

    /// Waits until at least `count` intents were recorded.
    pub async fn wait_for(&self, count: usize) -> Vec<NavigationIntent> {
        loop {
            let notified = self.received.notified();
            {
                let intents = self.intents.lock().await;
                if intents.len() >= count {
                    return intents.clone();
                }
            }
            notified.await;
        }
    }
}

#[async_trait]
impl NavigationSink for RecordingNavigationSink {
    async fn navigate(&self, intent: NavigationIntent) -> Result<(), NavigationError> {
        if self.not_ready {
            return Err(NavigationError::NotReady);
        }
        tracing::info!(pathname = %intent.pathname, "Navigating");
        self.intents.lock().await.push(intent);
        self.received.notify_waiters();
        Ok(())
    }
}
