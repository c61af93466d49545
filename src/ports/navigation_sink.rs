//! NavigationSink port - performs the actual screen transition.

use async_trait::async_trait;

use crate::domain::navigation::NavigationIntent;

/// Errors from the navigation layer
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Navigation target not found: {0}")]
    UnknownTarget(String),

    #[error("Navigation layer not ready")]
    NotReady,
}

/// Port for the navigation layer.
///
/// Re-navigating to the current target must be a no-op; the router does not
/// deduplicate redelivered notifications.
#[async_trait]
pub trait NavigationSink: Send + Sync {
    async fn navigate(&self, intent: NavigationIntent) -> Result<(), NavigationError>;
}
