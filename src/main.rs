//! Perk Reminders CLI
//!
//! Runs one reconciliation pass over a YAML snapshot of the user's
//! collection and reports what would be scheduled on a device. The
//! scheduling primitive and the handle map are both in-memory for the
//! lifetime of the run; the configured handle map is never written.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use perk_reminders::adapters::{
    InMemoryHandleStore, InMemoryNotificationScheduler, PendingNotification, YamlSnapshot,
};
use perk_reminders::application::{
    ReconcileError, ReconcileRemindersHandler, ReconcileRemindersResult,
    ReconciliationCoordinator, ReminderDispatcher,
};
use perk_reminders::config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
use perk_reminders::ports::CatalogError;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load snapshot: {0}")]
    Snapshot(#[from] CatalogError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Reconciliation failed");
        std::process::exit(1);
    }
}

fn load_configuration() -> Result<AppConfig, ConfigError> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), RunError> {
    tracing::info!("Starting perk-reminders v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(path = %config.storage.snapshot_path.display(), "Loading snapshot");
    let snapshot = Arc::new(YamlSnapshot::load(&config.storage.snapshot_path).await?);

    let Preview { result, pending } = preview(&config, snapshot).await?;

    for skipped in &result.skipped {
        tracing::warn!(error = %skipped, "Benefit skipped");
    }
    for notification in &pending {
        tracing::info!(
            fire_at = %notification.trigger.fire_at.as_datetime(),
            title = %notification.content.title,
            screen = %notification.content.data.screen,
            "Would schedule"
        );
    }
    tracing::info!(
        desired = result.desired,
        created = result.report.created,
        cancelled = result.report.cancelled,
        unchanged = result.report.unchanged,
        failed_creates = result.report.failed_creates.len(),
        failed_cancels = result.report.failed_cancels.len(),
        handle_map = %config.storage.handle_map_path.display(),
        "Done (handle map left untouched)"
    );

    Ok(())
}

/// Outcome of a pass run entirely against in-memory state.
struct Preview {
    result: ReconcileRemindersResult,
    pending: Vec<PendingNotification>,
}

/// Runs one pass with an in-memory primitive and handle map.
///
/// Handles from an in-memory primitive die with the process, so they are
/// never persisted to `storage.handle_map_path`.
async fn preview(config: &AppConfig, snapshot: Arc<YamlSnapshot>) -> Result<Preview, RunError> {
    let offset = config.reminders.offset().map_err(ConfigError::from)?;
    let default_time = config.reminders.default_time().map_err(ConfigError::from)?;

    let scheduler = Arc::new(
        InMemoryNotificationScheduler::new().with_max_pending(config.reminders.max_pending),
    );
    let store = Arc::new(InMemoryHandleStore::new());
    let dispatcher = ReminderDispatcher::new(scheduler.clone(), store)
        .with_channel(config.reminders.notification_channel.clone());

    let handler =
        ReconcileRemindersHandler::new(snapshot.clone(), snapshot, dispatcher, offset)
            .with_default_time(default_time);
    let coordinator = ReconciliationCoordinator::new(handler);

    let result = coordinator.run_once().await?;
    let pending = scheduler.pending().await;

    Ok(Preview { result, pending })
}
