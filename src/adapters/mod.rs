//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the reminder domain to the host:
//! - `scheduling` - local notification primitive
//! - `storage` - persisted handle map (JSON file, in-memory)
//! - `catalog` - perks and cards (YAML snapshot, in-memory)
//! - `preferences` - notification preference snapshots
//! - `navigation` - navigation sinks

pub mod catalog;
pub mod navigation;
pub mod preferences;
pub mod scheduling;
pub mod storage;

pub use catalog::{InMemoryBenefitCatalog, Snapshot, YamlSnapshot};
pub use navigation::RecordingNavigationSink;
pub use preferences::InMemoryPreferenceStore;
pub use scheduling::{InMemoryNotificationScheduler, PendingNotification};
pub use storage::{FileHandleStore, InMemoryHandleStore};
