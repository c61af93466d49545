//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reminder domain and the host app. Adapters implement these ports.
//!
//! - `NotificationScheduler` - platform create/cancel primitive
//! - `HandleStore` - persisted reminder key to handle map
//! - `PreferenceReader` - snapshot of notification preferences
//! - `BenefitCatalog` - perks, definitions and card renewals
//! - `NavigationSink` - in-app navigation

mod benefit_catalog;
mod handle_store;
mod navigation_sink;
mod notification_scheduler;
mod preference_reader;

pub use benefit_catalog::{BenefitCatalog, CatalogError};
pub use handle_store::{HandleStore, HandleStoreError};
pub use navigation_sink::{NavigationError, NavigationSink};
pub use notification_scheduler::{
    NotificationContent, NotificationScheduler, NotificationTrigger, SchedulingError,
};
pub use preference_reader::PreferenceReader;
