//! Preference Adapters
//!
//! - **InMemoryPreferenceStore** - PreferenceReader over an in-process value

mod in_memory_preference_store;

pub use in_memory_preference_store::InMemoryPreferenceStore;
