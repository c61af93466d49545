//! Storage Adapters
//!
//! Implementations of the HandleStore port for persisting the reminder
//! handle map.
//!
//! ## Available Adapters
//!
//! - **FileHandleStore** - Stores the map as a JSON file on disk
//! - **InMemoryHandleStore** - Stores the map in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileHandleStore, InMemoryHandleStore};
//!
//! // Production: file-based storage
//! let store = FileHandleStore::new("./data/reminder-handles.json");
//!
//! // Testing: in-memory storage
//! let store = InMemoryHandleStore::new();
//! ```

mod file_handle_store;
mod in_memory_handle_store;

pub use file_handle_store::FileHandleStore;
pub use in_memory_handle_store::InMemoryHandleStore;
