//! Navigation Adapters
//!
//! - **RecordingNavigationSink** - records intents instead of moving a UI

mod recording_navigation_sink;

pub use recording_navigation_sink::RecordingNavigationSink;
