//! Domain layer - perk reminder rules.
//!
//! Pure types and functions with no I/O: benefits and their cycles, user
//! preferences, reminder scheduling and reconciliation planning, and
//! notification routing.

pub mod benefit;
pub mod foundation;
pub mod navigation;
pub mod preferences;
pub mod reminder;
