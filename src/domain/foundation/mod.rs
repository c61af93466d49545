//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and
//! validation errors used across the reminder domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{BenefitDefinitionId, CardId, PerkId, KEY_SEPARATOR, WILDCARD_SEGMENT};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
