//! Lifecycle state machines.
//!
//! Perk status and the notification router's idle/routing cycle both move
//! through a fixed transition table; this trait is that table.

use super::ValidationError;

/// A status enum with an explicit transition table.
///
/// ```ignore
/// let status = PerkStatus::Available.transition_to(PerkStatus::Used)?;
/// assert!(status.transition_to(PerkStatus::Expired).is_err());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the table allows the move.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::InvalidTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            });
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benefit::PerkStatus;
    use crate::domain::navigation::RouterState;

    #[test]
    fn used_perk_must_roll_over_before_expiring() {
        let err = PerkStatus::Used.transition_to(PerkStatus::Expired).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTransition {
                from: "Used".to_string(),
                to: "Expired".to_string(),
            }
        );
    }

    #[test]
    fn router_alternates_between_idle_and_routing() {
        assert_eq!(
            RouterState::Idle.transition_to(RouterState::Routing),
            Ok(RouterState::Routing)
        );
        assert!(RouterState::Idle.transition_to(RouterState::Idle).is_err());
    }

    #[test]
    fn transition_table_matches_predicate() {
        let all = [PerkStatus::Available, PerkStatus::Used, PerkStatus::Expired];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }
}
