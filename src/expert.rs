//! Expert mode gate
//!
//! Expert mode asks the strategy generator for a detailed answer, which
//! only makes sense once the spot is fully described. The predicate below
//! decides when the mode may be switched on; the store uses the helpers to
//! downgrade automatically as soon as it stops holding.

use crate::data::{ExpertiseLevel, FishingConditions};

/// Returns true when every field needed by expert mode is set:
/// department, water type, bottom type and wind direction.
pub fn can_activate_expert(conditions: &FishingConditions) -> bool {
    conditions.region.is_some()
        && conditions.water_type.is_some()
        && conditions.bottom_type.is_some()
        && conditions.wind_direction.is_some()
}

/// Returns true when switching to `requested` is allowed right now.
///
/// Going back to beginner is always allowed.
pub fn transition_allowed(requested: ExpertiseLevel, eligible: bool) -> bool {
    match requested {
        ExpertiseLevel::Beginner => true,
        ExpertiseLevel::Expert => eligible,
    }
}

/// Downgrades to beginner when expert mode is set without being eligible.
///
/// Returns true if the level changed. Calling it on a beginner snapshot is
/// a no-op.
pub fn enforce(conditions: &mut FishingConditions, eligible: bool) -> bool {
    if conditions.expertise_level == ExpertiseLevel::Expert && !eligible {
        conditions.expertise_level = ExpertiseLevel::Beginner;
        return true;
    }
    false
}

/// Returns the copy handed to the strategy generator, forced to beginner
/// if expert mode is somehow set without its prerequisites.
pub fn coerce_for_submission(conditions: &FishingConditions) -> FishingConditions {
    let mut outgoing = conditions.clone();
    if enforce(&mut outgoing, can_activate_expert(conditions)) {
        tracing::warn!("expert mode set without prerequisites; submitting as beginner");
    }
    outgoing
}
