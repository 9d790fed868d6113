//! Precedence-level maintenance for stored step lists.
//!
//! Editors let users splice a new step between two tiers by giving it a
//! fractional level such as `2.5`. The balancer only accepts integer tiers,
//! so callers renumber their step list with these helpers before balancing.
//! The balancer itself never calls them.

use std::collections::BTreeMap;

use crate::error::{BalanceError, BalanceResult};
use crate::models::ProcessStep;

/// Adds `step` to `steps` at `requested_level` and returns the tier it got.
///
/// - Integer level `n`: the step joins tier `n`; nothing else moves.
/// - Fractional level (e.g. `2.5`): every step at or above the ceiling
///   (`3`) moves up one tier, and the new step takes the freed tier.
///
/// # Errors
/// [`BalanceError::InvalidLevel`] when `requested_level` is not finite, not
/// positive, or too large for a tier.
pub fn insert_at_level(
    steps: &mut Vec<ProcessStep>,
    mut step: ProcessStep,
    requested_level: f64,
) -> BalanceResult<u32> {
    if !requested_level.is_finite()
        || requested_level <= 0.0
        || requested_level.ceil() > f64::from(u32::MAX - 1)
    {
        return Err(BalanceError::InvalidLevel(requested_level));
    }

    let tier = requested_level.ceil() as u32;
    if requested_level.fract() != 0.0 {
        for existing in steps.iter_mut().filter(|s| s.level >= tier) {
            existing.level = existing.level.saturating_add(1);
        }
    }

    step.level = tier;
    steps.push(step);
    Ok(tier)
}

/// Renumbers tiers to consecutive integers starting at 1, keeping order.
///
/// Used after steps are removed and a tier is left empty.
pub fn compact_levels(steps: &mut [ProcessStep]) {
    let mut tiers: BTreeMap<u32, u32> = steps.iter().map(|s| (s.level, 0)).collect();
    for (rank, tier) in tiers.values_mut().enumerate() {
        *tier = rank as u32 + 1;
    }
    for step in steps.iter_mut() {
        if let Some(&tier) = tiers.get(&step.level) {
            step.level = tier;
        }
    }
}
