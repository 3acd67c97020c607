//! Mitigation - Non-linear damage reduction from signed defense
//!
//! Formula:
//! - defense >= 0: damage × 100 / (100 + defense)
//! - defense < 0:  damage × (2 - 100 / (100 - defense))
//!
//! Positive defense has diminishing returns; negative defense amplifies
//! damage toward, but never reaching, 2×.

use super::constants::{DEFENSE_SCALE, NEGATIVE_DEFENSE_CAP};

/// Multiplier applied to raw damage for a given (post-penetration) defense
pub fn damage_multiplier(defense: f64) -> f64 {
    if defense >= 0.0 {
        DEFENSE_SCALE / (DEFENSE_SCALE + defense)
    } else {
        NEGATIVE_DEFENSE_CAP - DEFENSE_SCALE / (DEFENSE_SCALE - defense)
    }
}

/// Damage after mitigation
pub fn mitigate(damage: f64, defense: f64) -> f64 {
    damage * damage_multiplier(defense)
}
