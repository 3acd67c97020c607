//! Defense system - Armor / magic resist mitigation and penetration

mod mitigation;
mod penetration;

pub use mitigation::{damage_multiplier, mitigate};
pub use penetration::effective_defense;

/// Defense calculation constants
pub mod constants {
    /// Scale of the reduction curve: `100 / (100 + defense)`
    pub const DEFENSE_SCALE: f64 = 100.0;

    /// Upper bound of the amplification for negative defense
    pub const NEGATIVE_DEFENSE_CAP: f64 = 2.0;
}
