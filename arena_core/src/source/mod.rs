//! StatSource - Trait and implementations for modifier providers

mod base_stats;

pub use base_stats::{LevelGrowth, LevelUpSource};

use crate::stat_block::{Resource, StatBlock, StatModSet};

/// Anything that contributes a modifier bundle to a unit
///
/// Modifier channels are additive, so sources can be applied in any order.
/// Removing must hand back exactly what was applied.
pub trait StatSource {
    /// Identifier used in logs
    fn id(&self) -> &str;

    /// The bundle this source contributes
    fn modifiers(&self) -> StatModSet;

    fn apply(&self, stats: &mut StatBlock, health: &mut Resource, mana: &mut Resource) {
        self.modifiers().apply(stats, health, mana);
    }

    fn remove(&self, stats: &mut StatBlock, health: &mut Resource, mana: &mut Resource) {
        self.modifiers().remove(stats, health, mana);
    }
}
