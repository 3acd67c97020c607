//! LevelGrowth - Per-level base stat growth for champions

use crate::source::StatSource;
use crate::stat_block::{Attribute, StatMod, StatModSet};
use serde::{Deserialize, Serialize};

/// Base stat gained on every level-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelGrowth {
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub mana: f64,
    #[serde(default)]
    pub attack_damage: f64,
    /// Attack speed bonus as decimal (0.03 = 3%)
    #[serde(default)]
    pub attack_speed: f64,
    #[serde(default)]
    pub armor: f64,
    #[serde(default)]
    pub magic_resist: f64,
    #[serde(default)]
    pub health_regeneration: f64,
    #[serde(default)]
    pub mana_regeneration: f64,
}

/// The growth granted by a number of level-ups at once
pub struct LevelUpSource<'a> {
    pub growth: &'a LevelGrowth,
    pub levels: u32,
}

impl<'a> LevelUpSource<'a> {
    pub fn new(growth: &'a LevelGrowth, levels: u32) -> Self {
        LevelUpSource { growth, levels }
    }
}

impl StatSource for LevelUpSource<'_> {
    fn id(&self) -> &str {
        "level_up"
    }

    fn modifiers(&self) -> StatModSet {
        let n = self.levels as f64;
        let base = |v: f64| StatMod::new(v * n, 0.0, 0.0, 0.0);
        let g = self.growth;

        StatModSet::new()
            .with(Attribute::Health, base(g.health))
            .with(Attribute::Mana, base(g.mana))
            .with(Attribute::AttackDamage, base(g.attack_damage))
            .with(Attribute::Armor, base(g.armor))
            .with(Attribute::MagicResist, base(g.magic_resist))
            .with(Attribute::HealthRegeneration, base(g.health_regeneration))
            .with(Attribute::ManaRegeneration, base(g.mana_regeneration))
            .with(Attribute::AttackSpeed, StatMod::percent(g.attack_speed * n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat_block::{Resource, StatBlock};

    fn growth() -> LevelGrowth {
        LevelGrowth {
            health: 80.0,
            mana: 40.0,
            attack_damage: 3.0,
            attack_speed: 0.02,
            armor: 3.5,
            magic_resist: 1.25,
            health_regeneration: 0.5,
            mana_regeneration: 0.25,
        }
    }

    #[test]
    fn test_level_up_scales_with_levels() {
        let g = growth();
        let mut stats = StatBlock::new();
        let mut health = Resource::new(500.0);
        let mut mana = Resource::new(300.0);

        LevelUpSource::new(&g, 3).apply(&mut stats, &mut health, &mut mana);

        assert!((health.max() - 740.0).abs() < 0.01);
        assert!((mana.max() - 420.0).abs() < 0.01);
        assert!((stats.attack_damage.base_bonus - 9.0).abs() < 0.01);
        assert!((stats.armor.total() - 10.5).abs() < 0.01);
        assert!((stats.attack_speed.percent_bonus - 0.06).abs() < 0.01);
    }

    #[test]
    fn test_level_up_heals_gained_health() {
        let g = growth();
        let mut stats = StatBlock::new();
        let mut health = Resource::new(500.0);
        let mut mana = Resource::new(300.0);
        health.drain(100.0);

        LevelUpSource::new(&g, 1).apply(&mut stats, &mut health, &mut mana);
        assert!((health.current - 480.0).abs() < 0.01);
    }
}
