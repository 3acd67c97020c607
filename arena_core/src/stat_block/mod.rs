//! StatBlock - The attribute set owned by every AI-capable unit

mod aggregator;
mod computed;
mod stat_value;

pub use aggregator::{Attribute, StatModSet};
pub use stat_value::{Stat, StatMod};

use serde::{Deserialize, Serialize};

/// A depletable pool (health, mana) whose maximum is a `Stat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub stat: Stat,
    pub current: f64,
}

impl Resource {
    /// Full pool with the given base maximum
    pub fn new(max: f64) -> Self {
        let stat = Stat::with_min(max, 0.0);
        Resource {
            current: stat.total(),
            stat,
        }
    }

    pub fn max(&self) -> f64 {
        self.stat.total()
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract, flooring at zero
    pub fn drain(&mut self, amount: f64) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Add, capping at the maximum; negative amounts are ignored
    pub fn heal(&mut self, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.max());
    }

    /// Refill to the maximum
    pub fn restore(&mut self) {
        self.current = self.max();
    }

    /// Apply a modifier to the maximum, keeping the missing amount unchanged
    pub fn apply_modifier(&mut self, modifier: &StatMod) {
        let before = self.max();
        self.stat.apply_modifier(modifier);
        let delta = self.max() - before;
        if delta > 0.0 {
            self.current += delta;
        }
        self.current = self.current.min(self.max());
    }

    pub fn remove_modifier(&mut self, modifier: &StatMod) {
        self.stat.remove_modifier(modifier);
        self.current = self.current.min(self.max());
    }
}

/// Complete attribute set for an AI unit (champion, minion, turret)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    // === Movement ===
    pub movement_speed: Stat,
    pub pathfinding_radius: Stat,
    pub size: Stat,
    pub vision_range: Stat,

    // === Offense ===
    pub attack_speed: Stat,
    pub attack_range: Stat,
    pub attack_damage: Stat,
    pub ability_power: Stat,
    pub critical_chance: Stat,
    pub critical_damage: Stat,

    // === Penetration ===
    pub armor_penetration: Stat,
    pub magic_penetration: Stat,

    // === Defense ===
    pub armor: Stat,
    pub magic_resist: Stat,
    pub dodge_chance: Stat,
    pub tenacity: Stat,

    // === Recovery ===
    pub life_steal: Stat,
    pub spell_vamp: Stat,
    pub health_regeneration: Stat,
    pub mana_regeneration: Stat,

    // === Utility ===
    pub cooldown_reduction: Stat,
}

impl Default for StatBlock {
    fn default() -> Self {
        StatBlock {
            movement_speed: Stat::with_min(0.0, 0.0),
            pathfinding_radius: Stat::with_min(0.0, 0.0),
            size: Stat::with_min(1.0, 0.0),
            vision_range: Stat::with_min(0.0, 0.0),

            attack_speed: Stat::bounded(0.625, 0.2, 2.5),
            attack_range: Stat::with_min(0.0, 0.0),
            attack_damage: Stat::with_min(0.0, 0.0),
            ability_power: Stat::with_min(0.0, 0.0),
            critical_chance: Stat::bounded(0.0, 0.0, 1.0),
            critical_damage: Stat::new(2.0),

            armor_penetration: Stat::new(0.0),
            magic_penetration: Stat::new(0.0),

            armor: Stat::new(0.0),
            magic_resist: Stat::new(0.0),
            dodge_chance: Stat::bounded(0.0, 0.0, 1.0),
            tenacity: Stat::bounded(0.0, 0.0, 1.0),

            life_steal: Stat::new(0.0),
            spell_vamp: Stat::new(0.0),
            health_regeneration: Stat::with_min(0.0, 0.0),
            mana_regeneration: Stat::new(0.0),

            cooldown_reduction: Stat::bounded(0.0, 0.0, 0.4),
        }
    }
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let stats = StatBlock::new();
        assert!((stats.attack_speed.total() - 0.625).abs() < f64::EPSILON);
        assert!((stats.critical_damage.total() - 2.0).abs() < f64::EPSILON);
        assert!((stats.size.total() - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.cooldown_reduction.max_limit, 0.4);
    }

    #[test]
    fn test_crit_chance_capped() {
        let mut stats = StatBlock::new();
        stats.critical_chance.flat_bonus = 3.0;
        assert!((stats.critical_chance.total() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resource_drain_and_heal() {
        let mut hp = Resource::new(100.0);
        hp.drain(130.0);
        assert!(hp.is_depleted());
        assert!((hp.current - 0.0).abs() < f64::EPSILON);

        hp.heal(250.0);
        assert!((hp.current - 100.0).abs() < f64::EPSILON);

        hp.heal(-500.0);
        assert!((hp.current - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resource_modifier_keeps_missing_amount() {
        let mut hp = Resource::new(100.0);
        hp.drain(40.0);
        let m = StatMod::flat(50.0);
        hp.apply_modifier(&m);
        assert!((hp.max() - 150.0).abs() < f64::EPSILON);
        assert!((hp.current - 110.0).abs() < f64::EPSILON);

        hp.remove_modifier(&m);
        assert!((hp.current - 100.0).abs() < f64::EPSILON);
    }
}
