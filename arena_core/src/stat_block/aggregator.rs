//! StatModSet - A bundle of per-attribute modifiers applied and removed as one

use super::{Resource, Stat, StatBlock, StatMod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every attribute a modifier bundle can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Health,
    Mana,
    MovementSpeed,
    AttackSpeed,
    AttackRange,
    CriticalChance,
    CriticalDamage,
    AttackDamage,
    Armor,
    ArmorPenetration,
    MagicResist,
    MagicPenetration,
    LifeSteal,
    SpellVamp,
    AbilityPower,
    HealthRegeneration,
    ManaRegeneration,
    CooldownReduction,
    Tenacity,
}

impl StatBlock {
    /// Mutable access to the stat backing `attribute`
    ///
    /// Health and mana live on the unit as resources, so they return `None`.
    pub fn stat_mut(&mut self, attribute: Attribute) -> Option<&mut Stat> {
        let stat = match attribute {
            Attribute::Health | Attribute::Mana => return None,
            Attribute::MovementSpeed => &mut self.movement_speed,
            Attribute::AttackSpeed => &mut self.attack_speed,
            Attribute::AttackRange => &mut self.attack_range,
            Attribute::CriticalChance => &mut self.critical_chance,
            Attribute::CriticalDamage => &mut self.critical_damage,
            Attribute::AttackDamage => &mut self.attack_damage,
            Attribute::Armor => &mut self.armor,
            Attribute::ArmorPenetration => &mut self.armor_penetration,
            Attribute::MagicResist => &mut self.magic_resist,
            Attribute::MagicPenetration => &mut self.magic_penetration,
            Attribute::LifeSteal => &mut self.life_steal,
            Attribute::SpellVamp => &mut self.spell_vamp,
            Attribute::AbilityPower => &mut self.ability_power,
            Attribute::HealthRegeneration => &mut self.health_regeneration,
            Attribute::ManaRegeneration => &mut self.mana_regeneration,
            Attribute::CooldownReduction => &mut self.cooldown_reduction,
            Attribute::Tenacity => &mut self.tenacity,
        };
        Some(stat)
    }
}

/// Modifiers from one source (item, buff, level) keyed by attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatModSet {
    modifiers: BTreeMap<Attribute, StatMod>,
}

impl StatModSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `modifier` into the entry for `attribute`
    pub fn with(mut self, attribute: Attribute, modifier: StatMod) -> Self {
        self.add(attribute, modifier);
        self
    }

    pub fn add(&mut self, attribute: Attribute, modifier: StatMod) {
        let entry = self.modifiers.entry(attribute).or_default();
        entry.base_bonus += modifier.base_bonus;
        entry.percent_base_bonus += modifier.percent_base_bonus;
        entry.flat_bonus += modifier.flat_bonus;
        entry.percent_bonus += modifier.percent_bonus;
    }

    pub fn get(&self, attribute: Attribute) -> Option<&StatMod> {
        self.modifiers.get(&attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.values().all(StatMod::is_zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &StatMod)> {
        self.modifiers.iter().map(|(a, m)| (*a, m))
    }

    /// Apply every modifier to the attribute set and resources
    pub fn apply(&self, stats: &mut StatBlock, health: &mut Resource, mana: &mut Resource) {
        for (attribute, modifier) in &self.modifiers {
            match attribute {
                Attribute::Health => health.apply_modifier(modifier),
                Attribute::Mana => mana.apply_modifier(modifier),
                other => {
                    if let Some(stat) = stats.stat_mut(*other) {
                        stat.apply_modifier(modifier);
                    }
                }
            }
        }
    }

    /// Remove every modifier previously applied with [`StatModSet::apply`]
    pub fn remove(&self, stats: &mut StatBlock, health: &mut Resource, mana: &mut Resource) {
        for (attribute, modifier) in &self.modifiers {
            match attribute {
                Attribute::Health => health.remove_modifier(modifier),
                Attribute::Mana => mana.remove_modifier(modifier),
                other => {
                    if let Some(stat) = stats.stat_mut(*other) {
                        stat.remove_modifier(modifier);
                    }
                }
            }
        }
    }
}
