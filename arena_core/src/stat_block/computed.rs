//! Computed values - Derived combat numbers read by the state machine and resolver

use super::{Stat, StatBlock};
use crate::damage::{DamageKind, DamageSource};

impl StatBlock {
    /// Wind-up time needed before an auto-attack lands
    ///
    /// The attack speed bonus (`percent_bonus`) shortens the wind-up as a
    /// `(1 + bonus)` multiplier, so a unit with no bonus waits exactly `auto_attack_delay`.
    pub fn wind_up_threshold(&self, auto_attack_delay: f64) -> f64 {
        let multiplier = 1.0 + self.attack_speed.percent_bonus;
        if multiplier <= 0.0 {
            return auto_attack_delay;
        }
        auto_attack_delay / multiplier
    }

    /// Seconds between auto-attacks
    pub fn attack_cooldown(&self) -> f64 {
        let speed = self.attack_speed.total();
        if speed <= 0.0 {
            return f64::INFINITY;
        }
        1.0 / speed
    }

    /// Defense stat consulted for this damage kind (none for true damage)
    pub fn defense_for(&self, kind: DamageKind) -> Option<&Stat> {
        match kind {
            DamageKind::Physical => Some(&self.armor),
            DamageKind::Magical => Some(&self.magic_resist),
            DamageKind::True => None,
        }
    }

    /// Penetration stat matching the defense for this damage kind
    pub fn penetration_for(&self, kind: DamageKind) -> Option<&Stat> {
        match kind {
            DamageKind::Physical => Some(&self.armor_penetration),
            DamageKind::Magical => Some(&self.magic_penetration),
            DamageKind::True => None,
        }
    }

    /// Fraction of dealt damage healed back to the attacker
    pub fn regen_for(&self, source: DamageSource) -> f64 {
        match source {
            DamageSource::Attack => self.life_steal.total(),
            DamageSource::Spell => self.spell_vamp.total(),
            DamageSource::SummonerSpell | DamageSource::Passive => 0.0,
        }
    }
}
