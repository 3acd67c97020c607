//! DamagePacket - A single hit on its way to the damage resolver

use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Which defense a hit is mitigated by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Physical,
    Magical,
    True,
}

/// What produced the hit; selects the attacker's regeneration stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSource {
    Attack,
    Spell,
    SummonerSpell,
    Passive,
}

/// Presentation hint shown with the damage number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageText {
    Normal,
    Crit,
    Miss,
    Invulnerable,
}

/// Raw, unmitigated damage from `attacker` to `victim`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagePacket {
    pub attacker: UnitId,
    pub victim: UnitId,
    pub amount: f64,
    pub kind: DamageKind,
    pub source: DamageSource,
    pub text: DamageText,
}

impl DamagePacket {
    pub fn new(attacker: UnitId, victim: UnitId, amount: f64, kind: DamageKind, source: DamageSource) -> Self {
        DamagePacket {
            attacker,
            victim,
            amount,
            kind,
            source,
            text: DamageText::Normal,
        }
    }

    pub fn with_text(mut self, text: DamageText) -> Self {
        self.text = text;
        self
    }

    pub fn is_critical(&self) -> bool {
        self.text == DamageText::Crit
    }
}
