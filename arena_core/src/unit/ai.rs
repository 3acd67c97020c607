//! AI state - Attributes, buffs and auto-attack timing of champions, minions and turrets

use crate::buff::{BuffRegistry, BuffScripts};
use crate::stat_block::StatBlock;
use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Derived auto-attack phase, for inspection and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    NoTarget,
    Seeking,
    WindingUp,
    OnCooldown,
}

/// Auto-attack timing fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoAttackState {
    /// Seconds until the next attack may start
    pub cooldown: f64,
    /// Seconds accumulated in the current wind-up
    pub wind_up: f64,
    pub has_made_initial_attack: bool,
    pub next_attack_flag: bool,
    pub is_attacking: bool,
    pub is_next_crit: bool,
    /// Target locked when the wind-up started
    pub target: Option<UnitId>,
    /// Id reserved for the projectile of the current attack
    pub projectile_id: Option<UnitId>,
}

impl AutoAttackState {
    /// Leave the attacking state and forget the locked target
    pub fn cancel(&mut self) {
        self.is_attacking = false;
        self.has_made_initial_attack = false;
        self.target = None;
    }
}

#[derive(Debug, Clone)]
pub struct AiState {
    pub stats: StatBlock,
    pub buffs: BuffRegistry,
    pub buff_scripts: BuffScripts,

    // === Auto-attack ===
    pub is_melee: bool,
    /// Seconds of wind-up with no attack speed bonus
    pub auto_attack_delay: f64,
    pub projectile_speed: f64,
    pub attack: AutoAttackState,
}

impl AiState {
    pub fn new(stats: StatBlock, is_melee: bool, auto_attack_delay: f64, projectile_speed: f64) -> Self {
        AiState {
            stats,
            buffs: BuffRegistry::new(),
            buff_scripts: BuffScripts::new(),
            is_melee,
            auto_attack_delay,
            projectile_speed,
            attack: AutoAttackState::default(),
        }
    }

    pub fn combat_phase(&self, target: Option<UnitId>) -> CombatPhase {
        if self.attack.is_attacking && self.attack.target.is_some() {
            CombatPhase::WindingUp
        } else if target.is_none() {
            CombatPhase::NoTarget
        } else if self.attack.cooldown > 0.0 {
            CombatPhase::OnCooldown
        } else {
            CombatPhase::Seeking
        }
    }

    /// Wind-up needed before the current attack lands
    pub fn wind_up_threshold(&self) -> f64 {
        self.stats.wind_up_threshold(self.auto_attack_delay)
    }
}
