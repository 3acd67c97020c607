//! Unit kinds - Per-kind state and the capability profile each kind supplies

use crate::source::LevelGrowth;
use crate::types::{UnitId, Vec2};
use serde::{Deserialize, Serialize};

/// Lane minion flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinionType {
    Melee,
    Caster,
    Cannon,
    Super,
}

/// Turret placement along a lane, plus the base fountain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurretType {
    Outer,
    Inner,
    Inhibitor,
    Nexus,
    Fountain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InhibitorState {
    Alive,
    Dead,
}

/// Standing order a champion was last given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOrder {
    #[default]
    Move,
    AttackMove,
    Stop,
}

/// Recent damage from an enemy champion, kept for kill credit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChampionHit {
    pub attacker: UnitId,
    pub remaining: f64,
}

/// Replicated spell slot a mana cost belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaCostSlot {
    /// Regular spells 0..=3
    Base(u8),
    /// Extra spells 0..=15, addressed as slots 45..=60
    Extra(u8),
}

impl ManaCostSlot {
    /// Map a spell slot index to its replicated mana cost field
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            0..=3 => Some(ManaCostSlot::Base(slot)),
            45..=60 => Some(ManaCostSlot::Extra(slot - 45)),
            _ => None,
        }
    }
}

/// Current mana costs shown to the owning client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManaCosts {
    pub base: [f64; 4],
    pub extra: [f64; 16],
}

impl ManaCosts {
    pub fn get(&self, slot: u8) -> f64 {
        match ManaCostSlot::from_slot(slot) {
            Some(ManaCostSlot::Base(i)) => self.base[i as usize],
            Some(ManaCostSlot::Extra(i)) => self.extra[i as usize],
            None => 0.0,
        }
    }

    /// Set the cost for a slot; returns false for slots without a cost field
    pub fn set(&mut self, slot: u8, cost: f64) -> bool {
        match ManaCostSlot::from_slot(slot) {
            Some(ManaCostSlot::Base(i)) => self.base[i as usize] = cost,
            Some(ManaCostSlot::Extra(i)) => self.extra[i as usize] = cost,
            None => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionData {
    // === Economy ===
    pub gold: f64,
    pub total_gold: f64,
    pub is_generating_gold: bool,
    /// Minion gold farmed while on a death streak
    pub champion_gold_from_minions: f64,

    // === Progression ===
    pub experience: f64,
    pub level: u32,
    pub skill_points: u32,
    pub growth: LevelGrowth,

    // === Death ===
    /// Seconds until respawn, counted down only while dead
    pub respawn_timer: f64,
    pub champion_hit: Option<ChampionHit>,

    // === Orders ===
    pub move_order: MoveOrder,

    // === Replicated spell state ===
    pub mana_costs: ManaCosts,
    pub spells_enabled: u32,
    pub spells_enabled_upper: u32,
    pub summoner_spells_enabled: u32,
    pub summoner_spells_enabled_upper: u32,
    pub evolve_points: u32,
    pub evolve_flags: u32,
}

impl ChampionData {
    pub fn new(growth: LevelGrowth) -> Self {
        ChampionData {
            gold: 0.0,
            total_gold: 0.0,
            is_generating_gold: false,
            champion_gold_from_minions: 0.0,
            experience: 0.0,
            level: 1,
            skill_points: 1,
            growth,
            respawn_timer: 0.0,
            champion_hit: None,
            move_order: MoveOrder::Move,
            mana_costs: ManaCosts::default(),
            spells_enabled: 0,
            spells_enabled_upper: 0,
            summoner_spells_enabled: 0x7C00,
            summoner_spells_enabled_upper: 0,
            evolve_points: 0,
            evolve_flags: 0,
        }
    }

    pub fn add_gold(&mut self, amount: f64) {
        self.gold += amount;
        self.total_gold += amount;
    }

    /// Attacker credited for a kill the champion took without a champion killer
    pub fn recent_champion_hitter(&self) -> Option<UnitId> {
        self.champion_hit
            .filter(|hit| hit.remaining > 0.0)
            .map(|hit| hit.attacker)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinionData {
    pub minion_type: MinionType,
    /// Lane path walked while nothing is in range
    pub lane_waypoints: Vec<Vec2>,
    /// Lane waypoint currently walked to
    pub lane_index: usize,
    pub scan_timer: f64,
}

impl MinionData {
    pub fn new(minion_type: MinionType, lane_waypoints: Vec<Vec2>) -> Self {
        MinionData {
            minion_type,
            lane_waypoints,
            lane_index: 0,
            scan_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretData {
    pub turret_type: TurretType,
    pub global_gold: f64,
    pub global_exp: f64,
    pub scan_timer: f64,
    /// Extra base health granted per enemy champion on the first update
    pub health_per_enemy_champion: f64,
    pub health_scaled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InhibitorData {
    pub state: InhibitorState,
    /// Seconds until respawn, counted down while dead
    pub respawn_timer: f64,
    pub respawn_announced: bool,
}

impl InhibitorData {
    pub fn new() -> Self {
        InhibitorData {
            state: InhibitorState::Alive,
            respawn_timer: 0.0,
            respawn_announced: false,
        }
    }
}

impl Default for InhibitorData {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind-specific part of a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitKind {
    Champion(ChampionData),
    Minion(MinionData),
    Turret(TurretData),
    Inhibitor(InhibitorData),
    Nexus,
    Placeable,
}

/// What the generic simulation may do with a unit of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub has_combat_stats: bool,
    pub has_auto_attack: bool,
    pub handles_death_rewards: bool,
    pub can_move: bool,
    pub removed_on_death: bool,
    /// Attacker penetration applies to damage against this kind
    pub applies_penetration: bool,
    /// Damage against this kind heals the attacker through lifesteal / spellvamp
    pub grants_regen: bool,
    /// Runs the periodic target scan
    pub scans_for_targets: bool,
}

impl UnitKind {
    pub fn profile(&self) -> KindProfile {
        match self {
            UnitKind::Champion(_) => KindProfile {
                has_combat_stats: true,
                has_auto_attack: true,
                handles_death_rewards: true,
                can_move: true,
                removed_on_death: false,
                applies_penetration: true,
                grants_regen: true,
                scans_for_targets: false,
            },
            UnitKind::Minion(_) => KindProfile {
                has_combat_stats: true,
                has_auto_attack: true,
                handles_death_rewards: true,
                can_move: true,
                removed_on_death: true,
                applies_penetration: true,
                grants_regen: true,
                scans_for_targets: true,
            },
            UnitKind::Turret(_) => KindProfile {
                has_combat_stats: true,
                has_auto_attack: true,
                handles_death_rewards: true,
                can_move: false,
                removed_on_death: true,
                applies_penetration: false,
                grants_regen: false,
                scans_for_targets: true,
            },
            UnitKind::Inhibitor(_) | UnitKind::Nexus => KindProfile {
                has_combat_stats: false,
                has_auto_attack: false,
                handles_death_rewards: true,
                can_move: false,
                removed_on_death: false,
                applies_penetration: false,
                grants_regen: false,
                scans_for_targets: false,
            },
            UnitKind::Placeable => KindProfile {
                has_combat_stats: false,
                has_auto_attack: false,
                handles_death_rewards: false,
                can_move: false,
                removed_on_death: true,
                applies_penetration: false,
                grants_regen: false,
                scans_for_targets: false,
            },
        }
    }

    pub fn is_champion(&self) -> bool {
        matches!(self, UnitKind::Champion(_))
    }

    pub fn is_minion(&self) -> bool {
        matches!(self, UnitKind::Minion(_))
    }

    pub fn is_turret(&self) -> bool {
        matches!(self, UnitKind::Turret(_))
    }

    pub fn is_building(&self) -> bool {
        matches!(self, UnitKind::Inhibitor(_) | UnitKind::Nexus)
    }

    pub fn turret_type(&self) -> Option<TurretType> {
        match self {
            UnitKind::Turret(t) => Some(t.turret_type),
            _ => None,
        }
    }

    pub fn is_fountain_turret(&self) -> bool {
        self.turret_type() == Some(TurretType::Fountain)
    }

    pub fn champion(&self) -> Option<&ChampionData> {
        match self {
            UnitKind::Champion(c) => Some(c),
            _ => None,
        }
    }

    pub fn champion_mut(&mut self) -> Option<&mut ChampionData> {
        match self {
            UnitKind::Champion(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mana_cost_slot_lookup() {
        assert_eq!(ManaCostSlot::from_slot(0), Some(ManaCostSlot::Base(0)));
        assert_eq!(ManaCostSlot::from_slot(3), Some(ManaCostSlot::Base(3)));
        assert_eq!(ManaCostSlot::from_slot(4), None);
        assert_eq!(ManaCostSlot::from_slot(44), None);
        assert_eq!(ManaCostSlot::from_slot(45), Some(ManaCostSlot::Extra(0)));
        assert_eq!(ManaCostSlot::from_slot(60), Some(ManaCostSlot::Extra(15)));
        assert_eq!(ManaCostSlot::from_slot(61), None);
    }

    #[test]
    fn test_mana_costs_set_and_get() {
        let mut costs = ManaCosts::default();
        assert!(costs.set(2, 60.0));
        assert!(costs.set(50, 15.0));
        assert!(!costs.set(10, 99.0));
        assert!((costs.get(2) - 60.0).abs() < f64::EPSILON);
        assert!((costs.extra[5] - 15.0).abs() < f64::EPSILON);
        assert!((costs.get(10) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profiles() {
        let turret = UnitKind::Turret(TurretData {
            turret_type: TurretType::Outer,
            global_gold: 125.0,
            global_exp: 0.0,
            scan_timer: 0.0,
            health_per_enemy_champion: 0.0,
            health_scaled: false,
        });
        let p = turret.profile();
        assert!(p.has_auto_attack);
        assert!(!p.can_move);
        assert!(!p.applies_penetration);
        assert!(!p.grants_regen);

        assert!(!UnitKind::Nexus.profile().has_combat_stats);
        assert!(!UnitKind::Nexus.profile().removed_on_death);
        assert!(UnitKind::Minion(MinionData::new(MinionType::Melee, vec![])).profile().removed_on_death);
    }

    #[test]
    fn test_recent_champion_hitter_expires() {
        let mut champ = ChampionData::new(LevelGrowth::default());
        champ.champion_hit = Some(ChampionHit {
            attacker: UnitId(4),
            remaining: 3.0,
        });
        assert_eq!(champ.recent_champion_hitter(), Some(UnitId(4)));

        champ.champion_hit = Some(ChampionHit {
            attacker: UnitId(4),
            remaining: 0.0,
        });
        assert_eq!(champ.recent_champion_hitter(), None);
    }
}
