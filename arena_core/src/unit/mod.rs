//! Unit - The combat participant shared by every kind of entity on the map

mod ai;
mod kinds;
mod movement;
mod spawn;

pub use ai::{AiState, AutoAttackState, CombatPhase};
pub use kinds::{
    ChampionData, ChampionHit, InhibitorData, InhibitorState, KindProfile, ManaCostSlot, ManaCosts,
    MinionData, MinionType, MoveOrder, TurretData, TurretType, UnitKind,
};
pub use movement::Movement;

use crate::buff::{Buff, BuffApplied, BuffController};
use crate::crowd_control::{CrowdControl, CrowdControlKind, CrowdControlTracker};
use crate::error::ArenaError;
use crate::hooks::{BuffScriptId, ScriptHooks};
use crate::replication::ReplicationManager;
use crate::source::{LevelUpSource, StatSource};
use crate::stat_block::{Resource, StatBlock};
use crate::types::{Team, TargetableFlags, UnitId, Vec2};

/// A unit on the map
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub model: String,
    pub position: Vec2,
    pub collision_radius: f64,
    pub vision_radius: f64,

    // === Pools ===
    pub health: Resource,
    pub mana: Resource,

    // === Flags ===
    pub targetable: bool,
    targetable_flags: TargetableFlags,
    pub is_invulnerable: bool,
    pub is_physical_immune: bool,
    pub is_magic_immune: bool,
    pub is_lifesteal_immune: bool,
    dead: bool,
    pub to_remove: bool,

    // === Relations ===
    pub target_unit: Option<UnitId>,
    /// Unit currently attacking this one
    pub distress_cause: Option<UnitId>,
    /// Positive on a kill streak, negative on a death streak
    pub kill_death_counter: i32,

    pub crowd_control: CrowdControlTracker,
    pub movement: Movement,
    pub replication: ReplicationManager,
    pub ai: Option<AiState>,
    pub kind: UnitKind,
}

impl Unit {
    pub fn new(id: UnitId, team: Team, model: impl Into<String>, position: Vec2, kind: UnitKind) -> Self {
        Unit {
            id,
            team,
            model: model.into(),
            position,
            collision_radius: 40.0,
            vision_radius: 0.0,
            health: Resource::new(0.0),
            mana: Resource::new(0.0),
            targetable: true,
            targetable_flags: TargetableFlags::TARGETABLE_TO_ALL,
            is_invulnerable: false,
            is_physical_immune: false,
            is_magic_immune: false,
            is_lifesteal_immune: false,
            dead: false,
            to_remove: false,
            target_unit: None,
            distress_cause: None,
            kill_death_counter: 0,
            crowd_control: CrowdControlTracker::new(),
            movement: Movement::new(),
            replication: ReplicationManager::new(),
            ai: None,
            kind,
        }
    }

    pub fn profile(&self) -> KindProfile {
        self.kind.profile()
    }

    // === Life ===

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// Back to life with full pools
    pub fn revive(&mut self) {
        self.dead = false;
        self.health.restore();
        self.mana.restore();
    }

    // === Stats ===

    pub fn stats(&self) -> Option<&StatBlock> {
        self.ai.as_ref().map(|ai| &ai.stats)
    }

    pub fn stats_mut(&mut self) -> Option<&mut StatBlock> {
        self.ai.as_mut().map(|ai| &mut ai.stats)
    }

    pub fn attack_range(&self) -> f64 {
        self.stats().map_or(0.0, |s| s.attack_range.total())
    }

    pub fn is_melee(&self) -> bool {
        self.ai.as_ref().is_some_and(|ai| ai.is_melee)
    }

    // === Crowd control ===

    /// Afflict the unit; stuns and roots halt movement on the spot
    pub fn apply_crowd_control(&mut self, cc: CrowdControl) {
        if self.crowd_control.apply(cc) {
            self.stop_movement();
        }
    }

    pub fn has_crowd_control(&self, kind: CrowdControlKind) -> bool {
        self.crowd_control.has(kind)
    }

    pub fn remove_crowd_control(&mut self, kind: CrowdControlKind) -> usize {
        self.crowd_control.remove(kind)
    }

    // === Movement ===

    pub fn set_waypoints(&mut self, waypoints: Vec<Vec2>) {
        if let Some(start) = self.movement.set_waypoints(waypoints) {
            self.position = start;
        }
    }

    /// Collapse the path to the current position
    pub fn stop_movement(&mut self) {
        self.movement.stop(self.position);
    }

    pub fn can_move(&self) -> bool {
        self.profile().can_move && !self.dead && !self.crowd_control.blocks_movement()
    }

    pub fn move_step(&mut self, delta_time: f64) -> bool {
        if !self.can_move() {
            return false;
        }
        let speed = self.stats().map_or(0.0, |s| s.movement_speed.total());
        self.movement.step(&mut self.position, speed, delta_time)
    }

    // === Targetability ===

    pub fn targetable_flags(&self) -> TargetableFlags {
        self.targetable_flags
    }

    pub fn is_targetable_to_team(&self, team: Team) -> bool {
        if self.targetable_flags.contains(TargetableFlags::TARGETABLE_TO_ALL) || team == Team::Neutral {
            return true;
        }
        if !self.targetable {
            return false;
        }
        if team == self.team {
            !self.targetable_flags.contains(TargetableFlags::NON_TARGETABLE_ALLY)
        } else {
            !self.targetable_flags.contains(TargetableFlags::NON_TARGETABLE_ENEMY)
        }
    }

    pub fn set_targetable_to_team(&mut self, team: Team, targetable: bool) {
        let (mut ally, mut enemy) = (
            !self.targetable_flags.contains(TargetableFlags::NON_TARGETABLE_ALLY),
            !self.targetable_flags.contains(TargetableFlags::NON_TARGETABLE_ENEMY),
        );
        if team == self.team {
            ally = targetable;
        } else {
            enemy = targetable;
        }

        self.targetable_flags = if ally && enemy {
            TargetableFlags::TARGETABLE_TO_ALL
        } else {
            let mut flags = TargetableFlags::empty();
            flags.set(TargetableFlags::NON_TARGETABLE_ALLY, !ally);
            flags.set(TargetableFlags::NON_TARGETABLE_ENEMY, !enemy);
            flags
        };
    }

    // === Buffs ===

    /// Add a buff, applying its modifiers when it is new
    pub fn add_buff(&mut self, buff: Buff) -> Result<BuffApplied, ArenaError> {
        let id = self.id;
        let ai = self.ai.as_mut().ok_or(ArenaError::NoCombatStats(id))?;
        let modifiers = buff.modifiers.clone();
        let applied = ai.buffs.add(buff)?;
        if let BuffApplied::Added { .. } = applied {
            modifiers.apply(&mut ai.stats, &mut self.health, &mut self.mana);
        }
        Ok(applied)
    }

    /// Remove a buff by name, reverting its modifiers
    pub fn remove_buff(&mut self, name: &str) -> Option<Buff> {
        let ai = self.ai.as_mut()?;
        let buff = ai.buffs.remove(name)?;
        buff.remove(&mut ai.stats, &mut self.health, &mut self.mana);
        Some(buff)
    }

    pub fn has_buff(&self, name: &str) -> bool {
        self.ai.as_ref().is_some_and(|ai| ai.buffs.has(name))
    }

    /// Copy of the current buffs
    pub fn buffs(&self) -> Vec<Buff> {
        self.ai.as_ref().map(|ai| ai.buffs.snapshot()).unwrap_or_default()
    }

    /// Advance buff timers and buff scripts
    pub fn tick_buffs(&mut self, delta_time: f64, hooks: &mut dyn ScriptHooks) {
        let id = self.id;
        let Some(ai) = self.ai.as_mut() else {
            return;
        };
        for buff in ai.buffs.tick(delta_time) {
            tracing::debug!(unit = %id, buff = %buff.name, "buff expired");
            buff.remove(&mut ai.stats, &mut self.health, &mut self.mana);
        }
        ai.buff_scripts.update(id, delta_time, hooks);
    }

    pub fn add_buff_script(
        &mut self,
        script: BuffScriptId,
        owner_spell: Option<String>,
        remove_after: f64,
        unique: bool,
        hooks: &mut dyn ScriptHooks,
    ) -> Result<(), ArenaError> {
        let id = self.id;
        let ai = self.ai.as_mut().ok_or(ArenaError::NoCombatStats(id))?;
        ai.buff_scripts
            .add(id, BuffController::new(script, owner_spell, remove_after), unique, hooks);
        Ok(())
    }

    pub fn has_buff_script_active(&self, script: &BuffScriptId) -> bool {
        self.ai.as_ref().is_some_and(|ai| ai.buff_scripts.is_active(script))
    }

    pub fn remove_buff_script(&mut self, script: &BuffScriptId, hooks: &mut dyn ScriptHooks) {
        let id = self.id;
        if let Some(ai) = self.ai.as_mut() {
            ai.buff_scripts.remove(id, script, hooks);
        }
    }

    // === Champion progression ===

    /// Grant experience and apply every level crossed
    ///
    /// `exp_to_level_up[level]` is the total experience needed to leave `level`.
    /// Returns the levels reached, in order.
    pub fn add_experience(&mut self, amount: f64, exp_to_level_up: &[f64]) -> Vec<u32> {
        let UnitKind::Champion(champion) = &mut self.kind else {
            return Vec::new();
        };
        champion.experience += amount;

        let mut reached = Vec::new();
        while let Some(&needed) = exp_to_level_up.get(champion.level as usize) {
            if champion.experience < needed {
                break;
            }
            champion.level += 1;
            champion.skill_points += 1;
            reached.push(champion.level);
            if let Some(ai) = self.ai.as_mut() {
                LevelUpSource::new(&champion.growth, 1).apply(&mut ai.stats, &mut self.health, &mut self.mana);
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LevelGrowth;
    use crate::stat_block::{Attribute, StatMod, StatModSet};

    fn fighter() -> Unit {
        let mut unit = Unit::new(
            UnitId(1),
            Team::Blue,
            "Brawler",
            Vec2::ZERO,
            UnitKind::Champion(ChampionData::new(LevelGrowth {
                health: 80.0,
                attack_damage: 3.0,
                ..Default::default()
            })),
        );
        unit.health = Resource::new(500.0);
        unit.ai = Some(AiState::new(StatBlock::new(), true, 0.25, 500.0));
        unit
    }

    #[test]
    fn test_stun_stops_movement() {
        let mut unit = fighter();
        unit.set_waypoints(vec![Vec2::ZERO, Vec2::new(300.0, 0.0)]);
        assert!(unit.movement.is_moving());

        unit.position = Vec2::new(10.0, 0.0);
        unit.apply_crowd_control(CrowdControl::new(CrowdControlKind::Stun, 1.0));
        assert_eq!(unit.movement.last_waypoint(), Some(Vec2::new(10.0, 0.0)));
        assert!(!unit.can_move());
    }

    #[test]
    fn test_silence_keeps_path() {
        let mut unit = fighter();
        unit.set_waypoints(vec![Vec2::ZERO, Vec2::new(300.0, 0.0)]);
        unit.apply_crowd_control(CrowdControl::new(CrowdControlKind::Silence, 1.0));
        assert_eq!(unit.movement.last_waypoint(), Some(Vec2::new(300.0, 0.0)));
    }

    #[test]
    fn test_targetable_to_team() {
        let mut unit = fighter();
        assert!(unit.is_targetable_to_team(Team::Purple));

        unit.set_targetable_to_team(Team::Purple, false);
        assert!(unit.targetable_flags().contains(TargetableFlags::NON_TARGETABLE_ENEMY));
        assert!(!unit.is_targetable_to_team(Team::Purple));
        assert!(unit.is_targetable_to_team(Team::Blue));
        assert!(unit.is_targetable_to_team(Team::Neutral));

        unit.set_targetable_to_team(Team::Purple, true);
        assert_eq!(unit.targetable_flags(), TargetableFlags::TARGETABLE_TO_ALL);
    }

    #[test]
    fn test_buff_applies_and_reverts_modifiers() {
        let mut unit = fighter();
        let buff = Buff::new("Rage", 2.0)
            .with_modifiers(StatModSet::new().with(Attribute::AttackDamage, StatMod::flat(30.0)));

        unit.add_buff(buff.clone()).unwrap();
        assert!((unit.stats().unwrap().attack_damage.total() - 30.0).abs() < f64::EPSILON);

        // Refresh must not stack the modifier
        unit.add_buff(buff).unwrap();
        assert!((unit.stats().unwrap().attack_damage.total() - 30.0).abs() < f64::EPSILON);

        let mut hooks = crate::hooks::NoScripts;
        unit.tick_buffs(2.5, &mut hooks);
        assert!(!unit.has_buff("Rage"));
        assert!((unit.stats().unwrap().attack_damage.total() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_buff_on_building_fails() {
        let mut nexus = Unit::new(UnitId(9), Team::Blue, "Nexus", Vec2::ZERO, UnitKind::Nexus);
        assert!(matches!(
            nexus.add_buff(Buff::new("Rage", 1.0)),
            Err(ArenaError::NoCombatStats(UnitId(9)))
        ));
    }

    #[test]
    fn test_experience_levels_up_with_growth() {
        let mut unit = fighter();
        let table = [0.0, 280.0, 660.0];

        assert!(unit.add_experience(100.0, &table).is_empty());
        let reached = unit.add_experience(600.0, &table);
        assert_eq!(reached, vec![2, 3]);

        let champion = unit.kind.champion().unwrap();
        assert_eq!(champion.level, 3);
        assert_eq!(champion.skill_points, 3);
        assert!((unit.health.max() - 660.0).abs() < f64::EPSILON);
        assert!((unit.stats().unwrap().attack_damage.total() - 6.0).abs() < f64::EPSILON);

        // Past the end of the table the level is capped
        assert!(unit.add_experience(10_000.0, &table).is_empty());
    }
}
