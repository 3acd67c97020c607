//! Unit constructors for each kind

use super::{AiState, ChampionData, InhibitorData, MinionData, MinionType, TurretData, TurretType, Unit, UnitKind};
use crate::config::{ArenaConstants, TurretProfile, UnitContent};
use crate::stat_block::{Resource, Stat, StatBlock};
use crate::types::{Team, UnitId, Vec2};

fn stats_from_content(content: &UnitContent) -> StatBlock {
    let mut stats = StatBlock::new();
    stats.movement_speed = Stat::with_min(content.move_speed, 0.0);
    stats.vision_range = Stat::with_min(content.vision_radius, 0.0);
    stats.attack_speed = Stat::bounded(content.attack_speed, 0.2, 2.5);
    stats.attack_range = Stat::with_min(content.attack_range, 0.0);
    stats.attack_damage = Stat::with_min(content.attack_damage, 0.0);
    stats.critical_chance = Stat::bounded(content.critical_chance, 0.0, 1.0);
    stats.armor = Stat::new(content.armor);
    stats.magic_resist = Stat::new(content.magic_resist);
    stats.health_regeneration = Stat::with_min(content.health_regeneration, 0.0);
    stats.mana_regeneration = Stat::new(content.mana_regeneration);
    stats
}

/// Build the AI part from content, or fall back to defaults
fn ai_from_content(model: &str, content: Option<&UnitContent>, constants: &ArenaConstants) -> AiState {
    let default_speed = constants.combat.default_projectile_speed;
    let Some(content) = content else {
        tracing::warn!(model, "no content for model, using default stats");
        return AiState::new(StatBlock::new(), false, 0.0, default_speed);
    };

    let delay = content
        .attack_cast_frame
        .map_or(0.0, |frame| frame / constants.combat.cast_frame_rate);
    AiState::new(
        stats_from_content(content),
        content.is_melee,
        delay,
        content.missile_speed.unwrap_or(default_speed),
    )
}

fn body_from_content(unit: &mut Unit, content: Option<&UnitContent>) {
    if let Some(content) = content {
        unit.health = Resource::new(content.health);
        unit.mana = Resource::new(content.mana);
        unit.collision_radius = content.collision_radius;
        unit.vision_radius = content.vision_radius;
    }
}

impl Unit {
    pub fn champion(
        id: UnitId,
        team: Team,
        model: &str,
        position: Vec2,
        content: Option<&UnitContent>,
        constants: &ArenaConstants,
    ) -> Self {
        let growth = content.map(|c| c.growth.clone()).unwrap_or_default();
        let mut unit = Unit::new(id, team, model, position, UnitKind::Champion(ChampionData::new(growth)));
        body_from_content(&mut unit, content);
        unit.ai = Some(ai_from_content(model, content, constants));
        unit.stop_movement();
        unit
    }

    pub fn minion(
        id: UnitId,
        team: Team,
        model: &str,
        minion_type: MinionType,
        lane_waypoints: Vec<Vec2>,
        content: Option<&UnitContent>,
        constants: &ArenaConstants,
    ) -> Self {
        let start = lane_waypoints.first().copied().unwrap_or(Vec2::ZERO);
        let mut unit = Unit::new(
            id,
            team,
            model,
            start,
            UnitKind::Minion(MinionData::new(minion_type, lane_waypoints)),
        );
        body_from_content(&mut unit, content);
        unit.ai = Some(ai_from_content(model, content, constants));
        unit.stop_movement();
        unit
    }

    pub fn turret(
        id: UnitId,
        team: Team,
        model: &str,
        position: Vec2,
        turret_type: TurretType,
        profile: &TurretProfile,
    ) -> Self {
        let mut unit = Unit::new(
            id,
            team,
            model,
            position,
            UnitKind::Turret(TurretData {
                turret_type,
                global_gold: profile.global_gold,
                global_exp: profile.global_exp,
                scan_timer: 0.0,
                health_per_enemy_champion: profile.health_per_enemy_champion,
                health_scaled: false,
            }),
        );
        unit.health = Resource::new(profile.health);
        unit.collision_radius = 88.0;
        unit.vision_radius = profile.vision_radius;

        let mut stats = StatBlock::new();
        stats.attack_damage = Stat::with_min(profile.attack_damage, 0.0);
        stats.attack_range = Stat::with_min(profile.attack_range, 0.0);
        stats.attack_speed = Stat::bounded(profile.attack_speed, 0.2, 2.5);
        stats.armor = Stat::new(profile.armor);
        stats.magic_resist = Stat::new(profile.magic_resist);
        stats.health_regeneration = Stat::with_min(profile.health_regeneration, 0.0);
        stats.armor_penetration.percent_bonus = profile.armor_penetration;
        stats.vision_range = Stat::with_min(profile.vision_radius, 0.0);
        unit.ai = Some(AiState::new(stats, false, profile.auto_attack_delay, profile.projectile_speed));

        if turret_type == TurretType::Fountain {
            unit.is_invulnerable = true;
            unit.set_targetable_to_team(team, false);
            unit.set_targetable_to_team(team.enemy(), false);
        }
        unit.stop_movement();
        unit
    }

    pub fn inhibitor(id: UnitId, team: Team, model: &str, position: Vec2, health: f64) -> Self {
        let mut unit = Unit::new(id, team, model, position, UnitKind::Inhibitor(InhibitorData::new()));
        unit.health = Resource::new(health);
        unit.collision_radius = 214.0;
        unit
    }

    pub fn nexus(id: UnitId, team: Team, model: &str, position: Vec2, health: f64) -> Self {
        let mut unit = Unit::new(id, team, model, position, UnitKind::Nexus);
        unit.health = Resource::new(health);
        unit.collision_radius = 353.0;
        unit
    }

    pub fn placeable(id: UnitId, team: Team, model: &str, position: Vec2, health: f64) -> Self {
        let mut unit = Unit::new(id, team, model, position, UnitKind::Placeable);
        unit.health = Resource::new(health);
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_content, ContentProvider};
    use crate::types::TargetableFlags;

    #[test]
    fn test_champion_from_content() {
        let constants = ArenaConstants::default();
        let content = default_content().unit_content("Marksman");
        let unit = Unit::champion(UnitId(1), Team::Blue, "Marksman", Vec2::ZERO, content.as_ref(), &constants);

        let ai = unit.ai.as_ref().unwrap();
        assert!(!ai.is_melee);
        assert!((ai.auto_attack_delay - 6.5 / 30.0).abs() < f64::EPSILON);
        assert!((ai.projectile_speed - 2000.0).abs() < f64::EPSILON);
        assert!((unit.health.max() - 525.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_model_uses_defaults() {
        let constants = ArenaConstants::default();
        let unit = Unit::champion(UnitId(1), Team::Blue, "", Vec2::ZERO, None, &constants);
        let ai = unit.ai.as_ref().unwrap();
        assert!((ai.auto_attack_delay - 0.0).abs() < f64::EPSILON);
        assert!((ai.projectile_speed - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fountain_is_untargetable() {
        let constants = ArenaConstants::default();
        let fountain = Unit::turret(
            UnitId(3),
            Team::Purple,
            "Fountain",
            Vec2::ZERO,
            TurretType::Fountain,
            &constants.turrets.fountain,
        );
        assert!(fountain.is_invulnerable);
        assert!(!fountain.is_targetable_to_team(Team::Blue));
        assert!(!fountain.is_targetable_to_team(Team::Purple));
        assert!(fountain.targetable_flags().contains(TargetableFlags::NON_TARGETABLE_ALLY));
    }

    #[test]
    fn test_inhibitor_turret_penetration() {
        let constants = ArenaConstants::default();
        let turret = Unit::turret(
            UnitId(3),
            Team::Blue,
            "Turret",
            Vec2::ZERO,
            TurretType::Inhibitor,
            &constants.turrets.inhibitor,
        );
        let stats = turret.stats().unwrap();
        assert!((stats.armor_penetration.percent_bonus - 0.825).abs() < f64::EPSILON);
        assert!((stats.armor.total() - 67.0).abs() < f64::EPSILON);
    }
}
