//! Targeting - Priority classification and the turret / minion / champion scans

use super::CombatContext;
use crate::notify::Notification;
use crate::types::{Team, UnitId};
use crate::unit::{MinionType, MoveOrder, Unit, UnitKind};
use crate::world::World;

/// Target priority, lower is more urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ClassifyUnit {
    ChampionAttackingChampion = 1,
    MinionAttackingChampion = 2,
    MinionAttackingMinion = 3,
    TurretAttackingMinion = 4,
    ChampionAttackingMinion = 5,
    Placeable = 6,
    MeleeMinion = 7,
    CasterMinion = 8,
    SiegeMinion = 9,
    Turret = 10,
    Champion = 11,
    Inhibitor = 12,
    Nexus = 13,
    Default = 14,
}

impl ClassifyUnit {
    pub fn priority(self) -> u8 {
        self as u8
    }
}

/// Being attacked by a unit that is still alive
pub fn is_in_distress(world: &World, id: UnitId) -> bool {
    world
        .unit(id)
        .and_then(|u| u.distress_cause)
        .is_some_and(|cause| world.is_alive(cause))
}

/// Priority of `candidate` as a target
pub fn classify(world: &World, candidate: UnitId) -> ClassifyUnit {
    let Some(unit) = world.unit(candidate) else {
        return ClassifyUnit::Default;
    };

    if let Some(target) = unit.target_unit.filter(|t| is_in_distress(world, *t)) {
        if let Some(target) = world.unit(target) {
            let pair = match (&unit.kind, &target.kind) {
                (UnitKind::Champion(_), UnitKind::Champion(_)) => Some(ClassifyUnit::ChampionAttackingChampion),
                (UnitKind::Minion(_), UnitKind::Champion(_)) => Some(ClassifyUnit::MinionAttackingChampion),
                (UnitKind::Minion(_), UnitKind::Minion(_)) => Some(ClassifyUnit::MinionAttackingMinion),
                (UnitKind::Turret(_), UnitKind::Minion(_)) => Some(ClassifyUnit::TurretAttackingMinion),
                (UnitKind::Champion(_), UnitKind::Minion(_)) => Some(ClassifyUnit::ChampionAttackingMinion),
                _ => None,
            };
            if let Some(priority) = pair {
                return priority;
            }
        }
    }

    match &unit.kind {
        UnitKind::Placeable => ClassifyUnit::Placeable,
        UnitKind::Minion(m) => match m.minion_type {
            MinionType::Melee => ClassifyUnit::MeleeMinion,
            MinionType::Caster => ClassifyUnit::CasterMinion,
            MinionType::Cannon | MinionType::Super => ClassifyUnit::SiegeMinion,
        },
        UnitKind::Turret(_) => ClassifyUnit::Turret,
        UnitKind::Champion(_) => ClassifyUnit::Champion,
        UnitKind::Inhibitor(_) if !unit.is_dead() => ClassifyUnit::Inhibitor,
        UnitKind::Nexus => ClassifyUnit::Nexus,
        UnitKind::Inhibitor(_) => ClassifyUnit::Default,
    }
}

/// Point `unit` at `target`, keeping the distress links consistent
///
/// A unit losing its target only clears the old target's distress if that
/// distress was caused by `unit`.
pub fn set_target_unit(world: &mut World, ctx: &mut CombatContext, unit: UnitId, target: Option<UnitId>) {
    let Some(old) = world.unit(unit).map(|u| u.target_unit) else {
        tracing::debug!(%unit, "set_target on missing unit");
        return;
    };

    if let Some(old_target) = old.filter(|o| Some(*o) != target) {
        if let Some(o) = world.unit_mut(old_target) {
            if o.distress_cause == Some(unit) {
                o.distress_cause = None;
            }
        }
    }
    if let Some(new_target) = target {
        if let Some(t) = world.unit_mut(new_target) {
            t.distress_cause = Some(unit);
        }
    }

    if let Some(u) = world.unit_mut(unit) {
        u.target_unit = target;
        if let Some(ai) = u.ai.as_mut() {
            if target.is_none() {
                ai.attack.is_attacking = false;
            }
            if old != target {
                ai.attack.has_made_initial_attack = false;
            }
        }
    }
    ctx.notify(Notification::SetTarget { unit, target });
}

/// Drop the target and leave the attacking state entirely
pub fn stop_targeting(world: &mut World, ctx: &mut CombatContext, unit: UnitId) {
    set_target_unit(world, ctx, unit, None);
    if let Some(ai) = world.unit_mut(unit).and_then(|u| u.ai.as_mut()) {
        ai.attack.cancel();
    }
}

/// Make every unit targeting `victim` stop
pub fn clear_attackers_of(world: &mut World, ctx: &mut CombatContext, victim: UnitId) {
    let attackers: Vec<UnitId> = world
        .all_entities()
        .filter(|u| u.target_unit == Some(victim))
        .map(|u| u.id)
        .collect();
    for attacker in attackers {
        stop_targeting(world, ctx, attacker);
    }
}

fn is_enemy(scanner: &Unit, other: &Unit) -> bool {
    other.team != scanner.team && other.team != Team::Neutral
}

/// Lowest-priority enemy within `range`, first in id order on ties
fn best_candidate(world: &World, scanner: &Unit, range: f64) -> Option<UnitId> {
    let mut best: Option<(ClassifyUnit, UnitId)> = None;
    for unit in world.all_entities() {
        if unit.id == scanner.id
            || unit.is_dead()
            || !is_enemy(scanner, unit)
            || scanner.position.distance(unit.position) > range
            || !world.team_has_vision(scanner.team, unit.id)
        {
            continue;
        }
        let priority = classify(world, unit.id);
        if best.map_or(true, |(p, _)| priority < p) {
            best = Some((priority, unit.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Enemy champion in range hitting an allied champion that is also in range
fn champion_aggressor(world: &World, turret: &Unit, range: f64) -> Option<UnitId> {
    world.all_entities().find_map(|enemy| {
        if enemy.is_dead()
            || !enemy.kind.is_champion()
            || !is_enemy(turret, enemy)
            || turret.position.distance(enemy.position) > range
        {
            return None;
        }
        let victim = world.unit(enemy.target_unit?)?;
        let hits_ally = victim.kind.is_champion()
            && victim.team == turret.team
            && enemy.position.distance(victim.position) <= enemy.attack_range()
            && turret.position.distance(victim.position) <= range;
        hits_ally.then_some(enemy.id)
    })
}

/// Turret target acquisition
///
/// With no target the best classified enemy in range is chosen. While the
/// turret is on a champion, an enemy champion attacking an allied champion
/// takes over.
pub fn turret_check_for_targets(world: &mut World, ctx: &mut CombatContext, turret: UnitId) {
    let next = {
        let Some(unit) = world.unit(turret) else {
            return;
        };
        let range = unit.attack_range();
        match unit.target_unit {
            None => best_candidate(world, unit, range),
            Some(current) if world.unit(current).is_some_and(|t| t.kind.is_champion()) => {
                champion_aggressor(world, unit, range).filter(|&aggressor| aggressor != current)
            }
            Some(_) => None,
        }
    };

    if let Some(next) = next {
        tracing::debug!(%turret, target = %next, "turret acquired target");
        set_target_unit(world, ctx, turret, Some(next));
    }
}

/// Forget a target that has walked out of range
pub fn drop_target_out_of_range(world: &mut World, ctx: &mut CombatContext, unit: UnitId) {
    let out_of_range = world.unit(unit).is_some_and(|u| {
        u.target_unit
            .and_then(|t| world.unit(t))
            .is_some_and(|t| u.position.distance(t.position) > u.attack_range())
    });
    if out_of_range {
        set_target_unit(world, ctx, unit, None);
    }
}

/// Minion target acquisition within detection range; true if a target was found
pub fn minion_scan(world: &mut World, ctx: &mut CombatContext, minion: UnitId) -> bool {
    let next = match world.unit(minion) {
        Some(unit) => best_candidate(world, unit, ctx.constants.ranges.detect_range),
        None => return false,
    };
    let Some(next) = next else {
        return false;
    };

    if world.unit(minion).is_some_and(|u| u.target_unit != Some(next)) {
        set_target_unit(world, ctx, minion, Some(next));
    }
    true
}

/// Stop attacking a target that is gone or out of range
pub fn keep_focusing(world: &mut World, ctx: &mut CombatContext, minion: UnitId) {
    let Some(unit) = world.unit(minion) else {
        return;
    };
    let attacking = unit.ai.as_ref().is_some_and(|ai| ai.attack.is_attacking);
    let lost = unit
        .target_unit
        .and_then(|t| world.unit(t))
        .map_or(true, |t| unit.position.distance(t.position) > unit.attack_range());

    if attacking && lost {
        if let Some(ai) = world.unit_mut(minion).and_then(|u| u.ai.as_mut()) {
            ai.attack.is_attacking = false;
        }
        ctx.notify(Notification::StopAutoAttack { unit: minion });
    }
}

/// Walk toward the current lane waypoint, advancing once it is reached
pub fn walk_lane(world: &mut World, minion: UnitId) {
    let Some(unit) = world.unit_mut(minion) else {
        return;
    };
    if unit.movement.is_moving() {
        return;
    }
    let position = unit.position;
    let UnitKind::Minion(data) = &mut unit.kind else {
        return;
    };

    let Some(&current) = data.lane_waypoints.get(data.lane_index) else {
        return;
    };
    let destination = if position.distance(current) > f64::EPSILON {
        current
    } else if data.lane_index + 1 < data.lane_waypoints.len() {
        data.lane_index += 1;
        data.lane_waypoints[data.lane_index]
    } else {
        return;
    };
    unit.set_waypoints(vec![position, destination]);
}

/// Attack-moving champions keep switching to the nearest visible enemy in reach
pub fn champion_attack_move(world: &mut World, ctx: &mut CombatContext, champion: UnitId) {
    let next = {
        let Some(unit) = world.unit(champion) else {
            return;
        };
        let attack_moving = unit
            .kind
            .champion()
            .is_some_and(|c| c.move_order == MoveOrder::AttackMove);
        if !attack_moving || unit.is_dead() {
            return;
        }

        let reach = unit.attack_range().max(ctx.constants.ranges.detect_range);
        world
            .all_entities()
            .filter(|other| {
                other.id != unit.id
                    && !other.is_dead()
                    && is_enemy(unit, other)
                    && world.team_has_vision(unit.team, other.id)
            })
            .map(|other| (unit.position.distance(other.position), other.id))
            .filter(|(distance, _)| *distance <= reach)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
            .filter(|&id| unit.target_unit != Some(id))
    };

    if let Some(next) = next {
        set_target_unit(world, ctx, champion, Some(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::testing::Fixture;
    use crate::stat_block::Stat;
    use crate::types::Vec2;
    use crate::unit::TurretType;

    #[test]
    fn test_classify_by_kind() {
        let mut fx = Fixture::new();
        let melee = fx.minion(Team::Blue, MinionType::Melee, 0.0);
        let caster = fx.minion(Team::Blue, MinionType::Caster, 0.0);
        let cannon = fx.minion(Team::Blue, MinionType::Cannon, 0.0);
        let champ = fx.champion(Team::Blue, 0.0);
        let turret = fx.turret(Team::Blue, TurretType::Outer, 0.0);

        assert_eq!(classify(&fx.world, melee), ClassifyUnit::MeleeMinion);
        assert_eq!(classify(&fx.world, caster), ClassifyUnit::CasterMinion);
        assert_eq!(classify(&fx.world, cannon), ClassifyUnit::SiegeMinion);
        assert_eq!(classify(&fx.world, champ), ClassifyUnit::Champion);
        assert_eq!(classify(&fx.world, turret).priority(), 10);
        assert_eq!(classify(&fx.world, UnitId(999)), ClassifyUnit::Default);
    }

    #[test]
    fn test_classify_attacker_of_distressed_unit() {
        let mut fx = Fixture::new();
        let ally = fx.champion(Team::Blue, 0.0);
        let enemy = fx.champion(Team::Purple, 100.0);
        fx.run(|world, ctx| set_target_unit(world, ctx, enemy, Some(ally)));

        assert!(is_in_distress(&fx.world, ally));
        assert_eq!(classify(&fx.world, enemy), ClassifyUnit::ChampionAttackingChampion);
    }

    #[test]
    fn test_distress_cleared_only_by_its_cause() {
        let mut fx = Fixture::new();
        let victim = fx.minion(Team::Blue, MinionType::Melee, 0.0);
        let a = fx.minion(Team::Purple, MinionType::Melee, 50.0);
        let b = fx.minion(Team::Purple, MinionType::Melee, 60.0);

        fx.run(|world, ctx| {
            set_target_unit(world, ctx, a, Some(victim));
            set_target_unit(world, ctx, b, Some(victim));
            set_target_unit(world, ctx, a, None);
        });
        assert_eq!(fx.world.unit(victim).unwrap().distress_cause, Some(b));

        fx.run(|world, ctx| set_target_unit(world, ctx, b, None));
        assert_eq!(fx.world.unit(victim).unwrap().distress_cause, None);
    }

    #[test]
    fn test_scan_picks_most_urgent() {
        let mut fx = Fixture::new();
        let turret = fx.turret(Team::Blue, TurretType::Outer, 0.0);
        let ally_champ = fx.champion(Team::Blue, 300.0);
        let ally_minion = fx.minion(Team::Blue, MinionType::Melee, 320.0);

        // priority 7: idle melee minion
        let idle = fx.minion(Team::Purple, MinionType::Melee, 400.0);
        // priority 2: minion attacking a champion
        let aggressor = fx.minion(Team::Purple, MinionType::Melee, 450.0);
        // priority 11: idle champion
        let champ = fx.champion(Team::Purple, 500.0);

        fx.run(|world, ctx| {
            set_target_unit(world, ctx, aggressor, Some(ally_champ));
            set_target_unit(world, ctx, ally_minion, Some(idle));
        });

        assert_eq!(classify(&fx.world, idle), ClassifyUnit::MeleeMinion);
        assert_eq!(classify(&fx.world, aggressor), ClassifyUnit::MinionAttackingChampion);
        assert_eq!(classify(&fx.world, champ), ClassifyUnit::Champion);

        fx.run(|world, ctx| turret_check_for_targets(world, ctx, turret));
        assert_eq!(fx.world.unit(turret).unwrap().target_unit, Some(aggressor));
    }

    #[test]
    fn test_turret_switches_to_champion_aggressor() {
        let mut fx = Fixture::new();
        let turret = fx.turret(Team::Blue, TurretType::Outer, 0.0);
        let ally = fx.champion(Team::Blue, 200.0);
        let first = fx.champion(Team::Purple, 300.0);
        let diver = fx.champion(Team::Purple, 400.0);

        fx.run(|world, ctx| {
            set_target_unit(world, ctx, turret, Some(first));
            set_target_unit(world, ctx, diver, Some(ally));
            turret_check_for_targets(world, ctx, turret);
        });
        assert_eq!(fx.world.unit(turret).unwrap().target_unit, Some(diver));
    }

    #[test]
    fn test_turret_drops_target_out_of_range() {
        let mut fx = Fixture::new();
        let turret = fx.turret(Team::Blue, TurretType::Outer, 0.0);
        let enemy = fx.minion(Team::Purple, MinionType::Melee, 500.0);
        fx.run(|world, ctx| turret_check_for_targets(world, ctx, turret));
        assert_eq!(fx.world.unit(turret).unwrap().target_unit, Some(enemy));

        fx.world.unit_mut(enemy).unwrap().position = Vec2::new(2000.0, 0.0);
        fx.run(|world, ctx| drop_target_out_of_range(world, ctx, turret));
        assert_eq!(fx.world.unit(turret).unwrap().target_unit, None);
    }

    #[test]
    fn test_minion_scan_respects_detect_range() {
        let mut fx = Fixture::new();
        let minion = fx.minion(Team::Blue, MinionType::Caster, 0.0);
        let far = fx.minion(Team::Purple, MinionType::Melee, 600.0);

        assert!(!fx.run(|world, ctx| minion_scan(world, ctx, minion)));

        fx.world.unit_mut(far).unwrap().position = Vec2::new(400.0, 0.0);
        assert!(fx.run(|world, ctx| minion_scan(world, ctx, minion)));
        assert_eq!(fx.world.unit(minion).unwrap().target_unit, Some(far));
    }

    #[test]
    fn test_walk_lane_advances() {
        let mut fx = Fixture::new();
        let id = fx.world.next_net_id();
        let lane = vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0)];
        let mut unit = Unit::minion(id, Team::Blue, "Minion", MinionType::Melee, lane, None, &fx.constants);
        if let Some(ai) = unit.ai.as_mut() {
            ai.stats.movement_speed = Stat::new(100.0);
        }
        fx.world.add_entity(unit);

        walk_lane(&mut fx.world, id);
        assert_eq!(fx.world.unit(id).unwrap().movement.last_waypoint(), Some(Vec2::new(100.0, 0.0)));

        for _ in 0..4 {
            fx.world.unit_mut(id).unwrap().move_step(0.5);
        }
        walk_lane(&mut fx.world, id);
        assert_eq!(fx.world.unit(id).unwrap().movement.last_waypoint(), Some(Vec2::new(200.0, 0.0)));
    }

    #[test]
    fn test_attack_move_picks_nearest() {
        let mut fx = Fixture::new();
        let champ = fx.champion(Team::Blue, 0.0);
        let far = fx.minion(Team::Purple, MinionType::Melee, 450.0);
        let near = fx.minion(Team::Purple, MinionType::Caster, 300.0);

        fx.run(|world, ctx| champion_attack_move(world, ctx, champ));
        assert_eq!(fx.unit(champ).target_unit, None);

        if let UnitKind::Champion(c) = &mut fx.unit_mut(champ).kind {
            c.move_order = MoveOrder::AttackMove;
        }
        fx.run(|world, ctx| champion_attack_move(world, ctx, champ));
        assert_eq!(fx.unit(champ).target_unit, Some(near));

        fx.unit_mut(near).mark_dead();
        fx.run(|world, ctx| champion_attack_move(world, ctx, champ));
        assert_eq!(fx.unit(champ).target_unit, Some(far));
    }
}
