//! Auto-attack state machine - Wind-up, fire and cooldown for every AI unit

use super::resolution::resolve_damage;
use super::result::DamageOutcome;
use super::targeting::set_target_unit;
use super::CombatContext;
use crate::crowd_control::CrowdControlKind;
use crate::damage::{auto_attack_packet, roll_crit, DamageKind, DamagePacket, DamageSource, FOUNTAIN_TURRET_DAMAGE};
use crate::hooks::{HookArgs, PassiveHook};
use crate::notify::{AttackType, Notification};
use crate::types::UnitId;
use crate::world::{Projectile, ProjectileTarget, World};

/// Advance the auto-attack of `id` by `delta_time` seconds
///
/// Stunned or disarmed units are frozen, cooldown included. Otherwise the
/// unit either progresses its wind-up, starts a new one when its target is in
/// range and the cooldown has elapsed, or walks toward the target.
pub fn update_auto_attack(world: &mut World, ctx: &mut CombatContext, id: UnitId, delta_time: f64) {
    let Some(unit) = world.unit(id) else {
        return;
    };
    if unit.ai.is_none() || unit.crowd_control.blocks_attacks() {
        return;
    }

    if unit.is_dead() {
        if unit.target_unit.is_some() {
            drop_target(world, ctx, id);
        }
        return;
    }

    if let Some(target) = unit.target_unit {
        let team = unit.team;
        let target_lost = world.unit(target).map_or(true, |t| t.is_dead()) || !world.team_has_vision(team, target);
        if target_lost {
            drop_target(world, ctx, id);
        } else {
            step_with_target(world, ctx, id, target, delta_time);
        }
    } else if let Some(locked) = unit.ai.as_ref().and_then(|ai| ai.attack.is_attacking.then_some(ai.attack.target)) {
        let team = unit.team;
        let lost = locked.map_or(true, |t| {
            world.unit(t).map_or(true, |u| u.is_dead()) || !world.team_has_vision(team, t)
        });
        if lost {
            if let Some(ai) = world.unit_mut(id).and_then(|u| u.ai.as_mut()) {
                ai.attack.cancel();
            }
        }
    }

    if let Some(ai) = world.unit_mut(id).and_then(|u| u.ai.as_mut()) {
        ai.attack.cooldown = (ai.attack.cooldown - delta_time).max(0.0);
    }
}

fn drop_target(world: &mut World, ctx: &mut CombatContext, id: UnitId) {
    set_target_unit(world, ctx, id, None);
    if let Some(ai) = world.unit_mut(id).and_then(|u| u.ai.as_mut()) {
        ai.attack.cancel();
    }
}

fn step_with_target(world: &mut World, ctx: &mut CombatContext, id: UnitId, target: UnitId, delta_time: f64) {
    let Some(unit) = world.unit(id) else {
        return;
    };
    let Some(ai) = unit.ai.as_ref() else {
        return;
    };

    if ai.attack.is_attacking && ai.attack.target.is_some() {
        wind_up(world, ctx, id, delta_time);
        return;
    }

    let ready = ai.attack.cooldown <= 0.0;
    let in_range = world
        .unit(target)
        .is_some_and(|t| unit.position.distance(t.position) <= unit.attack_range());
    refresh_waypoints(world, ctx, id);
    if in_range && ready {
        begin_attack(world, ctx, id, target);
    }
}

fn wind_up(world: &mut World, ctx: &mut CombatContext, id: UnitId, delta_time: f64) {
    let Some(unit) = world.unit_mut(id) else {
        return;
    };
    let position = unit.position;
    let Some(ai) = unit.ai.as_mut() else {
        return;
    };

    ai.attack.wind_up += delta_time;
    if ai.attack.wind_up < ai.wind_up_threshold() {
        return;
    }
    let Some(locked) = ai.attack.target else {
        return;
    };

    let is_crit = ai.attack.is_next_crit;
    let is_melee = ai.is_melee;
    let speed = ai.projectile_speed;
    let pending = ai.attack.projectile_id.take();
    ai.attack.cooldown = ai.stats.attack_cooldown();
    ai.attack.is_attacking = false;

    if is_melee {
        auto_attack_hit(world, ctx, id, locked, is_crit);
        return;
    }

    let projectile_id = pending.unwrap_or_else(|| world.next_net_id());
    let projectile = Projectile::new(
        projectile_id,
        id,
        ProjectileTarget::Unit(locked),
        position,
        speed,
        ctx.constants.combat.projectile_radius,
    )
    .with_crit(is_crit);
    world.add_projectile(projectile);
    ctx.notify(Notification::ShowProjectile {
        projectile: projectile_id,
        owner: id,
        target: Some(locked),
    });
}

fn begin_attack(world: &mut World, ctx: &mut CombatContext, id: UnitId, target: UnitId) {
    let projectile_id = world.next_net_id();
    let Some(unit) = world.unit_mut(id) else {
        return;
    };
    let Some(ai) = unit.ai.as_mut() else {
        return;
    };

    ai.attack.is_next_crit = roll_crit(&ai.stats, &mut *ctx.rng);
    ai.attack.is_attacking = true;
    ai.attack.wind_up = 0.0;
    ai.attack.projectile_id = Some(projectile_id);
    ai.attack.target = Some(target);
    let is_crit = ai.attack.is_next_crit;

    let notification = if ai.attack.has_made_initial_attack {
        ai.attack.next_attack_flag = !ai.attack.next_attack_flag;
        Notification::NextAutoAttack {
            attacker: id,
            target,
            projectile_id,
            is_crit,
            next_attack_flag: ai.attack.next_attack_flag,
        }
    } else {
        ai.attack.has_made_initial_attack = true;
        Notification::BeginAutoAttack {
            attacker: id,
            target,
            projectile_id,
            is_crit,
        }
    };
    let attack_type = if ai.is_melee {
        AttackType::Melee
    } else {
        AttackType::Targeted
    };

    tracing::trace!(attacker = %id, %target, is_crit, "wind-up started");
    ctx.notify(notification);
    ctx.notify(Notification::OnAttack {
        attacker: id,
        target,
        attack_type,
    });
}

/// Land an auto-attack from `attacker` on `target`
///
/// Called directly for melee units and on projectile arrival for ranged ones.
pub fn auto_attack_hit(
    world: &mut World,
    ctx: &mut CombatContext,
    attacker: UnitId,
    target: UnitId,
    is_crit: bool,
) -> Option<DamageOutcome> {
    let unit = world.unit(attacker)?;
    let stats = unit.stats()?;

    let packet = if unit.kind.is_fountain_turret() {
        DamagePacket::new(attacker, target, FOUNTAIN_TURRET_DAMAGE, DamageKind::True, DamageSource::Passive)
    } else {
        let is_blind = unit.has_crowd_control(CrowdControlKind::Blind);
        let packet = auto_attack_packet(attacker, stats, target, is_crit, is_blind);
        if !is_blind {
            let model = unit.model.clone();
            ctx.hooks
                .invoke_passive_hook(attacker, &model, PassiveHook::OnAutoAttack, HookArgs::Unit(target));
        }
        packet
    };

    Some(resolve_damage(world, ctx, packet))
}

/// Keep a unit's path pointed at its target
///
/// Units already standing in range stay put, units just inside range stop,
/// and chasers repath only once the target has drifted far enough.
pub fn refresh_waypoints(world: &mut World, ctx: &CombatContext, id: UnitId) {
    let Some(unit) = world.unit(id) else {
        return;
    };
    let Some(target_pos) = unit.target_unit.and_then(|t| world.unit(t)).map(|t| t.position) else {
        return;
    };
    let range = unit.attack_range();
    let distance = unit.position.distance(target_pos);
    if distance <= range && !unit.movement.is_moving() {
        return;
    }

    let combat = &ctx.constants.combat;
    let stand = distance <= range - combat.range_slack;
    let drifted = unit
        .movement
        .last_waypoint()
        .map_or(true, |last| last.distance(target_pos) >= combat.repath_distance);

    let Some(unit) = world.unit_mut(id) else {
        return;
    };
    if stand {
        unit.stop_movement();
    } else if drifted && unit.profile().can_move {
        let position = unit.position;
        unit.set_waypoints(vec![position, target_pos]);
    }
}
