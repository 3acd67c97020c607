//! Projectile flight - Moving missiles and resolving them on contact

use super::auto_attack::auto_attack_hit;
use super::resolution::resolve_damage;
use super::CombatContext;
use crate::damage::{DamagePacket, DamageSource};
use crate::hooks::{HookArgs, PassiveHook};
use crate::notify::Notification;
use crate::types::{Team, UnitId, Vec2};
use crate::world::{ProjectileTarget, World};

/// Advance projectile `id` by `delta_time` seconds
///
/// Unit-targeted missiles home in and resolve once on contact. Missiles whose
/// target died or vanished are dropped without effect. Point-targeted spells
/// hit every eligible unit they pass over, each at most once, and are
/// removed on arrival.
pub fn update_projectile(world: &mut World, ctx: &mut CombatContext, id: UnitId, delta_time: f64) {
    let Some(projectile) = world.projectile(id) else {
        return;
    };
    let owner = projectile.owner;
    let target = projectile.target;
    let Some(owner_team) = world.unit(owner).map(|u| u.team) else {
        destroy(world, ctx, id);
        return;
    };

    match target {
        ProjectileTarget::Unit(target) => {
            let Some((target_pos, target_radius)) = world
                .unit(target)
                .filter(|t| !t.is_dead())
                .map(|t| (t.position, t.collision_radius))
            else {
                tracing::debug!(projectile = %id, %target, "projectile target gone");
                destroy(world, ctx, id);
                return;
            };

            let Some(position) = advance(world, id, target_pos, delta_time) else {
                return;
            };
            let Some(projectile) = world.projectile(id) else {
                return;
            };
            if position.distance(target_pos) > projectile.collision_radius + target_radius {
                return;
            }

            let is_crit = projectile.is_crit;
            collide(world, ctx, owner, target);
            match projectile.spell.clone() {
                Some(spell) => {
                    let packet = DamagePacket::new(owner, target, spell.damage, spell.kind, DamageSource::Spell);
                    resolve_damage(world, ctx, packet);
                }
                None => {
                    auto_attack_hit(world, ctx, owner, target, is_crit);
                }
            }
            destroy(world, ctx, id);
        }
        ProjectileTarget::Point(point) => {
            let Some(projectile) = world.projectile(id) else {
                return;
            };
            let step = projectile.speed * delta_time;
            let arrived = projectile.position.distance(point) < 2.0 * step;
            let Some(position) = advance(world, id, point, delta_time) else {
                return;
            };
            sweep(world, ctx, id, owner, owner_team, position);
            if arrived {
                destroy(world, ctx, id);
            }
        }
    }
}

/// Move toward `destination`, never overshooting it
fn advance(world: &mut World, id: UnitId, destination: Vec2, delta_time: f64) -> Option<Vec2> {
    let projectile = world.projectile_mut(id)?;
    let to_target = destination - projectile.position;
    let distance = to_target.length();
    let step = (projectile.speed * delta_time).min(distance);
    projectile.position += to_target.normalize_or_zero() * step;
    Some(projectile.position)
}

/// Resolve a point-targeted spell against every unit under the missile
fn sweep(
    world: &mut World,
    ctx: &mut CombatContext,
    id: UnitId,
    owner: UnitId,
    owner_team: Team,
    position: Vec2,
) {
    let Some(projectile) = world.projectile(id) else {
        return;
    };
    let Some(spell) = projectile.spell.clone() else {
        return;
    };
    let radius = projectile.collision_radius;

    let victims: Vec<UnitId> = world
        .all_entities()
        .filter(|u| u.position.distance(position) <= radius + u.collision_radius)
        .filter(|u| !projectile.has_hit(u.id) && spell.can_affect(owner_team, u))
        .map(|u| u.id)
        .collect();

    for victim in victims {
        if let Some(p) = world.projectile_mut(id) {
            p.mark_hit(victim);
        }
        collide(world, ctx, owner, victim);
        let packet = DamagePacket::new(owner, victim, spell.damage, spell.kind, DamageSource::Spell);
        resolve_damage(world, ctx, packet);
    }
}

/// Contact hook on the owner's model
fn collide(world: &World, ctx: &mut CombatContext, owner: UnitId, victim: UnitId) {
    if let Some(unit) = world.unit(owner) {
        ctx.hooks
            .invoke_passive_hook(owner, &unit.model, PassiveHook::OnCollide, HookArgs::Unit(victim));
    }
}

fn destroy(world: &mut World, ctx: &mut CombatContext, id: UnitId) {
    if world.remove_projectile(id).is_some() {
        ctx.notify(Notification::ProjectileDestroyed { projectile: id });
    }
}
