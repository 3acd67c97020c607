//! Death and rewards - What happens when a unit's health reaches zero

use super::targeting::{clear_attackers_of, stop_targeting};
use super::CombatContext;
use crate::hooks::{HookArgs, PassiveHook};
use crate::notify::{AnnounceEvent, Notification};
use crate::types::UnitId;
use crate::unit::{InhibitorState, UnitKind};
use crate::world::World;

/// Run the death sequence for `victim`, killed by `killer`
///
/// The victim must already be marked dead.
pub fn die(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    let Some(unit) = world.unit(victim) else {
        return;
    };
    tracing::info!(%victim, %killer, model = %unit.model, "unit died");

    match &unit.kind {
        UnitKind::Champion(_) => champion_death(world, ctx, victim, killer),
        UnitKind::Turret(_) => turret_death(world, ctx, victim, killer),
        UnitKind::Inhibitor(_) => inhibitor_death(world, ctx, victim, killer),
        UnitKind::Nexus => nexus_death(world, ctx, victim),
        UnitKind::Minion(_) | UnitKind::Placeable => npc_death(world, ctx, victim, killer),
    }
}

fn invoke_on_die(world: &World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    if let Some(unit) = world.unit(victim) {
        ctx.hooks
            .invoke_passive_hook(victim, &unit.model, PassiveHook::OnDie, HookArgs::Unit(killer));
    }
}

/// Generic death: removal, experience split and the killer's gold
fn npc_death(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    clear_attackers_of(world, ctx, victim);
    let Some(unit) = world.unit_mut(victim) else {
        return;
    };
    if unit.profile().removed_on_death {
        unit.to_remove = true;
    }
    let handles_rewards = unit.profile().handles_death_rewards;

    ctx.notify(Notification::NpcDie { victim, killer });
    invoke_on_die(world, ctx, victim, killer);

    if handles_rewards {
        split_experience(world, ctx, victim);
        reward_killer_gold(world, ctx, victim, killer);
    }
}

/// Rules gold for the victim, paid to a champion killer
///
/// A killer on a death streak banks this gold; enough of it shortens the streak.
fn reward_killer_gold(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    let killer_is_champion = world.unit(killer).is_some_and(|k| k.kind.is_champion());
    let gold = match world.unit(victim) {
        Some(v) if killer_is_champion => ctx.rules.gold_for(v),
        _ => return,
    };
    if gold <= 0.0 {
        return;
    }

    grant_gold(world, ctx, killer, victim, gold);

    let threshold = ctx.constants.rewards.minion_gold_streak_threshold;
    if let Some(k) = world.unit_mut(killer) {
        if k.kill_death_counter < 0 {
            if let UnitKind::Champion(c) = &mut k.kind {
                c.champion_gold_from_minions += gold;
                if c.champion_gold_from_minions >= threshold {
                    c.champion_gold_from_minions = 0.0;
                    k.kill_death_counter += 1;
                }
            }
        }
    }
}

/// Share the victim's experience among living enemy champions nearby
fn split_experience(world: &mut World, ctx: &mut CombatContext, victim: UnitId) {
    let Some(unit) = world.unit(victim) else {
        return;
    };
    let exp = ctx.rules.experience_for(unit);
    if exp <= 0.0 {
        return;
    }

    let range = ctx.constants.ranges.exp_range;
    let position = unit.position;
    let receivers: Vec<UnitId> = world
        .champions_of_team(unit.team.enemy())
        .into_iter()
        .filter(|id| {
            world
                .unit(*id)
                .is_some_and(|c| !c.is_dead() && c.position.distance(position) <= range)
        })
        .collect();
    if receivers.is_empty() {
        return;
    }

    let share = exp / receivers.len() as f64;
    for champion in receivers {
        grant_experience(world, ctx, champion, share);
    }
}

/// Give gold to a champion and notify it
pub fn grant_gold(world: &mut World, ctx: &mut CombatContext, champion: UnitId, source: UnitId, amount: f64) {
    let Some(c) = world.unit_mut(champion).and_then(|u| u.kind.champion_mut()) else {
        return;
    };
    c.add_gold(amount);
    ctx.notify(Notification::AddGold {
        champion,
        source,
        amount,
    });
}

/// Give experience to a champion, applying and announcing level-ups
pub fn grant_experience(world: &mut World, ctx: &mut CombatContext, champion: UnitId, amount: f64) {
    let Some(unit) = world.unit_mut(champion) else {
        return;
    };
    if !unit.kind.is_champion() {
        return;
    }
    let levels = unit.add_experience(amount, ctx.rules.exp_to_level_up());
    ctx.notify(Notification::AddXp { champion, amount });

    for level in levels {
        tracing::info!(%champion, level, "level up");
        ctx.notify(Notification::LevelUp { champion, level });
    }
}

/// Lane turret: global gold for the destroying team, boosted near the turret
fn turret_death(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    let Some(unit) = world.unit(victim) else {
        return;
    };
    let UnitKind::Turret(turret) = &unit.kind else {
        return;
    };
    let (global_gold, global_exp) = (turret.global_gold, turret.global_exp);
    let position = unit.position;
    let proximity = unit.attack_range() * ctx.constants.rewards.turret_proximity_factor;
    let team = world.unit(killer).map_or(unit.team.enemy(), |k| k.team);

    for champion in world.champions_of_team(team) {
        let near = world
            .unit(champion)
            .is_some_and(|c| !c.is_dead() && c.position.distance(position) <= proximity);
        let gold = if near {
            global_gold * ctx.constants.rewards.turret_proximity_gold_multiplier
        } else {
            global_gold
        };
        if gold > 0.0 {
            grant_gold(world, ctx, champion, victim, gold);
        }
        if near && global_exp > 0.0 {
            grant_experience(world, ctx, champion, global_exp);
        }
    }

    ctx.notify(Notification::Announce {
        announcement: AnnounceEvent::TurretDestroyed,
        unit: victim,
        killer: Some(killer),
    });
    npc_death(world, ctx, victim, killer);
}

fn inhibitor_death(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    clear_attackers_of(world, ctx, victim);
    if let Some(UnitKind::Inhibitor(inhibitor)) = world.unit_mut(victim).map(|u| &mut u.kind) {
        inhibitor.state = InhibitorState::Dead;
        inhibitor.respawn_timer = ctx.constants.timers.inhibitor_respawn;
        inhibitor.respawn_announced = false;
    }

    if world.unit(killer).is_some_and(|k| k.kind.is_champion()) {
        grant_gold(world, ctx, killer, victim, ctx.constants.rewards.inhibitor_kill_gold);
    }

    ctx.notify(Notification::InhibitorState {
        inhibitor: victim,
        state: InhibitorState::Dead,
        killer: Some(killer),
    });
    ctx.notify(Notification::Announce {
        announcement: AnnounceEvent::InhibitorDestroyed,
        unit: victim,
        killer: Some(killer),
    });
    npc_death(world, ctx, victim, killer);
}

fn nexus_death(world: &mut World, ctx: &mut CombatContext, victim: UnitId) {
    clear_attackers_of(world, ctx, victim);
    let team = world.unit(victim).map(|u| u.team);
    tracing::info!(nexus = %victim, ?team, "nexus destroyed, game over");

    ctx.match_state.game_over = true;
    ctx.match_state.losing_team = team;
    ctx.notify(Notification::GameEnd { nexus: victim });
}

fn champion_death(world: &mut World, ctx: &mut CombatContext, victim: UnitId, killer: UnitId) {
    let Some(unit) = world.unit_mut(victim) else {
        return;
    };
    let timers = &ctx.constants.timers;
    let recent_hitter = match &mut unit.kind {
        UnitKind::Champion(c) => {
            c.respawn_timer = timers.respawn_base + c.level as f64 * timers.respawn_per_level;
            c.recent_champion_hitter()
        }
        _ => None,
    };

    clear_attackers_of(world, ctx, victim);
    stop_targeting(world, ctx, victim);
    ctx.notify(Notification::Announce {
        announcement: AnnounceEvent::ChampionDeath,
        unit: victim,
        killer: Some(killer),
    });
    invoke_on_die(world, ctx, victim, killer);

    let killer_champion = if killer != victim && world.unit(killer).is_some_and(|k| k.kind.is_champion()) {
        Some(killer)
    } else {
        recent_hitter.filter(|id| world.unit(*id).is_some_and(|k| k.kind.is_champion()))
    };
    let Some(killer_champion) = killer_champion else {
        ctx.notify(Notification::ChampionDie { victim, killer, gold: 0.0 });
        return;
    };

    let mut gold = world.unit(victim).map_or(0.0, |v| ctx.rules.gold_for(v));

    if let Some(k) = world.unit_mut(killer_champion) {
        if let UnitKind::Champion(c) = &mut k.kind {
            c.champion_gold_from_minions = 0.0;
        }
        k.kill_death_counter = k.kill_death_counter.max(0) + 1;
    }
    if let Some(v) = world.unit_mut(victim) {
        v.kill_death_counter = v.kill_death_counter.min(0) - 1;
    }

    if gold <= 0.0 {
        ctx.notify(Notification::ChampionDie {
            victim,
            killer: killer_champion,
            gold: 0.0,
        });
        return;
    }

    if ctx.rules.kill_gold_reduction_active(ctx.game_time) && ctx.match_state.first_blood {
        gold -= gold * ctx.constants.rewards.kill_gold_reduction;
    }
    if !ctx.match_state.first_blood {
        gold += ctx.constants.rewards.first_blood_bonus;
        ctx.match_state.first_blood = true;
        tracing::info!(killer = %killer_champion, %victim, "first blood");
    }

    ctx.notify(Notification::ChampionDie {
        victim,
        killer: killer_champion,
        gold,
    });
    grant_gold(world, ctx, killer_champion, victim, gold);
    split_experience(world, ctx, victim);
}

/// Per-tick champion bookkeeping: passive gold, kill-credit expiry and respawn
pub fn tick_champion_timers(world: &mut World, ctx: &mut CombatContext, champion: UnitId, delta_time: f64) {
    let Some(unit) = world.unit_mut(champion) else {
        return;
    };
    let dead = unit.is_dead();
    let team = unit.team;
    let UnitKind::Champion(c) = &mut unit.kind else {
        return;
    };

    if !c.is_generating_gold && ctx.game_time >= ctx.rules.first_gold_time() {
        c.is_generating_gold = true;
        tracing::debug!(%champion, "generating gold");
    }
    if c.is_generating_gold {
        c.add_gold(ctx.rules.gold_per_second() * delta_time);
    }

    if let Some(hit) = c.champion_hit.as_mut() {
        hit.remaining -= delta_time;
        if hit.remaining <= 0.0 {
            c.champion_hit = None;
        }
    }

    if !dead || c.respawn_timer <= 0.0 {
        return;
    }
    c.respawn_timer -= delta_time;
    if c.respawn_timer > 0.0 {
        return;
    }
    c.respawn_timer = 0.0;

    let spawn = ctx.rules.respawn_position(team);
    unit.revive();
    unit.position = spawn;
    unit.stop_movement();
    tracing::info!(%champion, "champion respawned");
    ctx.notify(Notification::ChampionRespawn { champion });
}

/// Count down a destroyed inhibitor and bring it back
pub fn tick_inhibitor(world: &mut World, ctx: &mut CombatContext, inhibitor: UnitId, delta_time: f64) {
    let Some(unit) = world.unit_mut(inhibitor) else {
        return;
    };
    let UnitKind::Inhibitor(data) = &mut unit.kind else {
        return;
    };
    if data.state != InhibitorState::Dead {
        return;
    }

    data.respawn_timer -= delta_time;
    if !data.respawn_announced && data.respawn_timer <= ctx.constants.timers.inhibitor_announce {
        data.respawn_announced = true;
        ctx.notify(Notification::InhibitorSpawningSoon { inhibitor });
    }
    if data.respawn_timer > 0.0 {
        return;
    }

    data.respawn_timer = 0.0;
    data.state = InhibitorState::Alive;
    unit.revive();
    tracing::info!(%inhibitor, "inhibitor respawned");
    ctx.notify(Notification::InhibitorState {
        inhibitor,
        state: InhibitorState::Alive,
        killer: None,
    });
}
