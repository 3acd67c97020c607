//! Damage resolution - Apply a DamagePacket to a unit in the world

use super::death::die;
use super::result::DamageOutcome;
use super::CombatContext;
use crate::crowd_control::CrowdControlKind;
use crate::damage::{DamageKind, DamagePacket, DamageText};
use crate::defense::{effective_defense, mitigate};
use crate::hooks::{HookArgs, PassiveHook};
use crate::notify::Notification;
use crate::unit::{ChampionHit, UnitKind};
use crate::world::World;

/// Resolve a damage packet against its victim
///
/// 1. Mitigates Physical / Magical damage by the victim's defense, after the
///    attacker's penetration (true damage and buildings skip this)
/// 2. Zeroes damage on invulnerable victims, unless the fountain hits them
/// 3. Subtracts health and runs the death sequence on a killing blow
/// 4. Heals the attacker through lifesteal / spellvamp
pub fn resolve_damage(world: &mut World, ctx: &mut CombatContext, packet: DamagePacket) -> DamageOutcome {
    let Some(victim) = world.unit(packet.victim) else {
        tracing::debug!(victim = %packet.victim, "damage against missing unit dropped");
        return DamageOutcome::dropped(packet.amount, packet.text);
    };
    let attacker = world.unit(packet.attacker);
    let victim_profile = victim.profile();

    // Step 1: Mitigation
    let mut damage = packet.amount;
    if packet.kind != DamageKind::True {
        if let Some(defense_stat) = victim.stats().and_then(|s| s.defense_for(packet.kind)) {
            let mut defense = defense_stat.total();
            if victim_profile.applies_penetration {
                let pen = attacker.and_then(|a| a.stats()).and_then(|s| s.penetration_for(packet.kind));
                defense = pen.map_or(defense.max(0.0), |pen| effective_defense(defense, pen));
            }
            damage = mitigate(damage, defense);
        }
    }
    let mitigated = packet.amount - damage;

    // Step 2: Invulnerability
    let mut text = packet.text;
    let attacker_is_fountain = attacker.is_some_and(|a| a.kind.is_fountain_turret());
    if victim.has_crowd_control(CrowdControlKind::Invulnerable) && !attacker_is_fountain {
        damage = 0.0;
        text = DamageText::Invulnerable;
    }

    let champion_hit = victim.kind.is_champion() && attacker.is_some_and(|a| a.kind.is_champion());
    let regen = attacker
        .and_then(|a| a.stats())
        .map_or(0.0, |s| s.regen_for(packet.source));
    let victim_model = victim.model.clone();

    // Step 3: Apply
    ctx.notify(Notification::DamageTaken { victim: packet.victim });
    ctx.hooks.invoke_passive_hook(
        packet.victim,
        &victim_model,
        PassiveHook::OnDamageTaken,
        HookArgs::Unit(packet.attacker),
    );

    let Some(victim) = world.unit_mut(packet.victim) else {
        return DamageOutcome::dropped(packet.amount, text);
    };
    if champion_hit {
        if let UnitKind::Champion(c) = &mut victim.kind {
            c.champion_hit = Some(ChampionHit {
                attacker: packet.attacker,
                remaining: ctx.constants.timers.champion_hit_flag,
            });
        }
    }

    let health_before = victim.health.current;
    victim.health.drain(damage);
    let health_after = victim.health.current;
    let is_killing_blow = victim.health.is_depleted() && !victim.is_dead();
    if is_killing_blow {
        victim.mark_dead();
        die(world, ctx, packet.victim, packet.attacker);
    }

    ctx.notify(Notification::DamageDone {
        attacker: packet.attacker,
        victim: packet.victim,
        amount: damage,
        kind: packet.kind,
        text,
    });

    // Step 4: Regen
    let mut healed_attacker = 0.0;
    if regen > 0.0 && victim_profile.grants_regen {
        if let Some(attacker) = world.unit_mut(packet.attacker) {
            let before = attacker.health.current;
            attacker.health.heal(regen * damage);
            healed_attacker = attacker.health.current - before;
        }
    }

    DamageOutcome {
        raw_damage: packet.amount,
        mitigated,
        final_damage: damage,
        text,
        health_before,
        health_after,
        healed_attacker,
        is_killing_blow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::testing::Fixture;
    use crate::crowd_control::CrowdControl;
    use crate::damage::DamageSource;
    use crate::stat_block::Stat;
    use crate::types::{Team, UnitId};
    use crate::unit::{MinionType, TurretType};

    fn physical(attacker: UnitId, victim: UnitId, amount: f64) -> DamagePacket {
        DamagePacket::new(attacker, victim, amount, DamageKind::Physical, DamageSource::Attack)
    }

    #[test]
    fn test_armor_halves_damage() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim).stats_mut().unwrap().armor = Stat::new(100.0);

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 100.0)));
        assert!((outcome.final_damage - 50.0).abs() < f64::EPSILON);
        assert!((fx.unit(victim).health.current - 550.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_armor_floored_by_penetration() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim).stats_mut().unwrap().armor = Stat::new(-100.0);

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 100.0)));
        assert!((outcome.final_damage - 100.0).abs() < f64::EPSILON);
        assert!((outcome.mitigated - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_armor_amplifies_against_turret() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let turret = fx.turret(Team::Purple, TurretType::Outer, 500.0);
        fx.unit_mut(turret).stats_mut().unwrap().armor = Stat::new(-100.0);

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, turret, 100.0)));
        assert!((outcome.final_damage - 150.0).abs() < f64::EPSILON);
        assert!(outcome.mitigated < 0.0);
    }

    #[test]
    fn test_magic_uses_magic_resist_and_penetration() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim).stats_mut().unwrap().magic_resist = Stat::new(150.0);
        fx.unit_mut(attacker).stats_mut().unwrap().magic_penetration.flat_bonus = 50.0;

        let packet = DamagePacket::new(attacker, victim, 100.0, DamageKind::Magical, DamageSource::Spell);
        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, packet));
        assert!((outcome.final_damage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_true_damage_ignores_defense() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim).stats_mut().unwrap().armor = Stat::new(300.0);

        let packet = DamagePacket::new(attacker, victim, 80.0, DamageKind::True, DamageSource::Passive);
        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, packet));
        assert!((outcome.final_damage - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_turret_victim_ignores_penetration() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let turret = fx.turret(Team::Purple, TurretType::Outer, 500.0);
        fx.unit_mut(attacker).stats_mut().unwrap().armor_penetration.flat_bonus = 60.0;

        // Outer turret armor 60: 100 * 100/160
        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, turret, 100.0)));
        assert!((outcome.final_damage - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invulnerable_takes_nothing() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim)
            .apply_crowd_control(CrowdControl::new(CrowdControlKind::Invulnerable, 5.0));

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 10_000.0)));
        assert!((outcome.final_damage - 0.0).abs() < f64::EPSILON);
        assert_eq!(outcome.text, DamageText::Invulnerable);
        assert!((fx.unit(victim).health.current - 600.0).abs() < f64::EPSILON);
        assert!(matches!(
            fx.log.events.last(),
            Some(Notification::DamageDone { text: DamageText::Invulnerable, .. })
        ));
    }

    #[test]
    fn test_fountain_pierces_invulnerability() {
        let mut fx = Fixture::new();
        let fountain = fx.turret(Team::Blue, TurretType::Fountain, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);
        fx.unit_mut(victim)
            .apply_crowd_control(CrowdControl::new(CrowdControlKind::Invulnerable, 5.0));

        let packet = DamagePacket::new(fountain, victim, 100.0, DamageKind::True, DamageSource::Passive);
        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, packet));
        assert!((outcome.final_damage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_event_order() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.minion(Team::Purple, MinionType::Melee, 100.0);

        fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 30.0)));
        assert!(matches!(fx.log.events[0], Notification::DamageTaken { .. }));
        assert!(matches!(fx.log.events[1], Notification::DamageDone { .. }));
        assert_eq!(fx.hooks.count(PassiveHook::OnDamageTaken), 1);
    }

    #[test]
    fn test_lifesteal_capped_at_attacker_max() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.minion(Team::Purple, MinionType::Melee, 100.0);
        fx.unit_mut(attacker).stats_mut().unwrap().life_steal.flat_bonus = 0.5;
        fx.unit_mut(attacker).health.drain(30.0);

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 100.0)));
        assert!((outcome.healed_attacker - 30.0).abs() < f64::EPSILON);
        assert!((fx.unit(attacker).health.current - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_lifesteal_never_drains_attacker() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.minion(Team::Purple, MinionType::Melee, 100.0);
        fx.unit_mut(attacker).stats_mut().unwrap().life_steal.flat_bonus = -10.0;

        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 100.0)));
        assert!((outcome.healed_attacker - 0.0).abs() < f64::EPSILON);
        assert!((fx.unit(attacker).health.current - 600.0).abs() < f64::EPSILON);
        assert!(!fx.unit(attacker).is_dead());
    }

    #[test]
    fn test_turret_victim_grants_no_lifesteal() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let turret = fx.turret(Team::Purple, TurretType::Outer, 500.0);
        fx.unit_mut(attacker).stats_mut().unwrap().life_steal.flat_bonus = 0.5;
        fx.unit_mut(attacker).health.drain(100.0);

        fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, turret, 100.0)));
        assert!((fx.unit(attacker).health.current - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_champion_hit_recorded() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.champion(Team::Purple, 100.0);

        fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 10.0)));
        let hit = fx.unit(victim).kind.champion().unwrap().champion_hit.unwrap();
        assert_eq!(hit.attacker, attacker);
        assert!((hit.remaining - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_victim_is_dropped() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let outcome = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, UnitId(77), 50.0)));
        assert!((outcome.final_damage - 0.0).abs() < f64::EPSILON);
        assert!(fx.log.events.is_empty());
    }

    #[test]
    fn test_killing_blow_marks_dead_once() {
        let mut fx = Fixture::new();
        let attacker = fx.champion(Team::Blue, 0.0);
        let victim = fx.minion(Team::Purple, MinionType::Melee, 100.0);

        let first = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 1000.0)));
        assert!(first.is_killing_blow);
        assert!(fx.unit(victim).is_dead());

        let second = fx.run(|world, ctx| resolve_damage(world, ctx, physical(attacker, victim, 1000.0)));
        assert!(!second.is_killing_blow);
        assert_eq!(fx.log.count(|n| matches!(n, Notification::NpcDie { .. })), 1);
    }
}
