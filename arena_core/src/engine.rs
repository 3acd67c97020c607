//! Game - The world driver that advances every unit and projectile each tick

use crate::buff::{Buff, BuffApplied};
use crate::combat::{
    self, auto_attack::refresh_waypoints, death, projectile, targeting, CombatContext, DamageOutcome, MatchState,
};
use crate::config::{default_content, default_rules, ArenaConstants, ContentProvider};
use crate::crowd_control::CrowdControl;
use crate::damage::DamagePacket;
use crate::error::ArenaError;
use crate::hooks::{BuffScriptId, HookArgs, NoScripts, PassiveHook, ScriptHooks};
use crate::notify::{EventLog, Notification, NotificationSink};
use crate::replication::export_fields;
use crate::rules::MapRules;
use crate::stat_block::StatMod;
use crate::types::{Team, UnitId, Vec2};
use crate::unit::{MinionType, MoveOrder, TurretType, Unit, UnitKind};
use crate::world::World;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A running match
///
/// Owns the world and every collaborator the combat code needs. `S` receives
/// notifications and `R` drives crit rolls.
pub struct Game<S: NotificationSink = EventLog, R: RngCore = StdRng> {
    world: World,
    constants: ArenaConstants,
    rules: Box<dyn MapRules>,
    content: Box<dyn ContentProvider>,
    hooks: Box<dyn ScriptHooks>,
    sink: S,
    rng: R,
    match_state: MatchState,
    game_time: f64,
}

impl Game<EventLog, StdRng> {
    /// Game on the embedded configuration, collecting events in an [`EventLog`]
    pub fn with_defaults(seed: u64) -> Self {
        Game::new(
            ArenaConstants::default(),
            default_rules(),
            default_content(),
            EventLog::new(),
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<S: NotificationSink, R: RngCore> Game<S, R> {
    pub fn new(
        constants: ArenaConstants,
        rules: impl MapRules + 'static,
        content: impl ContentProvider + 'static,
        sink: S,
        rng: R,
    ) -> Self {
        Game {
            world: World::new(),
            constants,
            rules: Box::new(rules),
            content: Box::new(content),
            hooks: Box::new(NoScripts),
            sink,
            rng,
            match_state: MatchState::default(),
            game_time: 0.0,
        }
    }

    pub fn with_hooks(mut self, hooks: impl ScriptHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    // === Accessors ===

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.world.unit(id)
    }

    pub fn constants(&self) -> &ArenaConstants {
        &self.constants
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn is_game_over(&self) -> bool {
        self.match_state.game_over
    }

    /// Seconds of simulated time
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    fn context(&mut self) -> (&mut World, CombatContext<'_>) {
        let ctx = CombatContext {
            constants: &self.constants,
            rules: self.rules.as_ref(),
            sink: &mut self.sink,
            hooks: self.hooks.as_mut(),
            rng: &mut self.rng,
            match_state: &mut self.match_state,
            game_time: self.game_time,
        };
        (&mut self.world, ctx)
    }

    // === Spawning ===

    pub fn spawn_champion(&mut self, team: Team, model: &str, position: Vec2) -> UnitId {
        let id = self.world.next_net_id();
        let content = self.content.unit_content(model);
        let unit = Unit::champion(id, team, model, position, content.as_ref(), &self.constants);
        tracing::debug!(%id, model, ?team, "champion spawned");
        self.world.add_entity(unit)
    }

    /// Spawn a lane minion at the first waypoint of `lane`
    pub fn spawn_minion(&mut self, team: Team, model: &str, minion_type: MinionType, lane: Vec<Vec2>) -> UnitId {
        let id = self.world.next_net_id();
        let content = self.content.unit_content(model);
        let unit = Unit::minion(id, team, model, minion_type, lane, content.as_ref(), &self.constants);
        self.world.add_entity(unit)
    }

    pub fn spawn_turret(&mut self, team: Team, model: &str, position: Vec2, turret_type: TurretType) -> UnitId {
        let id = self.world.next_net_id();
        let profile = self.constants.turrets.get(turret_type);
        let unit = Unit::turret(id, team, model, position, turret_type, profile);
        self.world.add_entity(unit)
    }

    pub fn spawn_inhibitor(&mut self, team: Team, model: &str, position: Vec2, health: f64) -> UnitId {
        let id = self.world.next_net_id();
        self.world.add_entity(Unit::inhibitor(id, team, model, position, health))
    }

    pub fn spawn_nexus(&mut self, team: Team, model: &str, position: Vec2, health: f64) -> UnitId {
        let id = self.world.next_net_id();
        self.world.add_entity(Unit::nexus(id, team, model, position, health))
    }

    // === Commands ===

    /// Order `unit` to attack `target`
    pub fn attack(&mut self, unit: UnitId, target: UnitId) -> Result<(), ArenaError> {
        for id in [unit, target] {
            if self.world.unit(id).is_none() {
                return Err(ArenaError::UnknownUnit(id));
            }
        }
        let (world, mut ctx) = self.context();
        targeting::set_target_unit(world, &mut ctx, unit, Some(target));
        Ok(())
    }

    /// Walk a champion to `destination`, dropping its target
    pub fn move_to(&mut self, unit: UnitId, destination: Vec2) -> Result<(), ArenaError> {
        self.order_move(unit, destination, MoveOrder::Move)
    }

    /// Walk a champion to `destination`, engaging enemies met on the way
    pub fn attack_move(&mut self, unit: UnitId, destination: Vec2) -> Result<(), ArenaError> {
        self.order_move(unit, destination, MoveOrder::AttackMove)
    }

    fn order_move(&mut self, unit: UnitId, destination: Vec2, order: MoveOrder) -> Result<(), ArenaError> {
        let (world, mut ctx) = self.context();
        let u = world.unit_mut(unit).ok_or(ArenaError::UnknownUnit(unit))?;
        if let Some(champion) = u.kind.champion_mut() {
            champion.move_order = order;
        }
        let position = u.position;
        u.set_waypoints(vec![position, destination]);
        if order == MoveOrder::Move {
            targeting::stop_targeting(world, &mut ctx, unit);
        }
        Ok(())
    }

    pub fn apply_crowd_control(&mut self, unit: UnitId, cc: CrowdControl) -> Result<(), ArenaError> {
        let u = self.world.unit_mut(unit).ok_or(ArenaError::UnknownUnit(unit))?;
        u.apply_crowd_control(cc);
        Ok(())
    }

    pub fn add_buff(&mut self, unit: UnitId, buff: Buff) -> Result<BuffApplied, ArenaError> {
        let u = self.world.unit_mut(unit).ok_or(ArenaError::UnknownUnit(unit))?;
        u.add_buff(buff)
    }

    /// Start a buff script on `unit` through the game's script hooks
    ///
    /// With `unique`, a running instance of the same script is deactivated
    /// first. A negative `remove_after` keeps the script until removed.
    pub fn add_buff_script(
        &mut self,
        unit: UnitId,
        script: BuffScriptId,
        owner_spell: Option<String>,
        remove_after: f64,
        unique: bool,
    ) -> Result<(), ArenaError> {
        let u = self.world.unit_mut(unit).ok_or(ArenaError::UnknownUnit(unit))?;
        u.add_buff_script(script, owner_spell, remove_after, unique, self.hooks.as_mut())
    }

    pub fn remove_buff_script(&mut self, unit: UnitId, script: &BuffScriptId) -> Result<(), ArenaError> {
        let u = self.world.unit_mut(unit).ok_or(ArenaError::UnknownUnit(unit))?;
        u.remove_buff_script(script, self.hooks.as_mut());
        Ok(())
    }

    /// Resolve damage from outside the auto-attack loop (spells, scripts)
    pub fn apply_damage(&mut self, packet: DamagePacket) -> Result<DamageOutcome, ArenaError> {
        if self.world.unit(packet.victim).is_none() {
            return Err(ArenaError::UnknownUnit(packet.victim));
        }
        let (world, mut ctx) = self.context();
        Ok(combat::resolve_damage(world, &mut ctx, packet))
    }

    // === Tick ===

    /// Advance the match by `delta_time` seconds
    ///
    /// Units update in ascending id order, then projectiles, then units
    /// flagged for removal are purged. A finished match no longer advances.
    pub fn tick(&mut self, delta_time: f64) {
        if self.match_state.game_over {
            return;
        }
        self.game_time += delta_time;

        for id in self.world.unit_ids() {
            self.update_unit(id, delta_time);
        }

        let (world, mut ctx) = self.context();
        for id in world.projectile_ids() {
            projectile::update_projectile(world, &mut ctx, id, delta_time);
        }

        for id in self.world.purge_removed() {
            tracing::debug!(%id, "unit removed");
        }
    }

    /// Run `ticks` fixed steps, stopping early if the match ends
    pub fn run(&mut self, ticks: usize, delta_time: f64) {
        for _ in 0..ticks {
            if self.match_state.game_over {
                break;
            }
            self.tick(delta_time);
        }
    }

    fn update_unit(&mut self, id: UnitId, delta_time: f64) {
        let (world, mut ctx) = self.context();
        let Some(unit) = world.unit_mut(id) else {
            return;
        };

        for kind in unit.crowd_control.tick(delta_time).expired {
            tracing::debug!(unit = %id, ?kind, "crowd control expired");
        }
        unit.tick_buffs(delta_time, &mut *ctx.hooks);

        let dead = unit.is_dead();
        if !dead {
            let model = unit.model.clone();
            ctx.hooks
                .invoke_passive_hook(id, &model, PassiveHook::OnUpdate, HookArgs::Delta(delta_time));
        }

        let (is_turret, is_minion, is_champion) = (unit.kind.is_turret(), unit.kind.is_minion(), unit.kind.is_champion());
        let is_inhibitor = matches!(unit.kind, UnitKind::Inhibitor(_));
        if is_turret && !dead {
            update_turret(world, &mut ctx, id, delta_time);
        } else if is_minion && !dead {
            update_minion(world, &mut ctx, id, delta_time);
        } else if is_champion {
            targeting::champion_attack_move(world, &mut ctx, id);
            death::tick_champion_timers(world, &mut ctx, id, delta_time);
        } else if is_inhibitor {
            death::tick_inhibitor(world, &mut ctx, id, delta_time);
        }

        combat::update_auto_attack(world, &mut ctx, id, delta_time);

        let Some(unit) = world.unit_mut(id) else {
            return;
        };
        unit.move_step(delta_time);

        if unit.replication.tick(delta_time, ctx.constants.timers.replication_interval) {
            let fields = export_fields(unit);
            let fields = unit.replication.changed(fields);
            if !fields.is_empty() {
                ctx.notify(Notification::Replication { unit: id, fields });
            }
        }
    }
}

fn scan_due(world: &mut World, id: UnitId, delta_time: f64, interval: f64) -> bool {
    let Some(unit) = world.unit_mut(id) else {
        return false;
    };
    let timer = match &mut unit.kind {
        UnitKind::Turret(t) => &mut t.scan_timer,
        UnitKind::Minion(m) => &mut m.scan_timer,
        _ => return false,
    };
    *timer -= delta_time;
    if *timer > 0.0 {
        return false;
    }
    *timer += interval;
    true
}

fn is_attacking(world: &World, id: UnitId) -> bool {
    world
        .unit(id)
        .and_then(|u| u.ai.as_ref())
        .is_some_and(|ai| ai.attack.is_attacking)
}

/// Lane turrets grow tougher for every enemy champion, once
fn scale_turret_health(world: &mut World, id: UnitId) {
    let Some(unit) = world.unit(id) else {
        return;
    };
    let UnitKind::Turret(turret) = &unit.kind else {
        return;
    };
    if turret.health_scaled {
        return;
    }
    let enemies = world.champions_of_team(unit.team.enemy()).len();
    let bonus = turret.health_per_enemy_champion * enemies as f64;

    let Some(unit) = world.unit_mut(id) else {
        return;
    };
    if bonus > 0.0 {
        unit.health.apply_modifier(&StatMod::flat(bonus));
        tracing::debug!(turret = %id, bonus, "turret health scaled");
    }
    if let UnitKind::Turret(turret) = &mut unit.kind {
        turret.health_scaled = true;
    }
}

fn update_turret(world: &mut World, ctx: &mut CombatContext, id: UnitId, delta_time: f64) {
    scale_turret_health(world, id);
    if scan_due(world, id, delta_time, ctx.constants.timers.target_scan_interval) && !is_attacking(world, id) {
        targeting::turret_check_for_targets(world, ctx, id);
    }
    targeting::drop_target_out_of_range(world, ctx, id);
}

fn update_minion(world: &mut World, ctx: &mut CombatContext, id: UnitId, delta_time: f64) {
    if scan_due(world, id, delta_time, ctx.constants.timers.target_scan_interval) && !is_attacking(world, id) {
        targeting::minion_scan(world, ctx, id);
    }

    let has_target = world.unit(id).is_some_and(|u| u.target_unit.is_some());
    if has_target {
        targeting::keep_focusing(world, ctx, id);
        refresh_waypoints(world, ctx, id);
    } else {
        targeting::walk_lane(world, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{DamageKind, DamageSource};
    use crate::hooks::{HookCall, HookLog};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn count(game: &Game, pred: impl Fn(&Notification) -> bool) -> usize {
        game.sink().count(pred)
    }

    /// Records hook calls while the game owns the dispatcher
    #[derive(Clone, Default)]
    struct SharedHooks(Rc<RefCell<HookLog>>);

    impl ScriptHooks for SharedHooks {
        fn invoke_passive_hook(&mut self, unit: UnitId, model: &str, hook: PassiveHook, args: HookArgs) {
            self.0.borrow_mut().invoke_passive_hook(unit, model, hook, args);
        }

        fn activate_buff_script(&mut self, unit: UnitId, script: &BuffScriptId) {
            self.0.borrow_mut().activate_buff_script(unit, script);
        }

        fn deactivate_buff_script(&mut self, unit: UnitId, script: &BuffScriptId) {
            self.0.borrow_mut().deactivate_buff_script(unit, script);
        }
    }

    fn script_calls(hooks: &SharedHooks) -> Vec<bool> {
        hooks
            .0
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                HookCall::Activate { .. } => Some(true),
                HookCall::Deactivate { .. } => Some(false),
                HookCall::Passive { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_minions_meet_and_fight() {
        let mut game = Game::with_defaults(3);
        let blue = game.spawn_minion(
            Team::Blue,
            "MeleeMinion",
            MinionType::Melee,
            vec![Vec2::new(0.0, 0.0), Vec2::new(2000.0, 0.0)],
        );
        let purple = game.spawn_minion(
            Team::Purple,
            "MeleeMinion",
            MinionType::Melee,
            vec![Vec2::new(1000.0, 0.0), Vec2::new(-1000.0, 0.0)],
        );

        game.run(200, 0.05);

        assert!(count(&game, |n| matches!(n, Notification::SetTarget { unit, target: Some(t) } if *unit == blue && *t == purple)) >= 1);
        assert!(count(&game, |n| matches!(n, Notification::SetTarget { unit, target: Some(t) } if *unit == purple && *t == blue)) >= 1);
        assert!(count(&game, |n| matches!(n, Notification::DamageDone { .. })) > 0);
    }

    #[test]
    fn test_turret_health_scales_with_enemy_champions() {
        let mut game = Game::with_defaults(1);
        let turret = game.spawn_turret(Team::Blue, "Turret", Vec2::new(0.0, 0.0), TurretType::Outer);
        game.spawn_champion(Team::Purple, "Brawler", Vec2::new(5000.0, 0.0));
        game.spawn_champion(Team::Purple, "Marksman", Vec2::new(5000.0, 500.0));

        game.tick(0.05);
        game.tick(0.05);
        let hp = game.unit(turret).map(|u| u.health.max()).unwrap_or_default();
        assert!((hp - 1800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_turret_shoots_minion_in_range() {
        let mut game = Game::with_defaults(1);
        let turret = game.spawn_turret(Team::Blue, "Turret", Vec2::new(0.0, 0.0), TurretType::Outer);
        let minion = game.spawn_minion(Team::Purple, "MeleeMinion", MinionType::Melee, vec![Vec2::new(600.0, 0.0)]);

        game.run(40, 0.05);
        assert_eq!(game.unit(turret).and_then(|u| u.target_unit), Some(minion));
        assert!(count(&game, |n| matches!(n, Notification::ShowProjectile { .. })) >= 1);
    }

    #[test]
    fn test_replication_every_half_second() {
        let mut game = Game::with_defaults(1);
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let replicated = |game: &Game| {
            count(game, |n| matches!(n, Notification::Replication { unit, .. } if *unit == champ))
        };

        for _ in 0..3 {
            game.tick(0.125);
        }
        assert_eq!(replicated(&game), 0);
        game.tick(0.125);
        assert_eq!(replicated(&game), 1);

        // Nothing changed, so the next export is skipped
        for _ in 0..4 {
            game.tick(0.125);
        }
        assert_eq!(replicated(&game), 1);

        game.apply_damage(DamagePacket::new(champ, champ, 50.0, DamageKind::True, DamageSource::Passive))
            .unwrap();
        for _ in 0..4 {
            game.tick(0.125);
        }
        assert_eq!(replicated(&game), 2);
    }

    #[test]
    fn test_nexus_death_stops_the_clock() {
        let mut game = Game::with_defaults(1);
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let nexus = game.spawn_nexus(Team::Purple, "Nexus", Vec2::new(100.0, 0.0), 100.0);

        game.apply_damage(DamagePacket::new(champ, nexus, 500.0, DamageKind::True, DamageSource::Attack))
            .unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.match_state().losing_team, Some(Team::Purple));

        let time = game.game_time();
        game.run(10, 0.05);
        assert!((game.game_time() - time).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_unit_commands_fail() {
        let mut game = Game::with_defaults(1);
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        assert!(matches!(game.attack(champ, UnitId(99)), Err(ArenaError::UnknownUnit(UnitId(99)))));
        assert!(game.move_to(UnitId(42), Vec2::ZERO).is_err());
    }

    #[test]
    fn test_attack_move_engages() {
        let mut game = Game::with_defaults(1);
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let minion = game.spawn_minion(Team::Purple, "MeleeMinion", MinionType::Melee, vec![Vec2::new(400.0, 0.0)]);

        game.attack_move(champ, Vec2::new(3000.0, 0.0)).unwrap();
        game.tick(0.05);
        assert_eq!(game.unit(champ).and_then(|u| u.target_unit), Some(minion));
    }

    #[test]
    fn test_move_order_drops_target() {
        let mut game = Game::with_defaults(1);
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let minion = game.spawn_minion(Team::Purple, "MeleeMinion", MinionType::Melee, vec![Vec2::new(100.0, 0.0)]);
        game.attack(champ, minion).unwrap();

        game.move_to(champ, Vec2::new(-500.0, 0.0)).unwrap();
        assert_eq!(game.unit(champ).and_then(|u| u.target_unit), None);
    }

    #[test]
    fn test_unique_buff_script_replaced_then_expires() {
        let hooks = SharedHooks::default();
        let mut game = Game::with_defaults(1).with_hooks(hooks.clone());
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let shield = BuffScriptId::new("Buffs", "Shield");

        game.add_buff_script(champ, shield.clone(), None, -1.0, true).unwrap();
        game.add_buff_script(champ, shield.clone(), Some("Shield".to_string()), 0.5, true)
            .unwrap();
        assert_eq!(script_calls(&hooks), vec![true, false, true]);

        for _ in 0..3 {
            game.tick(0.125);
        }
        assert!(game.unit(champ).is_some_and(|u| u.has_buff_script_active(&shield)));

        game.tick(0.125);
        assert!(!game.unit(champ).is_some_and(|u| u.has_buff_script_active(&shield)));
        assert_eq!(script_calls(&hooks), vec![true, false, true, false]);
    }

    #[test]
    fn test_remove_buff_script_deactivates() {
        let hooks = SharedHooks::default();
        let mut game = Game::with_defaults(1).with_hooks(hooks.clone());
        let champ = game.spawn_champion(Team::Blue, "Brawler", Vec2::new(0.0, 0.0));
        let aura = BuffScriptId::new("Buffs", "Aura");

        game.add_buff_script(champ, aura.clone(), None, -1.0, false).unwrap();
        game.run(20, 0.05);
        assert!(game.unit(champ).is_some_and(|u| u.has_buff_script_active(&aura)));

        game.remove_buff_script(champ, &aura).unwrap();
        assert!(!game.unit(champ).is_some_and(|u| u.has_buff_script_active(&aura)));
        assert_eq!(script_calls(&hooks), vec![true, false]);
        assert!(game.remove_buff_script(UnitId(99), &aura).is_err());
    }
}
