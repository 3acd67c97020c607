//! Shared fixture for combat unit tests

use super::{CombatContext, MatchState};
use crate::config::{default_rules, ArenaConstants, RulesConfig};
use crate::hooks::HookLog;
use crate::notify::EventLog;
use crate::stat_block::Stat;
use crate::types::{Team, UnitId, Vec2};
use crate::unit::{MinionType, TurretType, Unit};
use crate::world::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Fixture {
    pub world: World,
    pub constants: ArenaConstants,
    pub rules: RulesConfig,
    pub log: EventLog,
    pub hooks: HookLog,
    pub rng: StdRng,
    pub state: MatchState,
    pub game_time: f64,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            world: World::new(),
            constants: ArenaConstants::default(),
            rules: default_rules(),
            log: EventLog::new(),
            hooks: HookLog::new(),
            rng: StdRng::seed_from_u64(7),
            state: MatchState::default(),
            game_time: 0.0,
        }
    }

    pub fn minion(&mut self, team: Team, minion_type: MinionType, x: f64) -> UnitId {
        let id = self.world.next_net_id();
        let mut unit = Unit::minion(id, team, "Minion", minion_type, vec![], None, &self.constants);
        unit.position = Vec2::new(x, 0.0);
        unit.vision_radius = 1200.0;
        unit.health = crate::stat_block::Resource::new(400.0);
        if let Some(ai) = unit.ai.as_mut() {
            ai.stats.attack_range = Stat::new(500.0);
            ai.stats.attack_damage = Stat::new(20.0);
        }
        self.world.add_entity(unit)
    }

    pub fn champion(&mut self, team: Team, x: f64) -> UnitId {
        let id = self.world.next_net_id();
        let mut unit = Unit::champion(id, team, "Hero", Vec2::new(x, 0.0), None, &self.constants);
        unit.vision_radius = 1200.0;
        unit.health = crate::stat_block::Resource::new(600.0);
        unit.mana = crate::stat_block::Resource::new(300.0);
        if let Some(ai) = unit.ai.as_mut() {
            ai.stats.attack_range = Stat::new(550.0);
            ai.stats.attack_damage = Stat::new(60.0);
        }
        self.world.add_entity(unit)
    }

    pub fn turret(&mut self, team: Team, turret_type: TurretType, x: f64) -> UnitId {
        let id = self.world.next_net_id();
        let profile = self.constants.turrets.get(turret_type).clone();
        let unit = Unit::turret(id, team, "Turret", Vec2::new(x, 0.0), turret_type, &profile);
        self.world.add_entity(unit)
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        self.world.unit(id).expect("unit exists")
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        self.world.unit_mut(id).expect("unit exists")
    }

    pub fn run<T>(&mut self, f: impl FnOnce(&mut World, &mut CombatContext) -> T) -> T {
        let mut ctx = CombatContext {
            constants: &self.constants,
            rules: &self.rules,
            sink: &mut self.log,
            hooks: &mut self.hooks,
            rng: &mut self.rng,
            match_state: &mut self.state,
            game_time: self.game_time,
        };
        f(&mut self.world, &mut ctx)
    }
}
