//! Simulation - Build a game from a scenario, run it and summarize the outcome

use crate::scenario::{BuildingKind, Scenario};
use arena_core::config::{default_content, default_rules, ArenaConstants};
use arena_core::{ArenaError, EventLog, Game, Notification, Team, UnitId, UnitKind, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] arena_core::ConfigError),
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error("Failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// End-of-run state of one unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    pub id: UnitId,
    pub model: String,
    pub team: Team,
    pub health: f64,
    pub max_health: f64,
    pub dead: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub ticks_run: usize,
    pub game_time: f64,
    pub game_over: bool,
    pub losing_team: Option<Team>,
    pub first_blood: bool,
    pub kills: usize,
    pub total_damage: f64,
    /// Notification counts keyed by event name
    pub events: BTreeMap<String, usize>,
    /// Units still in the world, in id order
    pub units: Vec<UnitSummary>,
}

/// A scenario loaded into a running game
pub struct Simulation {
    pub game: Game<EventLog, ChaCha8Rng>,
    seed: u64,
    ticks: usize,
    delta_time: f64,
}

impl Simulation {
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, SimError> {
        let mut game = Game::new(
            ArenaConstants::default(),
            default_rules(),
            default_content(),
            EventLog::new(),
            ChaCha8Rng::seed_from_u64(scenario.seed),
        );

        for turret in &scenario.turrets {
            game.spawn_turret(turret.team, &turret.model, turret.position, turret.turret_type);
        }
        for building in &scenario.buildings {
            match building.kind {
                BuildingKind::Inhibitor => {
                    game.spawn_inhibitor(building.team, &building.model, building.position, building.health)
                }
                BuildingKind::Nexus => game.spawn_nexus(building.team, &building.model, building.position, building.health),
            };
        }
        for champion in &scenario.champions {
            let id = game.spawn_champion(champion.team, &champion.model, champion.position);
            if let Some(destination) = champion.attack_move {
                game.attack_move(id, destination)?;
            }
        }
        for wave in &scenario.minions {
            for i in 0..wave.count {
                game.spawn_minion(wave.team, &wave.model, wave.minion_type, staggered_lane(&wave.lane, i, wave.spacing));
            }
        }

        tracing::info!(
            units = game.world().len(),
            seed = scenario.seed,
            ticks = scenario.ticks,
            "scenario loaded"
        );
        Ok(Simulation {
            game,
            seed: scenario.seed,
            ticks: scenario.ticks,
            delta_time: scenario.delta_time,
        })
    }

    /// Run every tick of the scenario, or until a nexus falls
    pub fn run(&mut self) -> SimulationReport {
        let mut ticks_run = 0;
        while ticks_run < self.ticks && !self.game.is_game_over() {
            self.game.tick(self.delta_time);
            ticks_run += 1;
        }
        tracing::info!(ticks_run, game_time = self.game.game_time(), "simulation finished");
        self.report(ticks_run)
    }

    pub fn report(&self, ticks_run: usize) -> SimulationReport {
        let log = self.game.sink();
        let mut events = BTreeMap::new();
        let mut total_damage = 0.0;
        for notification in &log.events {
            *events.entry(notification.name().to_string()).or_insert(0) += 1;
            if let Notification::DamageDone { amount, .. } = notification {
                total_damage += amount;
            }
        }
        let kills = log.count(|n| matches!(n, Notification::NpcDie { .. } | Notification::ChampionDie { .. }));

        let units = self
            .game
            .world()
            .all_entities()
            .map(|unit| {
                let champion = unit.kind.champion();
                UnitSummary {
                    id: unit.id,
                    model: unit.model.clone(),
                    team: unit.team,
                    health: unit.health.current,
                    max_health: unit.health.max(),
                    dead: unit.is_dead(),
                    gold: champion.map(|c| c.gold),
                    level: champion.map(|c| c.level),
                }
            })
            .collect();

        let state = self.game.match_state();
        SimulationReport {
            seed: self.seed,
            ticks_run,
            game_time: self.game.game_time(),
            game_over: state.game_over,
            losing_team: state.losing_team,
            first_blood: state.first_blood,
            kills,
            total_damage,
            events,
            units,
        }
    }

    /// Ids of the living units of one kind on a team
    pub fn living(&self, team: Team, pred: impl Fn(&UnitKind) -> bool) -> Vec<UnitId> {
        self.game
            .world()
            .all_entities()
            .filter(|u| u.team == team && !u.is_dead() && pred(&u.kind))
            .map(|u| u.id)
            .collect()
    }
}

/// Lane for the `index`-th wave member, its start pushed back along the first leg
fn staggered_lane(lane: &[Vec2], index: u32, spacing: f64) -> Vec<Vec2> {
    let mut lane = lane.to_vec();
    if index == 0 || spacing == 0.0 || lane.len() < 2 {
        return lane;
    }
    let back = (lane[0] - lane[1]).normalize_or_zero();
    lane[0] += back * (spacing * index as f64);
    lane
}
