//! Map rules configuration

use crate::rules::MapRules;
use crate::types::{Team, Vec2};
use crate::unit::{MinionType, Unit, UnitKind};
use serde::{Deserialize, Serialize};

/// Gold and experience paid for one kind of victim
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounty {
    #[serde(default)]
    pub gold: f64,
    #[serde(default)]
    pub exp: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinionBounties {
    #[serde(default)]
    pub melee: Bounty,
    #[serde(default)]
    pub caster: Bounty,
    #[serde(default)]
    pub cannon: Bounty,
    #[serde(default, rename = "super")]
    pub super_minion: Bounty,
}

impl MinionBounties {
    pub fn get(&self, minion_type: MinionType) -> Bounty {
        match minion_type {
            MinionType::Melee => self.melee,
            MinionType::Caster => self.caster,
            MinionType::Cannon => self.cannon,
            MinionType::Super => self.super_minion,
        }
    }
}

/// Champion kill bounty, adjusted by the victim's streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionBounty {
    #[serde(default = "default_champion_gold")]
    pub gold: f64,
    /// Extra gold per kill on the victim's kill streak
    #[serde(default)]
    pub gold_per_streak_kill: f64,
    /// Fraction of gold lost per death on the victim's death streak
    #[serde(default)]
    pub gold_loss_per_streak_death: f64,
    #[serde(default)]
    pub min_gold: f64,
    #[serde(default = "default_max_champion_gold")]
    pub max_gold: f64,
    #[serde(default)]
    pub exp_base: f64,
    #[serde(default)]
    pub exp_per_level: f64,
}

impl Default for ChampionBounty {
    fn default() -> Self {
        ChampionBounty {
            gold: default_champion_gold(),
            gold_per_streak_kill: 0.0,
            gold_loss_per_streak_death: 0.0,
            min_gold: 0.0,
            max_gold: default_max_champion_gold(),
            exp_base: 0.0,
            exp_per_level: 0.0,
        }
    }
}

fn default_champion_gold() -> f64 {
    300.0
}
fn default_max_champion_gold() -> f64 {
    1000.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespawnPoints {
    pub blue: Vec2,
    pub purple: Vec2,
}

impl Default for RespawnPoints {
    fn default() -> Self {
        RespawnPoints {
            blue: Vec2::new(0.0, 0.0),
            purple: Vec2::new(14000.0, 14000.0),
        }
    }
}

/// Rules of one map, loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub exp_to_level_up: Vec<f64>,
    #[serde(default)]
    pub first_gold_time: f64,
    #[serde(default)]
    pub gold_per_second: f64,
    /// Game time after which champion kill gold is reduced
    #[serde(default = "default_kill_gold_reduction_after")]
    pub kill_gold_reduction_after: f64,
    #[serde(default)]
    pub champion: ChampionBounty,
    #[serde(default)]
    pub minions: MinionBounties,
    #[serde(default)]
    pub turret: Bounty,
    #[serde(default)]
    pub inhibitor: Bounty,
    #[serde(default)]
    pub placeable: Bounty,
    #[serde(default)]
    pub respawn: RespawnPoints,
}

fn default_kill_gold_reduction_after() -> f64 {
    f64::INFINITY
}

impl RulesConfig {
    fn bounty_for(&self, victim: &Unit) -> Bounty {
        match &victim.kind {
            UnitKind::Minion(m) => self.minions.get(m.minion_type),
            UnitKind::Turret(_) => self.turret,
            UnitKind::Inhibitor(_) => self.inhibitor,
            UnitKind::Placeable => self.placeable,
            UnitKind::Champion(_) | UnitKind::Nexus => Bounty::default(),
        }
    }
}

impl MapRules for RulesConfig {
    fn experience_for(&self, victim: &Unit) -> f64 {
        match &victim.kind {
            UnitKind::Champion(c) => {
                self.champion.exp_base + self.champion.exp_per_level * (c.level.saturating_sub(1)) as f64
            }
            _ => self.bounty_for(victim).exp,
        }
    }

    fn gold_for(&self, victim: &Unit) -> f64 {
        match &victim.kind {
            UnitKind::Champion(_) => {
                let bounty = &self.champion;
                let streak = victim.kill_death_counter;
                let gold = if streak > 0 {
                    bounty.gold + bounty.gold_per_streak_kill * streak as f64
                } else {
                    bounty.gold * (1.0 - bounty.gold_loss_per_streak_death * (-streak) as f64)
                };
                gold.clamp(bounty.min_gold, bounty.max_gold)
            }
            _ => self.bounty_for(victim).gold,
        }
    }

    fn exp_to_level_up(&self) -> &[f64] {
        &self.exp_to_level_up
    }

    fn respawn_position(&self, team: Team) -> Vec2 {
        match team {
            Team::Purple => self.respawn.purple,
            Team::Blue | Team::Neutral => self.respawn.blue,
        }
    }

    fn first_gold_time(&self) -> f64 {
        self.first_gold_time
    }

    fn gold_per_second(&self) -> f64 {
        self.gold_per_second
    }

    fn kill_gold_reduction_active(&self, game_time: f64) -> bool {
        game_time >= self.kill_gold_reduction_after
    }
}

/// Experience curve used when no rules file is available
const DEFAULT_EXP_TABLE: [f64; 18] = [
    0.0, 280.0, 660.0, 1140.0, 1720.0, 2400.0, 3180.0, 4060.0, 5040.0, 6120.0, 7300.0, 8580.0,
    9960.0, 11440.0, 13020.0, 14700.0, 16480.0, 18360.0,
];

/// Get the built-in map rules
pub fn default_rules() -> RulesConfig {
    let toml = include_str!("../../config/rules.toml");
    super::parse_toml(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "embedded map rules failed to parse");
        RulesConfig {
            exp_to_level_up: DEFAULT_EXP_TABLE.to_vec(),
            first_gold_time: 90.0,
            gold_per_second: 1.9,
            kill_gold_reduction_after: default_kill_gold_reduction_after(),
            champion: ChampionBounty::default(),
            minions: MinionBounties::default(),
            turret: Bounty::default(),
            inhibitor: Bounty::default(),
            placeable: Bounty::default(),
            respawn: RespawnPoints::default(),
        }
    })
}
