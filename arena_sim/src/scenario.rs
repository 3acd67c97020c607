//! Scenario - TOML description of what to spawn and how long to run

use arena_core::config::{load_toml, parse_toml, ConfigError};
use arena_core::{MinionType, Team, TurretType, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionSpawn {
    pub team: Team,
    pub model: String,
    pub position: Vec2,
    /// Attack-move here once spawned
    #[serde(default)]
    pub attack_move: Option<Vec2>,
}

/// A wave of identical minions walking the same lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinionWave {
    pub team: Team,
    pub model: String,
    pub minion_type: MinionType,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Gap between wave members, laid out backwards along the lane
    #[serde(default)]
    pub spacing: f64,
    pub lane: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretSpawn {
    pub team: Team,
    pub model: String,
    pub turret_type: TurretType,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    Inhibitor,
    Nexus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpawn {
    pub kind: BuildingKind,
    pub team: Team,
    pub model: String,
    pub position: Vec2,
    pub health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_delta_time")]
    pub delta_time: f64,

    #[serde(default)]
    pub champions: Vec<ChampionSpawn>,
    #[serde(default)]
    pub minions: Vec<MinionWave>,
    #[serde(default)]
    pub turrets: Vec<TurretSpawn>,
    #[serde(default)]
    pub buildings: Vec<BuildingSpawn>,
}

fn default_count() -> u32 {
    1
}
fn default_seed() -> u64 {
    42
}
fn default_ticks() -> usize {
    600
}
fn default_delta_time() -> f64 {
    0.05
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let scenario: Scenario = load_toml(path)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = parse_toml(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.delta_time.is_nan() || self.delta_time <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "delta_time must be positive, got {}",
                self.delta_time
            )));
        }
        if let Some(wave) = self.minions.iter().find(|w| w.lane.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "minion wave '{}' has an empty lane",
                wave.model
            )));
        }
        Ok(())
    }
}

/// The bundled single-lane scenario
pub fn default_scenario() -> Scenario {
    let content = include_str!("../scenarios/lane.toml");
    Scenario::parse(content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "embedded scenario failed to parse, using an empty one");
        Scenario {
            seed: default_seed(),
            ticks: default_ticks(),
            delta_time: default_delta_time(),
            champions: Vec::new(),
            minions: Vec::new(),
            turrets: Vec::new(),
            buildings: Vec::new(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_parses() {
        let scenario = default_scenario();
        assert_eq!(scenario.seed, 42);
        assert_eq!(scenario.champions.len(), 2);
        assert_eq!(scenario.minions.len(), 4);
        assert_eq!(scenario.minions[0].count, 3);
        assert_eq!(scenario.buildings[1].kind, BuildingKind::Nexus);
    }

    #[test]
    fn test_defaults_fill_in() {
        let scenario = Scenario::parse("").unwrap();
        assert_eq!(scenario.ticks, 600);
        assert!((scenario.delta_time - 0.05).abs() < f64::EPSILON);
        assert!(scenario.turrets.is_empty());
    }

    #[test]
    fn test_rejects_bad_delta_time() {
        let result = Scenario::parse("delta_time = 0.0");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_empty_lane() {
        let toml_str = r#"
            [[minions]]
            team = "blue"
            model = "MeleeMinion"
            minion_type = "melee"
            lane = []
        "#;
        assert!(Scenario::parse(toml_str).is_err());
    }
}
