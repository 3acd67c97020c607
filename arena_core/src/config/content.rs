//! Unit content - Base numbers for each model, looked up at spawn

use super::ConfigError;
use crate::source::LevelGrowth;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Static numbers for one unit model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitContent {
    pub model: String,

    // === Pools ===
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub mana: f64,
    #[serde(default)]
    pub health_regeneration: f64,
    #[serde(default)]
    pub mana_regeneration: f64,

    // === Offense ===
    #[serde(default)]
    pub attack_damage: f64,
    #[serde(default = "default_attack_speed")]
    pub attack_speed: f64,
    #[serde(default)]
    pub attack_range: f64,
    #[serde(default)]
    pub critical_chance: f64,

    // === Defense ===
    #[serde(default)]
    pub armor: f64,
    #[serde(default)]
    pub magic_resist: f64,

    // === Body ===
    #[serde(default)]
    pub move_speed: f64,
    #[serde(default = "default_collision_radius")]
    pub collision_radius: f64,
    #[serde(default = "default_vision_radius")]
    pub vision_radius: f64,

    // === Auto-attack ===
    #[serde(default)]
    pub is_melee: bool,
    /// Animation frame at which the attack lands
    #[serde(default)]
    pub attack_cast_frame: Option<f64>,
    #[serde(default)]
    pub missile_speed: Option<f64>,

    #[serde(default)]
    pub growth: LevelGrowth,
}

fn default_attack_speed() -> f64 {
    0.625
}
fn default_collision_radius() -> f64 {
    40.0
}
fn default_vision_radius() -> f64 {
    1100.0
}

/// Source of unit content keyed by model name
pub trait ContentProvider {
    fn unit_content(&self, model: &str) -> Option<UnitContent>;
}

/// Container for unit content as stored in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentFile {
    #[serde(rename = "units")]
    units: Vec<UnitContent>,
}

/// In-memory content table
#[derive(Debug, Clone, Default)]
pub struct ContentTable {
    units: HashMap<String, UnitContent>,
}

impl ContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, content: UnitContent) {
        self.units.insert(content.model.clone(), content);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Load unit content from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: ContentFile = super::load_toml(path)?;
        Self::from_file(file)
    }

    /// Load unit content from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ContentFile = super::parse_toml(content)?;
        Self::from_file(file)
    }

    fn from_file(file: ContentFile) -> Result<Self, ConfigError> {
        let mut table = ContentTable::new();
        for unit in file.units {
            if unit.model.is_empty() {
                return Err(ConfigError::ValidationError(
                    "unit content with empty model name".to_string(),
                ));
            }
            table.insert(unit);
        }
        Ok(table)
    }
}

impl ContentProvider for ContentTable {
    fn unit_content(&self, model: &str) -> Option<UnitContent> {
        self.units.get(model).cloned()
    }
}

/// Get the built-in unit content
pub fn default_content() -> ContentTable {
    let toml = include_str!("../../config/units.toml");
    ContentTable::parse(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "embedded unit content failed to parse");
        ContentTable::new()
    })
}
