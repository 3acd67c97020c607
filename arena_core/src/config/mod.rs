//! Configuration loading from TOML files

mod constants;
mod content;
mod rules;

pub use constants::{
    ArenaConstants, CombatConstants, RangeConstants, RewardConstants, TimerConstants,
    TurretProfile, TurretProfiles,
};
pub use content::{default_content, ContentProvider, ContentTable, UnitContent};
pub use rules::{default_rules, Bounty, ChampionBounty, MinionBounties, RespawnPoints, RulesConfig};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
