//! Error types for the arena core

use crate::buff::BuffError;
use crate::config::ConfigError;
use crate::types::UnitId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),
    #[error("unit {0} has no combat stats")]
    NoCombatStats(UnitId),
    #[error(transparent)]
    Buff(#[from] BuffError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
