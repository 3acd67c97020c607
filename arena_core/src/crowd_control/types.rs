//! Crowd-control type definitions

use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Kind of restriction a crowd-control instance imposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdControlKind {
    /// No movement, attacks or casts
    Stun,
    /// No movement
    Root,
    /// No casts
    Silence,
    /// No auto-attacks
    Disarm,
    /// Auto-attacks miss
    Blind,
    /// Incoming damage is ignored
    Invulnerable,
}

impl CrowdControlKind {
    /// Whether applying this kind halts the unit's current movement
    pub fn stops_movement(&self) -> bool {
        matches!(self, CrowdControlKind::Stun | CrowdControlKind::Root)
    }
}

/// A timed crowd-control instance on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdControl {
    pub kind: CrowdControlKind,
    /// Seconds left before it expires
    pub remaining: f64,
    /// Who applied it, if anyone
    #[serde(default)]
    pub source: Option<UnitId>,
}

impl CrowdControl {
    pub fn new(kind: CrowdControlKind, duration: f64) -> Self {
        CrowdControl {
            kind,
            remaining: duration,
            source: None,
        }
    }

    pub fn from_source(mut self, source: UnitId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}
