//! Crowd-control system - Timed restrictions that gate movement and combat

pub mod tick;
mod types;

pub use tick::{process_crowd_control_tick, CrowdControlTickResult};
pub use types::{CrowdControl, CrowdControlKind};

use serde::{Deserialize, Serialize};

/// All crowd-control instances currently afflicting one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrowdControlTracker {
    instances: Vec<CrowdControl>,
}

impl CrowdControlTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance
    ///
    /// Returns true if the caller must stop the unit's movement.
    pub fn apply(&mut self, cc: CrowdControl) -> bool {
        let stops = cc.kind.stops_movement();
        self.instances.push(cc);
        stops
    }

    /// True if any instance of `kind` is active
    pub fn has(&self, kind: CrowdControlKind) -> bool {
        self.instances.iter().any(|cc| cc.kind == kind)
    }

    /// Remove every instance of `kind`, returning how many were removed
    pub fn remove(&mut self, kind: CrowdControlKind) -> usize {
        let before = self.instances.len();
        self.instances.retain(|cc| cc.kind != kind);
        before - self.instances.len()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn tick(&mut self, delta_time: f64) -> CrowdControlTickResult {
        process_crowd_control_tick(&mut self.instances, delta_time)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrowdControl> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Stunned or disarmed units cannot progress an auto-attack
    pub fn blocks_attacks(&self) -> bool {
        self.has(CrowdControlKind::Stun) || self.has(CrowdControlKind::Disarm)
    }

    /// Stunned or rooted units cannot move
    pub fn blocks_movement(&self) -> bool {
        self.has(CrowdControlKind::Stun) || self.has(CrowdControlKind::Root)
    }

    /// Stunned or silenced units cannot cast
    pub fn blocks_casting(&self) -> bool {
        self.has(CrowdControlKind::Stun) || self.has(CrowdControlKind::Silence)
    }
}
