//! Movement - Waypoint following on the map plane

use crate::types::Vec2;
use serde::{Deserialize, Serialize};

/// Precomputed path and the index of the waypoint being walked to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    waypoints: Vec<Vec2>,
    current: usize,
}

impl Movement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the path; the first waypoint is where the unit stands
    ///
    /// Returns the start position, or `None` for an empty list.
    pub fn set_waypoints(&mut self, waypoints: Vec<Vec2>) -> Option<Vec2> {
        let start = *waypoints.first()?;
        self.waypoints = waypoints;
        self.current = 1;
        Some(start)
    }

    /// Collapse the path to `[position, position]`, already arrived
    pub fn stop(&mut self, position: Vec2) {
        self.waypoints = vec![position, position];
        self.current = self.waypoints.len();
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn last_waypoint(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    pub fn is_moving(&self) -> bool {
        self.current < self.waypoints.len()
    }

    /// Advance `position` toward the current waypoint
    ///
    /// Returns true if the unit moved.
    pub fn step(&mut self, position: &mut Vec2, speed: f64, delta_time: f64) -> bool {
        let Some(&waypoint) = self.waypoints.get(self.current) else {
            return false;
        };

        let step = speed * delta_time;
        if step <= 0.0 {
            return false;
        }

        let to_waypoint = waypoint - *position;
        let distance = to_waypoint.length();
        let direction = to_waypoint.normalize_or_zero();
        *position += direction * step.min(distance);

        if distance < 2.0 * step {
            self.current += 1;
        }
        true
    }
}
