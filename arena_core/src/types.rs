//! Core types shared across the combat simulation

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Stable identifier for anything living in the world (units and projectiles)
///
/// Ids are handed out in increasing order, so ordering by id is spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Team membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Blue,
    Purple,
    Neutral,
}

impl Team {
    /// The opposing side. Neutral has no enemy of its own.
    pub fn enemy(&self) -> Team {
        match self {
            Team::Blue => Team::Purple,
            Team::Purple => Team::Blue,
            Team::Neutral => Team::Neutral,
        }
    }

    /// The two playable teams
    pub fn playable() -> &'static [Team] {
        &[Team::Blue, Team::Purple]
    }
}

/// 2D position / direction on the map plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        (*self - other).length()
    }

    /// Unit vector in the same direction, or zero for a degenerate vector
    pub fn normalize_or_zero(&self) -> Vec2 {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            return Vec2::ZERO;
        }
        let n = Vec2::new(self.x / len, self.y / len);
        if n.x.is_nan() || n.y.is_nan() {
            Vec2::ZERO
        } else {
            n
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

bitflags! {
    /// Per-team targetability, replicated as a raw u32
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TargetableFlags: u32 {
        const TARGETABLE_TO_ALL = 1 << 22;
        const NON_TARGETABLE_ALLY = 1 << 23;
        const NON_TARGETABLE_ENEMY = 1 << 24;
    }
}

impl Default for TargetableFlags {
    fn default() -> Self {
        TargetableFlags::TARGETABLE_TO_ALL
    }
}

bitflags! {
    /// Replicated action permissions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ActionState: u32 {
        const CAN_ATTACK = 1 << 0;
        const CAN_CAST = 1 << 1;
        const CAN_MOVE = 1 << 2;
        const CAN_NOT_MOVE = 1 << 3;
        const STEALTHED = 1 << 4;
        const REVEAL_SPECIFIC_UNIT = 1 << 5;
        const TAUNTED = 1 << 6;
        const FEARED = 1 << 7;
        const IS_FLEEING = 1 << 8;
        const CAN_NOT_ATTACK = 1 << 9;
        const IS_ASLEEP = 1 << 10;
        const IS_NEAR_SIGHTED = 1 << 11;
        const IS_GHOSTED = 1 << 12;
        const CHARMED = 1 << 15;
        const NO_RENDER = 1 << 16;
        const FORCE_RENDER_PARTICLES = 1 << 17;
    }
}

impl Default for ActionState {
    fn default() -> Self {
        ActionState::CAN_ATTACK | ActionState::CAN_CAST | ActionState::CAN_MOVE
    }
}
