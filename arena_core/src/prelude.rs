//! Prelude module for convenient imports
//!
//! ```rust
//! use arena_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{Attribute, Resource, Stat, StatBlock, StatMod, StatModSet};
pub use crate::types::{TargetableFlags, Team, UnitId, Vec2};

// Units and the world
pub use crate::unit::{MinionType, MoveOrder, TurretType, Unit, UnitKind};
pub use crate::world::{Projectile, ProjectileTarget, SpellEffect, SpellFlags, World};

// Combat
pub use crate::combat::{ClassifyUnit, CombatContext, DamageOutcome, MatchState};
pub use crate::damage::{DamageKind, DamagePacket, DamageSource, DamageText};

// Status
pub use crate::buff::{Buff, BuffApplied};
pub use crate::crowd_control::{CrowdControl, CrowdControlKind};

// Collaborators
pub use crate::hooks::{HookArgs, NoScripts, PassiveHook, ScriptHooks};
pub use crate::notify::{EventLog, Notification, NotificationSink, NullSink, TracingSink};
pub use crate::rules::MapRules;

// Driver and config
pub use crate::config::{default_content, default_rules, ArenaConstants, ContentProvider, ContentTable, RulesConfig};
pub use crate::engine::Game;
pub use crate::error::ArenaError;
