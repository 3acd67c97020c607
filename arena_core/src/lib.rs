//! arena_core - Gameplay simulation core for arena game servers
//!
//! This library provides:
//! - Stat / StatBlock: The staged modifier pipeline and the attribute set built on it
//! - Crowd control and buffs: Timed restrictions and stat bundles with slot bookkeeping
//! - Targeting: Priority classification and autonomous target scans for turrets and minions
//! - Auto-attacks: The wind-up / cooldown state machine, melee hits and missiles
//! - Damage resolution: Mitigation, penetration, lifesteal and the death / reward sequence
//! - Replication: Per-kind field export at a fixed cadence
//! - Game: The world driver tying it all together

pub mod buff;
pub mod combat;
pub mod config;
pub mod crowd_control;
pub mod damage;
pub mod defense;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod notify;
pub mod prelude;
pub mod replication;
pub mod rules;
pub mod source;
pub mod stat_block;
pub mod types;
pub mod unit;
pub mod world;

// Re-export core types for convenience
pub use buff::{Buff, BuffApplied, BuffError, BuffRegistry};
pub use combat::{CombatContext, DamageOutcome, MatchState};
pub use config::{default_content, default_rules, ArenaConstants, ConfigError, ContentTable, RulesConfig};
pub use crowd_control::{CrowdControl, CrowdControlKind, CrowdControlTracker};
pub use damage::{DamageKind, DamagePacket, DamageSource, DamageText};
pub use engine::Game;
pub use error::ArenaError;
pub use notify::{EventLog, Notification, NotificationSink};
pub use stat_block::{Attribute, Resource, Stat, StatBlock, StatMod, StatModSet};
pub use types::{Team, UnitId, Vec2};
pub use unit::{MinionType, TurretType, Unit, UnitKind};
pub use world::World;
