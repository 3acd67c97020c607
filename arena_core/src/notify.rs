//! Notifications - Fire-and-forget events for the presentation / sync layer

use crate::damage::{DamageKind, DamageText};
use crate::replication::ReplicatedField;
use crate::types::UnitId;
use crate::unit::InhibitorState;
use serde::{Deserialize, Serialize};

/// How an auto-attack is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackType {
    Melee,
    Targeted,
}

/// Map-wide announcements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnounceEvent {
    ChampionDeath,
    TurretDestroyed,
    InhibitorDestroyed,
}

/// Everything the simulation tells the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    BeginAutoAttack {
        attacker: UnitId,
        target: UnitId,
        projectile_id: UnitId,
        is_crit: bool,
    },
    NextAutoAttack {
        attacker: UnitId,
        target: UnitId,
        projectile_id: UnitId,
        is_crit: bool,
        next_attack_flag: bool,
    },
    OnAttack {
        attacker: UnitId,
        target: UnitId,
        attack_type: AttackType,
    },
    StopAutoAttack {
        unit: UnitId,
    },
    SetTarget {
        unit: UnitId,
        target: Option<UnitId>,
    },
    ShowProjectile {
        projectile: UnitId,
        owner: UnitId,
        target: Option<UnitId>,
    },
    ProjectileDestroyed {
        projectile: UnitId,
    },
    DamageTaken {
        victim: UnitId,
    },
    DamageDone {
        attacker: UnitId,
        victim: UnitId,
        amount: f64,
        kind: DamageKind,
        text: DamageText,
    },
    NpcDie {
        victim: UnitId,
        killer: UnitId,
    },
    ChampionDie {
        victim: UnitId,
        killer: UnitId,
        gold: f64,
    },
    ChampionRespawn {
        champion: UnitId,
    },
    AddGold {
        champion: UnitId,
        source: UnitId,
        amount: f64,
    },
    AddXp {
        champion: UnitId,
        amount: f64,
    },
    LevelUp {
        champion: UnitId,
        level: u32,
    },
    Announce {
        announcement: AnnounceEvent,
        unit: UnitId,
        killer: Option<UnitId>,
    },
    InhibitorState {
        inhibitor: UnitId,
        state: InhibitorState,
        killer: Option<UnitId>,
    },
    InhibitorSpawningSoon {
        inhibitor: UnitId,
    },
    GameEnd {
        nexus: UnitId,
    },
    Replication {
        unit: UnitId,
        fields: Vec<ReplicatedField>,
    },
}

impl Notification {
    /// Serialized `event` tag of this notification
    pub fn name(&self) -> &'static str {
        match self {
            Notification::BeginAutoAttack { .. } => "begin_auto_attack",
            Notification::NextAutoAttack { .. } => "next_auto_attack",
            Notification::OnAttack { .. } => "on_attack",
            Notification::StopAutoAttack { .. } => "stop_auto_attack",
            Notification::SetTarget { .. } => "set_target",
            Notification::ShowProjectile { .. } => "show_projectile",
            Notification::ProjectileDestroyed { .. } => "projectile_destroyed",
            Notification::DamageTaken { .. } => "damage_taken",
            Notification::DamageDone { .. } => "damage_done",
            Notification::NpcDie { .. } => "npc_die",
            Notification::ChampionDie { .. } => "champion_die",
            Notification::ChampionRespawn { .. } => "champion_respawn",
            Notification::AddGold { .. } => "add_gold",
            Notification::AddXp { .. } => "add_xp",
            Notification::LevelUp { .. } => "level_up",
            Notification::Announce { .. } => "announce",
            Notification::InhibitorState { .. } => "inhibitor_state",
            Notification::InhibitorSpawningSoon { .. } => "inhibitor_spawning_soon",
            Notification::GameEnd { .. } => "game_end",
            Notification::Replication { .. } => "replication",
        }
    }
}

/// Receiver of simulation events
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notification: Notification) {}
}

/// Logs every event through `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notification: Notification) {
        tracing::debug!(?notification, "notify");
    }
}

/// Collects events in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<Notification>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, predicate: impl Fn(&Notification) -> bool) -> usize {
        self.events.iter().filter(|n| predicate(n)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The whole log as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl NotificationSink for EventLog {
    fn notify(&mut self, notification: Notification) {
        self.events.push(notification);
    }
}
