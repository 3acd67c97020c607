//! Replication - Periodic export of synchronized unit fields
//!
//! Every kind has a fixed `(group, index)` layout (see [`export_fields`]).
//! The manager remembers what was last sent and reports only the fields
//! whose value changed since then.

mod layout;

pub use layout::export_fields;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A replicated field value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationValue {
    Float(f64),
    Uint(u32),
    Bool(bool),
}

/// One field at its stable position in the layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedField {
    pub group: u8,
    pub index: u8,
    pub value: ReplicationValue,
}

impl ReplicatedField {
    pub fn new(group: u8, index: u8, value: ReplicationValue) -> Self {
        ReplicatedField { group, index, value }
    }
}

/// Per-unit change tracking and export cadence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationManager {
    last_sent: BTreeMap<(u8, u8), ReplicationValue>,
    timer: f64,
}

impl ReplicationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cadence timer; true when an export is due
    pub fn tick(&mut self, delta_time: f64, interval: f64) -> bool {
        self.timer += delta_time;
        if self.timer >= interval {
            self.timer -= interval;
            return true;
        }
        false
    }

    /// Keep only the fields that differ from the last export, and remember them
    pub fn changed(&mut self, fields: Vec<ReplicatedField>) -> Vec<ReplicatedField> {
        fields
            .into_iter()
            .filter(|field| {
                let key = (field.group, field.index);
                if self.last_sent.get(&key) == Some(&field.value) {
                    return false;
                }
                self.last_sent.insert(key, field.value);
                true
            })
            .collect()
    }

    /// Forget everything sent so the next export is complete
    pub fn reset(&mut self) {
        self.last_sent.clear();
    }
}
