//! Buff system - Named timed buffs, their replicated slots and buff scripts

mod script;
mod slots;

pub use script::{BuffController, BuffScripts};
pub use slots::{BuffSlotTable, BUFF_SLOT_COUNT};

use crate::source::StatSource;
use crate::stat_block::StatModSet;
use crate::types::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identity of one applied buff instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffHandle(pub u32);

/// Buff bookkeeping failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuffError {
    #[error("no free buff slot left")]
    NoFreeSlot,
    #[error("buff {0:?} has no slot")]
    SlotNotFound(BuffHandle),
}

/// A named, timed effect on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub name: String,
    /// Lifetime in seconds; zero or negative means it never expires
    pub duration: f64,
    #[serde(default)]
    pub time_elapsed: f64,
    #[serde(default)]
    pub source: Option<UnitId>,
    /// Applied to the holder while the buff is present
    #[serde(default)]
    pub modifiers: StatModSet,
    #[serde(skip)]
    handle: Option<BuffHandle>,
    #[serde(skip)]
    slot: u8,
}

impl Buff {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Buff {
            name: name.into(),
            duration,
            time_elapsed: 0.0,
            source: None,
            modifiers: StatModSet::new(),
            handle: None,
            slot: 0,
        }
    }

    pub fn with_modifiers(mut self, modifiers: StatModSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn from_source(mut self, source: UnitId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration <= 0.0
    }

    pub fn is_expired(&self) -> bool {
        !self.is_permanent() && self.time_elapsed >= self.duration
    }

    /// Replicated slot, once registered
    pub fn slot(&self) -> u8 {
        self.slot
    }
}

impl StatSource for Buff {
    fn id(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> StatModSet {
        self.modifiers.clone()
    }
}

/// How an `add` was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffApplied {
    /// New entry; its modifiers must be applied to the holder
    Added { slot: u8 },
    /// Existing entry; its timer was restarted
    Refreshed { slot: u8 },
}

/// Per-unit buffs keyed by name, at most one per name
#[derive(Debug, Clone, Default)]
pub struct BuffRegistry {
    buffs: BTreeMap<String, Buff>,
    slots: BuffSlotTable,
    next_handle: u32,
}

impl BuffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a buff, or restart the timer of the one already holding its name
    pub fn add(&mut self, mut buff: Buff) -> Result<BuffApplied, BuffError> {
        if let Some(existing) = self.buffs.get_mut(&buff.name) {
            existing.time_elapsed = 0.0;
            return Ok(BuffApplied::Refreshed { slot: existing.slot });
        }

        let handle = BuffHandle(self.next_handle);
        let slot = self.slots.allocate(handle)?;
        self.next_handle += 1;

        buff.time_elapsed = 0.0;
        buff.handle = Some(handle);
        buff.slot = slot;
        self.buffs.insert(buff.name.clone(), buff);
        Ok(BuffApplied::Added { slot })
    }

    /// Remove a buff by name and free its slot
    pub fn remove(&mut self, name: &str) -> Option<Buff> {
        let buff = self.buffs.remove(name)?;
        if let Some(handle) = buff.handle {
            if let Err(err) = self.slots.release(handle) {
                tracing::warn!(buff = %buff.name, %err, "buff slot already free");
            }
        }
        Some(buff)
    }

    /// Advance every timer and remove the buffs that ran out
    pub fn tick(&mut self, delta_time: f64) -> Vec<Buff> {
        for buff in self.buffs.values_mut() {
            buff.time_elapsed += delta_time;
        }

        let expired: Vec<String> = self
            .buffs
            .values()
            .filter(|b| b.is_expired())
            .map(|b| b.name.clone())
            .collect();

        expired.iter().filter_map(|name| self.remove(name)).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Buff> {
        self.buffs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.buffs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    /// Copy of the current buffs for readers outside the tick
    pub fn snapshot(&self) -> Vec<Buff> {
        self.buffs.values().cloned().collect()
    }

    pub fn slots(&self) -> &BuffSlotTable {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readd_restarts_timer() {
        let mut registry = BuffRegistry::new();
        assert_eq!(registry.add(Buff::new("Haste", 5.0)).unwrap(), BuffApplied::Added { slot: 1 });

        registry.tick(2.0);
        assert!((registry.get("Haste").unwrap().time_elapsed - 2.0).abs() < f64::EPSILON);

        assert_eq!(
            registry.add(Buff::new("Haste", 5.0)).unwrap(),
            BuffApplied::Refreshed { slot: 1 }
        );
        assert_eq!(registry.len(), 1);
        assert!((registry.get("Haste").unwrap().time_elapsed - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tick_expires_and_frees_slot() {
        let mut registry = BuffRegistry::new();
        registry.add(Buff::new("Short", 1.0)).unwrap();
        registry.add(Buff::new("Aura", 0.0)).unwrap();

        let expired = registry.tick(1.0);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Short");
        assert!(registry.has("Aura"));
        assert_eq!(registry.slots().occupied(), 1);

        // Freed slot 1 is handed out again
        assert_eq!(registry.add(Buff::new("Next", 1.0)).unwrap(), BuffApplied::Added { slot: 1 });
    }

    #[test]
    fn test_remove_unknown() {
        let mut registry = BuffRegistry::new();
        assert!(registry.remove("Nothing").is_none());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = BuffRegistry::new();
        registry.add(Buff::new("Haste", 5.0)).unwrap();
        let snapshot = registry.snapshot();
        registry.remove("Haste");
        assert_eq!(snapshot.len(), 1);
        assert!(registry.is_empty());
    }
}
