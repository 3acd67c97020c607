//! Buff-script controllers - Script lifecycles bound to a buff

use crate::hooks::{BuffScriptId, ScriptHooks};
use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// A running buff script on a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffController {
    pub script: BuffScriptId,
    /// Spell cast that created this buff, if any
    pub owner_spell: Option<String>,
    /// Seconds until automatic deactivation; negative means never
    pub remove_after: f64,
    pub elapsed: f64,
    needs_removed: bool,
}

impl BuffController {
    pub fn new(script: BuffScriptId, owner_spell: Option<String>, remove_after: f64) -> Self {
        BuffController {
            script,
            owner_spell,
            remove_after,
            elapsed: 0.0,
            needs_removed: false,
        }
    }

    pub fn activate(&mut self, unit: UnitId, hooks: &mut dyn ScriptHooks) {
        hooks.activate_buff_script(unit, &self.script);
    }

    pub fn deactivate(&mut self, unit: UnitId, hooks: &mut dyn ScriptHooks) {
        if self.needs_removed {
            return;
        }
        hooks.deactivate_buff_script(unit, &self.script);
        self.needs_removed = true;
    }

    pub fn needs_removed(&self) -> bool {
        self.needs_removed
    }

    fn update(&mut self, unit: UnitId, delta_time: f64, hooks: &mut dyn ScriptHooks) {
        self.elapsed += delta_time;
        if self.remove_after >= 0.0 && self.elapsed >= self.remove_after {
            self.deactivate(unit, hooks);
        }
    }
}

/// All buff scripts attached to one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffScripts {
    controllers: Vec<BuffController>,
}

impl BuffScripts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach and activate a script
    ///
    /// With `unique`, any existing controller for the same script is deactivated
    /// and dropped first.
    pub fn add(
        &mut self,
        unit: UnitId,
        mut controller: BuffController,
        unique: bool,
        hooks: &mut dyn ScriptHooks,
    ) {
        if unique {
            self.remove(unit, &controller.script, hooks);
        }
        controller.activate(unit, hooks);
        self.controllers.push(controller);
    }

    /// Deactivate and drop every controller for `script`
    pub fn remove(&mut self, unit: UnitId, script: &BuffScriptId, hooks: &mut dyn ScriptHooks) {
        for controller in self.controllers.iter_mut().filter(|c| &c.script == script) {
            controller.deactivate(unit, hooks);
        }
        self.controllers.retain(|c| !c.needs_removed());
    }

    pub fn is_active(&self, script: &BuffScriptId) -> bool {
        self.controllers
            .iter()
            .any(|c| &c.script == script && !c.needs_removed())
    }

    /// Advance timers, deactivate expired scripts and purge them
    pub fn update(&mut self, unit: UnitId, delta_time: f64, hooks: &mut dyn ScriptHooks) {
        for controller in self.controllers.iter_mut() {
            controller.update(unit, delta_time, hooks);
        }
        self.controllers.retain(|c| !c.needs_removed());
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
