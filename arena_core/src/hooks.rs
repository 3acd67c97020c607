//! Script hooks - Opaque extension points invoked by the simulation
//!
//! The simulation never knows whether a script exists for a unit; it just
//! calls the hook and carries on. Every method defaults to a no-op.

use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Passive extension points on a unit's model script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveHook {
    OnUpdate,
    OnCollide,
    OnDie,
    OnAutoAttack,
    OnDamageTaken,
}

/// Arguments handed to a passive hook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HookArgs {
    None,
    /// Seconds since the previous tick
    Delta(f64),
    /// The other unit involved (target, collider, killer, attacker)
    Unit(UnitId),
}

/// Identifies a buff script by namespace and class
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuffScriptId {
    pub namespace: String,
    pub class: String,
}

impl BuffScriptId {
    pub fn new(namespace: impl Into<String>, class: impl Into<String>) -> Self {
        BuffScriptId {
            namespace: namespace.into(),
            class: class.into(),
        }
    }
}

/// Dispatcher for unit scripts
pub trait ScriptHooks {
    fn invoke_passive_hook(&mut self, _unit: UnitId, _model: &str, _hook: PassiveHook, _args: HookArgs) {}

    fn activate_buff_script(&mut self, _unit: UnitId, _script: &BuffScriptId) {}

    fn deactivate_buff_script(&mut self, _unit: UnitId, _script: &BuffScriptId) {}
}

/// No scripts registered at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScripts;

impl ScriptHooks for NoScripts {}

/// One recorded dispatcher call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HookCall {
    Passive {
        unit: UnitId,
        model: String,
        hook: PassiveHook,
        args: HookArgs,
    },
    Activate {
        unit: UnitId,
        script: BuffScriptId,
    },
    Deactivate {
        unit: UnitId,
        script: BuffScriptId,
    },
}

/// Dispatcher that records every call, optionally skipping `OnUpdate` noise
#[derive(Debug, Clone, Default)]
pub struct HookLog {
    pub calls: Vec<HookCall>,
    pub record_updates: bool,
}

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count passive calls of one kind
    pub fn count(&self, hook: PassiveHook) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HookCall::Passive { hook: h, .. } if *h == hook))
            .count()
    }
}

impl ScriptHooks for HookLog {
    fn invoke_passive_hook(&mut self, unit: UnitId, model: &str, hook: PassiveHook, args: HookArgs) {
        if hook == PassiveHook::OnUpdate && !self.record_updates {
            return;
        }
        self.calls.push(HookCall::Passive {
            unit,
            model: model.to_string(),
            hook,
            args,
        });
    }

    fn activate_buff_script(&mut self, unit: UnitId, script: &BuffScriptId) {
        self.calls.push(HookCall::Activate {
            unit,
            script: script.clone(),
        });
    }

    fn deactivate_buff_script(&mut self, unit: UnitId, script: &BuffScriptId) {
        self.calls.push(HookCall::Deactivate {
            unit,
            script: script.clone(),
        });
    }
}
