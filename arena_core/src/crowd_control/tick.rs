//! Crowd-control expiry processing

use super::{CrowdControl, CrowdControlKind};

/// Result of one crowd-control tick
#[derive(Debug, Clone, Default)]
pub struct CrowdControlTickResult {
    /// Kinds whose instances ran out this tick
    pub expired: Vec<CrowdControlKind>,
}

/// Count every instance down by `delta_time` and drop the ones that ran out
pub fn process_crowd_control_tick(instances: &mut Vec<CrowdControl>, delta_time: f64) -> CrowdControlTickResult {
    for cc in instances.iter_mut() {
        cc.remaining -= delta_time;
    }

    let expired = instances
        .iter()
        .filter(|cc| !cc.is_active())
        .map(|cc| cc.kind)
        .collect();

    instances.retain(CrowdControl::is_active);

    CrowdControlTickResult { expired }
}
