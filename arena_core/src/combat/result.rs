//! DamageOutcome - What a single damage resolution did

use crate::damage::DamageText;
use serde::{Deserialize, Serialize};

/// Result of resolving one hit against a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    // === Damage Breakdown ===
    pub raw_damage: f64,
    /// Damage removed by armor / magic resist (negative when amplified)
    pub mitigated: f64,
    pub final_damage: f64,
    pub text: DamageText,

    // === State Changes ===
    pub health_before: f64,
    pub health_after: f64,
    /// Health returned to the attacker through lifesteal or spellvamp
    pub healed_attacker: f64,

    // === Flags ===
    pub is_killing_blow: bool,
}

impl DamageOutcome {
    /// Outcome of a hit that never reached the victim
    pub fn dropped(raw_damage: f64, text: DamageText) -> Self {
        DamageOutcome {
            raw_damage,
            mitigated: 0.0,
            final_damage: 0.0,
            text,
            health_before: 0.0,
            health_after: 0.0,
            healed_attacker: 0.0,
            is_killing_blow: false,
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{:.0} damage", self.final_damage)];

        if self.mitigated > 0.0 {
            parts.push(format!("{:.0} mitigated", self.mitigated));
        } else if self.mitigated < 0.0 {
            parts.push(format!("{:.0} amplified", -self.mitigated));
        }

        if self.healed_attacker > 0.0 {
            parts.push(format!("{:.0} healed", self.healed_attacker));
        }

        match self.text {
            DamageText::Crit => parts.push("CRIT".to_string()),
            DamageText::Miss => parts.push("MISS".to_string()),
            DamageText::Invulnerable => parts.push("INVULNERABLE".to_string()),
            DamageText::Normal => {}
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}
