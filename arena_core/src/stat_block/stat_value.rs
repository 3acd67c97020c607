//! Stat - The staged modifier pipeline (BaseBonus → PercentBaseBonus → FlatBonus → PercentBonus)

use serde::{Deserialize, Serialize};

/// A bundle of the four modifier channels
///
/// Modifiers are plain values: sources keep the exact `StatMod` they applied
/// and hand the same value back to remove it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatMod {
    /// Flat bonus added to the base before any percentage
    #[serde(default)]
    pub base_bonus: f64,
    /// Percentage of the flat-adjusted base (as decimal)
    #[serde(default)]
    pub percent_base_bonus: f64,
    /// Flat bonus added after the base percentage
    #[serde(default)]
    pub flat_bonus: f64,
    /// Final percentage (as decimal), applied last
    #[serde(default)]
    pub percent_bonus: f64,
}

impl StatMod {
    pub fn new(base_bonus: f64, percent_base_bonus: f64, flat_bonus: f64, percent_bonus: f64) -> Self {
        StatMod {
            base_bonus,
            percent_base_bonus,
            flat_bonus,
            percent_bonus,
        }
    }

    /// Modifier touching only the post-base flat channel
    pub fn flat(value: f64) -> Self {
        StatMod {
            flat_bonus: value,
            ..Default::default()
        }
    }

    /// Modifier touching only the final percent channel
    pub fn percent(value: f64) -> Self {
        StatMod {
            percent_bonus: value,
            ..Default::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.base_bonus == 0.0
            && self.percent_base_bonus == 0.0
            && self.flat_bonus == 0.0
            && self.percent_bonus == 0.0
    }
}

/// A named attribute with an immutable base and four accumulated modifier channels
///
/// Total is computed in four stages, each depending on the previous:
/// 1. `s1 = base_value + base_bonus`
/// 2. `s2 = s1 × (1 + percent_base_bonus)`
/// 3. `s3 = s2 + flat_bonus`
/// 4. `s4 = s3 × (1 + percent_bonus)`
///
/// and then clamped to `[min_limit, max_limit]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    base_value: f64,
    #[serde(default = "default_min_limit")]
    pub min_limit: f64,
    #[serde(default = "default_max_limit")]
    pub max_limit: f64,
    #[serde(default)]
    pub base_bonus: f64,
    #[serde(default)]
    pub percent_base_bonus: f64,
    #[serde(default)]
    pub flat_bonus: f64,
    #[serde(default)]
    pub percent_bonus: f64,
}

fn default_min_limit() -> f64 {
    f64::NEG_INFINITY
}
fn default_max_limit() -> f64 {
    f64::INFINITY
}

impl Default for Stat {
    fn default() -> Self {
        Stat::new(0.0)
    }
}

impl Stat {
    /// Unbounded stat
    pub fn new(base_value: f64) -> Self {
        Stat::bounded(base_value, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Stat with a lower bound only
    pub fn with_min(base_value: f64, min_limit: f64) -> Self {
        Stat::bounded(base_value, min_limit, f64::INFINITY)
    }

    pub fn bounded(base_value: f64, min_limit: f64, max_limit: f64) -> Self {
        Stat {
            base_value,
            min_limit,
            max_limit,
            base_bonus: 0.0,
            percent_base_bonus: 0.0,
            flat_bonus: 0.0,
            percent_bonus: 0.0,
        }
    }

    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    /// Add every channel of `modifier`
    pub fn apply_modifier(&mut self, modifier: &StatMod) {
        self.base_bonus += modifier.base_bonus;
        self.percent_base_bonus += modifier.percent_base_bonus;
        self.flat_bonus += modifier.flat_bonus;
        self.percent_bonus += modifier.percent_bonus;
    }

    /// Subtract every channel of a previously applied `modifier`
    pub fn remove_modifier(&mut self, modifier: &StatMod) {
        self.base_bonus -= modifier.base_bonus;
        self.percent_base_bonus -= modifier.percent_base_bonus;
        self.flat_bonus -= modifier.flat_bonus;
        self.percent_bonus -= modifier.percent_bonus;
    }

    /// Current channel values
    pub fn modifier(&self) -> StatMod {
        StatMod::new(
            self.base_bonus,
            self.percent_base_bonus,
            self.flat_bonus,
            self.percent_bonus,
        )
    }

    /// Base plus the pre-percent flat channel
    pub fn total_base(&self) -> f64 {
        self.base_value + self.base_bonus
    }

    /// Final clamped value
    pub fn total(&self) -> f64 {
        let s1 = self.total_base();
        let s2 = s1 * (1.0 + self.percent_base_bonus);
        let s3 = s2 + self.flat_bonus;
        let s4 = s3 * (1.0 + self.percent_bonus);

        if s4 < self.min_limit {
            return self.min_limit;
        }
        s4.min(self.max_limit)
    }

    /// Reset all channels, keeping base and bounds
    pub fn reset_to_base(&mut self) {
        self.base_bonus = 0.0;
        self.percent_base_bonus = 0.0;
        self.flat_bonus = 0.0;
        self.percent_bonus = 0.0;
    }
}
