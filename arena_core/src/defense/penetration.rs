//! Penetration - Attacker-side reduction of the victim's defense
//!
//! Percent penetration is taken first (only from positive defense), then
//! flat penetration. The result is floored at zero, so negative defense only
//! amplifies damage against victims that skip penetration.

use crate::stat_block::Stat;

/// Defense left after applying the attacker's penetration stat
///
/// The percent part is read from the `percent_bonus` channel and the flat part
/// from the `flat_bonus` channel of the penetration stat.
pub fn effective_defense(defense: f64, penetration: &Stat) -> f64 {
    let after_percent = if defense > 0.0 {
        defense - penetration.percent_bonus * defense
    } else {
        defense
    };
    (after_percent - penetration.flat_bonus).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_penetration() {
        let pen = Stat::new(0.0);
        assert!((effective_defense(80.0, &pen) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_then_flat() {
        let mut pen = Stat::new(0.0);
        pen.percent_bonus = 0.4;
        pen.flat_bonus = 10.0;
        // 100 - 40 = 60, then - 10
        assert!((effective_defense(100.0, &pen) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floored_at_zero() {
        let mut pen = Stat::new(0.0);
        pen.flat_bonus = 500.0;
        assert!((effective_defense(30.0, &pen) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_defense_floored() {
        let mut pen = Stat::new(0.0);
        pen.percent_bonus = 0.5;
        pen.flat_bonus = 20.0;
        assert!((effective_defense(-40.0, &pen) - 0.0).abs() < f64::EPSILON);

        let none = Stat::new(0.0);
        assert!((effective_defense(-100.0, &none) - 0.0).abs() < f64::EPSILON);
    }
}
