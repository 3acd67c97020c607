//! Arena constants configuration

use crate::unit::TurretType;
use serde::{Deserialize, Serialize};

/// Tunable simulation constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaConstants {
    #[serde(default)]
    pub ranges: RangeConstants,
    #[serde(default)]
    pub timers: TimerConstants,
    #[serde(default)]
    pub rewards: RewardConstants,
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub turrets: TurretProfiles,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConstants {
    /// Minion acquisition radius, also the champion attack-move radius floor
    #[serde(default = "default_detect_range")]
    pub detect_range: f64,
    /// Radius within which enemy champions share a kill's experience
    #[serde(default = "default_exp_range")]
    pub exp_range: f64,
}

impl Default for RangeConstants {
    fn default() -> Self {
        RangeConstants {
            detect_range: 475.0,
            exp_range: 1400.0,
        }
    }
}

fn default_detect_range() -> f64 {
    475.0
}
fn default_exp_range() -> f64 {
    1400.0
}

/// All values in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConstants {
    #[serde(default = "default_replication_interval")]
    pub replication_interval: f64,
    /// Period of the turret / minion target scan
    #[serde(default = "default_target_scan_interval")]
    pub target_scan_interval: f64,
    /// How long a champion hit keeps kill credit alive
    #[serde(default = "default_champion_hit_flag")]
    pub champion_hit_flag: f64,
    #[serde(default = "default_respawn_base")]
    pub respawn_base: f64,
    #[serde(default = "default_respawn_per_level")]
    pub respawn_per_level: f64,
    #[serde(default = "default_inhibitor_respawn")]
    pub inhibitor_respawn: f64,
    /// Remaining respawn time at which the inhibitor respawn is announced
    #[serde(default = "default_inhibitor_announce")]
    pub inhibitor_announce: f64,
}

impl Default for TimerConstants {
    fn default() -> Self {
        TimerConstants {
            replication_interval: 0.5,
            target_scan_interval: 0.25,
            champion_hit_flag: 15.0,
            respawn_base: 5.0,
            respawn_per_level: 2.5,
            inhibitor_respawn: 300.0,
            inhibitor_announce: 60.0,
        }
    }
}

fn default_replication_interval() -> f64 {
    0.5
}
fn default_target_scan_interval() -> f64 {
    0.25
}
fn default_champion_hit_flag() -> f64 {
    15.0
}
fn default_respawn_base() -> f64 {
    5.0
}
fn default_respawn_per_level() -> f64 {
    2.5
}
fn default_inhibitor_respawn() -> f64 {
    300.0
}
fn default_inhibitor_announce() -> f64 {
    60.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConstants {
    #[serde(default = "default_first_blood_bonus")]
    pub first_blood_bonus: f64,
    /// Fraction removed from champion kill gold while the reduction is active
    #[serde(default = "default_kill_gold_reduction")]
    pub kill_gold_reduction: f64,
    /// Minion gold a losing-streak champion must farm to shorten the streak
    #[serde(default = "default_minion_gold_streak_threshold")]
    pub minion_gold_streak_threshold: f64,
    /// Multiple of turret range counting as "near" a destroyed turret
    #[serde(default = "default_turret_proximity_factor")]
    pub turret_proximity_factor: f64,
    #[serde(default = "default_turret_proximity_gold_multiplier")]
    pub turret_proximity_gold_multiplier: f64,
    #[serde(default = "default_inhibitor_kill_gold")]
    pub inhibitor_kill_gold: f64,
}

impl Default for RewardConstants {
    fn default() -> Self {
        RewardConstants {
            first_blood_bonus: 100.0,
            kill_gold_reduction: 0.25,
            minion_gold_streak_threshold: 50.0,
            turret_proximity_factor: 1.5,
            turret_proximity_gold_multiplier: 2.5,
            inhibitor_kill_gold: 50.0,
        }
    }
}

fn default_first_blood_bonus() -> f64 {
    100.0
}
fn default_kill_gold_reduction() -> f64 {
    0.25
}
fn default_minion_gold_streak_threshold() -> f64 {
    50.0
}
fn default_turret_proximity_factor() -> f64 {
    1.5
}
fn default_turret_proximity_gold_multiplier() -> f64 {
    2.5
}
fn default_inhibitor_kill_gold() -> f64 {
    50.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Missile speed used when content has none
    #[serde(default = "default_projectile_speed")]
    pub default_projectile_speed: f64,
    /// Animation frames per second used to turn cast frames into seconds
    #[serde(default = "default_cast_frame_rate")]
    pub cast_frame_rate: f64,
    /// Units closer than `range - slack` to their target stop walking
    #[serde(default = "default_range_slack")]
    pub range_slack: f64,
    /// Minimum target drift before a chasing unit repaths
    #[serde(default = "default_repath_distance")]
    pub repath_distance: f64,
    #[serde(default = "default_projectile_radius")]
    pub projectile_radius: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            default_projectile_speed: 500.0,
            cast_frame_rate: 30.0,
            range_slack: 2.0,
            repath_distance: 25.0,
            projectile_radius: 10.0,
        }
    }
}

fn default_projectile_speed() -> f64 {
    500.0
}
fn default_cast_frame_rate() -> f64 {
    30.0
}
fn default_range_slack() -> f64 {
    2.0
}
fn default_repath_distance() -> f64 {
    25.0
}
fn default_projectile_radius() -> f64 {
    10.0
}

/// Stats and bounties of one lane turret type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretProfile {
    pub health: f64,
    pub attack_damage: f64,
    pub attack_range: f64,
    pub attack_speed: f64,
    #[serde(default)]
    pub armor: f64,
    #[serde(default)]
    pub magic_resist: f64,
    #[serde(default)]
    pub health_regeneration: f64,
    /// Percent armor penetration (as decimal)
    #[serde(default)]
    pub armor_penetration: f64,
    /// Gold paid to every champion of the destroying team
    #[serde(default = "default_global_gold")]
    pub global_gold: f64,
    #[serde(default)]
    pub global_exp: f64,
    /// Seconds of wind-up
    pub auto_attack_delay: f64,
    pub projectile_speed: f64,
    /// Extra base health per enemy champion in the match
    #[serde(default)]
    pub health_per_enemy_champion: f64,
    #[serde(default = "default_turret_vision")]
    pub vision_radius: f64,
}

fn default_global_gold() -> f64 {
    250.0
}
fn default_turret_vision() -> f64 {
    1200.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurretProfiles {
    #[serde(default = "outer_turret")]
    pub outer: TurretProfile,
    #[serde(default = "inner_turret")]
    pub inner: TurretProfile,
    #[serde(default = "inhibitor_turret")]
    pub inhibitor: TurretProfile,
    #[serde(default = "nexus_turret")]
    pub nexus: TurretProfile,
    #[serde(default = "fountain_turret")]
    pub fountain: TurretProfile,
}

impl Default for TurretProfiles {
    fn default() -> Self {
        TurretProfiles {
            outer: outer_turret(),
            inner: inner_turret(),
            inhibitor: inhibitor_turret(),
            nexus: nexus_turret(),
            fountain: fountain_turret(),
        }
    }
}

impl TurretProfiles {
    pub fn get(&self, turret_type: TurretType) -> &TurretProfile {
        match turret_type {
            TurretType::Outer => &self.outer,
            TurretType::Inner => &self.inner,
            TurretType::Inhibitor => &self.inhibitor,
            TurretType::Nexus => &self.nexus,
            TurretType::Fountain => &self.fountain,
        }
    }
}

const LANE_TURRET_DELAY: f64 = 4.95 / 30.0;

fn outer_turret() -> TurretProfile {
    TurretProfile {
        health: 1300.0,
        attack_damage: 152.0,
        attack_range: 905.0,
        attack_speed: 0.83,
        armor: 60.0,
        magic_resist: 100.0,
        health_regeneration: 0.0,
        armor_penetration: 0.0,
        global_gold: 125.0,
        global_exp: 0.0,
        auto_attack_delay: LANE_TURRET_DELAY,
        projectile_speed: 1200.0,
        health_per_enemy_champion: 250.0,
        vision_radius: 1200.0,
    }
}

fn inner_turret() -> TurretProfile {
    TurretProfile {
        health: 1300.0,
        attack_damage: 170.0,
        attack_range: 905.0,
        attack_speed: 0.625,
        armor: 60.0,
        magic_resist: 100.0,
        health_regeneration: 0.0,
        armor_penetration: 0.0,
        global_gold: 100.0,
        global_exp: 0.0,
        auto_attack_delay: LANE_TURRET_DELAY,
        projectile_speed: 1200.0,
        health_per_enemy_champion: 250.0,
        vision_radius: 1200.0,
    }
}

fn inhibitor_turret() -> TurretProfile {
    TurretProfile {
        health: 1300.0,
        attack_damage: 190.0,
        attack_range: 905.0,
        attack_speed: 0.83,
        armor: 67.0,
        magic_resist: 100.0,
        health_regeneration: 5.0,
        armor_penetration: 0.825,
        global_gold: 150.0,
        global_exp: 500.0,
        auto_attack_delay: LANE_TURRET_DELAY,
        projectile_speed: 1200.0,
        health_per_enemy_champion: 0.0,
        vision_radius: 1200.0,
    }
}

fn nexus_turret() -> TurretProfile {
    TurretProfile {
        health: 1300.0,
        attack_damage: 180.0,
        attack_range: 905.0,
        attack_speed: 0.83,
        armor: 65.0,
        magic_resist: 100.0,
        health_regeneration: 5.0,
        armor_penetration: 0.825,
        global_gold: 50.0,
        global_exp: 0.0,
        auto_attack_delay: LANE_TURRET_DELAY,
        projectile_speed: 1200.0,
        health_per_enemy_champion: 0.0,
        vision_radius: 1200.0,
    }
}

fn fountain_turret() -> TurretProfile {
    TurretProfile {
        health: 9999.0,
        attack_damage: 999.0,
        attack_range: 1250.0,
        attack_speed: 1.6,
        armor: 0.0,
        magic_resist: 0.0,
        health_regeneration: 0.0,
        armor_penetration: 0.0,
        global_gold: 250.0,
        global_exp: 0.0,
        auto_attack_delay: 1.0 / 30.0,
        projectile_speed: 2000.0,
        health_per_enemy_champion: 0.0,
        vision_radius: 1350.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = ArenaConstants::default();
        assert!((constants.ranges.detect_range - 475.0).abs() < f64::EPSILON);
        assert!((constants.ranges.exp_range - 1400.0).abs() < f64::EPSILON);
        assert!((constants.timers.replication_interval - 0.5).abs() < f64::EPSILON);
        assert!((constants.rewards.first_blood_bonus - 100.0).abs() < f64::EPSILON);
        assert!((constants.combat.default_projectile_speed - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_turret_bounties() {
        let turrets = TurretProfiles::default();
        assert!((turrets.get(TurretType::Outer).global_gold - 125.0).abs() < f64::EPSILON);
        assert!((turrets.get(TurretType::Inner).global_gold - 100.0).abs() < f64::EPSILON);
        assert!((turrets.get(TurretType::Inhibitor).global_gold - 150.0).abs() < f64::EPSILON);
        assert!((turrets.get(TurretType::Inhibitor).global_exp - 500.0).abs() < f64::EPSILON);
        assert!((turrets.get(TurretType::Nexus).global_gold - 50.0).abs() < f64::EPSILON);
        assert!((turrets.get(TurretType::Fountain).global_gold - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[ranges]
detect_range = 600

[timers]
target_scan_interval = 0.0

[turrets.outer]
health = 2000
attack_damage = 100
attack_range = 800
attack_speed = 1.0
auto_attack_delay = 0.2
projectile_speed = 1500
"#;

        let constants: ArenaConstants = toml::from_str(toml).unwrap();
        assert!((constants.ranges.detect_range - 600.0).abs() < f64::EPSILON);
        assert!((constants.ranges.exp_range - 1400.0).abs() < f64::EPSILON);
        assert!((constants.timers.target_scan_interval - 0.0).abs() < f64::EPSILON);
        assert!((constants.timers.respawn_base - 5.0).abs() < f64::EPSILON);
        assert!((constants.turrets.outer.health - 2000.0).abs() < f64::EPSILON);
        assert!((constants.turrets.outer.global_gold - 250.0).abs() < f64::EPSILON);
        assert!((constants.turrets.inner.global_gold - 100.0).abs() < f64::EPSILON);
    }
}
