//! Map rules - Numeric inputs a map hands to the simulation

use crate::types::{Team, Vec2};
use crate::unit::Unit;

/// Rewards, progression curve and spawn points of a map
pub trait MapRules {
    /// Experience shared among enemy champions when `victim` dies
    fn experience_for(&self, victim: &Unit) -> f64;

    /// Gold paid to the killer of `victim`
    fn gold_for(&self, victim: &Unit) -> f64;

    /// `exp_to_level_up()[level]` is the total experience needed to leave `level`
    fn exp_to_level_up(&self) -> &[f64];

    fn respawn_position(&self, team: Team) -> Vec2;

    /// Game time at which champions start generating gold
    fn first_gold_time(&self) -> f64;

    fn gold_per_second(&self) -> f64;

    /// Whether champion kill gold is currently reduced
    fn kill_gold_reduction_active(&self, game_time: f64) -> bool;
}
