//! Combat system - Targeting, auto-attacks, damage resolution and death
//!
//! Every function here works on the [`World`](crate::world::World) by id and
//! reaches its collaborators through a [`CombatContext`].

pub mod auto_attack;
pub mod death;
pub mod projectile;
pub mod resolution;
mod result;
pub mod targeting;
#[cfg(test)]
mod testing;

pub use auto_attack::{auto_attack_hit, refresh_waypoints, update_auto_attack};
pub use death::{die, tick_champion_timers, tick_inhibitor};
pub use projectile::update_projectile;
pub use resolution::resolve_damage;
pub use result::DamageOutcome;
pub use targeting::{classify, set_target_unit, ClassifyUnit};

use crate::config::ArenaConstants;
use crate::hooks::ScriptHooks;
use crate::notify::{Notification, NotificationSink};
use crate::rules::MapRules;
use crate::types::Team;
use rand::RngCore;

/// Match-wide flags touched by deaths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchState {
    pub first_blood: bool,
    pub game_over: bool,
    /// Team whose nexus fell
    pub losing_team: Option<Team>,
}

/// Everything combat code needs besides the world itself
pub struct CombatContext<'a> {
    pub constants: &'a ArenaConstants,
    pub rules: &'a dyn MapRules,
    pub sink: &'a mut dyn NotificationSink,
    pub hooks: &'a mut dyn ScriptHooks,
    pub rng: &'a mut dyn RngCore,
    pub match_state: &'a mut MatchState,
    /// Seconds since the match started
    pub game_time: f64,
}

impl CombatContext<'_> {
    pub fn notify(&mut self, notification: Notification) {
        self.sink.notify(notification);
    }
}
