//! Projectiles - Auto-attack missiles and spell missiles in flight

use crate::damage::DamageKind;
use crate::types::{Team, UnitId, Vec2};
use crate::unit::{Unit, UnitKind};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

bitflags! {
    /// Which units a spell can affect
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SpellFlags: u32 {
        const AFFECT_ENEMIES = 1 << 0;
        const AFFECT_NEUTRAL = 1 << 1;
        const AFFECT_FRIENDS = 1 << 2;
        const AFFECT_MINIONS = 1 << 3;
        const AFFECT_TURRETS = 1 << 4;
        const AFFECT_BUILDINGS = 1 << 5;
        const AFFECT_HEROES = 1 << 6;
        const AFFECT_DEAD = 1 << 7;
        const AFFECT_UNTARGETABLE = 1 << 8;

        const AFFECT_ALL_SIDES = Self::AFFECT_ENEMIES.bits() | Self::AFFECT_NEUTRAL.bits() | Self::AFFECT_FRIENDS.bits();
        const AFFECT_ALL_UNITS = Self::AFFECT_MINIONS.bits() | Self::AFFECT_TURRETS.bits() | Self::AFFECT_BUILDINGS.bits() | Self::AFFECT_HEROES.bits();
    }
}

/// The spell a projectile carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub name: String,
    pub damage: f64,
    pub kind: DamageKind,
    pub flags: SpellFlags,
}

impl SpellEffect {
    /// Whether the spell, cast by a unit of `caster_team`, can affect `unit`
    pub fn can_affect(&self, caster_team: Team, unit: &Unit) -> bool {
        let relation = if unit.team == caster_team {
            SpellFlags::AFFECT_FRIENDS
        } else if unit.team == Team::Neutral {
            SpellFlags::AFFECT_NEUTRAL
        } else {
            SpellFlags::AFFECT_ENEMIES
        };
        if !self.flags.contains(relation) {
            return false;
        }

        let kind = match unit.kind {
            UnitKind::Minion(_) => SpellFlags::AFFECT_MINIONS,
            UnitKind::Turret(_) => SpellFlags::AFFECT_TURRETS,
            UnitKind::Inhibitor(_) | UnitKind::Nexus => SpellFlags::AFFECT_BUILDINGS,
            UnitKind::Champion(_) => SpellFlags::AFFECT_HEROES,
            UnitKind::Placeable => return false,
        };
        if !self.flags.contains(kind) {
            return false;
        }

        if unit.is_dead() && !self.flags.contains(SpellFlags::AFFECT_DEAD) {
            return false;
        }

        self.flags.contains(SpellFlags::AFFECT_UNTARGETABLE) || unit.is_targetable_to_team(caster_team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileTarget {
    Point(Vec2),
    Unit(UnitId),
}

impl ProjectileTarget {
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            ProjectileTarget::Unit(id) => Some(*id),
            ProjectileTarget::Point(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: UnitId,
    pub owner: UnitId,
    pub target: ProjectileTarget,
    pub position: Vec2,
    pub speed: f64,
    pub collision_radius: f64,
    /// Auto-attack missiles carry no spell
    pub spell: Option<SpellEffect>,
    /// Crit rolled when the attack started
    pub is_crit: bool,
    objects_hit: BTreeSet<UnitId>,
}

impl Projectile {
    pub fn new(id: UnitId, owner: UnitId, target: ProjectileTarget, position: Vec2, speed: f64, collision_radius: f64) -> Self {
        Projectile {
            id,
            owner,
            target,
            position,
            speed,
            collision_radius,
            spell: None,
            is_crit: false,
            objects_hit: BTreeSet::new(),
        }
    }

    pub fn with_spell(mut self, spell: SpellEffect) -> Self {
        self.spell = Some(spell);
        self
    }

    pub fn with_crit(mut self, is_crit: bool) -> Self {
        self.is_crit = is_crit;
        self
    }

    /// Record a hit; false if `unit` was already hit
    pub fn mark_hit(&mut self, unit: UnitId) -> bool {
        self.objects_hit.insert(unit)
    }

    pub fn has_hit(&self, unit: UnitId) -> bool {
        self.objects_hit.contains(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConstants;
    use crate::unit::MinionType;

    fn minion(team: Team) -> Unit {
        Unit::minion(UnitId(5), team, "Minion", MinionType::Melee, vec![], None, &ArenaConstants::default())
    }

    fn spell(flags: SpellFlags) -> SpellEffect {
        SpellEffect {
            name: "Bolt".to_string(),
            damage: 50.0,
            kind: DamageKind::Magical,
            flags,
        }
    }

    #[test]
    fn test_spell_filter_relation_and_kind() {
        let enemy_minions = spell(SpellFlags::AFFECT_ENEMIES | SpellFlags::AFFECT_MINIONS);
        assert!(enemy_minions.can_affect(Team::Blue, &minion(Team::Purple)));
        assert!(!enemy_minions.can_affect(Team::Blue, &minion(Team::Blue)));

        let enemy_heroes = spell(SpellFlags::AFFECT_ENEMIES | SpellFlags::AFFECT_HEROES);
        assert!(!enemy_heroes.can_affect(Team::Blue, &minion(Team::Purple)));
    }

    #[test]
    fn test_spell_filter_dead_and_untargetable() {
        let flags = SpellFlags::AFFECT_ENEMIES | SpellFlags::AFFECT_MINIONS;
        let mut target = minion(Team::Purple);
        target.mark_dead();
        assert!(!spell(flags).can_affect(Team::Blue, &target));
        assert!(spell(flags | SpellFlags::AFFECT_DEAD).can_affect(Team::Blue, &target));

        let mut hidden = minion(Team::Purple);
        hidden.set_targetable_to_team(Team::Blue, false);
        assert!(!spell(flags).can_affect(Team::Blue, &hidden));
        assert!(spell(flags | SpellFlags::AFFECT_UNTARGETABLE).can_affect(Team::Blue, &hidden));
    }

    #[test]
    fn test_objects_hit_once() {
        let mut p = Projectile::new(UnitId(10), UnitId(1), ProjectileTarget::Point(Vec2::ZERO), Vec2::ZERO, 500.0, 10.0);
        assert!(p.mark_hit(UnitId(3)));
        assert!(!p.mark_hit(UnitId(3)));
        assert!(p.has_hit(UnitId(3)));
    }
}
