//! World - Registry of units and projectiles, addressed by id
//!
//! Units and projectiles share one id space. Iteration is always in
//! ascending id order, which is also spawn order.

mod projectile;

pub use projectile::{Projectile, ProjectileTarget, SpellEffect, SpellFlags};

use crate::types::{Team, UnitId};
use crate::unit::Unit;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct World {
    units: BTreeMap<UnitId, Unit>,
    projectiles: BTreeMap<UnitId, Projectile>,
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        World {
            units: BTreeMap::new(),
            projectiles: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id
    pub fn next_net_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    // === Units ===

    /// Register a unit under its own id
    pub fn add_entity(&mut self, unit: Unit) -> UnitId {
        let id = unit.id;
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
        self.units.insert(id, unit);
        id
    }

    pub fn remove_entity(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Present and not dead
    pub fn is_alive(&self, id: UnitId) -> bool {
        self.units.get(&id).is_some_and(|u| !u.is_dead())
    }

    pub fn all_entities(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.keys().copied().collect()
    }

    pub fn champions_of_team(&self, team: Team) -> Vec<UnitId> {
        self.units
            .values()
            .filter(|u| u.team == team && u.kind.is_champion())
            .map(|u| u.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// A team sees its own units, and enemies within vision of a live ally
    pub fn team_has_vision(&self, team: Team, id: UnitId) -> bool {
        let Some(target) = self.units.get(&id) else {
            return false;
        };
        if target.team == team {
            return true;
        }
        self.units.values().any(|ally| {
            ally.team == team && !ally.is_dead() && ally.position.distance(target.position) <= ally.vision_radius
        })
    }

    // === Projectiles ===

    pub fn add_projectile(&mut self, projectile: Projectile) -> UnitId {
        let id = projectile.id;
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
        self.projectiles.insert(id, projectile);
        id
    }

    pub fn remove_projectile(&mut self, id: UnitId) -> Option<Projectile> {
        self.projectiles.remove(&id)
    }

    pub fn projectile(&self, id: UnitId) -> Option<&Projectile> {
        self.projectiles.get(&id)
    }

    pub fn projectile_mut(&mut self, id: UnitId) -> Option<&mut Projectile> {
        self.projectiles.get_mut(&id)
    }

    pub fn projectile_ids(&self) -> Vec<UnitId> {
        self.projectiles.keys().copied().collect()
    }

    pub fn projectile_count(&self) -> usize {
        self.projectiles.len()
    }

    /// Drop every unit flagged for removal, returning their ids
    pub fn purge_removed(&mut self) -> Vec<UnitId> {
        let removed: Vec<UnitId> = self
            .units
            .values()
            .filter(|u| u.to_remove)
            .map(|u| u.id)
            .collect();
        for id in &removed {
            self.units.remove(id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;
    use crate::unit::UnitKind;

    fn placeable(world: &mut World, team: Team, position: Vec2, vision: f64) -> UnitId {
        let id = world.next_net_id();
        let mut unit = Unit::placeable(id, team, "Ward", position, 5.0);
        unit.vision_radius = vision;
        world.add_entity(unit)
    }

    #[test]
    fn test_ids_ascend() {
        let mut world = World::new();
        let a = placeable(&mut world, Team::Blue, Vec2::ZERO, 0.0);
        let b = placeable(&mut world, Team::Blue, Vec2::ZERO, 0.0);
        assert!(a < b);
        let order: Vec<UnitId> = world.all_entities().map(|u| u.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_vision() {
        let mut world = World::new();
        let ward = placeable(&mut world, Team::Blue, Vec2::ZERO, 1000.0);
        let near = placeable(&mut world, Team::Purple, Vec2::new(900.0, 0.0), 0.0);
        let far = placeable(&mut world, Team::Purple, Vec2::new(1500.0, 0.0), 0.0);

        assert!(world.team_has_vision(Team::Purple, far));
        assert!(world.team_has_vision(Team::Blue, near));
        assert!(!world.team_has_vision(Team::Blue, far));

        world.unit_mut(ward).unwrap().mark_dead();
        assert!(!world.team_has_vision(Team::Blue, near));
    }

    #[test]
    fn test_purge_removed() {
        let mut world = World::new();
        let a = placeable(&mut world, Team::Blue, Vec2::ZERO, 0.0);
        let b = placeable(&mut world, Team::Blue, Vec2::ZERO, 0.0);
        world.unit_mut(a).unwrap().to_remove = true;
        assert_eq!(world.purge_removed(), vec![a]);
        assert!(world.unit(a).is_none());
        assert!(world.is_alive(b));
    }

    #[test]
    fn test_champions_of_team() {
        let mut world = World::new();
        let id = world.next_net_id();
        world.add_entity(Unit::new(
            id,
            Team::Blue,
            "Brawler",
            Vec2::ZERO,
            UnitKind::Champion(crate::unit::ChampionData::new(Default::default())),
        ));
        placeable(&mut world, Team::Blue, Vec2::ZERO, 0.0);
        assert_eq!(world.champions_of_team(Team::Blue), vec![id]);
        assert!(world.champions_of_team(Team::Purple).is_empty());
    }
}
