//! Field layouts per unit kind

use super::{ReplicatedField, ReplicationValue};
use crate::stat_block::StatBlock;
use crate::types::ActionState;
use crate::unit::{ChampionData, Unit, UnitKind};

struct FieldWriter {
    fields: Vec<ReplicatedField>,
}

impl FieldWriter {
    fn new() -> Self {
        FieldWriter { fields: Vec::new() }
    }

    fn float(&mut self, group: u8, index: u8, value: f64) -> &mut Self {
        self.fields
            .push(ReplicatedField::new(group, index, ReplicationValue::Float(value)));
        self
    }

    fn uint(&mut self, group: u8, index: u8, value: u32) -> &mut Self {
        self.fields
            .push(ReplicatedField::new(group, index, ReplicationValue::Uint(value)));
        self
    }

    fn flag(&mut self, group: u8, index: u8, value: bool) -> &mut Self {
        self.fields
            .push(ReplicatedField::new(group, index, ReplicationValue::Bool(value)));
        self
    }
}

fn action_state(unit: &Unit) -> ActionState {
    let mut state = ActionState::default();
    state.set(ActionState::CAN_ATTACK, !unit.crowd_control.blocks_attacks());
    state.set(ActionState::CAN_CAST, !unit.crowd_control.blocks_casting());
    state.set(ActionState::CAN_MOVE, !unit.crowd_control.blocks_movement());
    state
}

/// Immunity flags shared by every AI layout, starting at `index`
fn write_status(w: &mut FieldWriter, unit: &Unit, group: u8, index: u8) {
    w.uint(group, index, action_state(unit).bits())
        .flag(group, index + 1, unit.is_magic_immune)
        .flag(group, index + 2, unit.is_invulnerable)
        .flag(group, index + 3, unit.is_physical_immune)
        .flag(group, index + 4, unit.is_lifesteal_immune);
}

fn write_champion(w: &mut FieldWriter, unit: &Unit, champion: &ChampionData, stats: &StatBlock) {
    w.float(0, 0, champion.gold)
        .float(0, 1, champion.total_gold)
        .uint(0, 2, champion.spells_enabled)
        .uint(0, 3, champion.spells_enabled_upper)
        .uint(0, 4, champion.summoner_spells_enabled)
        .uint(0, 5, champion.summoner_spells_enabled_upper)
        .uint(0, 6, champion.evolve_points)
        .uint(0, 7, champion.evolve_flags);
    for (i, cost) in champion.mana_costs.base.iter().enumerate() {
        w.float(0, 8 + i as u8, *cost);
    }
    for (i, cost) in champion.mana_costs.extra.iter().enumerate() {
        w.float(0, 12 + i as u8, *cost);
    }

    write_status(w, unit, 1, 0);
    w.float(1, 5, stats.attack_damage.total_base())
        .float(1, 6, stats.ability_power.total_base())
        .float(1, 7, stats.dodge_chance.total())
        .float(1, 8, stats.critical_chance.total())
        .float(1, 9, stats.armor.total())
        .float(1, 10, stats.magic_resist.total())
        .float(1, 11, stats.health_regeneration.total())
        .float(1, 12, stats.mana_regeneration.total())
        .float(1, 13, stats.attack_range.total())
        .float(1, 14, stats.attack_damage.flat_bonus)
        .float(1, 15, stats.attack_damage.percent_bonus)
        .float(1, 16, stats.ability_power.flat_bonus)
        .float(1, 17, stats.magic_resist.flat_bonus)
        .float(1, 18, stats.magic_resist.percent_bonus)
        .float(1, 19, stats.attack_speed.percent_bonus)
        .float(1, 20, stats.attack_range.flat_bonus)
        .float(1, 21, stats.cooldown_reduction.total())
        .float(1, 22, 0.0)
        .float(1, 23, 0.0)
        .float(1, 24, stats.armor_penetration.flat_bonus)
        .float(1, 25, stats.armor_penetration.percent_base_bonus)
        .float(1, 26, stats.magic_penetration.flat_bonus)
        .float(1, 27, stats.magic_penetration.percent_base_bonus)
        .float(1, 28, stats.life_steal.percent_bonus)
        .float(1, 29, stats.spell_vamp.percent_bonus)
        .float(1, 30, stats.tenacity.percent_bonus);

    w.float(2, 0, stats.armor_penetration.percent_bonus)
        .float(2, 1, stats.magic_penetration.percent_bonus)
        .float(2, 2, stats.health_regeneration.total_base())
        .float(2, 3, stats.mana_regeneration.total_base());

    w.float(3, 0, unit.health.current)
        .float(3, 1, unit.mana.current)
        .float(3, 2, unit.health.max())
        .float(3, 3, unit.mana.max())
        .float(3, 4, champion.experience)
        .float(3, 5, 0.0)
        .float(3, 6, 0.0)
        .float(3, 7, 0.0)
        .float(3, 8, stats.vision_range.flat_bonus)
        .float(3, 9, stats.vision_range.percent_bonus)
        .float(3, 10, stats.movement_speed.total())
        .float(3, 11, stats.size.total())
        .float(3, 12, stats.pathfinding_radius.flat_bonus)
        .uint(3, 13, champion.level)
        .uint(3, 14, 0)
        .flag(3, 15, unit.targetable)
        .uint(3, 16, unit.targetable_flags().bits());
}

fn write_minion(w: &mut FieldWriter, unit: &Unit, stats: &StatBlock) {
    w.float(1, 0, unit.health.current)
        .float(1, 1, unit.health.max())
        .float(1, 2, 0.0)
        .float(1, 3, 0.0)
        .float(1, 4, 0.0)
        .float(1, 5, unit.mana.max())
        .float(1, 6, unit.mana.current);
    write_status(w, unit, 1, 7);
    w.float(1, 12, stats.attack_damage.total_base())
        .float(1, 13, stats.armor.total())
        .float(1, 14, stats.magic_resist.total())
        .float(1, 15, stats.attack_speed.percent_bonus)
        .float(1, 16, stats.attack_damage.flat_bonus)
        .float(1, 17, stats.attack_damage.percent_bonus)
        .float(1, 18, stats.ability_power.flat_bonus)
        .float(1, 19, stats.health_regeneration.total())
        .float(1, 20, stats.mana_regeneration.total())
        .float(1, 21, stats.mana_regeneration.total())
        .float(1, 22, stats.magic_penetration.flat_bonus)
        .float(1, 23, stats.magic_penetration.percent_bonus);

    w.float(3, 0, stats.vision_range.flat_bonus)
        .float(3, 1, stats.vision_range.percent_bonus)
        .float(3, 2, stats.movement_speed.total())
        .float(3, 3, stats.size.total())
        .flag(3, 4, unit.targetable)
        .uint(3, 5, unit.targetable_flags().bits());
}

fn write_turret(w: &mut FieldWriter, unit: &Unit, stats: &StatBlock) {
    w.float(1, 0, unit.mana.max()).float(1, 1, unit.mana.current);
    write_status(w, unit, 1, 2);
    w.float(1, 7, stats.attack_damage.total_base())
        .float(1, 9, stats.armor.total())
        .float(1, 10, stats.magic_resist.total())
        .float(1, 11, stats.attack_speed.percent_bonus)
        .float(1, 12, stats.attack_damage.flat_bonus)
        .float(1, 13, stats.attack_damage.percent_bonus)
        .float(1, 14, stats.ability_power.flat_bonus)
        .float(1, 15, stats.health_regeneration.total());

    w.float(4, 0, unit.health.current)
        .float(4, 1, unit.health.max())
        .float(4, 2, stats.vision_range.flat_bonus)
        .float(4, 3, stats.vision_range.percent_bonus)
        .float(4, 4, stats.movement_speed.total())
        .float(4, 5, stats.size.total());

    w.flag(5, 0, unit.targetable)
        .uint(5, 1, unit.targetable_flags().bits());
}

fn write_building(w: &mut FieldWriter, unit: &Unit) {
    w.float(1, 0, unit.health.current)
        .flag(1, 1, unit.is_invulnerable)
        .flag(5, 0, unit.targetable)
        .uint(5, 1, unit.targetable_flags().bits());
}

/// Every replicated field of `unit`, in layout order
///
/// The `(group, index)` of a field never changes over a unit's lifetime.
/// Placeables replicate nothing.
pub fn export_fields(unit: &Unit) -> Vec<ReplicatedField> {
    let mut w = FieldWriter::new();
    match (&unit.kind, unit.stats()) {
        (UnitKind::Champion(champion), Some(stats)) => write_champion(&mut w, unit, champion, stats),
        (UnitKind::Minion(_), Some(stats)) => write_minion(&mut w, unit, stats),
        (UnitKind::Turret(_), Some(stats)) => write_turret(&mut w, unit, stats),
        (UnitKind::Inhibitor(_) | UnitKind::Nexus, _) => write_building(&mut w, unit),
        _ => {}
    }
    w.fields
}
