//! Damage calculation - turning an attacker's stats into an auto-attack packet

use super::{DamageKind, DamagePacket, DamageSource, DamageText};
use crate::stat_block::StatBlock;
use crate::types::UnitId;
use rand::Rng;

/// Flat true damage dealt by the fountain turret's attacks
pub const FOUNTAIN_TURRET_DAMAGE: f64 = 1000.0;

/// Roll a crit against the attacker's critical chance
pub fn roll_crit<R: Rng + ?Sized>(stats: &StatBlock, rng: &mut R) -> bool {
    rng.gen::<f64>() < stats.critical_chance.total()
}

/// Build the packet for a landed auto-attack
///
/// Blind attackers miss for zero. Crits multiply attack damage by critical damage.
pub fn auto_attack_packet(
    attacker_id: UnitId,
    attacker: &StatBlock,
    victim: UnitId,
    is_crit: bool,
    is_blind: bool,
) -> DamagePacket {
    if is_blind {
        return DamagePacket::new(attacker_id, victim, 0.0, DamageKind::Physical, DamageSource::Attack)
            .with_text(DamageText::Miss);
    }

    let mut damage = attacker.attack_damage.total();
    let text = if is_crit {
        damage *= attacker.critical_damage.total();
        DamageText::Crit
    } else {
        DamageText::Normal
    };

    DamagePacket::new(attacker_id, victim, damage, DamageKind::Physical, DamageSource::Attack).with_text(text)
}
