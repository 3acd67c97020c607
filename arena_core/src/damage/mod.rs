//! Damage system - Damage descriptors and auto-attack damage calculation

mod calculation;
mod packet;

pub use calculation::{auto_attack_packet, roll_crit, FOUNTAIN_TURRET_DAMAGE};
pub use packet::{DamageKind, DamagePacket, DamageSource, DamageText};
