//! Basic attack resolution.

use crate::state::{SpeedModifier, StatEntity};

use super::damage::scaled_attack;

/// Result of one basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// Damage before the defender's defense.
    pub raw: i32,
    /// Health the defender actually lost.
    pub dealt: i32,
    /// Speed factor the attacker swung with.
    pub speed: SpeedModifier,
    /// True when this attack took the defender from alive to dead.
    pub lethal: bool,
}

/// Resolves a physical strike of `attack_power` at `speed` against `defender`.
///
/// A defender that is already down is left untouched and the result is not
/// lethal.
pub fn resolve_attack(
    attack_power: i32,
    speed: SpeedModifier,
    defender: &mut StatEntity,
) -> AttackResult {
    let raw = scaled_attack(attack_power, speed);
    let was_alive = defender.is_alive();
    let dealt = if was_alive { defender.take_damage(raw) } else { 0 };

    AttackResult {
        raw,
        dealt,
        speed,
        lethal: was_alive && !defender.is_alive(),
    }
}
