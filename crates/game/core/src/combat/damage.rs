//! Damage calculation.

use crate::state::SpeedModifier;

/// Reduces raw damage by the defender's defense.
///
/// # Formula
///
/// ```text
/// dealt = max(raw - defense, 0)
/// ```
///
/// Negative raw damage or defense are treated as zero.
pub fn mitigate(raw: i32, defense: i32) -> i32 {
    raw.max(0).saturating_sub(defense.max(0)).max(0)
}

/// Scales attack power by the attacker's current speed factor.
///
/// # Formula
///
/// ```text
/// raw = floor(attack_power × speed)
/// ```
pub fn scaled_attack(attack_power: i32, speed: SpeedModifier) -> i32 {
    speed.scale(attack_power)
}
