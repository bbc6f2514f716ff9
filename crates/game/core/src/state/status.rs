//! Timed status effects attached to an entity.
//!
//! # Turn-based Duration
//!
//! Each effect stores the number of turns it has left. One [`StatusEffects::advance`]
//! call is one turn boundary: every effect loses one turn and reports its
//! consequence, and effects that reached zero are dropped in the same call.
//! An effect created with duration N therefore fires exactly N times.
//!
//! Effects stack freely: two Poisons tick independently, and Slow modifiers
//! multiply.

use super::common::SpeedModifier;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    /// Scales outgoing attack damage.
    Slow,
    /// Fire damage over time.
    Burn,
    /// HP loss over time.
    Poison,
    /// HP recovery over time.
    Regeneration,
}

/// A single active effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub speed_modifier: SpeedModifier,
    /// Turns remaining.
    pub duration: u32,
    pub damage_per_turn: i32,
    pub heal_per_turn: i32,
}

impl ActiveEffect {
    pub const fn slow(modifier: SpeedModifier, duration: u32) -> Self {
        Self {
            kind: EffectKind::Slow,
            speed_modifier: modifier,
            duration,
            damage_per_turn: 0,
            heal_per_turn: 0,
        }
    }

    pub const fn burn(damage_per_turn: i32, duration: u32) -> Self {
        Self::damage_over_time(EffectKind::Burn, damage_per_turn, duration)
    }

    pub const fn poison(damage_per_turn: i32, duration: u32) -> Self {
        Self::damage_over_time(EffectKind::Poison, damage_per_turn, duration)
    }

    pub const fn regeneration(heal_per_turn: i32, duration: u32) -> Self {
        Self {
            kind: EffectKind::Regeneration,
            speed_modifier: SpeedModifier::NORMAL,
            duration,
            damage_per_turn: 0,
            heal_per_turn: if heal_per_turn < 0 { 0 } else { heal_per_turn },
        }
    }

    const fn damage_over_time(kind: EffectKind, damage_per_turn: i32, duration: u32) -> Self {
        Self {
            kind,
            speed_modifier: SpeedModifier::NORMAL,
            duration,
            damage_per_turn: if damage_per_turn < 0 { 0 } else { damage_per_turn },
            heal_per_turn: 0,
        }
    }
}

/// Consequence of one effect for one turn, before it is applied to health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickConsequence {
    Damage(i32),
    Heal(i32),
    None,
}

/// What one effect did during one tick, after being applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTick {
    pub kind: EffectKind,
    /// Turns left after this tick.
    pub remaining: u32,
    /// Health actually lost.
    pub damage: i32,
    /// Health actually restored.
    pub healed: i32,
    /// True when the effect was removed by this tick.
    pub expired: bool,
}

/// Ordered set of active effects on one entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<ActiveEffect>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an effect. Zero-duration effects would never tick and are dropped.
    pub fn add(&mut self, effect: ActiveEffect) {
        if effect.duration > 0 {
            self.effects.push(effect);
        }
    }

    /// Product of all active Slow modifiers, recomputed on every call.
    pub fn speed_modifier(&self) -> SpeedModifier {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::Slow)
            .fold(SpeedModifier::NORMAL, |acc, e| acc.compose(e.speed_modifier))
    }

    /// Checks if at least one effect of the given kind is active.
    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Decrements every effect by one turn and returns each effect's consequence,
    /// in insertion order, along with the turns it has left.
    ///
    /// Expired effects stay in the set until [`Self::remove_expired`] so the
    /// caller can apply consequences first.
    pub fn advance(&mut self) -> Vec<(ActiveEffect, TickConsequence)> {
        self.effects
            .iter_mut()
            .map(|effect| {
                effect.duration = effect.duration.saturating_sub(1);
                let consequence = match effect.kind {
                    EffectKind::Burn | EffectKind::Poison => {
                        TickConsequence::Damage(effect.damage_per_turn)
                    }
                    EffectKind::Regeneration => TickConsequence::Heal(effect.heal_per_turn),
                    EffectKind::Slow => TickConsequence::None,
                };
                (*effect, consequence)
            })
            .collect()
    }

    /// Drops effects whose duration reached zero.
    pub fn remove_expired(&mut self) {
        self.effects.retain(|e| e.duration > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slow_70(duration: u32) -> ActiveEffect {
        ActiveEffect::slow(SpeedModifier::from_permille(700), duration)
    }

    #[test]
    fn slows_compose_multiplicatively() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.speed_modifier(), SpeedModifier::NORMAL);

        effects.add(slow_70(2));
        assert_eq!(effects.speed_modifier().permille(), 700);

        effects.add(slow_70(2));
        assert_eq!(effects.speed_modifier().permille(), 490);
        assert!((effects.speed_modifier().as_f32() - 0.49).abs() < 1e-6);
    }

    #[test]
    fn duration_decreases_by_one_per_advance() {
        let mut effects = StatusEffects::empty();
        effects.add(ActiveEffect::poison(5, 3));

        for expected in [2, 1, 0] {
            let ticks = effects.advance();
            assert_eq!(ticks.len(), 1);
            assert_eq!(ticks[0].0.duration, expected);
            assert_eq!(ticks[0].1, TickConsequence::Damage(5));
            effects.remove_expired();
        }
        assert!(effects.is_empty());
    }

    #[test]
    fn expired_slow_stops_affecting_speed_immediately() {
        let mut effects = StatusEffects::empty();
        effects.add(slow_70(1));
        assert_eq!(effects.speed_modifier().permille(), 700);

        effects.advance();
        effects.remove_expired();
        assert_eq!(effects.speed_modifier(), SpeedModifier::NORMAL);
    }

    #[test]
    fn same_kind_effects_are_not_merged() {
        let mut effects = StatusEffects::empty();
        effects.add(ActiveEffect::burn(5, 3));
        effects.add(ActiveEffect::burn(5, 1));
        assert_eq!(effects.len(), 2);

        effects.advance();
        effects.remove_expired();
        assert_eq!(effects.len(), 1);
        assert!(effects.has(EffectKind::Burn));
    }

    #[test]
    fn zero_duration_effects_are_ignored() {
        let mut effects = StatusEffects::empty();
        effects.add(ActiveEffect::regeneration(10, 0));
        assert!(effects.is_empty());
    }

    #[test]
    fn effect_kind_parses_case_insensitively() {
        assert_eq!("Regeneration".parse::<EffectKind>(), Ok(EffectKind::Regeneration));
        assert_eq!(EffectKind::Slow.to_string(), "slow");
    }
}
