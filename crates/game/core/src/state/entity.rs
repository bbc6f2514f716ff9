//! Base record for anything that can be targeted.
//!
//! All operations are total: amounts saturate at the documented bounds and
//! negative inputs degrade to no-ops (except [`StatEntity::reduce_mana`],
//! whose negative form restores mana for compatibility).

use super::common::SpeedModifier;
use super::status::{ActiveEffect, EffectTick, StatusEffects, TickConsequence};
use crate::config::BattleConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatEntity {
    name: String,
    health: i32,
    mana: i32,
    defense: i32,
    effects: StatusEffects,
}

impl StatEntity {
    pub const MAX_HEALTH: i32 = BattleConfig::MAX_HEALTH;
    pub const MAX_MANA: i32 = BattleConfig::MAX_MANA;

    /// Creates an entity with health and mana clamped into bounds.
    pub fn new(name: impl Into<String>, health: i32, mana: i32) -> Self {
        Self {
            name: name.into(),
            health: health.clamp(0, Self::MAX_HEALTH),
            mana: mana.clamp(0, Self::MAX_MANA),
            defense: 0,
            effects: StatusEffects::empty(),
        }
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.set_defense(defense);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies direct damage mitigated by defense. Returns the health lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            return 0;
        }
        let mitigated = crate::combat::mitigate(amount, self.defense);
        self.lose_health(mitigated)
    }

    /// Applies damage that ignores defense (damage-over-time ticks).
    pub fn take_periodic_damage(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            return 0;
        }
        self.lose_health(amount)
    }

    fn lose_health(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health - amount).max(0);
        before - self.health
    }

    /// Restores health up to the maximum. Returns the health gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(Self::MAX_HEALTH);
        self.health - before
    }

    /// Alias of [`Self::heal`] used by consumables.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        self.heal(amount)
    }

    /// `mana = clamp(mana - amount, 0, MAX_MANA)`.
    ///
    /// A negative amount restores mana. New callers should use
    /// [`Self::increase_mana`] instead.
    pub fn reduce_mana(&mut self, amount: i32) {
        self.mana = self.mana.saturating_sub(amount).clamp(0, Self::MAX_MANA);
    }

    /// Restores mana up to the maximum; negative amounts are ignored.
    pub fn increase_mana(&mut self, amount: i32) -> i32 {
        if amount < 0 {
            return 0;
        }
        let before = self.mana;
        self.mana = self.mana.saturating_add(amount).min(Self::MAX_MANA);
        self.mana - before
    }

    pub fn set_defense(&mut self, value: i32) {
        self.defense = value.max(0);
    }

    /// Attaches a timed effect to this entity.
    pub fn apply_effect(&mut self, effect: ActiveEffect) {
        self.effects.add(effect);
    }

    /// Current multiplicative speed factor from active Slow effects.
    pub fn speed_modifier(&self) -> SpeedModifier {
        self.effects.speed_modifier()
    }

    /// Advances every effect by one turn and applies its consequence.
    ///
    /// Periodic damage bypasses defense. Regeneration does not revive an
    /// entity that died earlier in the same tick.
    pub fn tick_effects(&mut self) -> Vec<EffectTick> {
        let advanced = self.effects.advance();
        let mut ticks = Vec::with_capacity(advanced.len());

        for (effect, consequence) in advanced {
            let (damage, healed) = match consequence {
                TickConsequence::Damage(amount) => (self.take_periodic_damage(amount), 0),
                TickConsequence::Heal(amount) if self.is_alive() => (0, self.heal(amount)),
                TickConsequence::Heal(_) | TickConsequence::None => (0, 0),
            };
            ticks.push(EffectTick {
                kind: effect.kind,
                remaining: effect.duration,
                damage,
                healed,
                expired: effect.duration == 0,
            });
        }

        self.effects.remove_expired();
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::status::EffectKind;

    #[test]
    fn health_and_mana_management() {
        let mut hero = StatEntity::new("Hero", 100, 50);
        assert_eq!(hero.health(), 100);
        assert_eq!(hero.mana(), 50);

        hero.take_damage(30);
        assert_eq!(hero.health(), 70);

        hero.heal(20);
        assert_eq!(hero.health(), 90);

        hero.reduce_mana(40);
        assert_eq!(hero.mana(), 10);

        hero.heal(50);
        assert_eq!(hero.health(), 100);

        hero.reduce_mana(20);
        assert_eq!(hero.mana(), 0);
    }

    #[test]
    fn construction_clamps_to_bounds() {
        let entity = StatEntity::new("Giant", 250, -5);
        assert_eq!(entity.health(), StatEntity::MAX_HEALTH);
        assert_eq!(entity.mana(), 0);
    }

    #[test]
    fn defense_mitigates_direct_damage() {
        let mut knight = StatEntity::new("Knight", 100, 0).with_defense(5);
        assert_eq!(knight.take_damage(20), 15);
        assert_eq!(knight.take_damage(3), 0);
        assert_eq!(knight.health(), 85);
    }

    #[test]
    fn damage_never_goes_below_zero() {
        let mut slime = StatEntity::new("Slime", 10, 0);
        assert_eq!(slime.take_damage(50), 10);
        assert_eq!(slime.health(), 0);
        assert!(!slime.is_alive());
    }

    #[test]
    fn negative_inputs_are_no_ops() {
        let mut entity = StatEntity::new("Hero", 50, 50);
        assert_eq!(entity.take_damage(-10), 0);
        assert_eq!(entity.heal(-10), 0);
        assert_eq!(entity.increase_mana(-10), 0);
        assert_eq!(entity.health(), 50);
        assert_eq!(entity.mana(), 50);
    }

    #[test]
    fn negative_reduce_mana_restores() {
        let mut entity = StatEntity::new("Hero", 50, 90);
        entity.reduce_mana(-30);
        assert_eq!(entity.mana(), StatEntity::MAX_MANA);
    }

    #[test]
    fn heal_and_mana_are_idempotent_at_the_ceiling() {
        let mut entity = StatEntity::new("Hero", 100, 100);
        assert_eq!(entity.heal(i32::MAX), 0);
        assert_eq!(entity.increase_mana(i32::MAX), 0);
        assert_eq!(entity.health(), 100);
        assert_eq!(entity.mana(), 100);
    }

    #[test]
    fn set_defense_clamps_to_zero() {
        let mut entity = StatEntity::new("Hero", 100, 0);
        entity.set_defense(-4);
        assert_eq!(entity.defense(), 0);
    }

    #[test]
    fn poison_runs_five_ticks_then_stops() {
        let mut target = StatEntity::new("Target", 100, 0).with_defense(50);
        target.apply_effect(ActiveEffect::poison(5, 5));

        for _ in 0..5 {
            let ticks = target.tick_effects();
            assert_eq!(ticks.len(), 1);
            assert_eq!(ticks[0].damage, 5);
        }
        // Defense 50 did not mitigate the periodic damage.
        assert_eq!(target.health(), 75);
        assert!(target.effects().is_empty());

        assert!(target.tick_effects().is_empty());
        assert_eq!(target.health(), 75);
    }

    #[test]
    fn final_tick_reports_expiry() {
        let mut target = StatEntity::new("Target", 60, 0);
        target.apply_effect(ActiveEffect::regeneration(10, 2));

        let first = target.tick_effects();
        assert!(!first[0].expired);
        assert_eq!(first[0].remaining, 1);

        let second = target.tick_effects();
        assert!(second[0].expired);
        assert_eq!(second[0].kind, EffectKind::Regeneration);
        assert_eq!(target.health(), 80);
    }

    #[test]
    fn regeneration_does_not_revive_within_a_tick() {
        let mut target = StatEntity::new("Target", 5, 0);
        target.apply_effect(ActiveEffect::burn(5, 3));
        target.apply_effect(ActiveEffect::regeneration(10, 3));

        let ticks = target.tick_effects();
        assert_eq!(ticks[0].damage, 5);
        assert_eq!(ticks[1].healed, 0);
        assert!(!target.is_alive());
    }
}
