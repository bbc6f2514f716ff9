//! Combatant: a stat entity that can act.

use crate::action::{CardOutcome, play_card};
use crate::ai::{self, AiPolicy, AiTurn};
use crate::combat::{AttackResult, resolve_attack};
use crate::config::BattleConfig;
use crate::env::BattleRng;
use crate::error::CombatError;
use crate::log::{BattleLog, LogExt, Tone};

use super::archetype::{Archetype, AttackRule};
use super::common::{CombatantId, SpeedModifier};
use super::deck::Deck;
use super::entity::StatEntity;
use super::inventory::{Inventory, ItemEffect};

/// Experience needed to advance past `level`.
///
/// `floor(BASE_EXP_PER_LEVEL × level^1.5)`, computed as
/// `isqrt(BASE² × level³)` so it stays exact in integers.
pub fn level_threshold(level: u32) -> u64 {
    let base = BattleConfig::BASE_EXP_PER_LEVEL;
    let level = u64::from(level);
    base.saturating_mul(base)
        .saturating_mul(level)
        .saturating_mul(level)
        .saturating_mul(level)
        .isqrt()
}

/// How a basic attack was delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strike {
    Physical(AttackResult),
    /// Mana-gated archetypes cast instead of striking.
    Spell(CardOutcome),
}

/// Result of [`Combatant::attack`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub strike: Strike,
    /// Health the target lost.
    pub dealt: i32,
    /// True when this attack defeated the target; the kill is already credited.
    pub lethal: bool,
    pub levels_gained: u32,
}

/// Result of [`Combatant::use_item`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUse {
    pub name: String,
    pub effect: ItemEffect,
}

/// One side of an encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub archetype: Archetype,
    pub entity: StatEntity,
    pub attack_power: i32,
    pub level: u32,
    /// Cumulative experience; never reset on level-up.
    pub experience: u32,
    pub kills: u32,
    pub deck: Deck,
    pub inventory: Inventory,
    target: Option<CombatantId>,
    ai: Option<AiPolicy>,
}

impl Combatant {
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        archetype: Archetype,
        health: i32,
        mana: i32,
        attack_power: i32,
        defense: i32,
    ) -> Self {
        Self {
            id,
            archetype,
            entity: StatEntity::new(name, health, mana).with_defense(defense),
            attack_power: attack_power.max(0),
            level: 1,
            experience: 0,
            kills: 0,
            deck: Deck::new(),
            inventory: Inventory::new(),
            target: None,
            ai: None,
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    #[must_use]
    pub fn with_ai(mut self, policy: AiPolicy) -> Self {
        self.ai = Some(policy);
        self
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    pub fn speed_modifier(&self) -> SpeedModifier {
        self.entity.speed_modifier()
    }

    pub fn target(&self) -> Option<CombatantId> {
        self.target
    }

    pub fn set_target(&mut self, target: CombatantId) {
        self.target = Some(target);
    }

    pub fn ai(&self) -> Option<AiPolicy> {
        self.ai
    }

    pub fn set_ai(&mut self, policy: AiPolicy) {
        self.ai = Some(policy);
    }

    /// Adds experience and applies every level-up it unlocks.
    /// Returns the number of levels gained.
    pub fn gain_exp(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while u64::from(self.experience) >= level_threshold(self.level) {
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.attack_power = self.attack_power.saturating_add(2);
        self.entity
            .set_defense(self.entity.defense().saturating_add(1));
        self.entity.heal(StatEntity::MAX_HEALTH / 4);
    }

    pub fn credit_kill(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    /// Basic attack on `target`, following the archetype's attack rule.
    ///
    /// A lethal attack grants [`BattleConfig::KILL_EXP`] and a kill.
    pub fn attack(
        &mut self,
        target: &mut Combatant,
        rng: &mut BattleRng,
        log: &mut dyn BattleLog,
    ) -> Result<AttackReport, CombatError> {
        self.ensure_can_act()?;
        if !target.is_alive() {
            return Err(CombatError::TargetDefeated {
                name: target.name().to_owned(),
            });
        }

        let strike = match self.archetype.attack_rule() {
            AttackRule::ManaGated { cost, card } if self.entity.mana() >= cost => {
                self.entity.reduce_mana(cost);
                log.emit(
                    Tone::Info,
                    format!("{} channels {} at {}!", self.name(), card.name(), target.name()),
                );
                Strike::Spell(play_card(&card.card(), &mut target.entity, rng, log)?)
            }
            _ => {
                let result =
                    resolve_attack(self.attack_power, self.speed_modifier(), &mut target.entity);
                log.emit(
                    Tone::Danger,
                    format!(
                        "{} {} {} for {} damage!",
                        self.name(),
                        self.archetype.strike_verb(),
                        target.name(),
                        result.dealt
                    ),
                );
                Strike::Physical(result)
            }
        };

        let (dealt, lethal) = match &strike {
            Strike::Physical(result) => (result.dealt, result.lethal),
            Strike::Spell(outcome) => (outcome.damage, outcome.lethal),
        };

        let mut levels_gained = 0;
        if lethal {
            levels_gained = self.gain_exp(BattleConfig::KILL_EXP);
            self.credit_kill();
            log.emit(
                Tone::Success,
                format!(
                    "{} defeated {} and gained {} EXP.",
                    self.name(),
                    target.name(),
                    BattleConfig::KILL_EXP
                ),
            );
        }

        Ok(AttackReport {
            strike,
            dealt,
            lethal,
            levels_gained,
        })
    }

    /// Plays the deck card at `index`, paying its mana cost.
    ///
    /// The card resolves against its natural recipient: the caster for
    /// self-buffs, `opponent` otherwise. Every rejection leaves both sides
    /// untouched.
    pub fn use_ability(
        &mut self,
        index: usize,
        opponent: &mut Combatant,
        rng: &mut BattleRng,
        log: &mut dyn BattleLog,
    ) -> Result<CardOutcome, CombatError> {
        self.ensure_can_act()?;

        let card = self.deck.get(index).ok_or(CombatError::InvalidSelection {
            index,
            available: self.deck.len(),
        })?;

        let recipient = if card.targets_caster() {
            &self.entity
        } else {
            &opponent.entity
        };
        if !recipient.is_alive() {
            return Err(CombatError::TargetDefeated {
                name: recipient.name().to_owned(),
            });
        }

        if self.entity.mana() < card.mana_cost {
            return Err(CombatError::InsufficientMana {
                name: self.name().to_owned(),
                required: card.mana_cost,
                available: self.entity.mana(),
            });
        }

        let card = self
            .deck
            .remove_at(index)
            .ok_or(CombatError::InvalidSelection {
                index,
                available: self.deck.len(),
            })?;
        self.entity.reduce_mana(card.mana_cost);
        log.emit(Tone::Info, format!("{} uses {}!", self.name(), card.name));

        let recipient = if card.targets_caster() {
            &mut self.entity
        } else {
            &mut opponent.entity
        };
        play_card(&card, recipient, rng, log)
    }

    /// Consumes the inventory item at `index` on this combatant.
    pub fn use_item(
        &mut self,
        index: usize,
        log: &mut dyn BattleLog,
    ) -> Result<ItemUse, CombatError> {
        self.ensure_can_act()?;
        let item = self
            .inventory
            .take(index)
            .ok_or(CombatError::InvalidSelection {
                index,
                available: self.inventory.len(),
            })?;

        let effect = item.apply(self);
        log.emit(
            Tone::Success,
            format!("{} used {}.", self.name(), item.name()),
        );
        Ok(ItemUse {
            name: item.name().to_owned(),
            effect,
        })
    }

    /// Restores health to an ally if this archetype can heal.
    /// Returns `None` for archetypes without the ability.
    pub fn heal_ally(&self, ally: &mut StatEntity, log: &mut dyn BattleLog) -> Option<i32> {
        let amount = self.archetype.ally_heal()?;
        let healed = ally.heal(amount);
        log.emit(
            Tone::Success,
            format!("{} heals {} for {} points!", self.name(), ally.name(), healed),
        );
        Some(healed)
    }

    /// Lets the AI policy act against `target`.
    ///
    /// `target` must be the combatant this one is bound to, when bound.
    /// Without a policy the combatant falls back to a basic attack.
    pub fn perform_ai_action(
        &mut self,
        target: &mut Combatant,
        rng: &mut BattleRng,
        config: &BattleConfig,
        log: &mut dyn BattleLog,
    ) -> Result<AiTurn, CombatError> {
        if let Some(expected) = self.target
            && expected != target.id
        {
            return Err(CombatError::TargetMismatch {
                expected,
                provided: target.id,
            });
        }
        self.ensure_can_act()?;

        match self.ai {
            Some(policy) => Ok(ai::take_turn(policy, self, target, rng, config, log)),
            None => {
                let report = self.attack(target, rng, log)?;
                Ok(AiTurn::fallback_attack(report))
            }
        }
    }

    fn ensure_can_act(&self) -> Result<(), CombatError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(CombatError::ActorDefeated {
                name: self.name().to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CardKind;
    use crate::log::{LogEntry, NullLog};
    use crate::state::{ActiveEffect, EffectKind};

    fn warrior(id: u32, name: &str) -> Combatant {
        Combatant::new(CombatantId(id), name, Archetype::Warrior, 100, 0, 20, 5)
    }

    fn mage(mana: i32) -> Combatant {
        Combatant::new(CombatantId(0), "Merlin", Archetype::Mage, 100, mana, 10, 0)
    }

    fn dummy() -> Combatant {
        Combatant::new(CombatantId(1), "Dummy", Archetype::Warrior, 100, 0, 0, 0)
    }

    #[test]
    fn warrior_versus_warrior() {
        let mut a = warrior(0, "Conan");
        let mut b = warrior(1, "Brute");
        let report = a.attack(&mut b, &mut BattleRng::new(1), &mut NullLog).unwrap();

        assert_eq!(report.dealt, 15);
        assert_eq!(b.entity.health(), 85);
        assert!(!report.lethal);
    }

    #[test]
    fn mage_casts_fireball_when_affordable() {
        let mut caster = mage(50);
        let mut target = dummy();
        let report = caster
            .attack(&mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap();

        assert!(matches!(report.strike, Strike::Spell(_)));
        assert_eq!(target.entity.health(), 75);
        assert_eq!(caster.entity.mana(), 30);
        assert!(target.entity.effects().has(EffectKind::Burn));
    }

    #[test]
    fn fireball_is_mitigated_by_armour() {
        let mut caster = mage(50);
        let mut target = warrior(1, "Knight");
        caster
            .attack(&mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap();

        // 25 direct damage against defense 5; the burn has not ticked yet.
        assert_eq!(target.entity.health(), 80);
        assert!(target.entity.effects().has(EffectKind::Burn));
    }

    #[test]
    fn mage_falls_back_to_staff_without_mana() {
        let mut caster = mage(15);
        let mut target = dummy();
        let report = caster
            .attack(&mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap();

        assert!(matches!(report.strike, Strike::Physical(_)));
        assert_eq!(target.entity.health(), 90);
        assert_eq!(caster.entity.mana(), 15);
    }

    #[test]
    fn slowed_attacker_deals_scaled_damage() {
        let mut a = warrior(0, "Conan");
        let mut b = dummy();
        let slow = ActiveEffect::slow(SpeedModifier::from_permille(700), 2);
        a.entity.apply_effect(slow);
        a.entity.apply_effect(slow);

        let report = a.attack(&mut b, &mut BattleRng::new(1), &mut NullLog).unwrap();
        // floor(20 × 0.49) = 9
        assert_eq!(report.dealt, 9);
    }

    #[test]
    fn lethal_attack_credits_kill_and_exp() {
        let mut a = warrior(0, "Conan");
        let mut b = Combatant::new(CombatantId(1), "Rat", Archetype::Warrior, 10, 0, 1, 0);
        let report = a.attack(&mut b, &mut BattleRng::new(1), &mut NullLog).unwrap();

        assert!(report.lethal);
        assert_eq!(a.kills, 1);
        assert_eq!(a.experience, BattleConfig::KILL_EXP);

        let err = a.attack(&mut b, &mut BattleRng::new(1), &mut NullLog).unwrap_err();
        assert!(matches!(err, CombatError::TargetDefeated { .. }));
        assert_eq!(a.kills, 1);
    }

    #[test]
    fn level_thresholds_follow_the_curve() {
        assert_eq!(level_threshold(1), 100);
        assert_eq!(level_threshold(2), 282);
        assert_eq!(level_threshold(3), 519);
        assert_eq!(level_threshold(4), 800);
    }

    #[test]
    fn level_up_cascades() {
        let mut hero = warrior(0, "Conan");
        hero.entity.take_damage(65);
        assert_eq!(hero.entity.health(), 40);

        let gained = hero.gain_exp(600);
        assert_eq!(gained, 3);
        assert_eq!(hero.level, 4);
        assert_eq!(hero.attack_power, 26);
        assert_eq!(hero.entity.defense(), 8);
        assert_eq!(hero.entity.health(), 100);
        assert_eq!(hero.experience, 600);

        assert_eq!(hero.gain_exp(100), 0);
        assert_eq!(hero.gain_exp(100), 1);
    }

    #[test]
    fn ability_pays_mana_and_leaves_the_deck() {
        let mut caster = mage(50);
        caster.deck.add_card(CardKind::Fireball.card());
        let mut target = dummy();

        let outcome = caster
            .use_ability(0, &mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap();
        assert_eq!(outcome.damage, 25);
        assert_eq!(caster.entity.mana(), 30);
        assert!(caster.deck.is_empty());
    }

    #[test]
    fn caster_cards_land_on_the_caster() {
        let mut caster = mage(50);
        caster.deck.add_card(CardKind::Regeneration.card());
        let mut target = dummy();

        caster
            .use_ability(0, &mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap();
        assert!(caster.entity.effects().has(EffectKind::Regeneration));
        assert!(target.entity.effects().is_empty());
        assert_eq!(caster.entity.mana(), 35);
    }

    #[test]
    fn rejected_ability_changes_nothing() {
        let mut caster = mage(10);
        caster.deck.add_card(CardKind::Fireball.card());
        let mut target = dummy();
        let before = (caster.clone(), target.clone());
        let mut log: Vec<LogEntry> = Vec::new();

        let err = caster
            .use_ability(0, &mut target, &mut BattleRng::new(1), &mut log)
            .unwrap_err();
        assert_eq!(
            err,
            CombatError::InsufficientMana {
                name: "Merlin".into(),
                required: 20,
                available: 10,
            }
        );
        assert_eq!((caster.clone(), target.clone()), before);
        assert!(log.is_empty());

        let err = caster
            .use_ability(3, &mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap_err();
        assert!(matches!(err, CombatError::InvalidSelection { index: 3, available: 1 }));
        assert_eq!((caster, target), before);
    }

    #[test]
    fn ability_on_defeated_opponent_is_rejected() {
        let mut caster = mage(50);
        caster.deck.add_card(CardKind::Poison.card());
        let mut target = dummy();
        target.entity.take_damage(100);

        let err = caster
            .use_ability(0, &mut target, &mut BattleRng::new(1), &mut NullLog)
            .unwrap_err();
        assert!(matches!(err, CombatError::TargetDefeated { .. }));
        assert_eq!(caster.deck.len(), 1);
    }

    #[test]
    fn items_are_consumed() {
        let mut hero = warrior(0, "Conan");
        hero.entity.take_damage(45);
        hero.inventory.add(crate::state::Item::HealthPotion);

        let used = hero.use_item(0, &mut NullLog).unwrap();
        assert_eq!(used.effect, ItemEffect::Healed(30));
        assert!(hero.inventory.is_empty());
        assert!(hero.use_item(0, &mut NullLog).is_err());
    }

    #[test]
    fn only_healers_heal_allies() {
        let healer = Combatant::new(CombatantId(0), "Mira", Archetype::Healer, 100, 0, 5, 0);
        let mut ally = StatEntity::new("Ally", 50, 0);
        assert_eq!(healer.heal_ally(&mut ally, &mut NullLog), Some(20));
        assert_eq!(warrior(2, "Conan").heal_ally(&mut ally, &mut NullLog), None);
        assert_eq!(ally.health(), 70);
    }

    #[test]
    fn ai_action_requires_the_bound_target() {
        let mut enemy = warrior(1, "Brute");
        enemy.set_target(CombatantId(0));
        let mut stranger = warrior(7, "Stranger");

        let err = enemy
            .perform_ai_action(
                &mut stranger,
                &mut BattleRng::new(1),
                &BattleConfig::default(),
                &mut NullLog,
            )
            .unwrap_err();
        assert_eq!(
            err,
            CombatError::TargetMismatch {
                expected: CombatantId(0),
                provided: CombatantId(7),
            }
        );
    }

    #[test]
    fn ai_action_without_policy_attacks() {
        let mut enemy = warrior(1, "Brute");
        let mut hero = warrior(0, "Conan");
        let turn = enemy
            .perform_ai_action(
                &mut hero,
                &mut BattleRng::new(1),
                &BattleConfig::default(),
                &mut NullLog,
            )
            .unwrap();

        assert_eq!(turn.policy, None);
        assert_eq!(hero.entity.health(), 85);
    }
}
