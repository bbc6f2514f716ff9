//! Built-in card catalog.
//!
//! Numeric payloads are game-design constants and are kept verbatim.

use crate::state::{ActiveEffect, SpeedModifier};

use super::card::{Card, CardEffect, CardTarget, DamageRoll};

/// Every card the game knows about.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardKind {
    Attack,
    Defense,
    Fireball,
    IceSpike,
    Poison,
    Regeneration,
    Shield,
    Lightning,
    Special,
    Trap,
    Spell,
}

impl CardKind {
    /// Display name, also used to look cards up in a deck.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "Attack Card",
            Self::Defense => "Defense Card",
            Self::Fireball => "Fireball",
            Self::IceSpike => "Ice Spike",
            Self::Poison => "Poison",
            Self::Regeneration => "Regeneration",
            Self::Shield => "Shield",
            Self::Lightning => "Lightning Card",
            Self::Special => "Special Card",
            Self::Trap => "Trap Card",
            Self::Spell => "Spell Card",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Attack => "Deals 15 damage to the target.",
            Self::Defense => "Raises the caster's defense by 20.",
            Self::Fireball => "Deals 25 damage and sets the target burning for 3 turns.",
            Self::IceSpike => "Slows the target by 30% for 2 turns.",
            Self::Poison => "Deals 5 damage per turn for 5 turns.",
            Self::Regeneration => "Restores 10 health per turn for 3 turns.",
            Self::Shield => "Raises the caster's defense by 10.",
            Self::Lightning => "Deals random damage between 10 and 30.",
            Self::Special => "Restores 30 mana to the caster.",
            Self::Trap => "Deals 10 damage when triggered.",
            Self::Spell => "Sets the target burning for 3 turns.",
        }
    }

    pub const fn mana_cost(self) -> i32 {
        match self {
            Self::Defense => 10,
            Self::Fireball => 20,
            Self::IceSpike | Self::Regeneration => 15,
            _ => 0,
        }
    }

    pub const fn target(self) -> CardTarget {
        match self {
            Self::Defense | Self::Shield | Self::Regeneration | Self::Special => CardTarget::Caster,
            _ => CardTarget::Opponent,
        }
    }

    pub const fn effect(self) -> CardEffect {
        match self {
            Self::Attack => CardEffect::Damage {
                roll: DamageRoll::Fixed(15),
                follow_up: None,
            },
            Self::Defense => CardEffect::Defense { bonus: 20 },
            Self::Fireball => CardEffect::Damage {
                roll: DamageRoll::Fixed(25),
                follow_up: Some(ActiveEffect::burn(5, 3)),
            },
            Self::IceSpike => {
                CardEffect::Status(ActiveEffect::slow(SpeedModifier::from_permille(700), 2))
            }
            Self::Poison => CardEffect::Status(ActiveEffect::poison(5, 5)),
            Self::Regeneration => CardEffect::Status(ActiveEffect::regeneration(10, 3)),
            Self::Shield => CardEffect::Defense { bonus: 10 },
            Self::Lightning => CardEffect::Damage {
                roll: DamageRoll::Range { min: 10, max: 30 },
                follow_up: None,
            },
            Self::Special => CardEffect::Mana { delta: 30 },
            Self::Trap => CardEffect::Damage {
                roll: DamageRoll::Fixed(10),
                follow_up: None,
            },
            Self::Spell => CardEffect::Status(ActiveEffect::burn(5, 3)),
        }
    }

    /// Builds the card value for this kind.
    pub fn card(self) -> Card {
        Card {
            kind: self,
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            mana_cost: self.mana_cost(),
            target: self.target(),
            effect: self.effect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn caster_cards_are_the_self_buffs() {
        let caster: Vec<_> = CardKind::iter()
            .filter(|kind| kind.target() == CardTarget::Caster)
            .collect();
        assert_eq!(
            caster,
            vec![
                CardKind::Defense,
                CardKind::Regeneration,
                CardKind::Shield,
                CardKind::Special
            ]
        );
    }

    #[test]
    fn fireball_payload() {
        let card = CardKind::Fireball.card();
        assert_eq!(card.name, "Fireball");
        assert_eq!(card.mana_cost, 20);
        assert_eq!(
            card.effect,
            CardEffect::Damage {
                roll: DamageRoll::Fixed(25),
                follow_up: Some(ActiveEffect::burn(5, 3)),
            }
        );
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!("ice_spike".parse::<CardKind>(), Ok(CardKind::IceSpike));
        assert_eq!("LIGHTNING".parse::<CardKind>(), Ok(CardKind::Lightning));
        assert!("meteor".parse::<CardKind>().is_err());
    }
}
