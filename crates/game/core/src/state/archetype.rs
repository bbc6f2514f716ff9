//! Combatant classes and their attack rules.

use crate::action::CardKind;

/// Class of a combatant. Behavior differences are data, not overrides.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    #[default]
    Warrior,
    Mage,
    Archer,
    Healer,
}

/// How a basic attack resolves for an archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackRule {
    /// Physical strike scaled by speed and mitigated by defense.
    Strike,
    /// Spends `cost` mana to cast `card` when affordable, otherwise strikes.
    ManaGated { cost: i32, card: CardKind },
}

impl Archetype {
    pub const fn attack_rule(self) -> AttackRule {
        match self {
            Self::Mage => AttackRule::ManaGated {
                cost: 20,
                card: CardKind::Fireball,
            },
            Self::Warrior | Self::Archer | Self::Healer => AttackRule::Strike,
        }
    }

    /// Health a Healer restores to an ally outside of combat turns.
    pub const fn ally_heal(self) -> Option<i32> {
        match self {
            Self::Healer => Some(20),
            _ => None,
        }
    }

    /// Verb used in attack narration.
    pub const fn strike_verb(self) -> &'static str {
        match self {
            Self::Warrior => "swings a sword at",
            Self::Mage => "strikes with a staff at",
            Self::Archer => "shoots an arrow at",
            Self::Healer => "swings a mace at",
        }
    }
}
