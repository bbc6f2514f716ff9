//! Card definition and effect payloads.

use crate::env::{BattleRng, rng::context};
use crate::state::ActiveEffect;

use super::catalog::CardKind;

/// Who a card resolves against when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardTarget {
    /// The combatant playing the card (buffs, heals, mana).
    Caster,
    /// The caster's opponent.
    Opponent,
}

/// Direct damage amount of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageRoll {
    Fixed(i32),
    /// Uniform in `[min, max]` inclusive.
    Range { min: i32, max: i32 },
}

impl DamageRoll {
    /// Rolls the amount. Fixed rolls never consume randomness.
    pub fn roll(self, rng: &mut BattleRng) -> i32 {
        match self {
            Self::Fixed(amount) => amount,
            Self::Range { min, max } => rng.range(context::DAMAGE_ROLL, min, max),
        }
    }
}

/// What a card does to its recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardEffect {
    /// Direct damage, then an optional effect if the recipient survived.
    Damage {
        roll: DamageRoll,
        follow_up: Option<ActiveEffect>,
    },
    /// Attaches a timed effect.
    Status(ActiveEffect),
    /// Restores mana.
    Mana { delta: i32 },
    /// Raises defense.
    Defense { bonus: i32 },
}

/// A playable card. Cards are stateless values; playing one never mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub kind: CardKind,
    pub name: String,
    pub description: String,
    pub mana_cost: i32,
    pub target: CardTarget,
    pub effect: CardEffect,
}

impl Card {
    /// True when the card resolves against its caster.
    pub fn targets_caster(&self) -> bool {
        self.target == CardTarget::Caster
    }
}
