//! Playable actions.
//!
//! # Module Structure
//!
//! - `card`: card value, effect payloads and recipient rule
//! - `catalog`: built-in card kinds with their fixed numbers
//! - `resolve`: applies a card to one recipient

pub mod card;
pub mod catalog;
pub mod resolve;

pub use card::{Card, CardEffect, CardTarget, DamageRoll};
pub use catalog::CardKind;
pub use resolve::{CardOutcome, play_card};

/// Anything a combatant can do on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Archetype-dependent strike at the bound target.
    BasicAttack,
    /// Play a card.
    Card(Card),
}

impl From<CardKind> for Action {
    fn from(kind: CardKind) -> Self {
        Self::Card(kind.card())
    }
}
