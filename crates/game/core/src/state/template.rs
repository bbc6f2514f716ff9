//! Data-driven combatant definitions.

use crate::action::CardKind;
use crate::ai::AiPolicy;

use super::archetype::Archetype;
use super::combatant::Combatant;
use super::common::CombatantId;
use super::deck::Deck;
use super::inventory::{Inventory, Item};

/// Blueprint a roster file describes; [`Self::build`] turns it into a
/// fresh [`Combatant`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub archetype: Archetype,
    pub health: i32,
    pub mana: i32,
    pub attack_power: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defense: i32,
    /// Cards in insertion order; the last one is drawn first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck: Vec<CardKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Option<AiPolicy>,
}

impl CombatantTemplate {
    pub fn build(&self, id: CombatantId) -> Combatant {
        let deck: Deck = self.deck.iter().copied().map(CardKind::card).collect();
        let inventory: Inventory = self.items.iter().cloned().collect();

        let combatant = Combatant::new(
            id,
            self.name.clone(),
            self.archetype,
            self.health,
            self.mana,
            self.attack_power,
            self.defense,
        )
        .with_deck(deck)
        .with_inventory(inventory);

        match self.ai {
            Some(policy) => combatant.with_ai(policy),
            None => combatant,
        }
    }
}
