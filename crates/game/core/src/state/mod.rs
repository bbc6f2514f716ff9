//! Combatant state.
//!
//! [`StatEntity`] holds the clamped health/mana/defense record and its timed
//! effects; [`Combatant`] composes it with class, progression, deck,
//! inventory and AI policy. Combatants refer to each other only by
//! [`CombatantId`]; the engine owns both sides.
pub mod archetype;
pub mod combatant;
pub mod common;
pub mod deck;
pub mod entity;
pub mod inventory;
pub mod status;
pub mod template;

pub use archetype::{Archetype, AttackRule};
pub use combatant::{AttackReport, Combatant, ItemUse, Strike, level_threshold};
pub use common::{CombatantId, SpeedModifier};
pub use deck::Deck;
pub use entity::StatEntity;
pub use inventory::{Inventory, Item, ItemEffect};
pub use status::{ActiveEffect, EffectKind, EffectTick, StatusEffects, TickConsequence};
pub use template::CombatantTemplate;
