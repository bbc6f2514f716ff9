//! Consumable and equippable items.

use super::combatant::Combatant;

/// Items a combatant can carry. Using an item consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    /// Restores 30 health.
    HealthPotion,
    /// Restores 20 mana.
    ManaElixir,
    /// Permanently adds to attack power.
    Weapon { name: String, damage: i32 },
    /// Permanently adds to defense.
    Armor { name: String, defense: i32 },
}

/// Stat change produced by one item use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    Healed(i32),
    ManaRestored(i32),
    AttackRaised(i32),
    DefenseRaised(i32),
}

impl Item {
    pub const POTION_HEAL: i32 = 30;
    pub const ELIXIR_MANA: i32 = 20;

    pub fn name(&self) -> &str {
        match self {
            Self::HealthPotion => "Health Potion",
            Self::ManaElixir => "Mana Elixir",
            Self::Weapon { name, .. } | Self::Armor { name, .. } => name,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::HealthPotion => format!("Restores {} health.", Self::POTION_HEAL),
            Self::ManaElixir => format!("Restores {} mana.", Self::ELIXIR_MANA),
            Self::Weapon { damage, .. } => format!("Increases attack power by {damage}."),
            Self::Armor { defense, .. } => format!("Increases defense by {defense}."),
        }
    }

    /// Applies the item to its owner.
    pub fn apply(&self, owner: &mut Combatant) -> ItemEffect {
        match self {
            Self::HealthPotion => ItemEffect::Healed(owner.entity.restore_health(Self::POTION_HEAL)),
            Self::ManaElixir => ItemEffect::ManaRestored(owner.entity.increase_mana(Self::ELIXIR_MANA)),
            Self::Weapon { damage, .. } => {
                let bonus = (*damage).max(0);
                owner.attack_power = owner.attack_power.saturating_add(bonus);
                ItemEffect::AttackRaised(bonus)
            }
            Self::Armor { defense, .. } => {
                let before = owner.entity.defense();
                owner.entity.set_defense(before.saturating_add((*defense).max(0)));
                ItemEffect::DefenseRaised(owner.entity.defense() - before)
            }
        }
    }
}

/// Ordered item list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the item at `index`.
    pub fn take(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
