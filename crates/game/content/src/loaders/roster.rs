//! Combatant roster loader.
//!
//! RON format: `Vec<(String, CombatantTemplate)>`, keyed by a roster id.

use std::collections::HashSet;
use std::path::Path;

use battle_core::{BattleConfig, Combatant, CombatantId, CombatantTemplate};

use crate::loaders::{LoadResult, read_file};

/// Loaded combatant templates, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<(String, CombatantTemplate)>,
}

impl Roster {
    pub fn get(&self, key: &str) -> Option<&CombatantTemplate> {
        self.entries
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(key))
            .map(|(_, template)| template)
    }

    /// Builds a fresh combatant from the template stored under `key`.
    pub fn spawn(&self, key: &str, id: CombatantId) -> LoadResult<Combatant> {
        self.get(key)
            .map(|template| template.build(id))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown roster entry '{}' (available: {})",
                    key,
                    self.keys().collect::<Vec<_>>().join(", ")
                )
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loader for combatant rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a roster.
    ///
    /// Stats must lie within the battle bounds and roster ids must be unique
    /// (case-insensitively, matching [`Roster::get`]).
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let entries: Vec<(String, CombatantTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = HashSet::new();
        for (id, template) in &entries {
            anyhow::ensure!(
                seen.insert(id.to_ascii_lowercase()),
                "Duplicate roster entry '{}'",
                id
            );
            validate(id, template)?;
        }

        Ok(Roster { entries })
    }
}

fn validate(id: &str, template: &CombatantTemplate) -> LoadResult<()> {
    anyhow::ensure!(
        (1..=BattleConfig::MAX_HEALTH).contains(&template.health),
        "Roster entry '{}': health {} outside 1..={}",
        id,
        template.health,
        BattleConfig::MAX_HEALTH
    );
    anyhow::ensure!(
        (0..=BattleConfig::MAX_MANA).contains(&template.mana),
        "Roster entry '{}': mana {} outside 0..={}",
        id,
        template.mana,
        BattleConfig::MAX_MANA
    );
    anyhow::ensure!(
        template.attack_power >= 0 && template.defense >= 0,
        "Roster entry '{}': attack power and defense must not be negative",
        id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AiPolicy, Archetype, CardKind, Item};

    const ROSTER: &str = r#"[
        ("hero", (
            name: "Hero",
            archetype: Warrior,
            health: 100,
            mana: 40,
            attack_power: 15,
            defense: 2,
            deck: [Shield, Fireball],
            items: [HealthPotion, Weapon(name: "Iron Sword", damage: 5)],
        )),
        ("goblin", (
            name: "Goblin",
            archetype: Archer,
            health: 60,
            mana: 0,
            attack_power: 8,
            ai: Some(Easy),
        )),
    ]"#;

    #[test]
    fn parses_templates_in_order() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        assert_eq!(roster.keys().collect::<Vec<_>>(), ["hero", "goblin"]);

        let hero = roster.get("HERO").unwrap();
        assert_eq!(hero.archetype, Archetype::Warrior);
        assert_eq!(hero.deck, [CardKind::Shield, CardKind::Fireball]);
        assert_eq!(hero.items[0], Item::HealthPotion);
        assert_eq!(hero.ai, None);

        let goblin = roster.get("goblin").unwrap();
        assert_eq!(goblin.defense, 0);
        assert!(goblin.deck.is_empty());
        assert_eq!(goblin.ai, Some(AiPolicy::Easy));
    }

    #[test]
    fn spawn_builds_with_the_requested_id() {
        let roster = RosterLoader::parse(ROSTER).unwrap();
        let mut hero = roster.spawn("hero", CombatantId::PLAYER).unwrap();
        assert_eq!(hero.id, CombatantId::PLAYER);
        assert_eq!(hero.deck.draw().map(|c| c.kind), Some(CardKind::Fireball));

        let err = roster.spawn("dragon", CombatantId::ENEMY).unwrap_err();
        assert!(err.to_string().contains("hero, goblin"));
    }

    #[test]
    fn rejects_duplicates_and_out_of_range_stats() {
        let dup = r#"[
            ("a", (name: "A", archetype: Mage, health: 10, mana: 0, attack_power: 1)),
            ("A", (name: "B", archetype: Mage, health: 10, mana: 0, attack_power: 1)),
        ]"#;
        assert!(RosterLoader::parse(dup).unwrap_err().to_string().contains("Duplicate"));

        let huge = r#"[("a", (name: "A", archetype: Mage, health: 500, mana: 0, attack_power: 1))]"#;
        assert!(RosterLoader::parse(huge).unwrap_err().to_string().contains("health"));
    }

    #[test]
    fn reports_malformed_ron() {
        let err = RosterLoader::parse("[(\"a\", (name: ))]").unwrap_err();
        assert!(err.to_string().contains("Failed to parse roster RON"));
    }
}
