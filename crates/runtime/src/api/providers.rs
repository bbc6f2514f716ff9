//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ChoiceProvider`] implementations so battles can run
//! with human input, scripted fixtures, or autoplay.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use battle_core::{BattleSnapshot, PlayerChoice};

use super::errors::Result;

/// Trait for choosing the player's action from a battle snapshot.
///
/// Different implementations can handle:
/// - Terminal or UI input
/// - Scripted/replayed choices
/// - Testing fixtures
#[async_trait]
pub trait ChoiceProvider: Send + Sync {
    /// Choose the player's action for the upcoming round.
    ///
    /// Out-of-range ability or item indices are not errors; the engine treats
    /// them as no-ops.
    async fn provide_choice(&self, snapshot: &BattleSnapshot) -> Result<PlayerChoice>;
}

/// Always attacks. Useful for autoplay and as a fallback.
pub struct AlwaysAttackProvider;

#[async_trait]
impl ChoiceProvider for AlwaysAttackProvider {
    async fn provide_choice(&self, _snapshot: &BattleSnapshot) -> Result<PlayerChoice> {
        Ok(PlayerChoice::Attack)
    }
}

/// Replays a fixed list of choices, then repeats `fallback`.
pub struct ScriptedChoiceProvider {
    script: Mutex<VecDeque<PlayerChoice>>,
    fallback: PlayerChoice,
}

impl ScriptedChoiceProvider {
    pub fn new(script: impl IntoIterator<Item = PlayerChoice>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: PlayerChoice::Attack,
        }
    }

    pub fn with_fallback(mut self, fallback: PlayerChoice) -> Self {
        self.fallback = fallback;
        self
    }
}

#[async_trait]
impl ChoiceProvider for ScriptedChoiceProvider {
    async fn provide_choice(&self, _snapshot: &BattleSnapshot) -> Result<PlayerChoice> {
        Ok(self.script.lock().await.pop_front().unwrap_or(self.fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Archetype, BattleConfig, Combatant, CombatantId, TurnEngine};

    fn snapshot() -> BattleSnapshot {
        let player = Combatant::new(CombatantId::PLAYER, "Hero", Archetype::Warrior, 100, 0, 10, 0);
        let enemy = Combatant::new(CombatantId::ENEMY, "Goblin", Archetype::Warrior, 50, 0, 5, 0);
        TurnEngine::new(player, enemy, BattleConfig::default()).snapshot()
    }

    #[tokio::test]
    async fn scripted_provider_replays_then_falls_back() {
        let provider =
            ScriptedChoiceProvider::new([PlayerChoice::Defend, PlayerChoice::Item(0)])
                .with_fallback(PlayerChoice::Ability(1));
        let snapshot = snapshot();

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(provider.provide_choice(&snapshot).await.unwrap());
        }
        assert_eq!(
            seen,
            [
                PlayerChoice::Defend,
                PlayerChoice::Item(0),
                PlayerChoice::Ability(1),
                PlayerChoice::Ability(1),
            ]
        );
    }

    #[tokio::test]
    async fn always_attack() {
        let choice = AlwaysAttackProvider.provide_choice(&snapshot()).await.unwrap();
        assert_eq!(choice, PlayerChoice::Attack);
    }
}
