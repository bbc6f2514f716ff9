//! Per-round reports returned by the engine.

use crate::action::CardOutcome;
use crate::ai::AiTurn;
use crate::error::CombatError;
use crate::state::{AttackReport, Combatant, CombatantId, EffectTick, ItemUse};

use super::phase::{BattleOutcome, BattlePhase, PlayerChoice};

/// What the player's choice did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerResult {
    Attacked(AttackReport),
    Ability(CardOutcome),
    Defended { defense: i32 },
    UsedItem(ItemUse),
    Skipped,
    /// The choice was rejected; nothing changed.
    Rejected(CombatError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTurn {
    pub choice: PlayerChoice,
    pub result: PlayerResult,
    pub ends_turn: bool,
}

/// Effect ticks applied at the end of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub player: Vec<EffectTick>,
    pub enemy: Vec<EffectTick>,
}

/// Experience and kill granted to the player on a win.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub recipient: CombatantId,
    pub exp: u32,
    pub levels_gained: u32,
}

/// Everything that happened during one [`super::TurnEngine::update`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    pub round: u32,
    /// Phases entered, in order.
    pub phases: Vec<BattlePhase>,
    pub player: PlayerTurn,
    /// `None` when the enemy did not act this round.
    pub enemy: Option<AiTurn>,
    pub ticks: TickReport,
    pub outcome: Option<BattleOutcome>,
    pub reward: Option<Reward>,
}

/// Read-only copy of an encounter for rendering or publishing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub phase: BattlePhase,
    pub player: Combatant,
    pub enemy: Combatant,
}
