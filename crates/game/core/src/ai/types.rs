//! Plan and report types shared by planning and execution.

use crate::action::{Action, CardKind, CardOutcome};
use crate::error::CombatError;
use crate::state::AttackReport;

use super::policy::AiPolicy;

/// One unit of AI behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiStep {
    /// Basic attack, or a card conjured outside the deck.
    Act(Action),
    /// Draw the top card and play it; cast `fallback` if the deck is empty.
    Draw { fallback: Option<CardKind> },
    /// Play the deck card at `index`, removing it when `consume` is set.
    PlayFromDeck { index: usize, consume: bool },
    /// An expected card was not in the deck.
    Missing(CardKind),
}

/// Ordered steps selected for one AI turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiPlan {
    pub steps: Vec<AiStep>,
}

impl AiPlan {
    pub fn single(step: AiStep) -> Self {
        Self { steps: vec![step] }
    }

    pub fn attack() -> Self {
        Self::single(AiStep::Act(Action::BasicAttack))
    }
}

/// What one executed step did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiEvent {
    Attacked(AttackReport),
    Played {
        card: CardKind,
        from_deck: bool,
        outcome: CardOutcome,
    },
    /// The step could not be resolved; the turn carried on.
    Rejected(CombatError),
    MissingCard(CardKind),
}

/// Report of one AI turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiTurn {
    /// `None` when the combatant had no policy and attacked by default.
    pub policy: Option<AiPolicy>,
    pub plan: AiPlan,
    pub events: Vec<AiEvent>,
}

impl AiTurn {
    pub fn fallback_attack(report: AttackReport) -> Self {
        Self {
            policy: None,
            plan: AiPlan::attack(),
            events: vec![AiEvent::Attacked(report)],
        }
    }

    /// Total direct damage dealt to the opponent this turn.
    pub fn damage_dealt(&self) -> i32 {
        self.events
            .iter()
            .map(|event| match event {
                AiEvent::Attacked(report) => report.dealt,
                AiEvent::Played { outcome, .. } => outcome.damage,
                AiEvent::Rejected(_) | AiEvent::MissingCard(_) => 0,
            })
            .sum()
    }
}
