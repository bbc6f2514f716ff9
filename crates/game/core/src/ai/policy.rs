//! Policy selection.

use crate::action::{Action, CardKind};
use crate::config::BattleConfig;
use crate::env::{BattleRng, rng::context};
use crate::state::Combatant;

use super::types::{AiPlan, AiStep};

/// Closed set of AI strategies.
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
pub enum AiPolicy {
    /// Plays the top card while the deck lasts, then attacks.
    #[default]
    Easy,
    /// Regenerates when low, turtles when behind, attacks otherwise.
    Advanced,
    /// Regenerates when low, then flips a coin between attacking and drawing.
    Boss,
}

impl AiPolicy {
    /// Selects the steps for one turn. Only the Boss coin flip consumes RNG.
    pub fn plan(
        self,
        actor: &Combatant,
        target: &Combatant,
        rng: &mut BattleRng,
        config: &BattleConfig,
    ) -> AiPlan {
        match self {
            Self::Easy => plan_easy(actor),
            Self::Advanced => plan_advanced(actor, target, config),
            Self::Boss => plan_boss(actor, rng, config),
        }
    }
}

fn is_low(actor: &Combatant, config: &BattleConfig) -> bool {
    actor.entity.health() < config.low_health_threshold
}

fn regeneration_index(actor: &Combatant) -> Option<usize> {
    actor.deck.position(CardKind::Regeneration.name())
}

fn plan_easy(actor: &Combatant) -> AiPlan {
    if actor.deck.is_empty() {
        AiPlan::attack()
    } else {
        AiPlan::single(AiStep::Draw { fallback: None })
    }
}

fn plan_advanced(actor: &Combatant, target: &Combatant, config: &BattleConfig) -> AiPlan {
    if is_low(actor, config) && !actor.deck.is_empty() {
        return match regeneration_index(actor) {
            Some(index) => AiPlan::single(AiStep::PlayFromDeck {
                index,
                consume: false,
            }),
            None => AiPlan::single(AiStep::Draw { fallback: None }),
        };
    }

    if actor.entity.health() < target.entity.health() {
        AiPlan::single(AiStep::Act(Action::from(CardKind::Defense)))
    } else {
        AiPlan::attack()
    }
}

fn plan_boss(actor: &Combatant, rng: &mut BattleRng, config: &BattleConfig) -> AiPlan {
    let mut steps = Vec::with_capacity(2);

    if actor.is_alive() && is_low(actor, config) {
        steps.push(match regeneration_index(actor) {
            Some(index) => AiStep::PlayFromDeck {
                index,
                consume: true,
            },
            None => AiStep::Missing(CardKind::Regeneration),
        });
    }

    steps.push(if rng.coin(context::AI_CHOICE) {
        AiStep::Act(Action::BasicAttack)
    } else {
        AiStep::Draw {
            fallback: Some(CardKind::Fireball),
        }
    });

    AiPlan { steps }
}
