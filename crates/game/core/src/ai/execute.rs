//! Plan execution.

use crate::action::{Action, Card, CardKind, play_card};
use crate::config::BattleConfig;
use crate::env::BattleRng;
use crate::error::CombatError;
use crate::log::{BattleLog, LogExt, Tone};
use crate::state::Combatant;

use super::policy::AiPolicy;
use super::types::{AiEvent, AiStep, AiTurn};

/// Plans and resolves one turn for `actor` under `policy`.
///
/// Cards played by the AI cost no mana and resolve against their natural
/// recipient. Failed steps are reported and skipped; the turn always
/// completes.
pub fn take_turn(
    policy: AiPolicy,
    actor: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    config: &BattleConfig,
    log: &mut dyn BattleLog,
) -> AiTurn {
    let plan = policy.plan(actor, target, rng, config);
    let mut events = Vec::with_capacity(plan.steps.len());

    for step in &plan.steps {
        let event = match step {
            AiStep::Act(Action::BasicAttack) => match actor.attack(target, rng, log) {
                Ok(report) => AiEvent::Attacked(report),
                Err(err) => AiEvent::Rejected(err),
            },
            AiStep::Act(Action::Card(card)) => play(card, false, actor, target, rng, log),
            AiStep::Draw { fallback } => match actor.deck.draw() {
                Some(card) => {
                    log.emit(
                        Tone::Info,
                        format!("{} draws {}!", actor.name(), card.name),
                    );
                    play(&card, true, actor, target, rng, log)
                }
                None => match fallback {
                    Some(kind) => {
                        log.emit(
                            Tone::Debug,
                            format!("{} has no cards left, casting {}.", actor.name(), kind.name()),
                        );
                        play(&kind.card(), false, actor, target, rng, log)
                    }
                    None => AiEvent::Rejected(CombatError::EmptyDeck {
                        name: actor.name().to_owned(),
                    }),
                },
            },
            AiStep::PlayFromDeck { index, consume } => {
                let card = if *consume {
                    actor.deck.remove_at(*index)
                } else {
                    actor.deck.get(*index).cloned()
                };
                match card {
                    Some(card) => play(&card, true, actor, target, rng, log),
                    None => AiEvent::Rejected(CombatError::InvalidSelection {
                        index: *index,
                        available: actor.deck.len(),
                    }),
                }
            }
            AiStep::Missing(kind) => {
                log.emit(
                    Tone::Debug,
                    format!("{} has no {} card!", actor.name(), kind.name()),
                );
                AiEvent::MissingCard(*kind)
            }
        };

        if let AiEvent::Rejected(err) = &event {
            log.emit(
                Tone::Debug,
                format!("{} ({policy}) step failed: {err}", actor.name()),
            );
        }
        events.push(event);
    }

    AiTurn {
        policy: Some(policy),
        plan,
        events,
    }
}

fn play(
    card: &Card,
    from_deck: bool,
    actor: &mut Combatant,
    target: &mut Combatant,
    rng: &mut BattleRng,
    log: &mut dyn BattleLog,
) -> AiEvent {
    let kind: CardKind = card.kind;
    log.emit(Tone::Info, format!("{} uses {}!", actor.name(), card.name));

    let recipient = if card.targets_caster() {
        &mut actor.entity
    } else {
        &mut target.entity
    };
    match play_card(card, recipient, rng, log) {
        Ok(outcome) => AiEvent::Played {
            card: kind,
            from_deck,
            outcome,
        },
        Err(err) => AiEvent::Rejected(err),
    }
}
