//! Card resolution against a single recipient.
//!
//! Mana gating and deck removal belong to the caller; this step only applies
//! the card's payload.

use crate::env::BattleRng;
use crate::error::CombatError;
use crate::log::{BattleLog, LogExt, Tone};
use crate::state::{EffectKind, StatEntity};

use super::card::{Card, CardEffect};
use super::catalog::CardKind;

/// What one card play did to its recipient.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardOutcome {
    pub card: Option<CardKind>,
    pub recipient: String,
    /// Health the recipient lost to direct damage.
    pub damage: i32,
    /// Effect attached to the recipient, if any.
    pub applied: Option<EffectKind>,
    pub mana_restored: i32,
    pub defense_gained: i32,
    /// True when the direct damage took the recipient from alive to dead.
    pub lethal: bool,
}

/// Plays `card` on `recipient`.
///
/// A defeated recipient is rejected before anything changes. For damage
/// cards the follow-up effect is skipped when the damage was lethal.
pub fn play_card(
    card: &Card,
    recipient: &mut StatEntity,
    rng: &mut BattleRng,
    log: &mut dyn BattleLog,
) -> Result<CardOutcome, CombatError> {
    if !recipient.is_alive() {
        return Err(CombatError::TargetDefeated {
            name: recipient.name().to_owned(),
        });
    }

    let mut outcome = CardOutcome {
        card: Some(card.kind),
        recipient: recipient.name().to_owned(),
        ..CardOutcome::default()
    };

    match card.effect {
        CardEffect::Damage { roll, follow_up } => {
            let amount = roll.roll(rng);
            outcome.damage = recipient.take_damage(amount);
            log.emit(
                Tone::Danger,
                format!(
                    "{} deals {} damage to {}!",
                    card.name,
                    outcome.damage,
                    recipient.name()
                ),
            );

            if !recipient.is_alive() {
                outcome.lethal = true;
                log.emit(Tone::Danger, format!("{} has been defeated!", recipient.name()));
                return Ok(outcome);
            }
            if let Some(effect) = follow_up {
                recipient.apply_effect(effect);
                outcome.applied = Some(effect.kind);
                log.emit(
                    Tone::Warning,
                    format!(
                        "{} is affected by {} for {} turns.",
                        recipient.name(),
                        effect.kind,
                        effect.duration
                    ),
                );
            }
        }
        CardEffect::Status(effect) => {
            recipient.apply_effect(effect);
            outcome.applied = Some(effect.kind);
            log.emit(
                Tone::Info,
                format!(
                    "{} activates on {}: {} for {} turns.",
                    card.name,
                    recipient.name(),
                    effect.kind,
                    effect.duration
                ),
            );
        }
        CardEffect::Mana { delta } => {
            outcome.mana_restored = recipient.increase_mana(delta);
            log.emit(
                Tone::Success,
                format!(
                    "{} restores {} mana to {}.",
                    card.name,
                    outcome.mana_restored,
                    recipient.name()
                ),
            );
        }
        CardEffect::Defense { bonus } => {
            let before = recipient.defense();
            recipient.set_defense(before.saturating_add(bonus));
            outcome.defense_gained = recipient.defense() - before;
            log.emit(
                Tone::Success,
                format!(
                    "{} raises {}'s defense by {}.",
                    card.name,
                    recipient.name(),
                    outcome.defense_gained
                ),
            );
        }
    }

    Ok(outcome)
}
