//! Common error infrastructure for battle-core.
//!
//! Gameplay failures (not enough mana, a bad card index, a defeated target)
//! are never fatal: every operation that can fail leaves state untouched and
//! returns a [`CombatError`] the caller reports and moves past. Engine misuse
//! is reported separately through [`crate::engine::EngineError`].

use crate::state::CombatantId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same intent may succeed later or through a fallback
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency, indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not enough mana yet, AI card missing from the deck.
    Recoverable,

    /// Examples: card index out of range, target already defeated.
    Validation,

    /// Examples: engine driven out of order.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; log consumers group on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures of a single combat operation (attack, card play, item use).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    /// Caster cannot pay the card's mana cost.
    #[error("{name} needs {required} mana but has {available}")]
    InsufficientMana {
        name: String,
        required: i32,
        available: i32,
    },

    /// Index does not point into the deck or inventory.
    #[error("selection {index} is out of range ({available} available)")]
    InvalidSelection { index: usize, available: usize },

    /// Draw requested from an empty deck.
    #[error("{name} has no cards left")]
    EmptyDeck { name: String },

    /// A card the caller expected is not in the deck.
    #[error("{owner} has no {card} card")]
    MissingCard { owner: String, card: String },

    /// The recipient of the action is already at zero health.
    #[error("{name} is already defeated")]
    TargetDefeated { name: String },

    /// The acting combatant is already at zero health.
    #[error("{name} cannot act while defeated")]
    ActorDefeated { name: String },

    /// The passed target is not the combatant this actor is bound to.
    #[error("target {provided} is not the bound target {expected}")]
    TargetMismatch {
        expected: CombatantId,
        provided: CombatantId,
    },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            InsufficientMana { .. } | MissingCard { .. } => ErrorSeverity::Recoverable,
            InvalidSelection { .. } | EmptyDeck { .. } => ErrorSeverity::Validation,
            TargetDefeated { .. } | ActorDefeated { .. } | TargetMismatch { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            InsufficientMana { .. } => "COMBAT_INSUFFICIENT_MANA",
            InvalidSelection { .. } => "COMBAT_INVALID_SELECTION",
            EmptyDeck { .. } => "COMBAT_EMPTY_DECK",
            MissingCard { .. } => "COMBAT_MISSING_CARD",
            TargetDefeated { .. } => "COMBAT_TARGET_DEFEATED",
            ActorDefeated { .. } => "COMBAT_ACTOR_DEFEATED",
            TargetMismatch { .. } => "COMBAT_TARGET_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mana_shortage_is_recoverable() {
        let err = CombatError::InsufficientMana {
            name: "Mage".into(),
            required: 20,
            available: 5,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "COMBAT_INSUFFICIENT_MANA");
        assert_eq!(err.to_string(), "Mage needs 20 mana but has 5");
    }

    #[test]
    fn defeated_target_is_a_validation_error() {
        let err = CombatError::TargetDefeated {
            name: "Goblin".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_internal());
    }
}
