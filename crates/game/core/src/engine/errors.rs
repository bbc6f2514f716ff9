//! Engine misuse errors.

use crate::error::{ErrorSeverity, GameError};

use super::phase::BattleOutcome;

/// Errors from driving the [`super::TurnEngine`] out of order.
///
/// Gameplay failures never surface here; they are part of the round report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("battle has not been started")]
    NotStarted,

    #[error("battle has already been started")]
    AlreadyStarted,

    #[error("battle is already resolved ({0})")]
    AlreadyResolved(BattleOutcome),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "ENGINE_NOT_STARTED",
            Self::AlreadyStarted => "ENGINE_ALREADY_STARTED",
            Self::AlreadyResolved(_) => "ENGINE_ALREADY_RESOLVED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misuse_is_internal_and_coded() {
        let err = EngineError::AlreadyResolved(BattleOutcome::Win);
        assert!(err.severity().is_internal());
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.error_code(), "ENGINE_ALREADY_RESOLVED");
        assert_eq!(EngineError::NotStarted.error_code(), "ENGINE_NOT_STARTED");
    }
}
