//! Event types for different topics.

use battle_core::{BattleOutcome, BattleSnapshot, LogEntry, Reward, RoundReport};
use serde::{Deserialize, Serialize};

/// Encounter lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The encounter started; targets are bound and AI defaults applied.
    Started { snapshot: Box<BattleSnapshot> },

    /// A round finished.
    RoundCompleted { report: Box<RoundReport> },

    /// The encounter reached a terminal outcome.
    Resolved {
        outcome: BattleOutcome,
        round: u32,
        reward: Option<Reward>,
    },
}

/// One line of battle narration, tagged with the round that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// `0` for entries written while starting the encounter.
    pub round: u32,
    pub entry: LogEntry,
}
