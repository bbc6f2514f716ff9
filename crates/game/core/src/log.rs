//! Battle log sink.
//!
//! The core never prints. Every human-readable notification (damage dealt,
//! effects expiring, a rejected ability) is appended to a [`BattleLog`]
//! supplied by the caller, who owns its lifetime and decides how to render
//! or forward it.

/// Presentation hint for a log entry; frontends map it to colors or levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    /// Neutral narration.
    Info,
    /// Something went well for the acting side.
    Success,
    /// A rejected or degraded action.
    Warning,
    /// Damage, defeat.
    Danger,
    /// AI and engine diagnostics.
    Debug,
}

/// A single line in the battle log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub tone: Tone,
    pub message: String,
}

impl LogEntry {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}

/// Append-only message channel the combat core writes to.
pub trait BattleLog {
    fn record(&mut self, entry: LogEntry);
}

/// Helpers usable through `&mut dyn BattleLog`.
pub(crate) trait LogExt {
    fn emit(&mut self, tone: Tone, message: String);
}

impl LogExt for dyn BattleLog + '_ {
    fn emit(&mut self, tone: Tone, message: String) {
        self.record(LogEntry::new(tone, message));
    }
}

impl BattleLog for Vec<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl BattleLog for NullLog {
    fn record(&mut self, _entry: LogEntry) {}
}
