//! Battle log sink that forwards narration to `tracing` and the event bus.

use battle_core::{BattleLog, LogEntry, Tone};
use tracing::{debug, info, warn};

use crate::events::{Event, EventBus, LogEvent};

/// [`BattleLog`] used by the battle worker.
///
/// Every entry is emitted under the `battle::log` target at a level derived
/// from its tone and then published on [`crate::Topic::Log`].
pub struct TracingLog {
    bus: EventBus,
    round: u32,
}

impl TracingLog {
    pub fn new(bus: EventBus) -> Self {
        Self { bus, round: 0 }
    }

    /// Tags subsequent entries with `round`.
    pub fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    pub fn round(&self) -> u32 {
        self.round
    }
}

impl BattleLog for TracingLog {
    fn record(&mut self, entry: LogEntry) {
        let round = self.round;
        match entry.tone {
            Tone::Debug => debug!(target: "battle::log", round, "{}", entry.message),
            Tone::Warning => warn!(target: "battle::log", round, "{}", entry.message),
            Tone::Info | Tone::Success | Tone::Danger => {
                info!(target: "battle::log", round, tone = %entry.tone, "{}", entry.message)
            }
        }
        self.bus.publish(Event::Log(LogEvent { round, entry }));
    }
}
