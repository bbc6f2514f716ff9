//! Battle worker that owns the authoritative [`battle_core::TurnEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], resolves rounds one at a
//! time, and publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use battle_core::{BattleSnapshot, GameError, PlayerChoice, PlayerResult, RoundReport, TurnEngine};

use crate::api::Result;
use crate::events::{BattleEvent, Event, EventBus};
use crate::log::TracingLog;

/// Commands that can be sent to the battle worker
pub enum Command {
    /// Start the encounter; replies with the opening snapshot.
    Start {
        reply: oneshot::Sender<Result<BattleSnapshot>>,
    },
    /// Resolve one round with the player's choice.
    PlayRound {
        choice: PlayerChoice,
        reply: oneshot::Sender<Result<RoundReport>>,
    },
    /// Query the current battle state (read-only).
    QuerySnapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Background task that processes battle commands.
///
/// The worker is the only owner of the engine, so rounds never interleave
/// no matter how many handles issue commands.
pub struct BattleWorker {
    engine: TurnEngine,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    log: TracingLog,
}

impl BattleWorker {
    pub fn new(
        engine: TurnEngine,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            player = engine.player().name(),
            enemy = engine.enemy().name(),
            seed = engine.config().seed,
            "BattleWorker initialized"
        );
        let log = TracingLog::new(event_bus.clone());
        Self {
            engine,
            command_rx,
            event_bus,
            log,
        }
    }

    /// Main worker loop. Exits once every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "BattleWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result = self.handle_start();
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::PlayRound { choice, reply } => {
                let result = self.handle_round(choice);
                if reply.send(result).is_err() {
                    debug!("PlayRound reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.engine.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_start(&mut self) -> Result<BattleSnapshot> {
        self.log.set_round(0);
        self.engine
            .start(&mut self.log)
            .inspect_err(|error| report_rejection(error, "Start rejected"))?;

        let snapshot = self.engine.snapshot();
        self.event_bus.publish(Event::Battle(BattleEvent::Started {
            snapshot: Box::new(snapshot.clone()),
        }));
        if let Some(outcome) = self.engine.outcome() {
            self.event_bus.publish(Event::Battle(BattleEvent::Resolved {
                outcome,
                round: 0,
                reward: None,
            }));
        }
        Ok(snapshot)
    }

    fn handle_round(&mut self, choice: PlayerChoice) -> Result<RoundReport> {
        self.log.set_round(self.engine.round() + 1);
        let report = self
            .engine
            .update(choice, &mut self.log)
            .inspect_err(|error| report_rejection(error, "Round rejected"))?;
        if let PlayerResult::Rejected(error) = &report.player.result {
            report_rejection(error, "Player action rejected");
        }

        debug!(
            target: "runtime::worker",
            round = report.round,
            phases = report.phases.len(),
            player_hp = self.engine.player().entity.health(),
            enemy_hp = self.engine.enemy().entity.health(),
            "Round resolved"
        );

        self.event_bus.publish(Event::Battle(BattleEvent::RoundCompleted {
            report: Box::new(report.clone()),
        }));
        if let Some(outcome) = report.outcome {
            info!(target: "runtime::worker", %outcome, round = report.round, "Battle resolved");
            self.event_bus.publish(Event::Battle(BattleEvent::Resolved {
                outcome,
                round: report.round,
                reward: report.reward,
            }));
        }
        Ok(report)
    }
}

/// Engine misuse is a bug in the caller and warns; gameplay rejections are
/// ordinary and stay at debug.
fn report_rejection(error: &impl GameError, message: &str) {
    let severity = error.severity();
    if severity.is_internal() {
        warn!(
            target: "runtime::worker",
            code = error.error_code(),
            severity = severity.as_str(),
            %error,
            "{message}"
        );
    } else {
        debug!(
            target: "runtime::worker",
            code = error.error_code(),
            recoverable = severity.is_recoverable(),
            %error,
            "{message}"
        );
    }
}
