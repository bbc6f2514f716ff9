//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! playing rounds or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleSnapshot, PlayerChoice, RoundReport};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Start the encounter and return the opening snapshot.
    pub async fn start(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Start { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Resolve one round with the player's choice.
    ///
    /// Rounds from concurrent callers are applied one at a time in arrival
    /// order.
    pub async fn play_round(&self, choice: PlayerChoice) -> Result<RoundReport> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::PlayRound {
            choice,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::QuerySnapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - encounter start, round reports, resolution
    /// - `Topic::Log` - battle log narration
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
