//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive an encounter.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

use battle_core::{
    BattleConfig, BattleOutcome, BattlePhase, BattleSnapshot, Combatant, RoundReport, TurnEngine,
};

use crate::api::{ChoiceProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Stop [`Runtime::run`] with [`RuntimeError::RoundLimit`] after this
    /// many rounds. `None` runs until the battle resolves.
    pub max_rounds: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            max_rounds: None,
        }
    }
}

/// Main runtime that orchestrates one encounter.
///
/// Runtime owns the worker and the player provider; [`RuntimeHandle`] is the
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn ChoiceProvider>>,
    max_rounds: Option<u32>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Play a single round, starting the encounter first if needed.
    ///
    /// Fails with an engine error once the battle has resolved.
    pub async fn step(&mut self) -> Result<RoundReport> {
        let snapshot = self.prepare().await?;
        self.play(&snapshot).await
    }

    /// Run rounds until the battle resolves.
    pub async fn run(&mut self) -> Result<BattleOutcome> {
        loop {
            let snapshot = self.prepare().await?;
            if let BattlePhase::Resolved(outcome) = snapshot.phase {
                return Ok(outcome);
            }
            if let Some(limit) = self.max_rounds
                && snapshot.round >= limit
            {
                return Err(RuntimeError::RoundLimit { limit });
            }
            self.play(&snapshot).await?;
        }
    }

    pub fn set_player_provider(&mut self, provider: impl ChoiceProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully and wait for the worker to exit.
    ///
    /// Clones of the handle held elsewhere keep the worker alive until they
    /// are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }

    async fn prepare(&self) -> Result<BattleSnapshot> {
        let snapshot = self.handle.query_snapshot().await?;
        if snapshot.phase == BattlePhase::Init {
            debug!(target: "runtime", "Starting encounter");
            return self.handle.start().await;
        }
        Ok(snapshot)
    }

    async fn play(&self, snapshot: &BattleSnapshot) -> Result<RoundReport> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;
        let choice = provider.provide_choice(snapshot).await?;
        self.handle.play_round(choice).await
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    player: Option<Combatant>,
    enemy: Option<Combatant>,
    player_provider: Option<Box<dyn ChoiceProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            player: None,
            enemy: None,
            player_provider: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace only the battle rules, keeping channel settings.
    pub fn battle_config(mut self, battle_config: BattleConfig) -> Self {
        self.config.battle_config = battle_config;
        self
    }

    pub fn player(mut self, player: Combatant) -> Self {
        self.player = Some(player);
        self
    }

    pub fn enemy(mut self, enemy: Combatant) -> Self {
        self.enemy = Some(enemy);
        self
    }

    /// Set player choice provider (optional)
    pub fn player_provider(mut self, provider: impl ChoiceProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker on the current tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let player = self.player.ok_or(RuntimeError::MissingCombatant("player"))?;
        let enemy = self.enemy.ok_or(RuntimeError::MissingCombatant("enemy"))?;

        let engine = TurnEngine::new(player, enemy, self.config.battle_config.clone());

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = BattleWorker::new(engine, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            max_rounds: self.config.max_rounds,
            worker_handle,
        })
    }
}
