//! Async orchestration for card battles.
//!
//! This crate wraps the synchronous [`battle_core::TurnEngine`] in a
//! single-owner worker task, sources player choices through async providers,
//! and publishes round reports and narration on a topic-based event bus.
//! Consumers embed [`Runtime`] to drive an encounter and interact with it
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`log`] bridges the core battle log into `tracing` and the bus
//! - `workers` keeps the battle worker internal to the crate
pub mod api;
pub mod events;
pub mod log;
pub mod runtime;

mod workers;

pub use api::{
    AlwaysAttackProvider, ChoiceProvider, Result, RuntimeError, RuntimeHandle,
    ScriptedChoiceProvider,
};
pub use events::{BattleEvent, Event, EventBus, LogEvent, Topic};
pub use log::TracingLog;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
