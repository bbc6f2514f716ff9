//! Deterministic card-battle combat rules.
//!
//! `battle-core` defines the entity and effect model, the card catalog, the
//! AI policies and the turn engine, and exposes pure synchronous APIs that the
//! runtime and tools build on. Every state change in an encounter flows
//! through [`engine::TurnEngine`]; human-readable narration goes to an
//! injected [`log::BattleLog`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod state;

pub use action::{Action, Card, CardEffect, CardKind, CardOutcome, CardTarget, DamageRoll};
pub use ai::{AiEvent, AiPlan, AiPolicy, AiStep, AiTurn};
pub use config::BattleConfig;
pub use engine::{
    BattleOutcome, BattlePhase, BattleSnapshot, ChoiceProvider, EngineError, PlayerChoice,
    PlayerResult, PlayerTurn, Reward, RoundReport, TickReport, TurnEngine,
};
pub use env::{BattleRng, PcgRng, RngOracle};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use log::{BattleLog, LogEntry, NullLog, Tone};
pub use state::{
    ActiveEffect, Archetype, AttackReport, Combatant, CombatantId, CombatantTemplate, Deck,
    EffectKind, EffectTick, Inventory, Item, ItemEffect, SpeedModifier, StatEntity, StatusEffects,
};
