//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and engine misuse so clients can bubble
//! them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::EngineError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player choice provider not set")]
    ProviderNotSet,

    #[error("player choice provider closed: {0}")]
    ProviderClosed(String),

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("runtime requires a {0} combatant before building")]
    MissingCombatant(&'static str),

    #[error("battle still undecided after {limit} rounds")]
    RoundLimit { limit: u32 },
}
