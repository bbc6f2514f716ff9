//! Public runtime API surface.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{AlwaysAttackProvider, ChoiceProvider, ScriptedChoiceProvider};
