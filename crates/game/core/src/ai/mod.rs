//! Decision policies for AI-controlled combatants.
//!
//! Decision-making is split in two layers:
//!
//! 1. **Planning** ([`AiPolicy::plan`]): a pure function of the acting
//!    combatant, its target and the encounter RNG that yields an [`AiPlan`].
//!    Planning never mutates either side.
//! 2. **Execution** ([`take_turn`]): resolves each planned step in order and
//!    reports what happened as an [`AiTurn`].
//!
//! Policies never block or retry. A missing card degrades to the documented
//! fallback and is reported as a diagnostic.

pub mod execute;
pub mod policy;
pub mod types;

pub use execute::take_turn;
pub use policy::AiPolicy;
pub use types::{AiEvent, AiPlan, AiStep, AiTurn};
