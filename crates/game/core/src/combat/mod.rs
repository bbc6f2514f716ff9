//! Combat arithmetic.
//!
//! Pure functions shared by the basic attack and card resolution:
//!
//! - `mitigate`: direct damage reduced by defense, floored at zero
//! - `scaled_attack`: attack power scaled by the speed factor
//! - `resolve_attack`: one physical strike applied to a defender

pub mod damage;
pub mod result;

pub use damage::{mitigate, scaled_attack};
pub use result::{AttackResult, resolve_attack};
