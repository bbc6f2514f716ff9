//! Encounter environment: sources of non-state input to the rules.
//!
//! The only environmental input the combat rules consume is randomness.
pub mod rng;

pub use rng::{BattleRng, PcgRng, RngOracle, compute_seed};
