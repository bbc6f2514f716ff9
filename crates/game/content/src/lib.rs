//! Data-driven battle content and loaders.
//!
//! This crate reads the files an encounter is assembled from:
//! - Battle rules (data-driven via TOML)
//! - Combatant rosters (data-driven via RON)
//!
//! Content is consumed when an encounter is built and never appears in
//! battle state. All loaders deserialize `battle-core` types directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Roster, RosterLoader};
