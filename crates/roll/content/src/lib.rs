//! Data-driven content for the roll engine.
//!
//! This crate reads the tunable parts of the rules from data files:
//! - Engine configuration: scaling magnitudes, caps, penalties (TOML)
//! - Species ability tables (RON)
//! - Graveyard snapshots for dead-unit abilities (RON)
//!
//! All loaders deserialize `roll-core` types directly through its `serde` feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, GraveyardLoader, LoadResult, SpeciesRuleLoader};
