//! Traits describing read-only data the engine consults but does not own.
//!
//! The engine never loads rosters or tracks dead units itself. Callers supply
//! a [`UnitRoster`] (the rolling army) with every request and may attach a
//! [`GraveyardOracle`] to the engine once at construction.
mod graveyard;
mod roster;

pub use graveyard::{GraveyardOracle, GraveyardSnapshot, PlayerGraveyard};
pub use roster::UnitRoster;
