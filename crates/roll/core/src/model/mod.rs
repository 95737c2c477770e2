//! Plain data types shared by every component of the engine.
mod category;
mod terrain;
mod unit;

pub use category::{ResultMask, ResultType, Role, RoleFilter, RollCategory, RollMask};
pub use terrain::{Elements, TerrainContext};
pub use unit::{DieClass, Species, Unit};
