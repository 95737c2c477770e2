//! Deterministic roll resolution for a dice-combat wargame.
//!
//! `roll-core` turns the faces an army rolled into final melee, missile,
//! magic, save and maneuver totals. Icon effects, die-size scaling, ID
//! bonuses, species abilities and graveyard-dependent abilities are applied
//! through a fixed ten-step [`pipeline`]; every call to
//! [`RollEngine::resolve`] returns one [`CombatRollResult`] together with its
//! audit log. The engine does not roll dice, load rosters or decide when a
//! roll happens.
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod face;
pub mod graveyard;
pub mod model;
pub mod modifier;
pub mod pipeline;
pub mod registry;
pub mod request;
pub mod result;
pub mod scaling;
pub mod species;
pub mod targeting;

pub use config::{ConfigError, EngineConfig, GraveyardCaps, ScalingConfig};
pub use engine::RollEngine;
pub use env::{GraveyardOracle, GraveyardSnapshot, PlayerGraveyard, UnitRoster};
pub use error::{ErrorSeverity, RollError};
pub use face::{FaceParseError, FaceResult};
pub use graveyard::{GraveyardAbility, GraveyardResolver, count_dead};
pub use model::{
    DieClass, Elements, ResultMask, ResultType, Role, RoleFilter, RollCategory, RollMask, Species,
    TerrainContext, Unit,
};
pub use modifier::{Modifier, ModifierKind};
pub use pipeline::{ModifierStage, Tally, apply_stage};
pub use registry::{EffectClass, EffectRegistry, EffectSpec, RerollRule, SaiKind};
pub use request::{RollRequest, UnitFaces};
pub use result::{
    AbilityNotice, CombatRollResult, DelayedEffect, DelayedEffectType, OpponentDamage, RawCounts,
    RerollEffect,
};
pub use scaling::x_value;
pub use species::{SpeciesAbilityTable, SpeciesEffect, SpeciesRule};
pub use targeting::{
    TargetCriteria, TargetKind, TargetSide, TargetingRequest, TargetingResolver, TargetingResult,
};
