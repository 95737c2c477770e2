//! Roll resolution facade.
//!
//! The [`RollEngine`] owns the configuration, the species ability table, the
//! optional graveyard collaborator and the turn-scoped targeting restriction
//! set. Resolving a roll is a pure function of the request and that state;
//! only targeting and turn changes mutate the engine.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigError, EngineConfig};
use crate::env::GraveyardOracle;
use crate::model::{TerrainContext, Unit};
use crate::pipeline::{self, PipelineContext};
use crate::request::RollRequest;
use crate::result::CombatRollResult;
use crate::species::SpeciesAbilityTable;
use crate::targeting::{TargetingRequest, TargetingResolver, TargetingResult};

/// Resolves rolls for one game.
///
/// # Lifecycle
///
/// 1. Construct once per game with [`RollEngine::new`], attaching collaborators
/// 2. Call [`RollEngine::begin_turn`] whenever a new turn starts
/// 3. Call [`RollEngine::resolve`] once per roll
/// 4. Resolve pending targeting requests with [`RollEngine::resolve_targeting`]
pub struct RollEngine {
    config: EngineConfig,
    species: SpeciesAbilityTable,
    graveyard: Option<Arc<dyn GraveyardOracle>>,
    targeting: TargetingResolver,
}

impl RollEngine {
    /// Creates an engine with the standard species table and no graveyard.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            species: SpeciesAbilityTable::standard(),
            graveyard: None,
            targeting: TargetingResolver::new(),
        }
    }

    /// Like [`RollEngine::new`], rejecting invalid configuration.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Builder: attach the dead-unit collaborator.
    #[must_use]
    pub fn with_graveyard(mut self, graveyard: Arc<dyn GraveyardOracle>) -> Self {
        self.graveyard = Some(graveyard);
        self
    }

    /// Builder: replace the species ability table.
    #[must_use]
    pub fn with_species_table(mut self, species: SpeciesAbilityTable) -> Self {
        self.species = species;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn species_table(&self) -> &SpeciesAbilityTable {
        &self.species
    }

    pub fn has_graveyard(&self) -> bool {
        self.graveyard.is_some()
    }

    /// Resolves one roll.
    pub fn resolve(&self, request: &RollRequest) -> CombatRollResult {
        debug!(
            target: "roll::engine",
            category = %request.category,
            role = %request.role,
            units = request.faces.len(),
            "resolving roll"
        );
        pipeline::run(PipelineContext {
            request,
            config: &self.config,
            species: &self.species,
            graveyard: self.graveyard.as_deref(),
            targeting: &self.targeting,
        })
    }

    /// Selects units for a pending targeting request.
    ///
    /// Exclusive (multiply/divide-class) requests update the restriction set.
    pub fn resolve_targeting(
        &mut self,
        request: &TargetingRequest,
        candidates: &[Unit],
        terrain: &TerrainContext,
    ) -> TargetingResult {
        self.targeting.process(request, candidates, terrain)
    }

    /// Starts a new turn: clears the multiply/divide restriction set.
    pub fn begin_turn(&mut self) {
        debug!(target: "roll::engine", "new turn");
        self.targeting.begin_turn();
    }

    /// True if `unit` was already affected by a multiply/divide effect this turn.
    pub fn is_restricted(&self, unit: &str) -> bool {
        self.targeting.is_restricted(unit)
    }
}

impl Default for RollEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl core::fmt::Debug for RollEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RollEngine")
            .field("config", &self.config)
            .field("species_rules", &self.species.rules().len())
            .field("graveyard", &self.graveyard.is_some())
            .field("targeting", &self.targeting)
            .finish()
    }
}
