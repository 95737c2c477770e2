//! Content factory for building a roll engine from data files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use roll_core::{EngineConfig, GraveyardSnapshot, RollEngine, SpeciesAbilityTable};
use tracing::{debug, info};

use crate::loaders::{ConfigLoader, GraveyardLoader, LoadResult, SpeciesRuleLoader};

/// Content factory that loads rule data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml     (optional, defaults otherwise)
/// ├── species.ron     (optional, printed rules otherwise)
/// └── graveyard.ron   (optional, no graveyard otherwise)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const SPECIES_FILE: &'static str = "species.ron";
    pub const GRAVEYARD_FILE: &'static str = "graveyard.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the species table from `species.ron`, or the printed rules if absent.
    pub fn load_species(&self) -> LoadResult<SpeciesAbilityTable> {
        let path = self.data_dir.join(Self::SPECIES_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no species file, using printed rules");
            return Ok(SpeciesAbilityTable::standard());
        }
        SpeciesRuleLoader::load(&path)
    }

    /// Load the graveyard snapshot from `graveyard.ron`, if present.
    pub fn load_graveyard(&self) -> LoadResult<Option<GraveyardSnapshot>> {
        let path = self.data_dir.join(Self::GRAVEYARD_FILE);
        if !path.exists() {
            return Ok(None);
        }
        GraveyardLoader::load(&path).map(Some)
    }

    /// Builds an engine from everything in the data directory.
    pub fn build_engine(&self) -> LoadResult<RollEngine> {
        let config = self.load_config()?;
        let species = self.load_species()?;
        let graveyard = self.load_graveyard()?;

        info!(
            data_dir = %self.data_dir.display(),
            species_rules = species.rules().len(),
            graveyard = graveyard.is_some(),
            "roll engine content loaded"
        );

        let mut engine = RollEngine::try_new(config)?.with_species_table(species);
        if let Some(snapshot) = graveyard {
            engine = engine.with_graveyard(Arc::new(snapshot));
        }
        Ok(engine)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
