//! Graveyard snapshot loader.

use std::path::Path;

use roll_core::GraveyardSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for dead-unit snapshots from RON files.
pub struct GraveyardLoader;

impl GraveyardLoader {
    /// Load a graveyard snapshot from a RON file.
    pub fn load(path: &Path) -> LoadResult<GraveyardSnapshot> {
        let content = read_file(path)?;
        let snapshot: GraveyardSnapshot = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse graveyard RON {}: {}", path.display(), e)
        })?;
        Ok(snapshot)
    }
}
