//! Species ability table loader.

use std::path::Path;

use roll_core::{SpeciesAbilityTable, SpeciesRule};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Species rule file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRuleFile {
    /// Start from the printed rules and append `rules`, instead of replacing them.
    #[serde(default)]
    pub extend_standard: bool,
    pub rules: Vec<SpeciesRule>,
}

/// Loader for species ability tables from RON files.
pub struct SpeciesRuleLoader;

impl SpeciesRuleLoader {
    /// Load a species ability table from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a SpeciesRuleFile
    pub fn load(path: &Path) -> LoadResult<SpeciesAbilityTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load species rules {}: {}", path.display(), e))
    }

    /// Parse RON text into a table.
    pub fn parse(content: &str) -> LoadResult<SpeciesAbilityTable> {
        let file: SpeciesRuleFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species rules RON: {}", e))?;

        let mut rules = if file.extend_standard {
            SpeciesAbilityTable::standard().rules().to_vec()
        } else {
            Vec::new()
        };
        for rule in file.rules {
            if rules.iter().any(|existing| existing.name == rule.name) {
                anyhow::bail!("Duplicate species rule '{}'", rule.name);
            }
            rules.push(rule);
        }

        Ok(SpeciesAbilityTable::new(rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roll_core::{Elements, ResultType, RoleFilter, RollMask, Species, SpeciesEffect};

    const RULES: &str = r#"
        (
            rules: [
                (
                    name: "Dwarven Might",
                    species: "Dwarves",
                    categories: "MELEE",
                    role: Defender,
                    required: "FIRE",
                    effect: CountsAs(source: Save, target: Melee),
                ),
                (
                    name: "Terrain Harmony",
                    species: "Amazons",
                    categories: "MAGIC",
                    role: Attacker,
                    effect: Advisory(
                        source: Some(Magic),
                        note: "magic results may be of any element present at the terrain",
                    ),
                ),
            ],
        )
    "#;

    #[test]
    fn parses_counts_as_and_advisory_rows() {
        let table = SpeciesRuleLoader::parse(RULES).unwrap();
        let rules = table.rules();
        assert_eq!(rules.len(), 2);

        let might = &rules[0];
        assert_eq!(might.species, Species::Dwarves);
        assert_eq!(might.categories, RollMask::MELEE);
        assert_eq!(might.role, RoleFilter::Defender);
        assert_eq!(might.required, Elements::FIRE);
        assert_eq!(
            might.effect,
            SpeciesEffect::CountsAs {
                source: ResultType::Save,
                target: ResultType::Melee,
            }
        );

        assert_eq!(rules[1].required, Elements::empty());
    }

    #[test]
    fn extending_the_standard_table_rejects_duplicates() {
        let err = SpeciesRuleLoader::parse(
            r#"(
                extend_standard: true,
                rules: [(
                    name: "Dwarven Might",
                    species: "Dwarves",
                    categories: "MELEE",
                    effect: CountsAs(source: Save, target: Melee),
                )],
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate species rule 'Dwarven Might'"));
    }

    #[test]
    fn extending_adds_new_rows() {
        let table = SpeciesRuleLoader::parse(
            r#"(
                extend_standard: true,
                rules: [(
                    name: "Mire Walk",
                    species: "Swamp Stalkers",
                    categories: "MANEUVER",
                    required: "WATER",
                    effect: CountsAs(source: Save, target: Maneuver),
                )],
            )"#,
        )
        .unwrap();
        let standard = SpeciesAbilityTable::standard().rules().len();
        assert_eq!(table.rules().len(), standard + 1);
        assert_eq!(table.rules()[standard].role, RoleFilter::Any);
    }
}
