//! Engine configuration: tunable magnitudes and caps.

use crate::error::{ErrorSeverity, RollError};

/// Fixed X-values of non-standard die classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalingConfig {
    /// Large equipment and large dragonkin dice.
    pub large: u32,
    /// Monsters, artifacts, medallions, relics and champions.
    pub monster: u32,
}

impl ScalingConfig {
    pub const DEFAULT_LARGE: u32 = 3;
    pub const DEFAULT_MONSTER: u32 = 4;
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            large: Self::DEFAULT_LARGE,
            monster: Self::DEFAULT_MONSTER,
        }
    }
}

/// Dead-unit caps of the graveyard-dependent abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraveyardCaps {
    pub bone_magic: u32,
    pub magic_negation: u32,
    pub foul_stench: u32,
    pub cursed_bullets: u32,
}

impl Default for GraveyardCaps {
    fn default() -> Self {
        Self {
            bone_magic: 4,
            magic_negation: 5,
            foul_stench: 3,
            cursed_bullets: 3,
        }
    }
}

/// Engine configuration.
///
/// Every field has a default matching the printed rules, so a TOML file only
/// needs to list what it overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub scaling: ScalingConfig,

    /// Factor applied to ID bonuses when the roller controls the eighth face.
    pub id_eighth_face_multiplier: u32,

    pub graveyard: GraveyardCaps,

    /// Results subtracted from each roll of a withered army.
    pub wither_penalty: u32,
}

impl EngineConfig {
    pub const DEFAULT_ID_EIGHTH_FACE_MULTIPLIER: u32 = 2;
    pub const DEFAULT_WITHER_PENALTY: u32 = 3;

    pub fn new() -> Self {
        Self {
            scaling: ScalingConfig::default(),
            id_eighth_face_multiplier: Self::DEFAULT_ID_EIGHTH_FACE_MULTIPLIER,
            graveyard: GraveyardCaps::default(),
            wither_penalty: Self::DEFAULT_WITHER_PENALTY,
        }
    }

    /// Checks that no magnitude is zero.
    ///
    /// A zero scaling or cap would silently disable whole groups of rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("scaling.large", self.scaling.large),
            ("scaling.monster", self.scaling.monster),
            ("id_eighth_face_multiplier", self.id_eighth_face_multiplier),
            ("graveyard.bone_magic", self.graveyard.bone_magic),
            ("graveyard.magic_negation", self.graveyard.magic_negation),
            ("graveyard.foul_stench", self.graveyard.foul_stench),
            ("graveyard.cursed_bullets", self.graveyard.cursed_bullets),
            ("wither_penalty", self.wither_penalty),
        ];

        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::ZeroValue { field });
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Invalid engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration value '{field}' must be greater than zero")]
    ZeroValue { field: &'static str },
}

impl RollError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroValue { .. } => "CONFIG_ZERO_VALUE",
        }
    }
}
