//! Die faces and the single token normalization function.
//!
//! Callers hand the engine raw face tokens ("m", "Save", "frost_breath").
//! [`FaceResult::parse`] is the only place those strings are interpreted;
//! everything downstream works on the closed [`FaceResult`] enum.

use core::str::FromStr;

use crate::error::{ErrorSeverity, RollError};
use crate::model::ResultType;
use crate::registry::{EffectRegistry, SaiKind};

/// One rolled die face after normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaceResult {
    Melee,
    Missile,
    Magic,
    Save,
    Maneuver,
    /// Identification face: counts as `health` results of the roll's ID type.
    Id,
    /// An unqualified "SAI" face. The engine cannot know which icon it was.
    GenericSai,
    NamedSai(SaiKind),
}

impl FaceResult {
    /// Normalizes a face token.
    ///
    /// Accepts the short codes `m`, `mi`, `mg`, `s`, `ma`, their long forms,
    /// `id`, `sai`, and any effect-registry name. Matching ignores case,
    /// surrounding whitespace, and the difference between spaces, `_` and `-`.
    pub fn parse(token: &str) -> Result<Self, FaceParseError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(FaceParseError::Empty);
        }

        let face = match trimmed.to_ascii_lowercase().as_str() {
            "m" | "melee" => Self::Melee,
            "mi" | "missile" => Self::Missile,
            "mg" | "magic" => Self::Magic,
            "s" | "save" => Self::Save,
            "ma" | "maneuver" => Self::Maneuver,
            "id" => Self::Id,
            "sai" => Self::GenericSai,
            _ => {
                let spec = EffectRegistry::lookup(trimmed).ok_or_else(|| {
                    FaceParseError::Unknown {
                        token: trimmed.to_string(),
                    }
                })?;
                Self::NamedSai(spec.kind)
            }
        };
        Ok(face)
    }

    /// Base result type for plain faces, `None` for ID and icon faces.
    pub const fn result_type(self) -> Option<ResultType> {
        match self {
            Self::Melee => Some(ResultType::Melee),
            Self::Missile => Some(ResultType::Missile),
            Self::Magic => Some(ResultType::Magic),
            Self::Save => Some(ResultType::Save),
            Self::Maneuver => Some(ResultType::Maneuver),
            Self::Id | Self::GenericSai | Self::NamedSai(_) => None,
        }
    }

    pub const fn is_sai(self) -> bool {
        matches!(self, Self::GenericSai | Self::NamedSai(_))
    }
}

impl FromStr for FaceResult {
    type Err = FaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Face token could not be normalized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FaceParseError {
    #[error("empty face token")]
    Empty,

    #[error("unrecognized face token '{token}'")]
    Unknown { token: String },
}

impl RollError for FaceParseError {
    fn severity(&self) -> ErrorSeverity {
        // The engine drops the token and records a note.
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "FACE_EMPTY_TOKEN",
            Self::Unknown { .. } => "FACE_UNKNOWN_TOKEN",
        }
    }
}
