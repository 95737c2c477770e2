//! Input of a single roll.

use crate::model::{Role, RollCategory, TerrainContext, Unit};
use crate::modifier::Modifier;
use crate::result::DelayedEffect;

/// Raw face tokens rolled by one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitFaces {
    pub unit: String,
    pub faces: Vec<String>,
}

/// Everything the engine needs to resolve one roll.
///
/// Face tokens stay raw here; they are normalized during the first pipeline
/// step so that rejected tokens surface as notes on the result.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollRequest {
    pub category: RollCategory,
    pub role: Role,
    pub faces: Vec<UnitFaces>,
    /// Roster of the rolling army.
    #[cfg_attr(feature = "serde", serde(default))]
    pub army: Vec<Unit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub terrain: TerrainContext,
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub opponent: Option<String>,
    /// Effects emitted by earlier rolls that apply to this one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub carried_effects: Vec<DelayedEffect>,
    /// Modifiers from outside the dice (spells, terrain rules).
    #[cfg_attr(feature = "serde", serde(default))]
    pub army_modifiers: Vec<Modifier>,
    /// For save and counter-attack rolls, the roll being answered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub responding_to: Option<RollCategory>,
}

impl RollRequest {
    pub fn new(category: RollCategory, role: Role) -> Self {
        Self {
            category,
            role,
            faces: Vec::new(),
            army: Vec::new(),
            terrain: TerrainContext::default(),
            player: None,
            opponent: None,
            carried_effects: Vec::new(),
            army_modifiers: Vec::new(),
            responding_to: None,
        }
    }

    /// Builder: add a unit to the roster together with the faces it rolled.
    #[must_use]
    pub fn with_roll<I, S>(mut self, unit: Unit, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faces.push(UnitFaces {
            unit: unit.name.clone(),
            faces: faces.into_iter().map(Into::into).collect(),
        });
        self.army.push(unit);
        self
    }

    /// Builder: faces for a unit by name only. The unit need not be in the roster.
    #[must_use]
    pub fn with_faces<I, S>(mut self, unit: impl Into<String>, faces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faces.push(UnitFaces {
            unit: unit.into(),
            faces: faces.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder: add a unit to the roster without faces.
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.army.push(unit);
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: TerrainContext) -> Self {
        self.terrain = terrain;
        self
    }

    #[must_use]
    pub fn with_players(mut self, player: impl Into<String>, opponent: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self.opponent = Some(opponent.into());
        self
    }

    #[must_use]
    pub fn with_carried(mut self, effects: impl IntoIterator<Item = DelayedEffect>) -> Self {
        self.carried_effects.extend(effects);
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.army_modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn responding_to(mut self, category: RollCategory) -> Self {
        self.responding_to = Some(category);
        self
    }
}
