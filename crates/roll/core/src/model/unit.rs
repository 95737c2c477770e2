//! Units as the engine sees them: read-only roster records.

use core::fmt;

use super::terrain::Elements;

/// Species a unit belongs to.
///
/// Known species parse from their card name ("Coral Elves") or snake case
/// ("coral_elves"), case-insensitively. Anything else is kept verbatim in
/// [`Species::Other`] so rosters from newer editions still resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::EnumString)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(ascii_case_insensitive)]
pub enum Species {
    #[strum(serialize = "Amazons", serialize = "amazons")]
    Amazons,
    #[strum(serialize = "Coral Elves", serialize = "coral_elves")]
    CoralElves,
    #[strum(serialize = "Dragonkin", serialize = "dragonkin")]
    Dragonkin,
    #[strum(serialize = "Dwarves", serialize = "dwarves")]
    Dwarves,
    #[strum(serialize = "Eldarim", serialize = "eldarim")]
    Eldarim,
    #[strum(serialize = "Feral", serialize = "feral")]
    Feral,
    #[strum(serialize = "Firewalkers", serialize = "firewalkers")]
    Firewalkers,
    #[strum(serialize = "Frostwings", serialize = "frostwings")]
    Frostwings,
    #[strum(serialize = "Goblins", serialize = "goblins")]
    Goblins,
    #[strum(serialize = "Lava Elves", serialize = "lava_elves")]
    LavaElves,
    #[strum(serialize = "Scalders", serialize = "scalders")]
    Scalders,
    #[strum(serialize = "Swamp Stalkers", serialize = "swamp_stalkers")]
    SwampStalkers,
    #[strum(serialize = "Treefolk", serialize = "treefolk")]
    Treefolk,
    #[strum(serialize = "Undead", serialize = "undead")]
    Undead,
    #[strum(default)]
    Other(String),
}

impl Species {
    /// Card name of the species.
    pub fn name(&self) -> &str {
        match self {
            Self::Amazons => "Amazons",
            Self::CoralElves => "Coral Elves",
            Self::Dragonkin => "Dragonkin",
            Self::Dwarves => "Dwarves",
            Self::Eldarim => "Eldarim",
            Self::Feral => "Feral",
            Self::Firewalkers => "Firewalkers",
            Self::Frostwings => "Frostwings",
            Self::Goblins => "Goblins",
            Self::LavaElves => "Lava Elves",
            Self::Scalders => "Scalders",
            Self::SwampStalkers => "Swamp Stalkers",
            Self::Treefolk => "Treefolk",
            Self::Undead => "Undead",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Species {
    fn from(value: String) -> Self {
        // The default variant makes parsing infallible.
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<Species> for String {
    fn from(value: Species) -> Self {
        value.name().to_string()
    }
}

/// Physical class of the die a unit is represented by.
///
/// Determines how large the effect of a special-action icon is (see
/// [`crate::scaling`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, strum::EnumString)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DieClass {
    #[default]
    Standard,
    LargeEquipment,
    LargeDragonkin,
    Monster,
    Artifact,
    Medallion,
    Relic,
    Champion,
    /// Unrecognized class name, kept verbatim.
    #[strum(default)]
    Other(String),
}

impl DieClass {
    pub fn name(&self) -> &str {
        match self {
            Self::Standard => "standard",
            Self::LargeEquipment => "large_equipment",
            Self::LargeDragonkin => "large_dragonkin",
            Self::Monster => "monster",
            Self::Artifact => "artifact",
            Self::Medallion => "medallion",
            Self::Relic => "relic",
            Self::Champion => "champion",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for DieClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for DieClass {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<DieClass> for String {
    fn from(value: DieClass) -> Self {
        value.name().to_string()
    }
}

/// A unit in an army roster. The engine never mutates units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub name: String,
    pub species: Species,
    /// Health (size) of the unit, at least 1.
    pub health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Elements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub die_class: DieClass,
}

impl Unit {
    /// Creates a standard-die unit with no elements.
    ///
    /// A health of 0 is raised to 1.
    pub fn new(name: impl Into<String>, species: impl Into<Species>, health: u32) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            health: health.max(1),
            elements: Elements::empty(),
            die_class: DieClass::Standard,
        }
    }

    /// Builder: set the die class.
    #[must_use]
    pub fn with_die_class(mut self, die_class: DieClass) -> Self {
        self.die_class = die_class;
        self
    }

    /// Builder: set the unit's elements.
    #[must_use]
    pub fn with_elements(mut self, elements: Elements) -> Self {
        self.elements = elements;
        self
    }
}
