//! Elements and the terrain context a roll happens at.

use bitflags::bitflags;

bitflags! {
    /// Set of magical elements carried by a unit or a terrain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct Elements: u8 {
        const AIR   = 1 << 0;
        const DEATH = 1 << 1;
        const EARTH = 1 << 2;
        const FIRE  = 1 << 3;
        const WATER = 1 << 4;
    }
}

impl Elements {
    /// Parses a single element name ("fire", "Water", ...).
    ///
    /// Colour aliases used on terrain cards are accepted as well.
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "air" | "blue" => Some(Self::AIR),
            "death" | "black" => Some(Self::DEATH),
            "earth" | "yellow" => Some(Self::EARTH),
            "fire" | "red" => Some(Self::FIRE),
            "water" | "green" => Some(Self::WATER),
            _ => None,
        }
    }

    /// Builds a set from element names, ignoring unknown ones.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .filter_map(Self::parse_name)
            .fold(Self::empty(), |acc, element| acc | element)
    }

    /// Lower-case names of the contained elements, in flag order.
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "AIR" => "air",
                "DEATH" => "death",
                "EARTH" => "earth",
                "FIRE" => "fire",
                _ => "water",
            })
            .collect()
    }
}

/// Terrain the roll happens at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainContext {
    /// Up to two elements (one for death-aligned terrains).
    pub elements: Elements,

    /// The rolling player controls the terrain's eighth face, doubling ID bonuses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub eighth_face_controlled_by_roller: bool,
}

impl TerrainContext {
    pub const fn new(elements: Elements) -> Self {
        Self {
            elements,
            eighth_face_controlled_by_roller: false,
        }
    }

    /// Builder: mark the eighth face as controlled by the roller.
    #[must_use]
    pub const fn with_eighth_face(mut self, controlled: bool) -> Self {
        self.eighth_face_controlled_by_roller = controlled;
        self
    }

    /// True if every element in `required` is present at this terrain.
    pub const fn has_all(&self, required: Elements) -> bool {
        self.elements.contains(required)
    }
}
