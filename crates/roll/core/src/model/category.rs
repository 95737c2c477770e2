//! Roll categories, result types, and the roles an army can roll in.

use bitflags::bitflags;

/// Kind of roll being resolved. Drives which rules apply.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RollCategory {
    Melee,
    Missile,
    Magic,
    Save,
    Maneuver,
    DragonAttack,
}

impl RollCategory {
    /// The result type this roll is "rolling for".
    ///
    /// Effects that generate "results of the appropriate type" use this, and
    /// so does the ID bonus for attack rolls. A dragon attack is fought with
    /// melee results.
    pub const fn primary_result(self) -> ResultType {
        match self {
            Self::Melee | Self::DragonAttack => ResultType::Melee,
            Self::Missile => ResultType::Missile,
            Self::Magic => ResultType::Magic,
            Self::Save => ResultType::Save,
            Self::Maneuver => ResultType::Maneuver,
        }
    }

    /// Result type that ID faces count as during this roll.
    ///
    /// Attack rolls count ID as the attack type; every other roll counts it
    /// as saves.
    pub const fn id_result(self) -> ResultType {
        match self {
            Self::Melee => ResultType::Melee,
            Self::Missile => ResultType::Missile,
            Self::Magic => ResultType::Magic,
            Self::Save | Self::Maneuver | Self::DragonAttack => ResultType::Save,
        }
    }

    /// Single-bit mask for this category.
    pub const fn mask(self) -> RollMask {
        match self {
            Self::Melee => RollMask::MELEE,
            Self::Missile => RollMask::MISSILE,
            Self::Magic => RollMask::MAGIC,
            Self::Save => RollMask::SAVE,
            Self::Maneuver => RollMask::MANEUVER,
            Self::DragonAttack => RollMask::DRAGON_ATTACK,
        }
    }
}

bitflags! {
    /// Set of roll categories an effect or rule applies to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct RollMask: u8 {
        const MELEE         = 1 << 0;
        const MISSILE       = 1 << 1;
        const MAGIC         = 1 << 2;
        const SAVE          = 1 << 3;
        const MANEUVER      = 1 << 4;
        const DRAGON_ATTACK = 1 << 5;

        const ANY = Self::MELEE.bits()
            | Self::MISSILE.bits()
            | Self::MAGIC.bits()
            | Self::SAVE.bits()
            | Self::MANEUVER.bits()
            | Self::DRAGON_ATTACK.bits();
        const NON_MANEUVER = Self::ANY.bits() & !Self::MANEUVER.bits();
    }
}

impl RollMask {
    /// Returns true if the mask includes `category`.
    pub const fn includes(self, category: RollCategory) -> bool {
        self.contains(category.mask())
    }
}

/// One of the five result categories a die face can count towards.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResultType {
    Melee,
    Missile,
    Magic,
    Save,
    Maneuver,
}

impl ResultType {
    /// All result types in tally order.
    pub const ALL: [ResultType; 5] = [
        ResultType::Melee,
        ResultType::Missile,
        ResultType::Magic,
        ResultType::Save,
        ResultType::Maneuver,
    ];

    /// Position of this type inside a [`Tally`](crate::pipeline::Tally).
    pub const fn index(self) -> usize {
        match self {
            Self::Melee => 0,
            Self::Missile => 1,
            Self::Magic => 2,
            Self::Save => 3,
            Self::Maneuver => 4,
        }
    }

    pub const fn mask(self) -> ResultMask {
        match self {
            Self::Melee => ResultMask::MELEE,
            Self::Missile => ResultMask::MISSILE,
            Self::Magic => ResultMask::MAGIC,
            Self::Save => ResultMask::SAVE,
            Self::Maneuver => ResultMask::MANEUVER,
        }
    }
}

bitflags! {
    /// Set of result types a modifier targets.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ResultMask: u8 {
        const MELEE    = 1 << 0;
        const MISSILE  = 1 << 1;
        const MAGIC    = 1 << 2;
        const SAVE     = 1 << 3;
        const MANEUVER = 1 << 4;

        const ALL = Self::MELEE.bits()
            | Self::MISSILE.bits()
            | Self::MAGIC.bits()
            | Self::SAVE.bits()
            | Self::MANEUVER.bits();
        const NON_MANEUVER = Self::ALL.bits() & !Self::MANEUVER.bits();
    }
}

impl ResultMask {
    /// Iterates the result types contained in this mask, in tally order.
    pub fn types(self) -> impl Iterator<Item = ResultType> {
        ResultType::ALL
            .into_iter()
            .filter(move |ty| self.contains(ty.mask()))
    }
}

impl From<ResultType> for ResultMask {
    fn from(ty: ResultType) -> Self {
        ty.mask()
    }
}

/// Which side of the action the rolling army is on.
///
/// A defender rolling melee is counter-attacking; save rolls are always made
/// by the defender of the preceding attack.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    pub const fn is_attacker(self) -> bool {
        matches!(self, Self::Attacker)
    }
}

/// Role condition attached to registry entries and species rules.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoleFilter {
    #[default]
    Any,
    Attacker,
    Defender,
}

impl RoleFilter {
    pub const fn allows(self, role: Role) -> bool {
        match self {
            Self::Any => true,
            Self::Attacker => matches!(role, Role::Attacker),
            Self::Defender => matches!(role, Role::Defender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!(RollCategory::from_str("MELEE"), Ok(RollCategory::Melee));
        assert_eq!(
            RollCategory::from_str("dragon_attack"),
            Ok(RollCategory::DragonAttack)
        );
        assert!(RollCategory::from_str("charge").is_err());
    }

    #[test]
    fn named_masks() {
        assert!(RollMask::NON_MANEUVER.includes(RollCategory::Save));
        assert!(!RollMask::NON_MANEUVER.includes(RollCategory::Maneuver));
        assert!(RollMask::ANY.includes(RollCategory::DragonAttack));
        let types: Vec<_> = ResultMask::NON_MANEUVER.types().collect();
        assert_eq!(types.len(), 4);
        assert!(!types.contains(&ResultType::Maneuver));
    }

    #[test]
    fn id_results_follow_the_roll() {
        assert_eq!(RollCategory::Magic.id_result(), ResultType::Magic);
        assert_eq!(RollCategory::Maneuver.id_result(), ResultType::Save);
        assert_eq!(RollCategory::DragonAttack.id_result(), ResultType::Save);
        assert_eq!(RollCategory::DragonAttack.primary_result(), ResultType::Melee);
    }
}
