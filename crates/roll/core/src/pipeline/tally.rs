use core::fmt;
use core::ops::{Index, IndexMut};

use crate::model::ResultType;

/// Per-result-type counts.
///
/// Counts are unsigned, so totals can never go negative; subtraction
/// saturates at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    pub melee: u32,
    pub missile: u32,
    pub magic: u32,
    pub save: u32,
    pub maneuver: u32,
}

impl Tally {
    pub const fn new() -> Self {
        Self {
            melee: 0,
            missile: 0,
            magic: 0,
            save: 0,
            maneuver: 0,
        }
    }

    pub fn get(&self, ty: ResultType) -> u32 {
        self[ty]
    }

    pub fn add(&mut self, ty: ResultType, amount: u32) {
        self[ty] = self[ty].saturating_add(amount);
    }

    pub fn subtract(&mut self, ty: ResultType, amount: u32) {
        self[ty] = self[ty].saturating_sub(amount);
    }

    /// Adds every count of `other`.
    pub fn absorb(&mut self, other: &Tally) {
        for ty in ResultType::ALL {
            self.add(ty, other[ty]);
        }
    }

    /// `(type, count)` pairs in tally order.
    pub fn iter(&self) -> impl Iterator<Item = (ResultType, u32)> + '_ {
        ResultType::ALL.into_iter().map(|ty| (ty, self[ty]))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, count)| count).sum()
    }
}

impl Index<ResultType> for Tally {
    type Output = u32;

    fn index(&self, ty: ResultType) -> &u32 {
        match ty {
            ResultType::Melee => &self.melee,
            ResultType::Missile => &self.missile,
            ResultType::Magic => &self.magic,
            ResultType::Save => &self.save,
            ResultType::Maneuver => &self.maneuver,
        }
    }
}

impl IndexMut<ResultType> for Tally {
    fn index_mut(&mut self, ty: ResultType) -> &mut u32 {
        match ty {
            ResultType::Melee => &mut self.melee,
            ResultType::Missile => &mut self.missile,
            ResultType::Magic => &mut self.magic,
            ResultType::Save => &mut self.save,
            ResultType::Maneuver => &mut self.maneuver,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "melee {}, missile {}, magic {}, save {}, maneuver {}",
            self.melee, self.missile, self.magic, self.save, self.maneuver
        )
    }
}
