use std::collections::{BTreeMap, HashMap};

use crate::model::Unit;

/// Lookup of units by name.
pub trait UnitRoster {
    fn unit(&self, name: &str) -> Option<&Unit>;

    /// Iterates every unit in the roster.
    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_>;
}

impl UnitRoster for [Unit] {
    fn unit(&self, name: &str) -> Option<&Unit> {
        self.iter().find(|unit| unit.name == name)
    }

    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        Box::new(self.iter())
    }
}

impl UnitRoster for Vec<Unit> {
    fn unit(&self, name: &str) -> Option<&Unit> {
        self.as_slice().unit(name)
    }

    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        Box::new(self.iter())
    }
}

impl UnitRoster for BTreeMap<String, Unit> {
    fn unit(&self, name: &str) -> Option<&Unit> {
        self.get(name)
    }

    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        Box::new(self.values())
    }
}

impl<S: std::hash::BuildHasher> UnitRoster for HashMap<String, Unit, S> {
    fn unit(&self, name: &str) -> Option<&Unit> {
        self.get(name)
    }

    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        Box::new(self.values())
    }
}
