//! Species abilities: conditional "counts as" conversions.
//!
//! Every row of a [`SpeciesAbilityTable`] is a self-contained rule: a species,
//! the roll categories and role it applies to, the terrain elements it needs,
//! and what it does. Rules are evaluated independently for each unit on each
//! roll, from that unit's own base faces. A conversion adds results; it never
//! removes the source results.

use tracing::trace;

use crate::model::{
    Elements, ResultType, Role, RoleFilter, RollCategory, RollMask, Species, TerrainContext, Unit,
};
use crate::modifier::Modifier;
use crate::pipeline::Tally;
use crate::result::AbilityNotice;

/// What a matching rule does.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeciesEffect {
    /// Each `source` result also counts as a `target` result.
    CountsAs {
        source: ResultType,
        target: ResultType,
    },
    /// Emits a notice only. With a `source`, the notice requires at least one
    /// result of that type and reports the count.
    Advisory {
        #[cfg_attr(feature = "serde", serde(default))]
        source: Option<ResultType>,
        note: String,
    },
}

/// One row of the species ability table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesRule {
    pub name: String,
    pub species: Species,
    pub categories: RollMask,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: RoleFilter,
    /// Elements that must all be present at the terrain.
    #[cfg_attr(feature = "serde", serde(default))]
    pub required: Elements,
    pub effect: SpeciesEffect,
}

impl SpeciesRule {
    pub fn matches(
        &self,
        unit: &Unit,
        category: RollCategory,
        role: Role,
        terrain: &TerrainContext,
    ) -> bool {
        unit.species == self.species
            && self.categories.includes(category)
            && self.role.allows(role)
            && terrain.has_all(self.required)
    }
}

/// Modifiers and notices produced by the species rules for one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeciesOutcome {
    pub modifiers: Vec<Modifier>,
    pub notices: Vec<AbilityNotice>,
}

/// The rule table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesAbilityTable {
    rules: Vec<SpeciesRule>,
}

impl SpeciesAbilityTable {
    pub fn new(rules: Vec<SpeciesRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SpeciesRule] {
        &self.rules
    }

    /// The printed species abilities.
    pub fn standard() -> Self {
        use ResultType::{Maneuver, Melee, Missile, Save};

        let counts_as = |name: &str,
                         species: Species,
                         categories: RollMask,
                         role: RoleFilter,
                         required: Elements,
                         source: ResultType,
                         target: ResultType| SpeciesRule {
            name: name.to_string(),
            species,
            categories,
            role,
            required,
            effect: SpeciesEffect::CountsAs { source, target },
        };

        Self::new(vec![
            counts_as(
                "Dwarven Might",
                Species::Dwarves,
                RollMask::MELEE,
                RoleFilter::Defender,
                Elements::FIRE,
                Save,
                Melee,
            ),
            counts_as(
                "Mountain Master",
                Species::Dwarves,
                RollMask::MANEUVER,
                RoleFilter::Any,
                Elements::EARTH,
                Melee,
                Maneuver,
            ),
            counts_as(
                "Swamp Master",
                Species::Goblins,
                RollMask::MANEUVER,
                RoleFilter::Any,
                Elements::EARTH,
                Melee,
                Maneuver,
            ),
            counts_as(
                "Stampede",
                Species::Feral,
                RollMask::MELEE,
                RoleFilter::Defender,
                Elements::EARTH | Elements::AIR,
                Maneuver,
                Melee,
            ),
            counts_as(
                "Flaming Shields",
                Species::Firewalkers,
                RollMask::MELEE,
                RoleFilter::Attacker,
                Elements::FIRE,
                Save,
                Melee,
            ),
            counts_as(
                "Coastal Dodge",
                Species::CoralElves,
                RollMask::SAVE | RollMask::MELEE | RollMask::MISSILE,
                RoleFilter::Defender,
                Elements::WATER,
                Maneuver,
                Save,
            ),
            counts_as(
                "Coral Elf Missile Saves",
                Species::CoralElves,
                RollMask::SAVE,
                RoleFilter::Defender,
                Elements::empty(),
                Missile,
                Save,
            ),
            counts_as(
                "Intangibility",
                Species::Scalders,
                RollMask::MISSILE,
                RoleFilter::Defender,
                Elements::WATER,
                Maneuver,
                Save,
            ),
            SpeciesRule {
                name: "Defensive Volley".to_string(),
                species: Species::CoralElves,
                categories: RollMask::MISSILE,
                role: RoleFilter::Defender,
                required: Elements::AIR,
                effect: SpeciesEffect::Advisory {
                    source: None,
                    note: "may counter-attack the missile attack with a missile roll".to_string(),
                },
            },
            SpeciesRule {
                name: "Terrain Harmony".to_string(),
                species: Species::Amazons,
                categories: RollMask::MAGIC,
                role: RoleFilter::Attacker,
                required: Elements::empty(),
                effect: SpeciesEffect::Advisory {
                    source: Some(ResultType::Magic),
                    note: "magic results may be of any element present at the terrain"
                        .to_string(),
                },
            },
        ])
    }

    /// Evaluates every rule against one unit's base faces.
    pub fn evaluate(
        &self,
        unit: &Unit,
        base: &Tally,
        category: RollCategory,
        role: Role,
        terrain: &TerrainContext,
    ) -> SpeciesOutcome {
        let mut outcome = SpeciesOutcome::default();

        for rule in self.rules.iter() {
            if !rule.matches(unit, category, role, terrain) {
                continue;
            }

            match &rule.effect {
                SpeciesEffect::CountsAs { source, target } => {
                    let count = base[*source];
                    if count == 0 {
                        trace!(
                            rule = %rule.name,
                            unit = %unit.name,
                            "no {source} results to convert"
                        );
                        continue;
                    }
                    outcome.modifiers.push(Modifier::counts_as(
                        count,
                        *target,
                        rule.name.clone(),
                        format!(
                            "{} {}: +{count} {target} ({source} counts as {target})",
                            unit.name, rule.name
                        ),
                    ));
                }
                SpeciesEffect::Advisory { source, note } => {
                    let description = match source {
                        Some(ty) if base[*ty] == 0 => continue,
                        Some(ty) => {
                            format!("{} {}: {} {ty} {note}", unit.name, rule.name, base[*ty])
                        }
                        None => format!("{} {}: {note}", unit.name, rule.name),
                    };
                    outcome.notices.push(AbilityNotice {
                        ability: rule.name.clone(),
                        unit: Some(unit.name.clone()),
                        description,
                    });
                }
            }
        }

        outcome
    }
}

impl Default for SpeciesAbilityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(melee: u32, missile: u32, save: u32, maneuver: u32) -> Tally {
        Tally {
            melee,
            missile,
            magic: 0,
            save,
            maneuver,
        }
    }

    #[test]
    fn dwarven_might_needs_fire_and_defence() {
        let table = SpeciesAbilityTable::standard();
        let dwarf = Unit::new("Axeman", Species::Dwarves, 2);
        let fire = TerrainContext::new(Elements::FIRE);
        let base = tally(0, 0, 2, 0);

        let outcome = table.evaluate(&dwarf, &base, RollCategory::Melee, Role::Defender, &fire);
        assert_eq!(outcome.modifiers.len(), 1);
        assert_eq!(outcome.modifiers[0].value, 2);
        assert_eq!(outcome.modifiers[0].source, "Dwarven Might");

        let attacking = table.evaluate(&dwarf, &base, RollCategory::Melee, Role::Attacker, &fire);
        assert!(attacking.modifiers.is_empty());

        let water = TerrainContext::new(Elements::WATER);
        let elsewhere = table.evaluate(&dwarf, &base, RollCategory::Melee, Role::Defender, &water);
        assert!(elsewhere.modifiers.is_empty());
    }

    #[test]
    fn stampede_needs_both_elements() {
        let table = SpeciesAbilityTable::standard();
        let feral = Unit::new("Bear", Species::Feral, 3);
        let base = tally(0, 0, 0, 2);

        let earth = TerrainContext::new(Elements::EARTH);
        assert!(
            table
                .evaluate(&feral, &base, RollCategory::Melee, Role::Defender, &earth)
                .modifiers
                .is_empty()
        );

        let earth_air = TerrainContext::new(Elements::EARTH | Elements::AIR);
        let outcome =
            table.evaluate(&feral, &base, RollCategory::Melee, Role::Defender, &earth_air);
        assert_eq!(outcome.modifiers[0].target, ResultType::Melee.mask());
    }

    #[test]
    fn coral_elves_stack_independent_rules() {
        let table = SpeciesAbilityTable::standard();
        let elf = Unit::new("Tidecaller", Species::CoralElves, 1);
        let water = TerrainContext::new(Elements::WATER);
        let base = tally(0, 1, 0, 2);

        let outcome = table.evaluate(&elf, &base, RollCategory::Save, Role::Defender, &water);
        let values: Vec<u32> = outcome.modifiers.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![2, 1]);
    }

    #[test]
    fn advisory_rules_emit_notices() {
        let table = SpeciesAbilityTable::standard();
        let amazon = Unit::new("Seer", Species::Amazons, 2);
        let mut base = Tally::new();
        base.magic = 2;
        let outcome = table.evaluate(
            &amazon,
            &base,
            RollCategory::Magic,
            Role::Attacker,
            &TerrainContext::new(Elements::FIRE),
        );
        assert!(outcome.modifiers.is_empty());
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].ability, "Terrain Harmony");

        let none = table.evaluate(
            &amazon,
            &Tally::new(),
            RollCategory::Magic,
            Role::Attacker,
            &TerrainContext::default(),
        );
        assert!(none.notices.is_empty());
    }
}
