//! Targeting: selecting the units an icon effect lands on.
//!
//! Handlers never pick units themselves. They emit a [`TargetingRequest`];
//! the caller supplies the candidate units of the requested side and the
//! [`TargetingResolver`] selects among them.
//!
//! ## Health-worth selection
//!
//! "Target up to X health-worth of units" selects units whose combined health
//! does not exceed X. Candidates are sorted by ascending health (ties keep
//! caller order) and taken greedily. When the request must be filled to the
//! fullest extent and the greedy pick falls short, one selected unit may be
//! swapped for a larger unselected one if that gets closer to X without
//! exceeding it.
//!
//! ## Exclusivity
//!
//! A unit may be affected by only one multiplying or dividing effect per turn.
//! Requests flagged `exclusive` skip units already recorded in the resolver's
//! restriction set and record the units they select. The set lives until
//! [`TargetingResolver::begin_turn`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{Elements, Role, Species, TerrainContext, Unit};

/// Shape of a targeting request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetKind {
    /// Up to `target_count` units.
    Unit,
    /// Exactly the first `target_count` eligible units, in caller order.
    SpecificUnit,
    /// Units whose combined health is at most `target_count`.
    HealthWorth,
    /// Every eligible unit of an army.
    Army,
}

/// Which army the candidates should come from, relative to the roller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TargetSide {
    Attacking,
    Defending,
    Any,
}

impl TargetSide {
    /// The side `role` is rolling for.
    pub const fn own(role: Role) -> Self {
        match role {
            Role::Attacker => Self::Attacking,
            Role::Defender => Self::Defending,
        }
    }

    /// The other side of the action.
    pub const fn opposing(role: Role) -> Self {
        match role {
            Role::Attacker => Self::Defending,
            Role::Defender => Self::Attacking,
        }
    }
}

/// Filter applied to candidates before selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCriteria {
    #[default]
    Any,
    /// Only units whose names are listed (units that rolled an ID result).
    RolledId(Vec<String>),
    Species(Species),
    /// Units carrying at least one of the elements.
    HasElement(Elements),
    /// Units sharing at least one element with the terrain.
    MatchesTerrain,
    /// Units of at most this health.
    MaxHealth(u32),
}

impl TargetCriteria {
    pub fn admits(&self, unit: &Unit, terrain: &TerrainContext) -> bool {
        match self {
            Self::Any => true,
            Self::RolledId(names) => names.iter().any(|name| *name == unit.name),
            Self::Species(species) => unit.species == *species,
            Self::HasElement(elements) => unit.elements.intersects(*elements),
            Self::MatchesTerrain => unit.elements.intersects(terrain.elements),
            Self::MaxHealth(max) => unit.health <= *max,
        }
    }
}

/// A request, emitted by an effect handler, to select units.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingRequest {
    pub sai_name: String,
    pub source_unit: String,
    pub target_kind: TargetKind,
    /// Unit count or health-worth, depending on `target_kind`.
    pub target_count: u32,
    pub target_side: TargetSide,
    pub criteria: TargetCriteria,
    pub must_fill_fullest_extent: bool,
    /// Multiply/divide-class effect: subject to the per-turn restriction set.
    pub exclusive: bool,
}

impl TargetingRequest {
    pub fn new(
        sai_name: impl Into<String>,
        source_unit: impl Into<String>,
        target_kind: TargetKind,
        target_count: u32,
        target_side: TargetSide,
    ) -> Self {
        Self {
            sai_name: sai_name.into(),
            source_unit: source_unit.into(),
            target_kind,
            target_count,
            target_side,
            criteria: TargetCriteria::Any,
            must_fill_fullest_extent: false,
            exclusive: false,
        }
    }

    #[must_use]
    pub fn with_criteria(mut self, criteria: TargetCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn fill_fullest_extent(mut self) -> Self {
        self.must_fill_fullest_extent = true;
        self
    }

    #[must_use]
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

/// Outcome of a targeting request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingResult {
    /// At least one unit was targeted.
    pub success: bool,
    pub targeted_units: Vec<String>,
    pub total_health_targeted: u32,
    pub notes: Vec<String>,
}

/// Selects units for targeting requests and tracks multiply/divide
/// exclusivity within a turn.
#[derive(Clone, Debug, Default)]
pub struct TargetingResolver {
    restricted: BTreeSet<String>,
}

impl TargetingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the restriction set. Call at the start of every turn.
    pub fn begin_turn(&mut self) {
        self.restricted.clear();
    }

    /// True if `unit` was already affected by a multiply/divide effect this turn.
    pub fn is_restricted(&self, unit: &str) -> bool {
        self.restricted.contains(unit)
    }

    /// Units recorded this turn.
    pub fn restricted_units(&self) -> impl Iterator<Item = &str> {
        self.restricted.iter().map(String::as_str)
    }

    /// Resolves `request` and, for exclusive requests, records the selection.
    pub fn process(
        &mut self,
        request: &TargetingRequest,
        candidates: &[Unit],
        terrain: &TerrainContext,
    ) -> TargetingResult {
        let result = self.select(request, candidates, terrain);
        if request.exclusive {
            self.restricted
                .extend(result.targeted_units.iter().cloned());
        }
        result
    }

    /// Resolves `request` without recording anything.
    pub fn select(
        &self,
        request: &TargetingRequest,
        candidates: &[Unit],
        terrain: &TerrainContext,
    ) -> TargetingResult {
        let mut notes = Vec::new();
        let eligible: Vec<&Unit> = candidates
            .iter()
            .filter(|unit| request.criteria.admits(unit, terrain))
            .filter(|unit| {
                let blocked = request.exclusive && self.restricted.contains(&unit.name);
                if blocked {
                    notes.push(format!(
                        "{}: {} already affected by a multiplying or dividing effect this turn",
                        request.sai_name, unit.name
                    ));
                }
                !blocked
            })
            .collect();

        let selected = match request.target_kind {
            TargetKind::HealthWorth => select_health_worth(
                &eligible,
                request.target_count,
                request.must_fill_fullest_extent,
            ),
            TargetKind::Unit | TargetKind::SpecificUnit => eligible
                .iter()
                .take(request.target_count as usize)
                .copied()
                .collect(),
            TargetKind::Army => eligible.clone(),
        };

        let total_health_targeted = selected
            .iter()
            .fold(0u32, |total, unit| total.saturating_add(unit.health));

        if selected.is_empty() {
            notes.push(format!("{}: no eligible units to target", request.sai_name));
        } else {
            match request.target_kind {
                TargetKind::HealthWorth if total_health_targeted < request.target_count => {
                    notes.push(format!(
                        "{}: targeted {} of {} health-worth",
                        request.sai_name, total_health_targeted, request.target_count
                    ));
                }
                TargetKind::Unit | TargetKind::SpecificUnit
                    if (selected.len() as u32) < request.target_count =>
                {
                    notes.push(format!(
                        "{}: targeted {} of {} units",
                        request.sai_name,
                        selected.len(),
                        request.target_count
                    ));
                }
                _ => {}
            }
        }

        debug!(
            target: "roll::targeting",
            sai = %request.sai_name,
            kind = %request.target_kind,
            selected = selected.len(),
            health = total_health_targeted,
            "targeting resolved"
        );

        TargetingResult {
            success: !selected.is_empty(),
            targeted_units: selected.iter().map(|unit| unit.name.clone()).collect(),
            total_health_targeted,
            notes,
        }
    }
}

/// Greedy ascending-health selection with an optional single improving swap.
fn select_health_worth<'u>(eligible: &[&'u Unit], target: u32, must_fill: bool) -> Vec<&'u Unit> {
    let mut sorted: Vec<&Unit> = eligible.to_vec();
    // Stable: equal health keeps caller order.
    sorted.sort_by_key(|unit| unit.health);

    let mut picked = vec![false; sorted.len()];
    let mut total = 0u32;
    for (idx, unit) in sorted.iter().enumerate() {
        if let Some(next) = total.checked_add(unit.health).filter(|&next| next <= target) {
            total = next;
            picked[idx] = true;
        }
    }

    if must_fill && total < target {
        let mut best: Option<(usize, usize, u32)> = None;
        for out in (0..sorted.len()).filter(|&i| picked[i]) {
            for into in (0..sorted.len()).filter(|&i| !picked[i]) {
                if sorted[into].health <= sorted[out].health {
                    continue;
                }
                let Some(swapped) = (total - sorted[out].health).checked_add(sorted[into].health)
                else {
                    continue;
                };
                let improves = best.is_none_or(|(_, _, current)| swapped > current);
                if swapped <= target && improves {
                    best = Some((out, into, swapped));
                }
            }
        }
        if let Some((out, into, _)) = best {
            picked[out] = false;
            picked[into] = true;
        }
    }

    sorted
        .into_iter()
        .zip(picked)
        .filter_map(|(unit, keep)| keep.then_some(unit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(healths: &[u32]) -> Vec<Unit> {
        healths
            .iter()
            .enumerate()
            .map(|(idx, health)| Unit::new(format!("u{idx}"), Species::Goblins, *health))
            .collect()
    }

    fn health_worth(x: u32) -> TargetingRequest {
        TargetingRequest::new("Breath", "Dragon", TargetKind::HealthWorth, x, TargetSide::Defending)
            .fill_fullest_extent()
    }

    #[test]
    fn greedy_takes_smallest_first() {
        let resolver = TargetingResolver::new();
        let army = units(&[1, 1, 2, 3]);
        let result = resolver.select(&health_worth(4), &army, &TerrainContext::default());
        assert!(result.success);
        assert_eq!(result.targeted_units, vec!["u0", "u1", "u2"]);
        assert_eq!(result.total_health_targeted, 4);
        assert!(result.notes.is_empty());
    }

    #[test]
    fn swap_fills_to_fullest_extent() {
        // Greedy picks 2+2 = 4 of 5; swapping a 2 for the 3 reaches 5.
        let resolver = TargetingResolver::new();
        let army = units(&[2, 2, 3]);
        let result = resolver.select(&health_worth(5), &army, &TerrainContext::default());
        assert_eq!(result.total_health_targeted, 5);
        assert_eq!(result.targeted_units, vec!["u1", "u2"]);
    }

    #[test]
    fn huge_health_never_wraps_into_the_target() {
        let resolver = TargetingResolver::new();
        let army = units(&[2, u32::MAX]);
        let result = resolver.select(&health_worth(10), &army, &TerrainContext::default());
        assert_eq!(result.targeted_units, vec!["u0"]);
        assert_eq!(result.total_health_targeted, 2);

        let all =
            TargetingRequest::new("Frost", "Wyrm", TargetKind::Army, 1, TargetSide::Defending);
        let result = resolver.select(&all, &army, &TerrainContext::default());
        assert_eq!(result.total_health_targeted, u32::MAX);
    }

    #[test]
    fn shortfall_is_noted() {
        let resolver = TargetingResolver::new();
        let army = units(&[3, 4]);
        let result = resolver.select(&health_worth(2), &army, &TerrainContext::default());
        assert!(!result.success);
        assert_eq!(result.notes, vec!["Breath: no eligible units to target"]);

        let result = resolver.select(&health_worth(5), &units(&[3]), &TerrainContext::default());
        assert!(result.success);
        assert_eq!(result.notes, vec!["Breath: targeted 3 of 5 health-worth"]);
    }

    #[test]
    fn unit_and_army_requests() {
        let resolver = TargetingResolver::new();
        let army = units(&[2, 1, 3]);
        let terrain = TerrainContext::default();

        let kick = TargetingRequest::new(
            "Kick",
            "Horse",
            TargetKind::SpecificUnit,
            1,
            TargetSide::Defending,
        );
        assert_eq!(resolver.select(&kick, &army, &terrain).targeted_units, vec!["u0"]);

        let frost = TargetingRequest::new(
            "Frost Breath",
            "Wyrm",
            TargetKind::Army,
            1,
            TargetSide::Defending,
        );
        assert_eq!(resolver.select(&frost, &army, &terrain).targeted_units.len(), 3);
    }

    #[test]
    fn criteria_filter_candidates() {
        let resolver = TargetingResolver::new();
        let army = units(&[1, 2, 3]);
        let request = health_worth(10).with_criteria(TargetCriteria::RolledId(vec!["u2".into()]));
        let result = resolver.select(&request, &army, &TerrainContext::default());
        assert_eq!(result.targeted_units, vec!["u2"]);

        let fire = Unit::new("Salamander", Species::Firewalkers, 1).with_elements(Elements::FIRE);
        let terrain = TerrainContext::new(Elements::FIRE | Elements::AIR);
        assert!(TargetCriteria::MatchesTerrain.admits(&fire, &terrain));
        assert!(!TargetCriteria::MatchesTerrain.admits(&army[0], &terrain));
        assert!(TargetCriteria::MaxHealth(1).admits(&fire, &terrain));
    }

    #[test]
    fn exclusive_requests_record_and_skip() {
        let mut resolver = TargetingResolver::new();
        let army = units(&[1, 1]);
        let terrain = TerrainContext::default();
        let elevate =
            TargetingRequest::new("Elevate", "Priest", TargetKind::HealthWorth, 1, TargetSide::Any)
                .exclusive();

        let first = resolver.process(&elevate, &army, &terrain);
        assert_eq!(first.targeted_units, vec!["u0"]);
        assert!(resolver.is_restricted("u0"));

        let second = resolver.process(&elevate, &army, &terrain);
        assert_eq!(second.targeted_units, vec!["u1"]);

        // Non-exclusive requests ignore the restriction set.
        let breath = health_worth(2);
        assert_eq!(resolver.process(&breath, &army, &terrain).targeted_units.len(), 2);

        resolver.begin_turn();
        assert_eq!(resolver.restricted_units().count(), 0);
    }
}
