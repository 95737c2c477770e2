//! Abilities whose strength depends on how many units of a species are dead.
//!
//! The dead-unit area belongs to the caller; the engine reads it through an
//! optional [`GraveyardOracle`]. When an ability's conditions match but no
//! oracle or no player name is available, the ability is skipped and a note
//! explains why.

use tracing::debug;

use crate::config::GraveyardCaps;
use crate::env::GraveyardOracle;
use crate::model::{ResultType, Role, RollCategory, Species, Unit};
use crate::modifier::{Modifier, ModifierKind};
use crate::pipeline::Tally;
use crate::result::AbilityNotice;

/// The graveyard-dependent abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "title_case")]
pub enum GraveyardAbility {
    /// Undead magic attack: extra magic per dead Undead.
    BoneMagic,
    /// Lava Elves missile attack: missiles that bypass normal saves.
    CursedBullets,
    /// Frostwings: negate opposing magic.
    MagicNegation,
    /// Goblins melee attack: opposing units cannot counter-attack.
    FoulStench,
}

impl GraveyardAbility {
    pub fn species(self) -> Species {
        match self {
            Self::BoneMagic => Species::Undead,
            Self::CursedBullets => Species::LavaElves,
            Self::MagicNegation => Species::Frostwings,
            Self::FoulStench => Species::Goblins,
        }
    }

    pub fn applies(self, category: RollCategory, role: Role) -> bool {
        match self {
            Self::BoneMagic => category == RollCategory::Magic && role.is_attacker(),
            Self::CursedBullets => category == RollCategory::Missile && role.is_attacker(),
            Self::MagicNegation => true,
            Self::FoulStench => category == RollCategory::Melee && role.is_attacker(),
        }
    }

    pub fn cap(self, caps: &GraveyardCaps) -> u32 {
        match self {
            Self::BoneMagic => caps.bone_magic,
            Self::CursedBullets => caps.cursed_bullets,
            Self::MagicNegation => caps.magic_negation,
            Self::FoulStench => caps.foul_stench,
        }
    }

    fn for_species(species: &Species) -> Option<Self> {
        match species {
            Species::Undead => Some(Self::BoneMagic),
            Species::LavaElves => Some(Self::CursedBullets),
            Species::Frostwings => Some(Self::MagicNegation),
            Species::Goblins => Some(Self::FoulStench),
            _ => None,
        }
    }
}

/// Dead units of `species` in `player`'s graveyard, at most `cap`.
pub fn count_dead(oracle: &dyn GraveyardOracle, player: &str, species: &Species, cap: u32) -> u32 {
    let dead = oracle.units_by_species(player, species).len();
    u32::try_from(dead).unwrap_or(u32::MAX).min(cap)
}

/// Results of evaluating graveyard abilities for one unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraveyardOutcome {
    pub modifiers: Vec<Modifier>,
    pub notices: Vec<AbilityNotice>,
    pub notes: Vec<String>,
}

/// Evaluates graveyard abilities against an optional oracle.
#[derive(Clone, Copy)]
pub struct GraveyardResolver<'a> {
    oracle: Option<&'a dyn GraveyardOracle>,
    caps: &'a GraveyardCaps,
    opponent: Option<&'a str>,
}

impl<'a> GraveyardResolver<'a> {
    pub fn new(oracle: Option<&'a dyn GraveyardOracle>, caps: &'a GraveyardCaps) -> Self {
        Self {
            oracle,
            caps,
            opponent: None,
        }
    }

    /// Names the opposing player in notices about opposing units.
    #[must_use]
    pub fn against(mut self, opponent: Option<&'a str>) -> Self {
        self.opponent = opponent;
        self
    }

    fn opposing(&self, what: &str) -> String {
        match self.opponent {
            Some(opponent) => format!("{what} of {opponent}"),
            None => format!("opposing {what}"),
        }
    }

    /// Evaluates the unit's ability, if its species has one.
    ///
    /// `base` holds the unit's own non-ID results.
    pub fn evaluate(
        &self,
        unit: &Unit,
        base: &Tally,
        category: RollCategory,
        role: Role,
        player: Option<&str>,
    ) -> GraveyardOutcome {
        let mut outcome = GraveyardOutcome::default();
        let Some(ability) = GraveyardAbility::for_species(&unit.species) else {
            return outcome;
        };
        if !ability.applies(category, role) {
            return outcome;
        }

        let (oracle, player) = match (self.oracle, player) {
            (Some(oracle), Some(player)) => (oracle, player),
            (None, _) => {
                outcome.notes.push(format!(
                    "{} {ability} skipped: no graveyard available",
                    unit.name
                ));
                return outcome;
            }
            (Some(_), None) => {
                outcome.notes.push(format!(
                    "{} {ability} skipped: rolling player unknown",
                    unit.name
                ));
                return outcome;
            }
        };

        let dead = count_dead(oracle, player, &ability.species(), ability.cap(self.caps));
        debug!(
            target: "roll::graveyard",
            unit = %unit.name,
            %ability,
            dead,
            "graveyard ability evaluated"
        );
        if dead == 0 {
            return outcome;
        }

        match ability {
            GraveyardAbility::BoneMagic => {
                let bonus = dead.min(base.magic);
                if bonus > 0 {
                    outcome.modifiers.push(Modifier::new(
                        ModifierKind::Add,
                        bonus,
                        ResultType::Magic,
                        ability.to_string(),
                        format!(
                            "{} {ability}: +{bonus} magic ({dead} dead {})",
                            unit.name,
                            ability.species()
                        ),
                    ));
                }
            }
            GraveyardAbility::CursedBullets => {
                let cursed = dead.min(base.missile);
                if cursed > 0 {
                    outcome.notices.push(notice(
                        ability,
                        unit,
                        format!(
                            "{cursed} missile results bypass normal saves ({dead} dead Lava Elves)"
                        ),
                    ));
                }
            }
            GraveyardAbility::MagicNegation => {
                outcome.notices.push(notice(
                    ability,
                    unit,
                    format!(
                        "may negate {} ({dead} dead Frostwings available)",
                        self.opposing("magic")
                    ),
                ));
            }
            GraveyardAbility::FoulStench => {
                outcome.notices.push(notice(
                    ability,
                    unit,
                    format!("{dead} {} cannot counter-attack", self.opposing("units")),
                ));
            }
        }

        outcome
    }
}

fn notice(ability: GraveyardAbility, unit: &Unit, text: String) -> AbilityNotice {
    AbilityNotice {
        ability: ability.to_string(),
        unit: Some(unit.name.clone()),
        description: format!("{} {ability}: {text}", unit.name),
    }
}
