//! Output of a resolved roll and the records it hands back to the caller.

use core::fmt::Write as _;

use crate::model::RollCategory;
use crate::pipeline::Tally;
use crate::targeting::{TargetingRequest, TargetingResult};

/// A unit that must (or may) be rolled again. The engine does not reroll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RerollEffect {
    pub unit_name: String,
    pub source: String,
    pub description: String,
    pub mandatory: bool,
}

/// Kind of an effect that applies to a later roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DelayedEffectType {
    /// Choke: up to `value` health-worth of units rolling ID are targeted and
    /// their ID results do not count as saves.
    NegateIdSaves,
    /// Hypnotic Glare: no ID result counts as a save.
    SuppressIdSaves,
    /// Surprise: the defending army cannot counter-attack.
    NoCounterAttack,
    /// Frost Breath: all results are halved.
    HalveResults,
    /// Wither: `value` results are subtracted from every roll.
    SubtractResults,
    /// Charge: the defender's combination roll inflicts its melee results as
    /// damage that only spell saves can reduce.
    ChargeCounter,
}

/// An effect the caller must carry to a later roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedEffect {
    pub effect_type: DelayedEffectType,
    pub source: String,
    pub target_description: String,
    pub value: u32,
    pub description: String,
    /// Units the effect is restricted to; empty means the whole army.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_units: Vec<String>,
}

/// Damage the roll inflicts on the opposing army outside normal results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentDamage {
    /// The opponent may roll saves against this.
    pub savable: u32,
    pub unsavable: u32,
    /// Reducible only by save results generated by spells.
    pub spell_save_only: u32,
}

impl OpponentDamage {
    pub fn total(&self) -> u32 {
        self.savable
            .saturating_add(self.unsavable)
            .saturating_add(self.spell_save_only)
    }

    /// Adds `other` into this record, saturating each kind.
    pub fn merge(&mut self, other: &OpponentDamage) {
        self.savable = self.savable.saturating_add(other.savable);
        self.unsavable = self.unsavable.saturating_add(other.unsavable);
        self.spell_save_only = self.spell_save_only.saturating_add(other.spell_save_only);
    }
}

/// An ability the engine recognized but left to the caller to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityNotice {
    pub ability: String,
    pub unit: Option<String>,
    pub description: String,
}

/// Raw counts straight from the faces, before any effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCounts {
    pub results: Tally,
    pub id: u32,
    pub sai: u32,
}

/// Everything one roll resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRollResult {
    pub category: RollCategory,
    pub raw: RawCounts,
    pub results: Tally,
    /// One description per applied effect, modifier or conversion, in order.
    pub applied_effects: Vec<String>,
    /// Exactly one line per pipeline step.
    pub resolution_log: Vec<String>,
    pub rerolls: Vec<RerollEffect>,
    pub delayed_effects: Vec<DelayedEffect>,
    /// Requests the caller must resolve against an army it holds.
    pub targeting_requests: Vec<TargetingRequest>,
    /// Requests the engine could resolve itself against the rolling army.
    pub resolved_targeting: Vec<(TargetingRequest, TargetingResult)>,
    pub opponent_damage: OpponentDamage,
    /// Magic results usable only for cantrip spells. Already counted in
    /// `results.magic`; this records how many of them carry the restriction.
    pub cantrip_magic: u32,
    pub ability_notices: Vec<AbilityNotice>,
    pub notes: Vec<String>,
}

impl CombatRollResult {
    pub(crate) fn new(category: RollCategory) -> Self {
        Self {
            category,
            raw: RawCounts::default(),
            results: Tally::new(),
            applied_effects: Vec::new(),
            resolution_log: Vec::new(),
            rerolls: Vec::new(),
            delayed_effects: Vec::new(),
            targeting_requests: Vec::new(),
            resolved_targeting: Vec::new(),
            opponent_damage: OpponentDamage::default(),
            cantrip_magic: 0,
            ability_notices: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Final count of the roll's primary result type.
    pub fn primary(&self) -> u32 {
        self.results[self.category.primary_result()]
    }

    /// Multi-line, human-readable report.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} roll", self.category);
        let _ = writeln!(
            out,
            "  raw:   {} (id {}, sai {})",
            self.raw.results, self.raw.id, self.raw.sai
        );
        let _ = writeln!(out, "  final: {}", self.results);

        if self.cantrip_magic > 0 {
            let _ = writeln!(out, "  cantrip-only magic: {}", self.cantrip_magic);
        }
        if self.opponent_damage.total() > 0 {
            let damage = &self.opponent_damage;
            let _ = writeln!(
                out,
                "  damage to opponent: {} savable, {} unsavable, {} spell-save only",
                damage.savable, damage.unsavable, damage.spell_save_only
            );
        }

        let sections: [(&str, Vec<String>); 6] = [
            ("effects", self.applied_effects.clone()),
            (
                "rerolls",
                self.rerolls.iter().map(|r| r.description.clone()).collect(),
            ),
            (
                "delayed",
                self.delayed_effects
                    .iter()
                    .map(|d| d.description.clone())
                    .collect(),
            ),
            (
                "targeting",
                self.targeting_requests
                    .iter()
                    .map(|t| {
                        format!(
                            "{} ({}): {} {}",
                            t.sai_name, t.source_unit, t.target_kind, t.target_count
                        )
                    })
                    .collect(),
            ),
            (
                "abilities",
                self.ability_notices
                    .iter()
                    .map(|n| n.description.clone())
                    .collect(),
            ),
            ("notes", self.notes.clone()),
        ];
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {title}:");
            for line in lines {
                let _ = writeln!(out, "    - {line}");
            }
        }
        out
    }
}
