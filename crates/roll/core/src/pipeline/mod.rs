//! The ten-step resolution pipeline.
//!
//! Every roll runs the same steps in the same order, each emitting exactly one
//! line to the result's `resolution_log`, even when it changes nothing:
//!
//! 1. Count raw faces (rejected tokens and unknown units become notes)
//! 2. Apply carried delayed effects, queue caller-supplied army modifiers
//! 3. Identify reroll-eligible units
//! 4. Dispatch named icon effects (registry → applicability → X-value → handler)
//! 5. Snapshot base counts from the raw faces
//! 6. Subtract (saturating at zero)
//! 7. Divide (integer floor)
//! 8. Add effect-generated results
//! 9. Multiply
//! 10. Add non-effect results and counts-as conversions (ID, species, graveyard)
//!
//! The order is what makes combined effects come out right: results are
//! reduced before they are divided, and divided before new results are added.
//!
//! ## Design Principles
//!
//! - **Infallible**: bad input degrades into notes, never into an error
//! - **Deterministic**: same request, same result
//! - **Stateless**: reads the targeting restriction set but never writes it

mod log;
mod stage;
mod tally;

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

pub use log::{STEP_NAMES, step_line};
pub use stage::{ModifierStage, StageReport, apply_stage};
pub use tally::Tally;

use crate::config::EngineConfig;
use crate::effects::{self, EffectInput, EffectOutput};
use crate::env::{GraveyardOracle, UnitRoster};
use crate::face::FaceResult;
use crate::graveyard::GraveyardResolver;
use crate::model::{ResultMask, Role, RollCategory, Unit};
use crate::modifier::Modifier;
use crate::registry::{EffectRegistry, SaiKind};
use crate::request::RollRequest;
use crate::result::{CombatRollResult, DelayedEffect, DelayedEffectType, RerollEffect};
use crate::scaling::x_value;
use crate::species::SpeciesAbilityTable;
use crate::targeting::{
    TargetCriteria, TargetKind, TargetSide, TargetingRequest, TargetingResolver,
};

/// Faces rolled by one unit, after normalization.
#[derive(Clone, Debug)]
pub struct UnitRoll<'a> {
    pub name: &'a str,
    /// `None` when the unit is not in the roster.
    pub unit: Option<&'a Unit>,
    pub faces: Vec<FaceResult>,
    /// Plain result faces.
    pub base: Tally,
    /// ID faces.
    pub id: u32,
}

/// Read-only inputs of one pipeline run.
#[derive(Clone, Copy)]
pub(crate) struct PipelineContext<'a> {
    pub request: &'a RollRequest,
    pub config: &'a EngineConfig,
    pub species: &'a SpeciesAbilityTable,
    pub graveyard: Option<&'a dyn GraveyardOracle>,
    pub targeting: &'a TargetingResolver,
}

/// Runs all ten steps and returns the finished result.
pub(crate) fn run(ctx: PipelineContext<'_>) -> CombatRollResult {
    let mut resolution = Resolution::new(ctx);

    // 1. Count raw faces
    resolution.count_raw_faces();

    // 2. Carried effects and army modifiers
    resolution.apply_carried_effects();

    // 3. Rerolls
    resolution.identify_rerolls();

    // 4. Named effects
    resolution.dispatch_effects();

    // 5. Base snapshot
    resolution.snapshot_base();

    // 6-9. Modifier stages
    resolution.apply_modifier_stage(6, ModifierStage::Subtract);
    resolution.apply_modifier_stage(7, ModifierStage::Divide);
    resolution.apply_modifier_stage(8, ModifierStage::AddEffect);
    resolution.apply_modifier_stage(9, ModifierStage::Multiply);

    // 10. Non-effect additions and conversions
    resolution.add_and_counts_as();

    resolution.finish()
}

/// Which ID results no longer count on this roll.
#[derive(Clone, Debug, Default)]
enum IdSuppression {
    #[default]
    None,
    Units(BTreeSet<String>),
    All,
}

impl IdSuppression {
    fn suppresses(&self, unit: &str) -> bool {
        match self {
            Self::None => false,
            Self::Units(units) => units.contains(unit),
            Self::All => true,
        }
    }

    fn add_units(&mut self, units: impl IntoIterator<Item = String>) {
        match self {
            Self::All => {}
            Self::Units(set) => set.extend(units),
            Self::None => *self = Self::Units(units.into_iter().collect()),
        }
    }
}

/// Working state of one pipeline run.
struct Resolution<'a> {
    ctx: PipelineContext<'a>,
    rolls: Vec<UnitRoll<'a>>,
    subtotal: Tally,
    modifiers: Vec<Modifier>,
    id_suppression: IdSuppression,
    charge_counter: bool,
    result: CombatRollResult,
}

impl<'a> Resolution<'a> {
    fn new(ctx: PipelineContext<'a>) -> Self {
        Self {
            ctx,
            rolls: Vec::new(),
            subtotal: Tally::new(),
            modifiers: Vec::new(),
            id_suppression: IdSuppression::None,
            charge_counter: false,
            result: CombatRollResult::new(ctx.request.category),
        }
    }

    fn category(&self) -> RollCategory {
        self.ctx.request.category
    }

    fn role(&self) -> Role {
        self.ctx.request.role
    }

    fn log(&mut self, step: usize, before: Tally, detail: &str) {
        let line = step_line(step, &before, &self.subtotal, detail);
        debug!(target: "roll::pipeline", step, "{line}");
        self.result.resolution_log.push(line);
    }

    // ------------------------------------------------------------------------
    // Step 1
    // ------------------------------------------------------------------------

    fn count_raw_faces(&mut self) {
        let before = self.subtotal;
        let request = self.ctx.request;

        for entry in request.faces.iter() {
            let unit = request.army.unit(&entry.unit);
            if unit.is_none() {
                warn!(target: "roll::pipeline", unit = %entry.unit, "unit not in roster");
                self.result.notes.push(format!(
                    "{}: not in the army roster; faces counted without effects or ID bonus",
                    entry.unit
                ));
            }

            let mut roll = UnitRoll {
                name: &entry.unit,
                unit,
                faces: Vec::with_capacity(entry.faces.len()),
                base: Tally::new(),
                id: 0,
            };

            for token in entry.faces.iter() {
                let face = match FaceResult::parse(token) {
                    Ok(face) => face,
                    Err(err) => {
                        warn!(target: "roll::pipeline", unit = %entry.unit, %err, "face ignored");
                        self.result
                            .notes
                            .push(format!("{}: {err}; face ignored", entry.unit));
                        continue;
                    }
                };
                match face.result_type() {
                    Some(ty) => roll.base.add(ty, 1),
                    None if face.is_sai() => self.result.raw.sai += 1,
                    None => roll.id += 1,
                }
                roll.faces.push(face);
            }

            self.result.raw.results.absorb(&roll.base);
            self.result.raw.id += roll.id;
            self.rolls.push(roll);
        }

        self.subtotal = self.result.raw.results;
        let detail = format!(
            "{} units, {} ID, {} SAI",
            self.rolls.len(),
            self.result.raw.id,
            self.result.raw.sai
        );
        self.log(1, before, &detail);
    }

    // ------------------------------------------------------------------------
    // Step 2
    // ------------------------------------------------------------------------

    fn apply_carried_effects(&mut self) {
        let before = self.subtotal;
        let request = self.ctx.request;

        for effect in request.carried_effects.iter() {
            self.apply_carried(effect);
        }
        self.modifiers.extend(request.army_modifiers.iter().cloned());

        let detail = format!(
            "{} carried effects, {} army modifiers queued",
            request.carried_effects.len(),
            request.army_modifiers.len()
        );
        self.log(2, before, &detail);
    }

    fn apply_carried(&mut self, effect: &DelayedEffect) {
        let category = self.category();
        let role = self.role();

        match effect.effect_type {
            DelayedEffectType::NegateIdSaves if category == RollCategory::Save => {
                self.choke(effect);
            }
            DelayedEffectType::SuppressIdSaves if category == RollCategory::Save => {
                self.id_suppression = IdSuppression::All;
                self.result.applied_effects.push(format!(
                    "{}: ID results do not count as saves",
                    effect.source
                ));
            }
            DelayedEffectType::NoCounterAttack
                if category == RollCategory::Melee && role == Role::Defender =>
            {
                self.modifiers
                    .push(Modifier::multiply(0, ResultMask::MELEE, effect.source.clone()));
            }
            DelayedEffectType::HalveResults => {
                self.modifiers.push(Modifier::divide(
                    effect.value,
                    ResultMask::ALL,
                    effect.source.clone(),
                ));
            }
            DelayedEffectType::SubtractResults => {
                self.modifiers.push(Modifier::subtract(
                    effect.value,
                    ResultMask::ALL,
                    effect.source.clone(),
                ));
            }
            DelayedEffectType::ChargeCounter
                if category == RollCategory::Melee && role == Role::Defender =>
            {
                self.charge_counter = true;
                self.result.applied_effects.push(format!(
                    "{}: melee results of this combination roll damage the attacker; only spell saves reduce it",
                    effect.source
                ));
            }
            _ => {
                trace!(
                    target: "roll::pipeline",
                    effect = %effect.effect_type,
                    %category,
                    "carried effect not applicable"
                );
                self.result.notes.push(format!(
                    "{} ({}): no effect on a {category} roll by the {role}",
                    effect.source, effect.effect_type
                ));
            }
        }
    }

    /// Choke on the defender's save roll: target units that rolled ID and
    /// drop their ID results.
    fn choke(&mut self, effect: &DelayedEffect) {
        let request = self.ctx.request;
        let rolled_id: Vec<String> = self
            .rolls
            .iter()
            .filter(|roll| roll.id > 0 && roll.unit.is_some())
            .map(|roll| roll.name.to_string())
            .collect();

        let targeting = TargetingRequest::new(
            effect.source.clone(),
            effect.source.clone(),
            TargetKind::HealthWorth,
            effect.value,
            TargetSide::own(self.role()),
        )
        .with_criteria(TargetCriteria::RolledId(rolled_id));

        let candidates: Vec<Unit> = request
            .army
            .iter()
            .filter(|unit| {
                effect.target_units.is_empty() || effect.target_units.contains(&unit.name)
            })
            .cloned()
            .collect();

        let outcome = self
            .ctx
            .targeting
            .select(&targeting, &candidates, &request.terrain);

        if outcome.success {
            self.result.applied_effects.push(format!(
                "{}: {} killed; their ID results do not count as saves",
                effect.source,
                outcome.targeted_units.join(", ")
            ));
        }
        self.id_suppression
            .add_units(outcome.targeted_units.iter().cloned());
        self.result.notes.extend(outcome.notes.iter().cloned());
        self.result.resolved_targeting.push((targeting, outcome));
    }

    // ------------------------------------------------------------------------
    // Step 3
    // ------------------------------------------------------------------------

    fn identify_rerolls(&mut self) {
        let before = self.subtotal;
        let (category, role) = (self.category(), self.role());

        for roll in self.rolls.iter().filter(|roll| roll.unit.is_some()) {
            for face in roll.faces.iter() {
                let FaceResult::NamedSai(kind) = *face else {
                    continue;
                };
                let spec = EffectRegistry::spec(kind);
                if !spec.applies(category, role) {
                    continue;
                }
                if let Some(mandatory) = spec.rerolls_during(category) {
                    let requirement = if mandatory { "must" } else { "may" };
                    self.result.rerolls.push(RerollEffect {
                        unit_name: roll.name.to_string(),
                        source: spec.name.to_string(),
                        description: format!(
                            "{} {}: {requirement} be rolled again",
                            roll.name, spec.name
                        ),
                        mandatory,
                    });
                }
            }
        }

        let detail = format!("{} rerolls", self.result.rerolls.len());
        self.log(3, before, &detail);
    }

    // ------------------------------------------------------------------------
    // Step 4
    // ------------------------------------------------------------------------

    fn dispatch_effects(&mut self) {
        let before = self.subtotal;
        let (category, role) = (self.category(), self.role());
        let request = self.ctx.request;

        let mut outputs: Vec<EffectOutput> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();
        let mut seen: BTreeSet<SaiKind> = BTreeSet::new();

        for roll in self.rolls.iter() {
            let Some(unit) = roll.unit else {
                continue;
            };
            for face in roll.faces.iter() {
                match *face {
                    FaceResult::GenericSai => {
                        warn!(target: "roll::pipeline", unit = %roll.name, "unqualified SAI face");
                        unresolved.push(format!(
                            "{}: SAI face does not name an effect; left unresolved",
                            roll.name
                        ));
                    }
                    FaceResult::NamedSai(kind) => {
                        let spec = EffectRegistry::spec(kind);
                        if !spec.applies(category, role) {
                            trace!(
                                target: "roll::pipeline",
                                unit = %roll.name,
                                effect = spec.name,
                                %category,
                                %role,
                                "effect does not apply"
                            );
                            continue;
                        }

                        let input = EffectInput {
                            kind,
                            unit,
                            x: x_value(&unit.die_class, 1, &self.ctx.config.scaling),
                            category,
                            role,
                            responding_to: request.responding_to,
                            rolls: &self.rolls,
                            raw: &self.result.raw.results,
                            first_of_kind: seen.insert(kind),
                            wither_penalty: self.ctx.config.wither_penalty,
                        };
                        debug!(
                            target: "roll::pipeline",
                            unit = %roll.name,
                            effect = spec.name,
                            x = input.x,
                            "dispatching effect"
                        );
                        outputs.push(effects::dispatch(&input));
                    }
                    _ => {}
                }
            }
        }

        let dispatched = outputs.len();
        self.result.notes.extend(unresolved);
        for out in outputs {
            self.absorb(out);
        }

        let detail = format!("{dispatched} effects dispatched");
        self.log(4, before, &detail);
    }

    fn absorb(&mut self, out: EffectOutput) {
        self.modifiers.extend(out.modifiers);
        self.result.delayed_effects.extend(out.delayed);
        self.result.targeting_requests.extend(out.targeting);
        self.result.applied_effects.extend(out.applied);
        self.result.notes.extend(out.notes);
        self.result.cantrip_magic = self.result.cantrip_magic.saturating_add(out.cantrip_magic);
        self.result.opponent_damage.merge(&out.damage);
    }

    // ------------------------------------------------------------------------
    // Step 5
    // ------------------------------------------------------------------------

    fn snapshot_base(&mut self) {
        let before = self.subtotal;
        self.subtotal = self.result.raw.results;
        let detail = format!("base {}", self.subtotal);
        self.log(5, before, &detail);
    }

    // ------------------------------------------------------------------------
    // Steps 6-9
    // ------------------------------------------------------------------------

    fn apply_modifier_stage(&mut self, step: usize, stage: ModifierStage) {
        let before = self.subtotal;
        let report = apply_stage(stage, &mut self.subtotal, &self.modifiers);
        let detail = report.applied.join("; ");
        self.result.applied_effects.extend(report.applied);
        self.result.notes.extend(report.notes);
        self.log(step, before, &detail);
    }

    // ------------------------------------------------------------------------
    // Step 10
    // ------------------------------------------------------------------------

    fn add_and_counts_as(&mut self) {
        let before = self.subtotal;
        let request = self.ctx.request;
        let (category, role) = (self.category(), self.role());
        let graveyard = GraveyardResolver::new(self.ctx.graveyard, &self.ctx.config.graveyard)
            .against(self.ctx.request.opponent.as_deref());

        let mut late = Vec::new();
        for roll in self.rolls.iter() {
            let Some(unit) = roll.unit else {
                continue;
            };

            // ID bonus
            if roll.id > 0 {
                if self.id_suppression.suppresses(roll.name) {
                    self.result.notes.push(format!(
                        "{}: {} ID results do not count",
                        roll.name, roll.id
                    ));
                } else {
                    late.push(self.id_bonus(roll, unit));
                }
            }

            // Species abilities
            let species = self
                .ctx
                .species
                .evaluate(unit, &roll.base, category, role, &request.terrain);
            late.extend(species.modifiers);
            self.result.ability_notices.extend(species.notices);

            // Graveyard abilities
            let player = request.player.as_deref();
            let dead = graveyard.evaluate(unit, &roll.base, category, role, player);
            late.extend(dead.modifiers);
            self.result.ability_notices.extend(dead.notices);
            self.result.notes.extend(dead.notes);
        }
        self.modifiers.extend(late);

        let report = apply_stage(ModifierStage::Add, &mut self.subtotal, &self.modifiers);
        let detail = report.applied.join("; ");
        self.result.applied_effects.extend(report.applied);
        self.result.notes.extend(report.notes);
        self.log(10, before, &detail);
    }

    fn id_bonus(&self, roll: &UnitRoll<'_>, unit: &Unit) -> Modifier {
        let ty = self.category().id_result();
        let mut bonus = roll.id.saturating_mul(unit.health);
        let mut suffix = "";
        if self.ctx.request.terrain.eighth_face_controlled_by_roller {
            bonus = bonus.saturating_mul(self.ctx.config.id_eighth_face_multiplier);
            suffix = " (doubled by terrain eighth face)";
        }
        Modifier::counts_as(
            bonus,
            ty,
            "ID",
            format!(
                "{} ID: {} x health {} = +{bonus} {ty}{suffix}",
                roll.name, roll.id, unit.health
            ),
        )
    }

    fn finish(mut self) -> CombatRollResult {
        if self.charge_counter {
            let damage = &mut self.result.opponent_damage;
            damage.spell_save_only = damage.spell_save_only.saturating_add(self.subtotal.melee);
        }
        self.result.results = self.subtotal;
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Elements, Species, TerrainContext};

    fn resolve(request: &RollRequest) -> CombatRollResult {
        let config = EngineConfig::default();
        let species = SpeciesAbilityTable::standard();
        let targeting = TargetingResolver::new();
        run(PipelineContext {
            request,
            config: &config,
            species: &species,
            graveyard: None,
            targeting: &targeting,
        })
    }

    #[test]
    fn every_step_logs_once_in_order() {
        let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
            .with_roll(Unit::new("Axe", Species::Dwarves, 1), ["m", "m", "s"]);
        let result = resolve(&request);

        assert_eq!(result.resolution_log.len(), 10);
        for (idx, line) in result.resolution_log.iter().enumerate() {
            let prefix = format!("Step {} ({})", idx + 1, STEP_NAMES[idx]);
            assert!(line.starts_with(&prefix), "{line}");
        }
        assert_eq!(result.results.melee, 2);
        assert_eq!(result.results.save, 1);
    }

    #[test]
    fn empty_roll_still_logs_ten_steps() {
        let result = resolve(&RollRequest::new(RollCategory::Save, Role::Defender));
        assert_eq!(result.resolution_log.len(), 10);
        assert_eq!(result.results, Tally::new());
    }

    #[test]
    fn rejected_tokens_and_unknown_units_become_notes() {
        let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
            .with_roll(Unit::new("Axe", Species::Dwarves, 1), ["m", "xyzzy"])
            .with_faces("Ghost", ["m", "id", "trample"]);
        let result = resolve(&request);

        assert_eq!(result.raw.results.melee, 2);
        assert_eq!(result.raw.id, 1);
        assert_eq!(result.raw.sai, 1);
        // Ghost's ID and Trample are skipped.
        assert_eq!(result.results.melee, 2);
        assert!(result.notes.iter().any(|n| n.contains("xyzzy")));
        assert!(result.notes.iter().any(|n| n.starts_with("Ghost: not in the army roster")));
    }

    #[test]
    fn generic_sai_is_unresolved() {
        let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
            .with_roll(Unit::new("Axe", Species::Dwarves, 1), ["sai"]);
        let result = resolve(&request);
        assert_eq!(result.raw.sai, 1);
        assert!(result.notes.iter().any(|n| n.contains("left unresolved")));
    }

    #[test]
    fn inapplicable_effects_are_skipped_silently() {
        // Tail does nothing on a save roll.
        let request = RollRequest::new(RollCategory::Save, Role::Defender)
            .with_roll(Unit::new("Wyrm", Species::Dragonkin, 2), ["tail"]);
        let result = resolve(&request);
        assert_eq!(result.results, Tally::new());
        assert!(result.notes.is_empty());
        assert!(result.rerolls.is_empty());
    }

    #[test]
    fn rerolls_are_recorded() {
        let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
            .with_roll(Unit::new("Wyrm", Species::Dragonkin, 2), ["rend"]);
        let result = resolve(&request);
        assert_eq!(result.rerolls.len(), 1);
        assert!(result.rerolls[0].mandatory);
        assert_eq!(result.results.melee, 1);
    }

    #[test]
    fn hypnotic_glare_suppresses_all_id_saves() {
        let glare = DelayedEffect {
            effect_type: DelayedEffectType::SuppressIdSaves,
            source: "Hypnotic Glare".into(),
            target_description: "defending army save roll".into(),
            value: 0,
            description: String::new(),
            target_units: Vec::new(),
        };
        let request = RollRequest::new(RollCategory::Save, Role::Defender)
            .with_roll(Unit::new("Axe", Species::Dwarves, 2), ["id", "s"])
            .with_carried([glare]);
        let result = resolve(&request);
        assert_eq!(result.results.save, 1);
    }

    #[test]
    fn charge_counter_converts_melee_to_spell_save_damage() {
        let charge = DelayedEffect {
            effect_type: DelayedEffectType::ChargeCounter,
            source: "Charge".into(),
            target_description: String::new(),
            value: 0,
            description: String::new(),
            target_units: Vec::new(),
        };
        let request = RollRequest::new(RollCategory::Melee, Role::Defender)
            .with_roll(Unit::new("Axe", Species::Dwarves, 2), ["m", "m", "s"])
            .with_terrain(TerrainContext::new(Elements::WATER))
            .with_carried([charge]);
        let result = resolve(&request);
        assert_eq!(result.opponent_damage.spell_save_only, 2);
    }
}
