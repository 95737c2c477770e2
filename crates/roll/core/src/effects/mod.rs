//! Per-icon effect handlers.
//!
//! Every [`SaiKind`] maps to exactly one [`EffectHandler`]. The pipeline has
//! already checked that the icon applies to the roll (category and role) and
//! computed its X-value; a handler only translates the icon into modifiers,
//! carried effects, targeting requests, damage and notes.
//!
//! Handlers are grouped by what they mostly do:
//! - [`generators`]: icons that add results
//! - [`strikes`]: rerolls, direct damage and unit targeting
//! - [`army`]: army-wide and carried effects

mod army;
mod generators;
mod strikes;

use crate::model::{ResultType, Role, RollCategory, Unit};
use crate::modifier::{Modifier, ModifierKind};
use crate::pipeline::{Tally, UnitRoll};
use crate::registry::{EffectClass, EffectRegistry, SaiKind};
use crate::result::{DelayedEffect, DelayedEffectType, OpponentDamage};
use crate::targeting::{TargetKind, TargetSide, TargetingRequest};

/// Everything a handler may read.
#[derive(Clone, Copy, Debug)]
pub struct EffectInput<'a> {
    pub kind: SaiKind,
    pub unit: &'a Unit,
    /// Die-scaled magnitude of the icon.
    pub x: u32,
    pub category: RollCategory,
    pub role: Role,
    pub responding_to: Option<RollCategory>,
    /// Every unit's faces in this roll.
    pub rolls: &'a [UnitRoll<'a>],
    /// Base results of the whole army.
    pub raw: &'a Tally,
    /// False when the same army-wide icon was already applied this roll.
    pub first_of_kind: bool,
    pub wither_penalty: u32,
}

impl EffectInput<'_> {
    /// Registry name of the icon.
    pub fn name(&self) -> &'static str {
        EffectRegistry::spec(self.kind).name
    }

    /// "Unit Icon" label used in descriptions.
    pub fn label(&self) -> String {
        format!("{} {}", self.unit.name, self.name())
    }

    /// The army on the other side of the action.
    pub fn opposing_side(&self) -> TargetSide {
        TargetSide::opposing(self.role)
    }

    /// The rolling army.
    pub fn own_side(&self) -> TargetSide {
        TargetSide::own(self.role)
    }

    /// Targeting request sourced from this icon. Multiply/divide icons
    /// request exclusive targets.
    pub fn targeting(&self, kind: TargetKind, count: u32, side: TargetSide) -> TargetingRequest {
        let request = TargetingRequest::new(self.name(), self.unit.name.clone(), kind, count, side);
        if EffectRegistry::spec(self.kind).class == EffectClass::MultiplyDivide {
            request.exclusive()
        } else {
            request
        }
    }

    pub fn delayed(
        &self,
        effect_type: DelayedEffectType,
        value: u32,
        target: &str,
        description: String,
    ) -> DelayedEffect {
        DelayedEffect {
            effect_type,
            source: self.name().to_string(),
            target_description: target.to_string(),
            value,
            description,
            target_units: Vec::new(),
        }
    }
}

/// Everything a handler may produce.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectOutput {
    pub modifiers: Vec<Modifier>,
    pub delayed: Vec<DelayedEffect>,
    pub targeting: Vec<TargetingRequest>,
    pub damage: OpponentDamage,
    pub cantrip_magic: u32,
    /// Descriptions of outcomes that are not modifiers.
    pub applied: Vec<String>,
    pub notes: Vec<String>,
}

impl EffectOutput {
    /// Adds `amount` effect results of type `ty`.
    pub fn generate(&mut self, input: &EffectInput<'_>, ty: ResultType, amount: u32) {
        let description = format!("{}: +{amount} {ty}", input.label());
        self.generate_described(input, ty, amount, description);
    }

    /// Like [`generate`](Self::generate) with a custom description.
    pub fn generate_described(
        &mut self,
        input: &EffectInput<'_>,
        ty: ResultType,
        amount: u32,
        description: String,
    ) {
        if amount == 0 {
            return;
        }
        self.modifiers.push(Modifier::new(
            ModifierKind::AddEffect,
            amount,
            ty,
            input.name(),
            description,
        ));
    }

    /// Adds X results of the roll's primary type.
    pub fn generate_primary(&mut self, input: &EffectInput<'_>) {
        self.generate(input, input.category.primary_result(), input.x);
    }

    pub fn request(&mut self, request: TargetingRequest, description: String) {
        self.targeting.push(request);
        self.applied.push(description);
    }
}

/// Signature shared by all handlers.
pub type EffectHandler = fn(&EffectInput<'_>, &mut EffectOutput);

/// The handler for `kind`.
pub fn handler(kind: SaiKind) -> EffectHandler {
    use SaiKind::*;
    match kind {
        Cantrip => generators::cantrip,
        Trample => generators::trample,
        Counter => generators::counter,
        Fly => generators::fly,
        Hoof => generators::hoof,
        FlamingShield => generators::flaming_shield,
        ScorchingShield => generators::scorching_shield,
        FrostMagic => generators::frost_magic,
        Regenerate => generators::regenerate,
        Cloak => generators::cloak,
        CreateFireminions => generators::create_fireminions,
        WildGrowth => generators::wild_growth,
        Volley => generators::volley,

        Bullseye => strikes::bullseye,
        Rend => strikes::rend,
        Tail => strikes::tail,
        DoubleStrike => strikes::double_strike,
        Smite => strikes::smite,
        Kick | Coil | Slay | Bite => strikes::single_unit,
        Bash => strikes::bash,
        Breath => strikes::breath,
        Charm | Stun | Howl => strikes::health_worth,
        Web => strikes::web,

        Choke => army::choke,
        HypnoticGlare => army::hypnotic_glare,
        Surprise => army::surprise,
        FrostBreath => army::frost_breath,
        Wither => army::wither,
        Charge => army::charge,
        Trumpet => army::trumpet,
        Elevate => army::elevate,
    }
}

/// Runs the handler for `input.kind`.
pub fn dispatch(input: &EffectInput<'_>) -> EffectOutput {
    let mut out = EffectOutput::default();
    handler(input.kind)(input, &mut out);
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::model::Species;

    pub fn run(kind: SaiKind, x: u32, category: RollCategory, role: Role) -> EffectOutput {
        run_with(kind, x, category, role, None)
    }

    pub fn run_with(
        kind: SaiKind,
        x: u32,
        category: RollCategory,
        role: Role,
        responding_to: Option<RollCategory>,
    ) -> EffectOutput {
        let unit = Unit::new("Hero", Species::Dragonkin, 2);
        let raw = Tally::new();
        let input = EffectInput {
            kind,
            unit: &unit,
            x,
            category,
            role,
            responding_to,
            rolls: &[],
            raw: &raw,
            first_of_kind: true,
            wither_penalty: 3,
        };
        dispatch(&input)
    }

    /// Sum of effect results of `ty`.
    pub fn generated(out: &EffectOutput, ty: ResultType) -> u32 {
        out.modifiers
            .iter()
            .filter(|m| m.kind == ModifierKind::AddEffect && m.target.contains(ty.mask()))
            .map(|m| m.value)
            .sum()
    }
}
