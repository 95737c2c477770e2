use tracing::trace;

use crate::model::{ResultType, Species};
use crate::result::DelayedEffectType;
use crate::targeting::TargetKind;

use super::{EffectInput, EffectOutput};

pub(super) fn choke(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.delayed.push(input.delayed(
        DelayedEffectType::NegateIdSaves,
        input.x,
        "defending army save roll",
        format!(
            "{}: up to {} health-worth of defenders rolling ID are killed; their ID results do not count as saves",
            input.label(),
            input.x
        ),
    ));
}

pub(super) fn hypnotic_glare(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.delayed.push(input.delayed(
        DelayedEffectType::SuppressIdSaves,
        0,
        "defending army save roll",
        format!(
            "{}: ID results do not count as saves on the next save roll",
            input.label()
        ),
    ));
}

pub(super) fn surprise(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.delayed.push(input.delayed(
        DelayedEffectType::NoCounterAttack,
        0,
        "defending army counter-attack",
        format!("{}: the defending army cannot counter-attack", input.label()),
    ));
}

pub(super) fn frost_breath(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let request = input.targeting(TargetKind::Army, 1, input.opposing_side());
    out.request(
        request,
        format!("{}: targets an opposing army at this terrain", input.label()),
    );
    out.delayed.push(input.delayed(
        DelayedEffectType::HalveResults,
        2,
        "targeted army until the beginning of your next turn",
        format!("{}: the targeted army halves all its results", input.label()),
    ));
}

pub(super) fn wither(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let request = input.targeting(TargetKind::Army, 1, input.opposing_side());
    out.request(
        request,
        format!("{}: targets an opposing army at this terrain", input.label()),
    );
    out.delayed.push(input.delayed(
        DelayedEffectType::SubtractResults,
        input.wither_penalty,
        "targeted army until the beginning of your next turn",
        format!(
            "{}: the targeted army subtracts {} from every roll",
            input.label(),
            input.wither_penalty
        ),
    ));
}

pub(super) fn charge(input: &EffectInput<'_>, out: &mut EffectOutput) {
    if !input.first_of_kind {
        trace!(unit = %input.unit.name, "charge already applied to this roll");
        return;
    }
    out.generate(input, ResultType::Melee, input.raw.maneuver);
    out.delayed.push(input.delayed(
        DelayedEffectType::ChargeCounter,
        0,
        "defending army combination roll",
        format!(
            "{}: the defender makes a combination save and melee roll; its melee results damage the attacker, reducible only by spell saves",
            input.label()
        ),
    ));
}

pub(super) fn trumpet(input: &EffectInput<'_>, out: &mut EffectOutput) {
    if !input.first_of_kind {
        trace!(unit = %input.unit.name, "trumpet already applied to this roll");
        return;
    }
    let feral = input
        .rolls
        .iter()
        .filter(|roll| roll.unit.is_some_and(|unit| unit.species == Species::Feral));
    let (melee, save) = feral.fold((0, 0), |(melee, save), roll| {
        (melee + roll.base.melee, save + roll.base.save)
    });
    if melee == 0 && save == 0 {
        out.notes
            .push(format!("{}: no Feral melee or save results to double", input.label()));
        return;
    }
    out.generate(input, ResultType::Melee, melee);
    out.generate(input, ResultType::Save, save);
}

pub(super) fn elevate(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let request = input.targeting(TargetKind::HealthWorth, input.x, input.own_side());
    out.request(
        request,
        format!(
            "{}: results of {} health-worth of units in this army are doubled",
            input.label(),
            input.x
        ),
    );
}
