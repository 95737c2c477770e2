use crate::model::{ResultType, Role, RollCategory};

use super::{EffectInput, EffectOutput};

pub(super) fn cantrip(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Magic => out.generate(input, ResultType::Magic, input.x),
        RollCategory::Melee | RollCategory::Missile | RollCategory::Save
            if input.role == Role::Defender =>
        {
            out.cantrip_magic = out.cantrip_magic.saturating_add(input.x);
            let description = format!(
                "{}: +{} magic usable only for cantrip spells",
                input.label(),
                input.x
            );
            out.generate_described(input, ResultType::Magic, input.x, description);
        }
        _ => {}
    }
}

pub(super) fn trample(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate(input, ResultType::Maneuver, input.x);
    out.generate(input, ResultType::Melee, input.x);
}

pub(super) fn counter(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match (input.category, input.role) {
        (RollCategory::Save, _) => {
            out.generate(input, ResultType::Save, input.x);
            if input.responding_to != Some(RollCategory::Melee) {
                return;
            }
            out.damage.savable = out.damage.savable.saturating_add(input.x);
            out.applied.push(format!(
                "{}: {} counter-attack damage to the attacking army",
                input.label(),
                input.x
            ));
        }
        (RollCategory::Melee, Role::Attacker) => out.generate(input, ResultType::Melee, input.x),
        _ => out.generate_primary(input),
    }
}

pub(super) fn fly(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let ty = if input.category == RollCategory::Save {
        ResultType::Save
    } else {
        ResultType::Maneuver
    };
    out.generate(input, ty, input.x);
}

pub(super) fn hoof(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate(input, ResultType::Maneuver, input.x);
}

fn shield(input: &EffectInput<'_>, out: &mut EffectOutput, unsavable: bool) {
    out.generate(input, ResultType::Save, input.x);
    let against_melee = input.category == RollCategory::Save
        && input.responding_to == Some(RollCategory::Melee);
    if !against_melee {
        return;
    }
    if unsavable {
        out.damage.unsavable = out.damage.unsavable.saturating_add(input.x);
        out.applied.push(format!(
            "{}: {} damage to the attacking army, no save possible",
            input.label(),
            input.x
        ));
    } else {
        out.damage.savable = out.damage.savable.saturating_add(input.x);
        out.applied.push(format!(
            "{}: {} damage to the attacking army",
            input.label(),
            input.x
        ));
    }
}

pub(super) fn flaming_shield(input: &EffectInput<'_>, out: &mut EffectOutput) {
    shield(input, out, false);
}

pub(super) fn scorching_shield(input: &EffectInput<'_>, out: &mut EffectOutput) {
    shield(input, out, true);
}

pub(super) fn frost_magic(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate(input, ResultType::Magic, input.x);
    if input.category == RollCategory::Magic {
        out.notes.push(format!(
            "{}: results may instead negate an opposing magic action",
            input.label()
        ));
    }
}

pub(super) fn regenerate(input: &EffectInput<'_>, out: &mut EffectOutput) {
    if input.category == RollCategory::Save {
        out.applied
            .push(format!("{}: heals one point of damage", input.label()));
    } else {
        out.generate(input, ResultType::Save, input.x);
    }
}

pub(super) fn cloak(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let saves = if input.category == RollCategory::Save {
        input.x * 2
    } else {
        input.x
    };
    out.generate(input, ResultType::Save, saves);
    out.notes.push(format!(
        "{}: {} cannot be targeted until the end of the turn",
        input.label(),
        input.unit.name
    ));
}

pub(super) fn create_fireminions(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate_primary(input);
}

pub(super) fn wild_growth(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate(input, ResultType::Save, input.x);
    out.notes.push(format!(
        "{}: may instead promote {} health-worth of units",
        input.label(),
        input.x
    ));
}

pub(super) fn volley(input: &EffectInput<'_>, out: &mut EffectOutput) {
    let against_melee = input.category == RollCategory::Save
        && input.responding_to == Some(RollCategory::Melee);
    if against_melee {
        out.notes.push(format!(
            "{}: may make a missile attack against the attacking army",
            input.label()
        ));
    } else {
        out.generate(input, ResultType::Missile, input.x);
    }
}
