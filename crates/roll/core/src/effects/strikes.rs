use crate::model::{ResultType, RollCategory};
use crate::targeting::TargetKind;

use super::{EffectInput, EffectOutput};

pub(super) fn bullseye(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Missile => {
            out.damage.unsavable = out.damage.unsavable.saturating_add(input.x);
            out.applied.push(format!(
                "{}: {} damage to the defending army, no save possible",
                input.label(),
                input.x
            ));
        }
        RollCategory::Maneuver => out.generate(input, ResultType::Maneuver, input.x),
        RollCategory::DragonAttack => out.generate(input, ResultType::Missile, input.x),
        _ => {}
    }
}

pub(super) fn rend(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Melee | RollCategory::DragonAttack => {
            out.generate(input, ResultType::Melee, input.x)
        }
        RollCategory::Maneuver => out.generate(input, ResultType::Maneuver, input.x),
        _ => {}
    }
}

pub(super) fn tail(input: &EffectInput<'_>, out: &mut EffectOutput) {
    out.generate(input, ResultType::Melee, input.x);
}

pub(super) fn double_strike(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Melee => {
            let request = input.targeting(TargetKind::HealthWorth, input.x, input.opposing_side());
            out.request(
                request,
                format!(
                    "{}: {} health-worth of units must save or die",
                    input.label(),
                    input.x
                ),
            );
        }
        RollCategory::DragonAttack => out.generate(input, ResultType::Melee, input.x),
        _ => {}
    }
}

pub(super) fn smite(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Melee => {
            out.damage.unsavable = out.damage.unsavable.saturating_add(input.x);
            out.applied.push(format!(
                "{}: {} damage, no save possible",
                input.label(),
                input.x
            ));
        }
        RollCategory::DragonAttack => out.generate(input, ResultType::Melee, input.x),
        _ => {}
    }
}

/// Kick, Coil, Slay and Bite.
pub(super) fn single_unit(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Melee => {
            let request = input.targeting(TargetKind::SpecificUnit, 1, input.opposing_side());
            out.request(request, format!("{}: targets one unit", input.label()));
        }
        RollCategory::Save => out.generate(input, ResultType::Save, input.x),
        RollCategory::DragonAttack => {
            out.generate(input, ResultType::Melee, input.x);
            out.generate(input, ResultType::Save, input.x);
        }
        _ => {}
    }
}

pub(super) fn bash(input: &EffectInput<'_>, out: &mut EffectOutput) {
    if input.category == RollCategory::Save {
        let request = input.targeting(TargetKind::SpecificUnit, 1, input.opposing_side());
        out.request(
            request,
            format!(
                "{}: one attacking unit takes {} damage",
                input.label(),
                input.x
            ),
        );
    } else {
        out.generate_primary(input);
    }
}

pub(super) fn breath(input: &EffectInput<'_>, out: &mut EffectOutput) {
    match input.category {
        RollCategory::Melee => {
            let request = input
                .targeting(TargetKind::HealthWorth, input.x, input.opposing_side())
                .fill_fullest_extent();
            out.request(
                request,
                format!(
                    "{}: {} health-worth of units killed and buried",
                    input.label(),
                    input.x
                ),
            );
        }
        RollCategory::DragonAttack => out.generate(input, ResultType::Melee, input.x),
        _ => {}
    }
}

fn health_worth_strike(input: &EffectInput<'_>, out: &mut EffectOutput, worth: u32) {
    match input.category {
        RollCategory::Melee => {
            let request = input.targeting(TargetKind::HealthWorth, worth, input.opposing_side());
            out.request(
                request,
                format!("{}: targets {worth} health-worth of units", input.label()),
            );
        }
        RollCategory::Save => out.generate(input, ResultType::Save, input.x),
        RollCategory::DragonAttack => {
            out.generate(input, ResultType::Melee, input.x);
            out.generate(input, ResultType::Save, input.x);
        }
        _ => {}
    }
}

/// Charm, Stun and Howl.
pub(super) fn health_worth(input: &EffectInput<'_>, out: &mut EffectOutput) {
    health_worth_strike(input, out, input.x);
}

pub(super) fn web(input: &EffectInput<'_>, out: &mut EffectOutput) {
    health_worth_strike(input, out, (input.x / 2).max(1));
}

#[cfg(test)]
mod tests {
    use crate::effects::test_support::*;
    use crate::model::{ResultType, Role, RollCategory};
    use crate::registry::SaiKind;
    use crate::targeting::{TargetKind, TargetSide};

    #[test]
    fn bullseye_missile_damage_is_unsavable() {
        let out = run(SaiKind::Bullseye, 4, RollCategory::Missile, Role::Attacker);
        assert_eq!(out.damage.unsavable, 4);
        assert!(out.modifiers.is_empty());

        let dragon = run(SaiKind::Bullseye, 4, RollCategory::DragonAttack, Role::Defender);
        assert_eq!(generated(&dragon, ResultType::Missile), 4);
    }

    #[test]
    fn kick_targets_a_single_defender() {
        let out = run(SaiKind::Kick, 3, RollCategory::Melee, Role::Attacker);
        assert_eq!(out.targeting.len(), 1);
        let request = &out.targeting[0];
        assert_eq!(request.target_kind, TargetKind::SpecificUnit);
        assert_eq!(request.target_count, 1);
        assert_eq!(request.target_side, TargetSide::Defending);
        assert_eq!(request.sai_name, "Kick");
    }

    #[test]
    fn bash_on_save_targets_the_attacker() {
        let out = run(SaiKind::Bash, 1, RollCategory::Save, Role::Defender);
        assert_eq!(out.targeting[0].target_side, TargetSide::Attacking);

        let melee = run(SaiKind::Bash, 1, RollCategory::Melee, Role::Attacker);
        assert_eq!(generated(&melee, ResultType::Melee), 1);
    }

    #[test]
    fn breath_fills_to_fullest_extent() {
        let out = run(SaiKind::Breath, 4, RollCategory::Melee, Role::Attacker);
        assert!(out.targeting[0].must_fill_fullest_extent);
        assert_eq!(out.targeting[0].target_count, 4);
    }

    #[test]
    fn web_targets_half_rounded_down_at_least_one() {
        let four = run(SaiKind::Web, 4, RollCategory::Melee, Role::Attacker);
        assert_eq!(four.targeting[0].target_count, 2);
        let one = run(SaiKind::Web, 1, RollCategory::Melee, Role::Attacker);
        assert_eq!(one.targeting[0].target_count, 1);
    }

    #[test]
    fn smite_and_double_strike() {
        let smite = run(SaiKind::Smite, 2, RollCategory::Melee, Role::Attacker);
        assert_eq!(smite.damage.unsavable, 2);

        let strike = run(SaiKind::DoubleStrike, 2, RollCategory::Melee, Role::Attacker);
        assert_eq!(strike.targeting[0].target_kind, TargetKind::HealthWorth);
        assert!(!strike.targeting[0].must_fill_fullest_extent);
    }
}
