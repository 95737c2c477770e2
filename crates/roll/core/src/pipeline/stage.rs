//! Application of modifier stages to the working totals.

use crate::model::ResultType;
use crate::modifier::{Modifier, ModifierKind};

use super::Tally;

/// Modifier stages, in the order the pipeline applies them (steps 6 to 10).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ModifierStage {
    Subtract,
    Divide,
    AddEffect,
    Multiply,
    /// Non-effect additions and counts-as conversions.
    Add,
}

impl ModifierStage {
    pub const fn of(kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::Subtract => Self::Subtract,
            ModifierKind::Divide => Self::Divide,
            ModifierKind::AddEffect => Self::AddEffect,
            ModifierKind::Multiply => Self::Multiply,
            ModifierKind::Add | ModifierKind::CountsAs => Self::Add,
        }
    }
}

/// What applying a stage did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Descriptions of the modifiers that were applied.
    pub applied: Vec<String>,
    /// Modifiers that were ignored, with the reason.
    pub notes: Vec<String>,
}

/// Applies every modifier of `stage`, in order, to `tally`.
///
/// Modifiers of other stages are left alone, so the caller can run the same
/// bag through every stage.
pub fn apply_stage(stage: ModifierStage, tally: &mut Tally, modifiers: &[Modifier]) -> StageReport {
    let mut report = StageReport::default();

    for modifier in modifiers
        .iter()
        .filter(|m| ModifierStage::of(m.kind) == stage)
    {
        let targets = || modifier.target.types();
        match modifier.kind {
            ModifierKind::Subtract => targets().for_each(|ty| tally.subtract(ty, modifier.value)),
            ModifierKind::Divide => {
                if modifier.value == 0 {
                    report
                        .notes
                        .push(format!("{}: division by zero ignored", modifier.description));
                    continue;
                }
                targets().for_each(|ty: ResultType| tally[ty] /= modifier.value);
            }
            ModifierKind::Multiply => {
                targets().for_each(|ty| tally[ty] = tally[ty].saturating_mul(modifier.value))
            }
            ModifierKind::AddEffect | ModifierKind::Add | ModifierKind::CountsAs => {
                targets().for_each(|ty| tally.add(ty, modifier.value))
            }
        }
        report.applied.push(modifier.description.clone());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultMask;
    use strum::IntoEnumIterator;

    fn melee(value: u32) -> Tally {
        Tally {
            melee: value,
            ..Tally::new()
        }
    }

    fn bag() -> Vec<Modifier> {
        vec![
            Modifier::add(1, ResultType::Melee, "Stone Skin"),
            Modifier::multiply(2, ResultMask::MELEE, "Elevate"),
            Modifier::add_effect(3, ResultType::Melee, "Trample"),
            Modifier::divide(2, ResultMask::ALL, "Frost Breath"),
            Modifier::subtract(1, ResultMask::ALL, "Palsy"),
        ]
    }

    #[test]
    fn fixed_order_gives_documented_total() {
        // 5 - 1 = 4, / 2 = 2, + 3 = 5, x 2 = 10, + 1 = 11
        let mut tally = melee(5);
        for stage in ModifierStage::iter() {
            apply_stage(stage, &mut tally, &bag());
        }
        assert_eq!(tally.melee, 11);
    }

    #[test]
    fn reordering_stages_changes_the_result() {
        let mut tally = melee(5);
        for stage in [
            ModifierStage::Add,
            ModifierStage::AddEffect,
            ModifierStage::Subtract,
            ModifierStage::Divide,
            ModifierStage::Multiply,
        ] {
            apply_stage(stage, &mut tally, &bag());
        }
        // 5 + 1 + 3 = 9, - 1 = 8, / 2 = 4, x 2 = 8
        assert_eq!(tally.melee, 8);
        assert_ne!(tally.melee, 11);
    }

    #[test]
    fn subtraction_and_division_stay_non_negative() {
        let mut tally = melee(2);
        apply_stage(
            ModifierStage::Subtract,
            &mut tally,
            &[Modifier::subtract(5, ResultMask::ALL, "Wither")],
        );
        assert_eq!(tally, Tally::new());

        let mut odd = melee(5);
        apply_stage(
            ModifierStage::Divide,
            &mut odd,
            &[Modifier::divide(2, ResultMask::MELEE, "Frost Breath")],
        );
        assert_eq!(odd.melee, 2);
    }

    #[test]
    fn zero_divisor_is_ignored_with_a_note() {
        let mut tally = melee(4);
        let report = apply_stage(
            ModifierStage::Divide,
            &mut tally,
            &[Modifier::divide(0, ResultMask::MELEE, "Broken")],
        );
        assert_eq!(tally.melee, 4);
        assert!(report.applied.is_empty());
        assert_eq!(report.notes.len(), 1);
    }

    #[test]
    fn other_stages_are_untouched() {
        let mut tally = melee(4);
        let add = [Modifier::add(9, ResultType::Melee, "x")];
        let report = apply_stage(ModifierStage::Multiply, &mut tally, &add);
        assert_eq!(tally.melee, 4);
        assert!(report.applied.is_empty());
    }
}
