//! Typed modifiers consumed by the resolution pipeline.

use crate::model::{ResultMask, ResultType};

/// How a modifier changes the working totals.
///
/// Variants are listed in the order the pipeline applies them.
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
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    /// Remove results, never below zero.
    Subtract,
    /// Integer division, rounding down.
    Divide,
    /// Results generated by an icon effect.
    AddEffect,
    Multiply,
    /// Results from non-icon sources.
    Add,
    /// Results of one type also counted as another (ID faces, species rules).
    CountsAs,
}

/// A single adjustment to one or more result types.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub kind: ModifierKind,
    pub value: u32,
    /// What produced the modifier ("Wither", "Dwarven Might", a unit name).
    pub source: String,
    pub target: ResultMask,
    pub description: String,
}

impl Modifier {
    pub fn new(
        kind: ModifierKind,
        value: u32,
        target: impl Into<ResultMask>,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            value,
            source: source.into(),
            target: target.into(),
            description: description.into(),
        }
    }

    /// Effect-generated results of a single type.
    pub fn add_effect(value: u32, ty: ResultType, source: impl Into<String>) -> Self {
        let source = source.into();
        let description = format!("{source}: +{value} {ty}");
        Self::new(ModifierKind::AddEffect, value, ty, source, description)
    }

    /// Non-effect results of a single type.
    pub fn add(value: u32, ty: ResultType, source: impl Into<String>) -> Self {
        let source = source.into();
        let description = format!("{source}: +{value} {ty}");
        Self::new(ModifierKind::Add, value, ty, source, description)
    }

    /// `value` results that also count as `ty`.
    pub fn counts_as(
        value: u32,
        ty: ResultType,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(ModifierKind::CountsAs, value, ty, source, description)
    }

    pub fn subtract(value: u32, target: ResultMask, source: impl Into<String>) -> Self {
        let source = source.into();
        let description = format!("{source}: -{value} to {}", describe_mask(target));
        Self::new(ModifierKind::Subtract, value, target, source, description)
    }

    pub fn divide(divisor: u32, target: ResultMask, source: impl Into<String>) -> Self {
        let source = source.into();
        let description = format!("{source}: /{divisor} to {}", describe_mask(target));
        Self::new(ModifierKind::Divide, divisor, target, source, description)
    }

    pub fn multiply(factor: u32, target: ResultMask, source: impl Into<String>) -> Self {
        let source = source.into();
        let description = format!("{source}: x{factor} to {}", describe_mask(target));
        Self::new(ModifierKind::Multiply, factor, target, source, description)
    }
}

fn describe_mask(mask: ResultMask) -> String {
    if mask == ResultMask::ALL {
        return "all results".to_string();
    }
    let names: Vec<String> = mask.types().map(|ty| ty.to_string()).collect();
    names.join("/")
}
