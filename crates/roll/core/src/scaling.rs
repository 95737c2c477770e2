//! Die-scaling: how large an icon's effect is.

use crate::config::ScalingConfig;
use crate::model::DieClass;

/// Effect magnitude ("X") of an icon face rolled on a die of `class`.
///
/// Standard dice use the icon count on the face; large and monster-class
/// dice use the fixed magnitudes from `scaling`. Unknown classes fall back to
/// the icon count.
pub fn x_value(class: &DieClass, icons_on_face: u32, scaling: &ScalingConfig) -> u32 {
    match class {
        DieClass::Standard | DieClass::Other(_) => icons_on_face,
        DieClass::LargeEquipment | DieClass::LargeDragonkin => scaling.large,
        DieClass::Monster
        | DieClass::Artifact
        | DieClass::Medallion
        | DieClass::Relic
        | DieClass::Champion => scaling.monster,
    }
}
