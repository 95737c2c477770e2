//! Closed set of special-action icons known to the engine.

/// A named special-action icon (SAI).
///
/// Discriminants index [`REGISTRY`](super::REGISTRY); keep both in the same
/// order.
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
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
#[repr(u8)]
pub enum SaiKind {
    // ========================================================================
    // Result generators
    // ========================================================================
    Cantrip,
    Trample,
    Counter,
    Fly,
    Hoof,
    FlamingShield,
    ScorchingShield,
    FrostMagic,
    Regenerate,
    Cloak,
    CreateFireminions,
    WildGrowth,
    Volley,

    // ========================================================================
    // Reroll and direct damage
    // ========================================================================
    Bullseye,
    Rend,
    Tail,
    DoubleStrike,
    Smite,

    // ========================================================================
    // Single-unit targeting
    // ========================================================================
    Kick,
    Coil,
    Slay,
    Bite,
    Bash,

    // ========================================================================
    // Health-worth targeting
    // ========================================================================
    Breath,
    Charm,
    Stun,
    Howl,
    Web,

    // ========================================================================
    // Army-wide and carried effects
    // ========================================================================
    Choke,
    HypnoticGlare,
    Surprise,
    FrostBreath,
    Wither,
    Charge,
    Trumpet,
    Elevate,
}

impl SaiKind {
    /// Position of this kind in the registry table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Canonical lookup key: lower case with spaces, `_` and `-` removed.
///
/// "Frost Breath", "frost_breath" and "FROST-BREATH" all compact to
/// "frostbreath".
pub fn compact_key(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}
