//! Effect registry: static catalog of special-action icons.
//!
//! Each entry records which roll categories the icon does something in, which
//! role (attacker/defender) it is restricted to, its reroll rule, and the rule
//! text. The catalog is read-only data; lookups are pure and repeatable.
//!
//! The per-icon behaviour lives in [`crate::effects`], which maps every
//! [`SaiKind`] to exactly one handler function.

mod kinds;

pub use kinds::{SaiKind, compact_key};

use crate::model::{Role, RoleFilter, RollCategory, RollMask};

/// Broad behaviour class of an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectClass {
    /// Adds results to one or more categories.
    Generator,
    /// Grants a reroll of the unit alongside its results.
    Reroll,
    /// Inflicts damage outside the normal save sequence.
    DirectDamage,
    /// Selects enemy (or friendly) units.
    Targeting,
    /// Alters another army's rolls via a carried effect.
    ArmyWide,
    /// Multiplies or divides results of selected units. Targets of these
    /// effects are exclusive for the rest of the turn.
    MultiplyDivide,
}

/// When rolling an icon lets the unit be rolled again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RerollRule {
    pub during: RollMask,
    pub mandatory: bool,
}

/// One registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectSpec {
    pub kind: SaiKind,
    pub name: &'static str,
    /// Additional accepted spellings, compared with [`compact_key`].
    pub aliases: &'static [&'static str],
    pub applies_to: RollMask,
    pub roles: RoleFilter,
    pub class: EffectClass,
    pub reroll: Option<RerollRule>,
    pub description: &'static str,
}

impl EffectSpec {
    /// True if this icon does anything during `category` rolled in `role`.
    pub const fn applies(&self, category: RollCategory, role: Role) -> bool {
        self.applies_to.includes(category) && self.roles.allows(role)
    }

    /// True if the icon grants a reroll during `category`.
    pub const fn rerolls_during(&self, category: RollCategory) -> Option<bool> {
        match self.reroll {
            Some(rule) if rule.during.includes(category) => Some(rule.mandatory),
            _ => None,
        }
    }

    fn matches(&self, key: &str) -> bool {
        compact_key(self.name) == key || self.aliases.iter().any(|alias| compact_key(alias) == key)
    }
}

const MELEE_SAVE_DRAGON: RollMask = RollMask::MELEE
    .union(RollMask::SAVE)
    .union(RollMask::DRAGON_ATTACK);
const MELEE_DRAGON: RollMask = RollMask::MELEE.union(RollMask::DRAGON_ATTACK);

const fn entry(
    kind: SaiKind,
    name: &'static str,
    applies_to: RollMask,
    roles: RoleFilter,
    class: EffectClass,
    description: &'static str,
) -> EffectSpec {
    EffectSpec {
        kind,
        name,
        aliases: &[],
        applies_to,
        roles,
        class,
        reroll: None,
        description,
    }
}

const fn with_reroll(mut spec: EffectSpec, during: RollMask, mandatory: bool) -> EffectSpec {
    spec.reroll = Some(RerollRule { during, mandatory });
    spec
}

const fn with_aliases(mut spec: EffectSpec, aliases: &'static [&'static str]) -> EffectSpec {
    spec.aliases = aliases;
    spec
}

/// The catalog, indexed by [`SaiKind::index`].
pub static REGISTRY: [EffectSpec; 36] = [
    entry(
        SaiKind::Cantrip,
        "Cantrip",
        RollMask::NON_MANEUVER,
        RoleFilter::Any,
        EffectClass::Generator,
        "During a magic roll, Cantrip generates X magic results. During a save roll or a \
         counter-attack, it generates X magic results usable only for cantrip spells.",
    ),
    entry(
        SaiKind::Trample,
        "Trample",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Trample generates X maneuver and X melee results.",
    ),
    entry(
        SaiKind::Counter,
        "Counter",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During a save roll, Counter generates X save results; against a melee attack it also \
         inflicts X damage on the attacking army. During a melee attack it generates X melee \
         results; during other rolls, X results of the appropriate type.",
    ),
    entry(
        SaiKind::Fly,
        "Fly",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Fly generates X maneuver or X save results.",
    ),
    with_aliases(
        entry(
            SaiKind::Hoof,
            "Hoof",
            RollMask::ANY,
            RoleFilter::Any,
            EffectClass::Generator,
            "During any roll, Hoof generates X maneuver results.",
        ),
        &["Paw"],
    ),
    entry(
        SaiKind::FlamingShield,
        "Flaming Shield",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Flaming Shield generates X save results. During a save roll against \
         a melee attack, it inflicts X damage on the attacking army.",
    ),
    entry(
        SaiKind::ScorchingShield,
        "Scorching Shield",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Scorching Shield generates X save results. During a save roll \
         against a melee attack, it inflicts X damage on the attacking army with no save \
         possible.",
    ),
    entry(
        SaiKind::FrostMagic,
        "Frost Magic",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Frost Magic generates X magic results. During a magic action they \
         may instead negate an opposing magic action.",
    ),
    entry(
        SaiKind::Regenerate,
        "Regenerate",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During a save roll, this unit heals one point of damage. During other rolls, \
         Regenerate generates X save results.",
    ),
    entry(
        SaiKind::Cloak,
        "Cloak",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any roll, Cloak generates X save results and the unit cannot be targeted \
         until the end of the turn. During a save roll it generates X additional saves.",
    ),
    entry(
        SaiKind::CreateFireminions,
        "Create Fireminions",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any army roll, Create Fireminions generates X results of the type being rolled.",
    ),
    entry(
        SaiKind::WildGrowth,
        "Wild Growth",
        RollMask::NON_MANEUVER,
        RoleFilter::Any,
        EffectClass::Generator,
        "During any non-maneuver roll, Wild Growth generates X save results or promotes X \
         health-worth of units in this army.",
    ),
    entry(
        SaiKind::Volley,
        "Volley",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Generator,
        "During a save roll against a melee attack, make a missile attack against the \
         attacking army using this unit's missile results. During other rolls, Volley \
         generates X missile results.",
    ),
    with_reroll(
        entry(
            SaiKind::Bullseye,
            "Bullseye",
            RollMask::MISSILE
                .union(RollMask::MANEUVER)
                .union(RollMask::DRAGON_ATTACK),
            RoleFilter::Any,
            EffectClass::DirectDamage,
            "During a missile attack, Bullseye inflicts X damage on the defending army with no \
             save possible and the unit may be rolled again. During a maneuver roll it generates \
             X maneuver results; during a dragon attack, X missile results.",
        ),
        RollMask::MISSILE,
        false,
    ),
    with_reroll(
        entry(
            SaiKind::Rend,
            "Rend",
            MELEE_DRAGON.union(RollMask::MANEUVER),
            RoleFilter::Any,
            EffectClass::Reroll,
            "During a melee or dragon attack, Rend generates X melee results; roll this unit \
             again and apply the new result as well. During a maneuver roll, Rend generates X \
             maneuver results.",
        ),
        MELEE_DRAGON,
        true,
    ),
    with_reroll(
        entry(
            SaiKind::Tail,
            "Tail",
            MELEE_DRAGON,
            RoleFilter::Any,
            EffectClass::Reroll,
            "During a dragon or melee attack, Tail generates X melee results; roll this unit \
             again and apply the new result as well.",
        ),
        MELEE_DRAGON,
        true,
    ),
    with_reroll(
        entry(
            SaiKind::DoubleStrike,
            "Double Strike",
            MELEE_DRAGON,
            RoleFilter::Any,
            EffectClass::Reroll,
            "During a melee attack, target X health-worth of units in the defending army; the \
             targets make a save roll and those without a save result are killed. Roll this \
             unit again. During a dragon attack, Double Strike generates X melee results.",
        ),
        RollMask::MELEE,
        true,
    ),
    entry(
        SaiKind::Smite,
        "Smite",
        MELEE_DRAGON,
        RoleFilter::Any,
        EffectClass::DirectDamage,
        "During a melee attack, Smite inflicts X damage on the defending army with no save \
         possible. During a dragon attack, Smite generates X melee results.",
    ),
    entry(
        SaiKind::Kick,
        "Kick",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target one unit in the defending army; it takes X damage. \
         During a save roll, Kick generates X save results. During a dragon attack, X melee \
         and X save results.",
    ),
    entry(
        SaiKind::Coil,
        "Coil",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target one unit in the defending army; it takes X damage. \
         During a save roll, Coil generates X save results. During a dragon attack, X melee \
         and X save results.",
    ),
    entry(
        SaiKind::Slay,
        "Slay",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target one unit in the defending army; it is killed and \
         buried. During a save roll, Slay generates X save results. During a dragon attack, \
         X melee and X save results.",
    ),
    entry(
        SaiKind::Bite,
        "Bite",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target one unit in the defending army; it makes a save roll \
         and is killed without a save result. During a save roll, Bite generates X save \
         results. During a dragon attack, X melee and X save results.",
    ),
    entry(
        SaiKind::Bash,
        "Bash",
        RollMask::ANY,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a save roll, target one unit in the attacking army; it takes X damage. During \
         other rolls, Bash generates X results of the appropriate type.",
    ),
    with_aliases(
        entry(
            SaiKind::Breath,
            "Breath",
            MELEE_DRAGON,
            RoleFilter::Any,
            EffectClass::Targeting,
            "During a melee attack, target up to X health-worth of units in the defending \
             army; the targets are killed and buried. During a dragon attack, Breath generates \
             X melee results.",
        ),
        &["Firebreath", "Fire Breath"],
    ),
    entry(
        SaiKind::Charm,
        "Charm",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target up to X health-worth of units in the defending army; \
         they fight for you until the end of the turn. During a save roll, Charm generates X \
         save results. During a dragon attack, X melee and X save results.",
    ),
    entry(
        SaiKind::Stun,
        "Stun",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target up to X health-worth of units in the defending army; \
         they cannot act until the end of the turn. During a save roll, Stun generates X save \
         results. During a dragon attack, X melee and X save results.",
    ),
    entry(
        SaiKind::Howl,
        "Howl",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target up to X health-worth of units in the defending army; \
         they flee to their Reserve Area. During a save roll, Howl generates X save results. \
         During a dragon attack, X melee and X save results.",
    ),
    entry(
        SaiKind::Web,
        "Web",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Targeting,
        "During a melee attack, target up to half of X health-worth of units in the defending \
         army; they are trapped and cannot act. During a save roll, Web generates X save \
         results. During a dragon attack, X melee and X save results.",
    ),
    entry(
        SaiKind::Choke,
        "Choke",
        RollMask::MELEE,
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee attack, when the defending army rolls for saves, target up to X \
         health-worth of units in that army that rolled an ID result. They are killed and \
         their ID results do not count towards saves.",
    ),
    entry(
        SaiKind::HypnoticGlare,
        "Hypnotic Glare",
        RollMask::MELEE,
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee attack, when the defending army rolls for saves, all units that roll \
         an ID result are hypnotized; those ID results are not counted as saves.",
    ),
    entry(
        SaiKind::Surprise,
        "Surprise",
        RollMask::MELEE,
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee attack, the defending army cannot counter-attack. It may still make a \
         save roll as normal. No effect during a counter-attack.",
    ),
    entry(
        SaiKind::FrostBreath,
        "Frost Breath",
        RollMask::MELEE.union(RollMask::MISSILE),
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee or missile attack, target an opposing army at the same terrain. Until \
         the beginning of your next turn, the target army halves all results it rolls.",
    ),
    entry(
        SaiKind::Wither,
        "Wither",
        RollMask::MELEE,
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee attack, target an opposing army at the same terrain. Until the \
         beginning of your next turn, it subtracts three results from all rolls it makes.",
    ),
    entry(
        SaiKind::Charge,
        "Charge",
        RollMask::MELEE,
        RoleFilter::Attacker,
        EffectClass::ArmyWide,
        "During a melee attack, the attacking army counts all maneuver results as melee \
         results. The defending army makes a combination save and melee roll; the attacker \
         takes damage equal to those melee results, reducible only by spell saves.",
    ),
    entry(
        SaiKind::Trumpet,
        "Trumpet",
        MELEE_SAVE_DRAGON,
        RoleFilter::Any,
        EffectClass::Generator,
        "During a dragon attack, melee attack or save roll, each Feral unit in this army \
         doubles its melee and save results.",
    ),
    entry(
        SaiKind::Elevate,
        "Elevate",
        RollMask::NON_MANEUVER,
        RoleFilter::Any,
        EffectClass::MultiplyDivide,
        "During any non-maneuver roll, target up to X health-worth of units in this army; \
         their results are doubled. Units may only be affected by one multiplying or \
         dividing effect per turn.",
    ),
];

/// Read-only view over [`REGISTRY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EffectRegistry;

impl EffectRegistry {
    /// Looks up an icon by name, case-insensitively.
    ///
    /// Returns `None` for unknown names and for the unqualified "SAI" token,
    /// which names no specific effect.
    pub fn lookup(name: &str) -> Option<&'static EffectSpec> {
        let key = compact_key(name);
        if key.is_empty() || key == "sai" {
            return None;
        }
        REGISTRY.iter().find(|spec| spec.matches(&key))
    }

    /// Registry entry for a known kind.
    pub fn spec(kind: SaiKind) -> &'static EffectSpec {
        &REGISTRY[kind.index()]
    }

    /// All entries in declaration order.
    pub fn all() -> &'static [EffectSpec] {
        &REGISTRY
    }
}
