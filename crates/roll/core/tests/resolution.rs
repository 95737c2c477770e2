use std::sync::Arc;

use roll_core::{
    DelayedEffect, DelayedEffectType, DieClass, EffectRegistry, Elements, EngineConfig,
    GraveyardSnapshot, Modifier, ResultMask, ResultType, Role, RollCategory, RollEngine,
    RollRequest, Species, TerrainContext, Unit,
};
use strum::IntoEnumIterator;

fn engine() -> RollEngine {
    RollEngine::new(EngineConfig::default())
}

fn carried(effect_type: DelayedEffectType, source: &str, value: u32) -> DelayedEffect {
    DelayedEffect {
        effect_type,
        source: source.to_string(),
        target_description: String::new(),
        value,
        description: String::new(),
        target_units: Vec::new(),
    }
}

#[test]
fn id_bonus_is_health_and_doubles_on_eighth_face() {
    let knight = Unit::new("Knight", Species::Eldarim, 3);
    let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(knight.clone(), ["id"]);

    let plain = engine().resolve(&request);
    assert_eq!(plain.results.melee, 3);
    assert_eq!(plain.raw.id, 1);
    assert_eq!(plain.raw.results.melee, 0);

    let eighth = request.with_terrain(TerrainContext::new(Elements::AIR).with_eighth_face(true));
    let doubled = engine().resolve(&eighth);
    assert_eq!(doubled.results.melee, 6);
    assert!(
        doubled
            .applied_effects
            .iter()
            .any(|line| line.contains("eighth face"))
    );
}

#[test]
fn id_counts_as_the_attack_type_or_save() {
    let knight = Unit::new("Knight", Species::Eldarim, 2);
    for (category, role, ty) in [
        (RollCategory::Missile, Role::Attacker, ResultType::Missile),
        (RollCategory::Magic, Role::Attacker, ResultType::Magic),
        (RollCategory::Save, Role::Defender, ResultType::Save),
        (RollCategory::Maneuver, Role::Attacker, ResultType::Save),
        (RollCategory::Maneuver, Role::Defender, ResultType::Save),
        (RollCategory::DragonAttack, Role::Defender, ResultType::Save),
    ] {
        let request = RollRequest::new(category, role).with_roll(knight.clone(), ["id"]);
        let result = engine().resolve(&request);
        assert_eq!(result.results[ty], 2, "{category}");
        assert_eq!(result.results.total(), 2, "{category}");
    }
}

#[test]
fn dwarven_might_adds_melee_without_removing_saves() {
    let request = RollRequest::new(RollCategory::Melee, Role::Defender)
        .with_roll(Unit::new("Axeman", Species::Dwarves, 2), ["s", "s"])
        .with_terrain(TerrainContext::new(Elements::FIRE | Elements::EARTH));
    let result = engine().resolve(&request);

    assert_eq!(result.raw.results.melee, 0);
    assert_eq!(result.results.melee, 2);
    assert_eq!(result.results.save, 2);
    assert!(
        result
            .applied_effects
            .iter()
            .any(|line| line.contains("Dwarven Might"))
    );
}

#[test]
fn modifiers_apply_in_fixed_order() {
    // 5 melee - 1 = 4, / 2 = 2, + 1 (Trample) = 3, x 2 = 6, + 1 (ID) = 7
    let squire = Unit::new("Squire", Species::Eldarim, 1);
    let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(squire, ["m", "m", "m", "m", "m", "trample", "id"])
        .with_modifier(Modifier::multiply(2, ResultMask::MELEE, "Berserker Rage"))
        .with_modifier(Modifier::divide(2, ResultMask::ALL, "Frost Breath"))
        .with_modifier(Modifier::subtract(1, ResultMask::ALL, "Palsy"));

    let result = engine().resolve(&request);
    assert_eq!(result.results.melee, 7);
    assert_eq!(result.results.maneuver, 1);

    let log = &result.resolution_log;
    assert_eq!(log.len(), 10);
    assert!(log[5].starts_with("Step 6 (subtract): melee 5 → 4"), "{}", log[5]);
    assert!(log[6].starts_with("Step 7 (divide): melee 4 → 2"), "{}", log[6]);
    assert!(
        log[7].starts_with("Step 8 (effect add): melee 2 → 3, maneuver 0 → 1"),
        "{}",
        log[7]
    );
    assert!(log[8].starts_with("Step 9 (multiply): melee 3 → 6"), "{}", log[8]);
    assert!(log[9].starts_with("Step 10 (add and counts-as): melee 6 → 7"), "{}", log[9]);
}

#[test]
fn totals_never_go_negative() {
    let scout = Unit::new("Scout", Species::Goblins, 1);
    for category in RollCategory::iter() {
        for role in [Role::Attacker, Role::Defender] {
            let request = RollRequest::new(category, role)
                .with_roll(scout.clone(), ["m", "s", "ma"])
                .with_carried([
                    carried(DelayedEffectType::SubtractResults, "Wither", 3),
                    carried(DelayedEffectType::HalveResults, "Frost Breath", 2),
                ]);
            let result = engine().resolve(&request);
            assert_eq!(result.results.total(), 0, "{category} {role}");
            assert_eq!(result.resolution_log.len(), 10);
        }
    }
}

#[test]
fn wither_then_halve_on_a_save_roll() {
    let request = RollRequest::new(RollCategory::Save, Role::Defender)
        .with_roll(Unit::new("Wall", Species::Treefolk, 4), ["s", "s", "s", "s", "s"])
        .with_carried([
            carried(DelayedEffectType::HalveResults, "Frost Breath", 2),
            carried(DelayedEffectType::SubtractResults, "Wither", 3),
        ]);
    // Subtract runs before divide regardless of carried order: (5 - 3) / 2 = 1.
    assert_eq!(engine().resolve(&request).results.save, 1);
}

#[test]
fn surprise_stops_the_counter_attack() {
    let raider = Unit::new("Raider", Species::Goblins, 2);
    let attack = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(raider, ["m", "surprise"]);
    let attack_result = engine().resolve(&attack);
    assert_eq!(attack_result.delayed_effects.len(), 1);
    assert_eq!(
        attack_result.delayed_effects[0].effect_type,
        DelayedEffectType::NoCounterAttack
    );

    let counter = RollRequest::new(RollCategory::Melee, Role::Defender)
        .with_roll(Unit::new("Guard", Species::Dwarves, 2), ["m", "m", "s"])
        .with_carried(attack_result.delayed_effects.clone());
    let counter_result = engine().resolve(&counter);
    assert_eq!(counter_result.results.melee, 0);
    assert_eq!(counter_result.results.save, 1);

    // Carried to a save roll instead, Surprise does nothing.
    let save = RollRequest::new(RollCategory::Save, Role::Defender)
        .with_roll(Unit::new("Guard", Species::Dwarves, 2), ["s"])
        .with_carried(attack_result.delayed_effects);
    let save_result = engine().resolve(&save);
    assert_eq!(save_result.results.save, 1);
    assert!(save_result.notes.iter().any(|n| n.contains("no effect")));
}

#[test]
fn choke_targets_id_rollers_on_the_save_roll() {
    let attack = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(Unit::new("Strangler", Species::SwampStalkers, 2), ["choke"]);
    let choke = engine().resolve(&attack).delayed_effects;
    assert_eq!(choke.len(), 1);
    assert_eq!(choke[0].value, 1);

    let save = RollRequest::new(RollCategory::Save, Role::Defender)
        .with_roll(Unit::new("Page", Species::Eldarim, 1), ["id", "s"])
        .with_roll(Unit::new("Lord", Species::Eldarim, 2), ["id"])
        .with_roll(Unit::new("Archer", Species::Eldarim, 1), ["s"])
        .with_carried(choke);
    let result = engine().resolve(&save);

    assert_eq!(result.resolved_targeting.len(), 1);
    let (_, outcome) = &result.resolved_targeting[0];
    assert_eq!(outcome.targeted_units, vec!["Page"]);
    // Page's ID is dropped; Lord's still counts: 2 saves + 2.
    assert_eq!(result.results.save, 4);
}

#[test]
fn graveyard_feeds_bone_magic() {
    let mut graveyard = GraveyardSnapshot::new();
    for idx in 0..5 {
        graveyard.bury("alice", Unit::new(format!("Bones {idx}"), Species::Undead, 1));
    }
    let engine = engine().with_graveyard(Arc::new(graveyard));

    let request = RollRequest::new(RollCategory::Magic, Role::Attacker)
        .with_roll(Unit::new("Lich", Species::Undead, 3), ["mg", "mg", "mg"])
        .with_players("alice", "bob");
    let result = engine.resolve(&request);
    assert_eq!(result.results.magic, 6);

    let anonymous = RollRequest::new(RollCategory::Magic, Role::Attacker)
        .with_roll(Unit::new("Lich", Species::Undead, 3), ["mg"]);
    let skipped = engine.resolve(&anonymous);
    assert_eq!(skipped.results.magic, 1);
    assert!(skipped.notes.iter().any(|n| n.contains("rolling player unknown")));
}

#[test]
fn large_dice_use_fixed_magnitude() {
    let wyrm = Unit::new("Wyrm", Species::Dragonkin, 4).with_die_class(DieClass::LargeDragonkin);
    let request = RollRequest::new(RollCategory::DragonAttack, Role::Defender)
        .with_roll(wyrm, ["breath", "tail"]);
    let result = engine().resolve(&request);
    assert_eq!(result.results.melee, 6);
    assert_eq!(result.rerolls.len(), 1);
}

#[test]
fn charge_counts_maneuver_as_melee() {
    let rider = Unit::new("Rider", Species::Feral, 2);
    let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(rider, ["m", "ma", "ma", "charge"])
        .with_roll(Unit::new("Hound", Species::Feral, 1), ["charge"]);
    let result = engine().resolve(&request);
    // Second Charge icon does not count the maneuvers again.
    assert_eq!(result.results.melee, 3);
    assert_eq!(result.results.maneuver, 2);
    assert_eq!(result.delayed_effects.len(), 1);
}

#[test]
fn registry_lookups_are_idempotent() {
    for name in ["Breath", "breath", "DOUBLE_STRIKE", "Unknown"] {
        assert_eq!(EffectRegistry::lookup(name), EffectRegistry::lookup(name));
    }
}

#[test]
fn summary_mentions_final_totals() {
    let request = RollRequest::new(RollCategory::Missile, Role::Attacker)
        .with_roll(Unit::new("Sniper", Species::LavaElves, 1), ["mi", "bullseye"]);
    let result = engine().resolve(&request);
    assert_eq!(result.opponent_damage.unsavable, 1);
    assert_eq!(result.rerolls.len(), 1);
    assert!(!result.rerolls[0].mandatory);

    let summary = result.summary();
    assert!(summary.contains("final: melee 0, missile 1"));
    assert!(summary.contains("1 unsavable"));
}

#[test]
fn counter_damages_only_melee_attackers() {
    let save = |attack| {
        RollRequest::new(RollCategory::Save, Role::Defender)
            .with_roll(Unit::new("Duelist", Species::Eldarim, 1), ["s", "counter"])
            .responding_to(attack)
    };

    let vs_melee = engine().resolve(&save(RollCategory::Melee));
    assert_eq!(vs_melee.results.save, 2);
    assert_eq!(vs_melee.opponent_damage.savable, 1);

    let vs_missile = engine().resolve(&save(RollCategory::Missile));
    assert_eq!(vs_missile.results.save, 2);
    assert_eq!(vs_missile.opponent_damage.total(), 0);
}

#[test]
fn defensive_cantrip_magic_counts_and_is_tagged() {
    let request = RollRequest::new(RollCategory::Save, Role::Defender)
        .with_roll(Unit::new("Adept", Species::CoralElves, 1), ["s", "cantrip"]);
    let result = engine().resolve(&request);

    assert_eq!(result.results.save, 1);
    assert_eq!(result.results.magic, 1);
    assert_eq!(result.cantrip_magic, 1);
    assert!(
        result
            .applied_effects
            .iter()
            .any(|line| line.contains("only for cantrip spells"))
    );
    assert!(result.summary().contains("cantrip-only magic: 1"));
}

#[test]
fn foul_stench_names_the_opposing_player() {
    let mut graveyard = GraveyardSnapshot::new();
    graveyard.bury("alice", Unit::new("Fallen", Species::Goblins, 1));
    let engine = engine().with_graveyard(Arc::new(graveyard));

    let request = RollRequest::new(RollCategory::Melee, Role::Attacker)
        .with_roll(Unit::new("Grunt", Species::Goblins, 1), ["m"])
        .with_players("alice", "bob");
    let result = engine.resolve(&request);
    assert_eq!(
        result.ability_notices[0].description,
        "Grunt Foul Stench: 1 units of bob cannot counter-attack"
    );
}
