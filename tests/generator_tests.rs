/// Generation integration tests: catalog loading through finished NPCs.

use npc_generator::core::abilities::calculate_proficiency_bonus;
use npc_generator::core::catalog::Catalog;
use npc_generator::core::generator::{GenerationOptions, NpcGenerator};
use npc_generator::core::settings::Settings;
use npc_generator::core::statblock::StatblockFormat;
use npc_generator::core::subclass::subclass_unlock_level;
use npc_generator::schema::ability::Ability;
use npc_generator::schema::npc::{CustomParameter, Value};
use proptest::prelude::*;
use std::path::Path;

fn homebrew_generator(seed: u64) -> NpcGenerator {
    let mut catalog = Catalog::builtin().unwrap();
    let homebrew =
        Catalog::load_from_ron(Path::new("tests/fixtures/homebrew_catalog.ron")).unwrap();
    catalog.merge(homebrew);
    NpcGenerator::builder()
        .seed(seed)
        .with_catalog(catalog)
        .build()
        .unwrap()
}

#[test]
fn homebrew_catalog_merges_over_builtin() {
    let generator = homebrew_generator(0);
    let catalog = generator.catalog();
    assert_eq!(catalog.races.len(), 10);
    assert_eq!(catalog.classes.len(), 13);

    // Dwarf is replaced in place, not duplicated.
    let dwarf = catalog.find_race("Dwarf").unwrap();
    assert_eq!(dwarf.ability_score_adjustments.wis, 1);
    assert_eq!(dwarf.traits.len(), 2);
    assert_eq!(
        catalog.races.iter().filter(|r| r.name == "Dwarf").count(),
        1
    );
}

#[test]
fn homebrew_class_without_subclasses_or_spells() {
    let mut generator = homebrew_generator(11);
    let npc = generator
        .generate(
            &GenerationOptions::new()
                .race("Kobold")
                .class("Sellsword")
                .level(12),
        )
        .unwrap();

    assert_eq!(npc.subclass, None);
    assert!(npc.spellcasting().is_none());
    assert_eq!(npc.traits, vec!["Darkvision", "Pack Tactics", "Sunlight Sensitivity"]);
    // Unknown classes draw the fallback kit.
    assert!(npc.possessions.iter().any(|p| p.name == "Longsword"));
    assert_eq!(npc.skills.len(), 18);
}

#[test]
fn subclass_never_assigned_below_unlock_level() {
    let mut generator = NpcGenerator::builder().seed(99).build().unwrap();
    for _ in 0..300 {
        let npc = generator.generate(&GenerationOptions::new()).unwrap();
        let class = generator.catalog().find_class(&npc.class).unwrap();
        if npc.level < subclass_unlock_level(class) {
            assert_eq!(npc.subclass, None, "{} at level {}", npc.class, npc.level);
        }
        if let Some(name) = &npc.subclass {
            assert!(class.find_subclass(name).is_some());
        }
    }
}

#[test]
fn wizard_unlocks_subclass_at_second_level() {
    let mut generator = NpcGenerator::builder().seed(1).build().unwrap();
    for _ in 0..20 {
        let npc = generator
            .generate(&GenerationOptions::new().class("Wizard").level(2))
            .unwrap();
        assert!(npc.subclass.is_some());
        let npc = generator
            .generate(&GenerationOptions::new().class("Fighter").level(2))
            .unwrap();
        assert_eq!(npc.subclass, None);
    }
}

#[test]
fn named_subclass_respected_when_unlocked() {
    let mut generator = NpcGenerator::builder().seed(1).build().unwrap();
    let npc = generator
        .generate(
            &GenerationOptions::new()
                .class("Cleric")
                .level(8)
                .subclass("Life Domain"),
        )
        .unwrap();
    assert_eq!(npc.subclass.as_deref(), Some("Life Domain"));
}

#[test]
fn named_subclass_honored_below_unlock_level() {
    let mut generator = NpcGenerator::builder().seed(3).build().unwrap();
    let npc = generator
        .generate(
            &GenerationOptions::new()
                .class("Wizard")
                .level(1)
                .subclass("School of Evocation"),
        )
        .unwrap();
    assert_eq!(npc.subclass.as_deref(), Some("School of Evocation"));

    let npc = generator
        .generate(&GenerationOptions::new().class("Fighter").level(1).subclass("Champion"))
        .unwrap();
    assert_eq!(npc.subclass.as_deref(), Some("Champion"));

    let text = generator.render(&npc, StatblockFormat::Basic).unwrap();
    // Subclass features still follow the NPC's level.
    assert!(!text.contains("(Champion)"));
}

#[test]
fn spellcasting_numbers_follow_modifiers() {
    let mut generator = NpcGenerator::builder().seed(17).build().unwrap();
    let npc = generator
        .generate(&GenerationOptions::new().class("Cleric").level(10))
        .unwrap();
    let sc = npc.spellcasting().unwrap();
    assert_eq!(sc.ability, Ability::Wis);
    assert_eq!(sc.save_dc, 8 + 4 + npc.ability_modifiers.wis);
    assert_eq!(sc.attack_bonus, 4 + npc.ability_modifiers.wis);
    assert_eq!(sc.cantrips_known, 4);
    assert_eq!(sc.spell_slots.get(&1), Some(&4));
    assert_eq!(sc.spell_slots.get(&5), Some(&1));
    assert_eq!(sc.spell_slots.get(&6), None);

    // The spellcasting entry follows user parameters.
    assert!(matches!(
        npc.custom_parameters.last(),
        Some(CustomParameter::Spellcasting(_))
    ));
}

#[test]
fn settings_fixture_falls_back_and_carries_parameters() {
    let settings = Settings::load_from_ron(Path::new("tests/fixtures/settings.ron")).unwrap();
    assert_eq!(settings.catalog.races.len(), 9);
    assert_eq!(settings.catalog.classes.len(), 12);
    assert!(settings.catalog.find_race("Goblin").is_none());
    assert_eq!(settings.statblock_format, StatblockFormat::Basic);

    let mut generator = NpcGenerator::builder()
        .seed(5)
        .settings_file("tests/fixtures/settings.ron")
        .build()
        .unwrap();
    let npc = generator
        .generate(&GenerationOptions::new().custom_parameter("loyalty", Value::Int(9)))
        .unwrap();
    assert_eq!(npc.user_parameter("loyalty"), Some(&Value::Int(9)));
    assert_eq!(
        npc.user_parameter("faction"),
        Some(&Value::String("Unaligned".to_string()))
    );
    assert_eq!(npc.user_parameter("has_met_party"), Some(&Value::Bool(false)));

    let text = generator.render_default(&npc).unwrap();
    assert!(!text.starts_with("```"));
}

#[test]
fn sequential_generations_replay_under_same_seed() {
    let options = GenerationOptions::new();
    let mut a = NpcGenerator::builder().seed(2024).build().unwrap();
    let mut b = NpcGenerator::builder().seed(2024).build().unwrap();
    for _ in 0..10 {
        assert_eq!(a.generate(&options).unwrap(), b.generate(&options).unwrap());
    }
}

proptest! {
    #[test]
    fn prop_scores_and_bonuses_in_range(seed in any::<u64>(), level in 1u8..=20) {
        let mut generator = NpcGenerator::builder().seed(seed).build().unwrap();
        let npc = generator.generate(&GenerationOptions::new().level(level)).unwrap();
        let race = generator.catalog().find_race(&npc.race).unwrap();

        for ability in Ability::ALL {
            let base = npc.ability_scores.get(ability)
                - race.ability_score_adjustments.get(ability);
            prop_assert!((3..=18).contains(&base));
            let modifier = npc.ability_modifiers.get(ability);
            prop_assert_eq!(modifier, (npc.ability_scores.get(ability) - 10).div_euclid(2));
        }
        prop_assert_eq!(npc.proficiency_bonus, calculate_proficiency_bonus(level));
        prop_assert!(npc.hit_points >= 1);
        prop_assert_eq!(npc.skills.len(), 18);
    }

    #[test]
    fn prop_every_npc_renders(seed in any::<u64>()) {
        let mut generator = NpcGenerator::builder().seed(seed).build().unwrap();
        let npc = generator.generate(&GenerationOptions::new()).unwrap();
        let fenced = generator.render(&npc, StatblockFormat::FantasyStatblock).unwrap();
        let basic = generator.render(&npc, StatblockFormat::Basic).unwrap();
        prop_assert_eq!(fenced, format!("```statblock\n{basic}```\n"));
    }
}
