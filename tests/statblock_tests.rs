/// Statblock rendering integration tests against hand-built NPCs.

use npc_generator::core::abilities::calculate_ability_modifiers;
use npc_generator::core::catalog::Catalog;
use npc_generator::core::spellcasting::generate_spellcasting;
use npc_generator::core::statblock::{EntryKind, RenderError, StatblockFormat, StatblockRenderer};
use npc_generator::schema::ability::{AbilityScores, Skill};
use npc_generator::schema::npc::{
    Alignment, CustomParameter, Morality, Npc, Order, Possession, Value,
};
use std::collections::BTreeMap;

fn evoker(catalog: &Catalog) -> Npc {
    let class = catalog.find_class("Wizard").unwrap();
    let ability_scores = AbilityScores::new(8, 16, 12, 17, 13, 10);
    let ability_modifiers = calculate_ability_modifiers(&ability_scores);
    let mut skills: BTreeMap<Skill, i32> = Skill::ALL
        .iter()
        .map(|s| (*s, ability_modifiers.get(s.ability())))
        .collect();
    for skill in [Skill::Arcana, Skill::History] {
        *skills.get_mut(&skill).unwrap() += 3;
    }
    let spellcasting = generate_spellcasting(class, &ability_modifiers, 5).unwrap();

    Npc {
        name: "Aelar \"Quick\" Galanodel".to_string(),
        level: 5,
        race: "Elf".to_string(),
        class: "Wizard".to_string(),
        subclass: Some("School of Evocation".to_string()),
        alignment: Alignment::new(Order::Chaotic, Morality::Good),
        ability_scores,
        ability_modifiers,
        hit_points: 23,
        proficiency_bonus: 3,
        skills,
        traits: catalog.find_race("Elf").unwrap().traits.clone(),
        possessions: vec![
            Possession::new("Spellbook"),
            Possession::with_description("Ring of Protection", "+1 bonus to AC and saving throws."),
        ],
        custom_parameters: vec![
            CustomParameter::UserDefined {
                name: "faction".to_string(),
                value: Value::String("Harpers".to_string()),
            },
            CustomParameter::Spellcasting(spellcasting),
        ],
    }
}

fn render_basic(npc: &Npc) -> String {
    let catalog = Catalog::builtin().unwrap();
    StatblockRenderer::new(&catalog)
        .render(npc, StatblockFormat::Basic)
        .unwrap()
}

#[test]
fn header_fields() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&evoker(&catalog));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        &lines[..11],
        &[
            "name: \"Aelar Quick Galanodel\"",
            "source: NPC Generator",
            "size: Medium",
            "type: humanoid",
            "subtype: elf",
            "alignment: Chaotic Good",
            "ac: 13",
            "hp: 23",
            "hit_dice: 5d6 + 5",
            "speed: 30 ft.",
            "stats: [8, 16, 12, 17, 13, 10]",
        ]
    );
}

#[test]
fn saves_and_skills() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&evoker(&catalog));

    assert!(text.contains("saves:\n  - strength: -1\n  - dexterity: 3\n  - constitution: 1\n  - intelligence: 6\n  - wisdom: 4\n  - charisma: 0\n"));
    assert!(text.contains("  - arcana: 6\n"));
    assert!(text.contains("  - sleight of hand: 3\n"));
    // Zero bonuses are left out.
    assert!(!text.contains("  - persuasion:"));
    assert!(text.contains("senses: darkvision 60 ft., passive Perception 11\n"));
    assert!(text.contains("languages: Common, Elvish\n"));
    assert!(text.contains("cr: 1\nbestiary: false\n"));
    assert!(text.contains("damage_vulnerabilities: \"\"\n"));
}

#[test]
fn traits_features_and_subclass() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&evoker(&catalog));

    assert!(text.contains("  - name: \"Darkvision\"\n"));
    assert!(text.contains("  - name: \"Trance\"\n"));
    assert!(text.contains("  - name: \"Arcane Recovery\"\n"));
    assert!(text.contains("  - name: \"Sculpt Spells (School of Evocation)\"\n"));
    // Features above the NPC's level are filtered out.
    assert!(!text.contains("Spell Mastery"));
    assert!(!text.contains("Potent Cantrip"));

    let traits_at = text.find("traits:").unwrap();
    let recovery_at = text.find("Arcane Recovery").unwrap();
    let sculpt_at = text.find("Sculpt Spells").unwrap();
    let actions_at = text.find("actions:").unwrap();
    assert!(traits_at < recovery_at && recovery_at < sculpt_at && sculpt_at < actions_at);
}

#[test]
fn attack_and_spells() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&evoker(&catalog));

    assert!(text.contains("  - name: \"Shortsword\"\n    desc: \"Melee Weapon Attack: +6 to hit, reach 5 ft., one target. Hit: 7 (1d6 + 3) slashing damage.\"\n"));
    assert!(text.contains("It has the following wizard spells prepared:"));
    assert!(text.contains("spell save DC 14, +6 to hit with spell attacks"));
    assert!(text.contains("is a 5th-level spellcaster"));
    assert!(text.contains("  - Cantrips (at will): fire bolt, mage hand, light\n"));
    assert!(text.contains("  - 1st level (4 slots): magic missile, shield, mage armor, detect magic\n"));
    assert!(text.contains("  - 2nd level (1 slot): misty step\n"));
    assert!(!text.contains("3rd level"));
    // User parameters are not rendered.
    assert!(!text.contains("Harpers"));
}

#[test]
fn possessions_last() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&evoker(&catalog));
    assert!(text.ends_with(
        "possessions:\n  - name: \"Spellbook\"\n  - name: \"Ring of Protection\"\n    desc: \"+1 bonus to AC and saving throws.\"\n"
    ));
}

#[test]
fn fenced_wraps_basic() {
    let catalog = Catalog::builtin().unwrap();
    let npc = evoker(&catalog);
    let renderer = StatblockRenderer::new(&catalog);
    let basic = renderer.render(&npc, StatblockFormat::Basic).unwrap();
    let fenced = renderer
        .render(&npc, StatblockFormat::FantasyStatblock)
        .unwrap();
    assert!(fenced.starts_with("```statblock\nname: "));
    assert_eq!(fenced, format!("```statblock\n{basic}```\n"));
}

#[test]
fn rendering_is_idempotent() {
    let catalog = Catalog::builtin().unwrap();
    let npc = evoker(&catalog);
    let renderer = StatblockRenderer::new(&catalog);
    let first = renderer.render(&npc, StatblockFormat::FantasyStatblock).unwrap();
    let second = renderer.render(&npc, StatblockFormat::FantasyStatblock).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_entries_fail_without_output() {
    let catalog = Catalog::builtin().unwrap();
    let renderer = StatblockRenderer::new(&catalog);

    let mut npc = evoker(&catalog);
    npc.race = "Kobold".to_string();
    assert_eq!(
        renderer.render(&npc, StatblockFormat::Basic),
        Err(RenderError::NotFound {
            kind: EntryKind::Race,
            name: "Kobold".to_string(),
        })
    );

    npc.class = "Artificer".to_string();
    let err = renderer.render(&npc, StatblockFormat::Basic).unwrap_err();
    assert_eq!(err.to_string(), "class not found: Artificer");
}

#[test]
fn halfling_has_no_darkvision_and_neutral_collapses() {
    let catalog = Catalog::builtin().unwrap();
    let mut npc = evoker(&catalog);
    npc.race = "Halfling".to_string();
    npc.traits = catalog.find_race("Halfling").unwrap().traits.clone();
    npc.alignment = Alignment::new(Order::Neutral, Morality::Neutral);

    let text = render_basic(&npc);
    assert!(text.contains("size: Small\n"));
    assert!(text.contains("alignment: Neutral\n"));
    assert!(text.contains("senses: passive Perception 11\n"));
    assert!(text.contains("speed: 25 ft.\n"));
}

#[test]
fn unknown_trait_gets_generic_description() {
    let mut catalog = Catalog::builtin().unwrap();
    let homebrew = std::path::Path::new("tests/fixtures/homebrew_catalog.ron");
    catalog.merge(Catalog::load_from_ron(homebrew).unwrap());
    let mut npc = evoker(&catalog);
    npc.race = "Kobold".to_string();
    npc.traits = catalog.find_race("Kobold").unwrap().traits.clone();

    let text = StatblockRenderer::new(&catalog)
        .render(&npc, StatblockFormat::Basic)
        .unwrap();
    assert!(text.contains("  - name: \"Pack Tactics\"\n    desc: \"Racial trait of Kobold.\"\n"));
    assert!(text.contains("size: Small\n"));
}

#[test]
fn human_languages_include_choice() {
    let catalog = Catalog::builtin().unwrap();
    let mut npc = evoker(&catalog);
    npc.race = "Human".to_string();
    npc.traits = vec!["Versatile".to_string()];
    let text = render_basic(&npc);
    assert!(text.contains("languages: Common, plus 1 of its choice\n"));
}

fn fighter(catalog: &Catalog) -> Npc {
    let ability_scores = AbilityScores::new(12, 16, 6, 10, 11, 9);
    let ability_modifiers = calculate_ability_modifiers(&ability_scores);
    let skills: BTreeMap<Skill, i32> = Skill::ALL
        .iter()
        .map(|s| (*s, ability_modifiers.get(s.ability())))
        .collect();

    Npc {
        name: "Bram Ironside".to_string(),
        level: 5,
        race: "Human".to_string(),
        class: "Fighter".to_string(),
        subclass: None,
        alignment: Alignment::new(Order::Lawful, Morality::Neutral),
        ability_scores,
        ability_modifiers,
        hit_points: 28,
        proficiency_bonus: 3,
        skills,
        traits: catalog.find_race("Human").unwrap().traits.clone(),
        possessions: vec![Possession::new("Longsword")],
        custom_parameters: Vec::new(),
    }
}

#[test]
fn strength_classes_swing_longswords_even_when_nimbler() {
    let catalog = Catalog::builtin().unwrap();
    let npc = fighter(&catalog);
    assert!(npc.ability_modifiers.dex > npc.ability_modifiers.str);

    let text = render_basic(&npc);
    assert!(text.contains("  - name: \"Longsword\"\n    desc: \"Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 6 (1d8 + 1) slashing damage.\"\n"));
    assert!(!text.contains("Shortsword"));
    assert!(!text.contains("spells:"));
}

#[test]
fn hit_dice_keep_negative_constitution_product() {
    let catalog = Catalog::builtin().unwrap();
    let text = render_basic(&fighter(&catalog));
    assert!(text.contains("hit_dice: 5d10 + -10\n"));
}

#[test]
fn empty_slot_levels_are_skipped() {
    let catalog = Catalog::builtin().unwrap();
    let class = catalog.find_class("Wizard").unwrap();
    let mut npc = evoker(&catalog);
    npc.level = 3;
    npc.proficiency_bonus = 2;
    let spellcasting = generate_spellcasting(class, &npc.ability_modifiers, 3).unwrap();
    assert_eq!(spellcasting.spell_slots.get(&2), Some(&0));
    npc.custom_parameters = vec![CustomParameter::Spellcasting(spellcasting)];

    let text = render_basic(&npc);
    assert!(text.contains("is a 3rd-level spellcaster"));
    assert!(text.contains("  - 1st level (3 slots): magic missile, shield, mage armor\n"));
    assert!(!text.contains("2nd level"));
    assert!(text.contains("hit_dice: 3d6 + 3\n"));
}
