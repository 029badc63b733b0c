/// Catalog Linter: validates race and class templates before they ship.
///
/// Usage: catalog_linter [<catalog_path>] [--settings <path>]
///
/// With no path, lints the built-in catalog.

use npc_generator::core::catalog::Catalog;
use npc_generator::core::settings::Settings;
use npc_generator::core::spellcasting::spellcasting_ability;
use npc_generator::core::subclass::subclass_unlock_level;
use npc_generator::core::tables::{starting_gear, trait_description};
use npc_generator::schema::class::{CharacterClass, Feature};
use rustc_hash::FxHashSet;
use std::path::Path;
use std::process;

const VALID_HIT_DICE: [u32; 4] = [6, 8, 10, 12];
const LEVEL_TABLE_LEN: usize = 20;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!("Usage: catalog_linter [<catalog_path>] [--settings <path>]");
        process::exit(0);
    }

    let mut catalog_path = None;
    let mut settings_path = None;

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--settings" && i + 1 < args.len() {
            i += 1;
            settings_path = Some(args[i].clone());
        } else {
            catalog_path = Some(args[i].clone());
        }
        i += 1;
    }

    let catalog = match (catalog_path, settings_path) {
        (Some(path), _) => match Catalog::load_from_ron(Path::new(&path)) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("ERROR: Failed to load catalog file: {}", e);
                process::exit(1);
            }
        },
        (None, Some(path)) => match Settings::load_from_ron(Path::new(&path)) {
            Ok(settings) => settings.catalog,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings file: {}", e);
                process::exit(1);
            }
        },
        (None, None) => match Catalog::builtin() {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("ERROR: Built-in catalog failed to parse: {}", e);
                process::exit(1);
            }
        },
    };

    println!(
        "Loaded {} races, {} classes",
        catalog.races.len(),
        catalog.classes.len()
    );

    let (errors, warnings) = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &Catalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if catalog.races.is_empty() {
        errors.push("Catalog has no races".to_string());
    }
    if catalog.classes.is_empty() {
        errors.push("Catalog has no classes".to_string());
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for race in &catalog.races {
        if !seen.insert(race.name.as_str()) {
            errors.push(format!("Duplicate race '{}'", race.name));
        }
        if race.speed == 0 {
            errors.push(format!("Race '{}' has zero speed", race.name));
        }
        if race.languages.is_empty() {
            warnings.push(format!("Race '{}' speaks no languages", race.name));
        }
        for name in &race.traits {
            if trait_description(name).is_none() {
                warnings.push(format!(
                    "Race '{}' trait '{}' has no description and renders generically",
                    race.name, name
                ));
            }
        }
    }

    seen.clear();
    for class in &catalog.classes {
        if !seen.insert(class.name.as_str()) {
            errors.push(format!("Duplicate class '{}'", class.name));
        }
        lint_class(class, &mut errors, &mut warnings);
    }

    (errors, warnings)
}

fn lint_class(class: &CharacterClass, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let name = &class.name;

    if !VALID_HIT_DICE.contains(&class.hit_die) {
        errors.push(format!(
            "Class '{}' has hit die d{} (expected one of d6, d8, d10, d12)",
            name, class.hit_die
        ));
    }

    let distinct_skills: FxHashSet<_> = class.skills.iter().collect();
    if class.skill_choices > distinct_skills.len() {
        errors.push(format!(
            "Class '{}' chooses {} skills from only {} distinct options",
            name,
            class.skill_choices,
            distinct_skills.len()
        ));
    }
    if distinct_skills.len() < class.skills.len() {
        warnings.push(format!("Class '{}' lists a skill more than once", name));
    }

    lint_features(name, &class.features, errors);

    match &class.spellcasting {
        Some(template) => {
            for (table, values) in [
                ("cantrips_known", &template.cantrips_known),
                ("spells_known", &template.spells_known),
            ] {
                if let Some(values) = values {
                    if values.len() != LEVEL_TABLE_LEN {
                        errors.push(format!(
                            "Class '{}' {} table has {} entries (expected {})",
                            name,
                            table,
                            values.len(),
                            LEVEL_TABLE_LEN
                        ));
                    }
                }
            }
            match spellcasting_ability(name) {
                Some(ability) if ability != template.ability => warnings.push(format!(
                    "Class '{}' template casts with {} but generation uses {}",
                    name, template.ability, ability
                )),
                None => warnings.push(format!(
                    "Class '{}' has a spellcasting template but generates no spellcasting",
                    name
                )),
                _ => {}
            }
        }
        None => {
            if spellcasting_ability(name).is_some() {
                warnings.push(format!(
                    "Class '{}' generates spellcasting but has no template; spells render as known",
                    name
                ));
            }
        }
    }

    let subclasses = class.subclasses();
    if subclasses.is_empty() {
        warnings.push(format!("Class '{}' has no subclasses", name));
    }
    let unlock = subclass_unlock_level(class);
    let mut subclass_names: FxHashSet<&str> = FxHashSet::default();
    for subclass in subclasses {
        if !subclass_names.insert(subclass.name.as_str()) {
            errors.push(format!(
                "Class '{}' has duplicate subclass '{}'",
                name, subclass.name
            ));
        }
        if subclass.name == "None" {
            errors.push(format!(
                "Class '{}' subclass is named 'None', which callers use to opt out",
                name
            ));
        }
        let label = format!("{} ({})", name, subclass.name);
        lint_features(&label, &subclass.features, errors);
        if let Some(early) = subclass.features.iter().find(|f| f.level < unlock) {
            warnings.push(format!(
                "Subclass '{}' feature '{}' at level {} precedes unlock level {}",
                label, early.name, early.level, unlock
            ));
        }
    }

    if starting_gear(name).is_none() {
        warnings.push(format!(
            "Class '{}' has no starting gear table and uses the default kit",
            name
        ));
    }
}

fn lint_features(owner: &str, features: &[Feature], errors: &mut Vec<String>) {
    let mut previous = 0;
    for feature in features {
        if !(1..=20).contains(&feature.level) {
            errors.push(format!(
                "'{}' feature '{}' has level {} outside 1-20",
                owner, feature.name, feature.level
            ));
        }
        if feature.level < previous {
            errors.push(format!(
                "'{}' feature '{}' (level {}) is out of level order",
                owner, feature.name, feature.level
            ));
        }
        previous = feature.level;
    }
}
