/// Preview: interactive generation shell for trying catalogs and settings.
///
/// Usage: preview [--settings <path>] [--catalog <path>] [--seed <n>]
///
/// Commands:
///   generate [n]          generate and print n statblocks (default 1)
///   race <name|any>       pin or release the race
///   class <name|any>      pin or release the class
///   subclass <name|any>   pin a subclass ('None' opts out)
///   level <n|any>         pin or release the level
///   format <name>         fantasyStatblock or basic
///   seed <n>              set RNG seed
///   bulk <n>              generate n NPCs and print distribution stats
///   show                  current options and catalog contents
///   help                  list commands
///   quit                  exit

use npc_generator::core::catalog::Catalog;
use npc_generator::core::generator::{GenerationOptions, NpcGenerator};
use npc_generator::core::settings::{Settings, SettingsError};
use npc_generator::core::statblock::StatblockFormat;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut settings_path = None;
    let mut catalog_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--settings" if i + 1 < args.len() => {
                i += 1;
                settings_path = Some(args[i].clone());
            }
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut settings = match load_settings(settings_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR loading settings: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(ref path) = catalog_path {
        match Catalog::load_from_ron(Path::new(path)) {
            Ok(extra) => {
                println!("Merged catalog: {}", path);
                settings.catalog.merge(extra);
            }
            Err(e) => eprintln!("ERROR loading catalog {}: {}", path, e),
        }
    }

    println!(
        "Loaded {} races, {} classes",
        settings.catalog.races.len(),
        settings.catalog.classes.len()
    );
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    // Session state
    let mut options = GenerationOptions::new();
    let mut format = settings.statblock_format;
    let mut current_seed = seed;
    let mut generator = match build_generator(&settings, current_seed) {
        Some(generator) => generator,
        None => std::process::exit(1),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "generate" | "gen" | "g" => {
                let count: usize = if rest.is_empty() {
                    1
                } else {
                    match rest.parse() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            println!("Invalid count: {}", rest);
                            continue;
                        }
                    }
                };
                for _ in 0..count {
                    let npc = match generator.generate(&options) {
                        Ok(npc) => npc,
                        Err(e) => {
                            println!("ERROR: {}", e);
                            break;
                        }
                    };
                    match generator.render(&npc, format) {
                        Ok(text) => {
                            println!(
                                "\n--- {} (level {} {} {}) ---",
                                npc.name, npc.level, npc.race, npc.class
                            );
                            print!("{}", text);
                            println!("--- End ---\n");
                        }
                        Err(e) => println!("ERROR: {}", e),
                    }
                }
            }
            "race" => {
                if rest.is_empty() {
                    println!("Current race: {}", options.race.as_deref().unwrap_or("any"));
                    continue;
                }
                if rest == "any" {
                    options.race = None;
                    println!("Race released.");
                } else if generator.catalog().find_race(rest).is_some() {
                    options.race = Some(rest.to_string());
                    println!("Race set to '{}'", rest);
                } else {
                    println!("Race '{}' not found. Use 'show' to list races.", rest);
                }
            }
            "class" => {
                if rest.is_empty() {
                    println!("Current class: {}", options.class.as_deref().unwrap_or("any"));
                    continue;
                }
                if rest == "any" {
                    options.class = None;
                    options.subclass = None;
                    println!("Class released.");
                } else if generator.catalog().find_class(rest).is_some() {
                    options.class = Some(rest.to_string());
                    options.subclass = None;
                    println!("Class set to '{}'", rest);
                } else {
                    println!("Class '{}' not found. Use 'show' to list classes.", rest);
                }
            }
            "subclass" => {
                if rest.is_empty() {
                    println!(
                        "Current subclass: {}",
                        options.subclass.as_deref().unwrap_or("any")
                    );
                    continue;
                }
                if rest == "any" {
                    options.subclass = None;
                    println!("Subclass released.");
                } else {
                    options.subclass = Some(rest.to_string());
                    println!("Subclass set to '{}'", rest);
                }
            }
            "level" => {
                if rest.is_empty() || rest == "any" {
                    options.level = None;
                    println!("Level released.");
                    continue;
                }
                match rest.parse::<u8>() {
                    Ok(level) if (1..=20).contains(&level) => {
                        options.level = Some(level);
                        println!("Level set to {}", level);
                    }
                    _ => println!("Invalid level: {} (expected 1-20)", rest),
                }
            }
            "format" => match StatblockFormat::from_name(rest) {
                Some(f) => {
                    format = f;
                    println!("Format set to {}", f.name());
                }
                None => {
                    println!("Usage: format <fantasyStatblock|basic>");
                    println!("  Current: {}", format.name());
                }
            },
            "seed" => {
                if rest.is_empty() {
                    println!("Current seed: {}", current_seed);
                    continue;
                }
                match rest.parse::<u64>() {
                    Ok(s) => {
                        current_seed = s;
                        if let Some(rebuilt) = build_generator(generator.settings(), current_seed) {
                            generator = rebuilt;
                            println!("Seed set to {}", current_seed);
                        }
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", rest);
                    }
                }
            }
            "bulk" => {
                let count: usize = match rest.parse() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        println!("Usage: bulk <n>");
                        continue;
                    }
                };

                // Fresh stream so bulk runs repeat under the same seed
                let Some(mut bulk_generator) = build_generator(generator.settings(), current_seed)
                else {
                    continue;
                };

                let mut npcs = Vec::new();
                let mut errors = 0;
                for _ in 0..count {
                    match bulk_generator.generate(&options) {
                        Ok(npc) => npcs.push(npc),
                        Err(_) => errors += 1,
                    }
                }

                println!("\n=== Bulk Generation: {} NPCs ({} errors) ===\n", npcs.len(), errors);

                let mut class_counts: BTreeMap<&str, u32> = BTreeMap::new();
                let mut race_counts: BTreeMap<&str, u32> = BTreeMap::new();
                for npc in &npcs {
                    *class_counts.entry(npc.class.as_str()).or_insert(0) += 1;
                    *race_counts.entry(npc.race.as_str()).or_insert(0) += 1;
                }
                println!("Classes:");
                for (name, count) in &class_counts {
                    println!("  {}: {}", name, count);
                }
                println!("Races:");
                for (name, count) in &race_counts {
                    println!("  {}: {}", name, count);
                }

                let with_subclass = npcs.iter().filter(|n| n.subclass.is_some()).count();
                let casters = npcs.iter().filter(|n| n.spellcasting().is_some()).count();
                println!("With subclass: {} / {}", with_subclass, npcs.len());
                println!("Spellcasters: {} / {}", casters, npcs.len());

                let avg_hp: f64 = if npcs.is_empty() {
                    0.0
                } else {
                    npcs.iter().map(|n| f64::from(n.hit_points)).sum::<f64>() / npcs.len() as f64
                };
                println!("Average hit points: {:.1}", avg_hp);

                let unique_names: std::collections::HashSet<&str> =
                    npcs.iter().map(|n| n.name.as_str()).collect();
                println!("Unique names: {} / {}", unique_names.len(), npcs.len());
                println!();
            }
            "show" => {
                println!("Options:");
                println!("  race:     {}", options.race.as_deref().unwrap_or("any"));
                println!("  class:    {}", options.class.as_deref().unwrap_or("any"));
                println!("  subclass: {}", options.subclass.as_deref().unwrap_or("any"));
                match options.level {
                    Some(level) => println!("  level:    {}", level),
                    None => println!("  level:    any"),
                }
                println!("  format:   {}", format.name());
                println!("  seed:     {}", current_seed);
                let catalog = generator.catalog();
                let races: Vec<&str> = catalog.races.iter().map(|r| r.name.as_str()).collect();
                println!("Races: {}", races.join(", "));
                println!("Classes:");
                for class in &catalog.classes {
                    let subclasses: Vec<&str> =
                        class.subclasses().iter().map(|s| s.name.as_str()).collect();
                    println!("  {} [{}]", class.name, subclasses.join(", "));
                }
                for def in &generator.settings().custom_parameters {
                    println!("Parameter: {} (default {})", def.name, def.default);
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Preview: interactive generation shell for trying catalogs and settings.");
    println!();
    println!("Usage: preview [--settings <path>] [--catalog <path>] [--seed <n>]");
    println!();
    println!("  --settings <path>  Settings file (default: built-in catalog)");
    println!("  --catalog <path>   Extra catalog merged over the settings catalog");
    println!("  --seed <n>         Initial RNG seed (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  generate [n]          Generate and print n statblocks");
    println!("  race <name|any>       Pin or release the race");
    println!("  class <name|any>      Pin or release the class");
    println!("  subclass <name|any>   Pin a subclass ('None' opts out)");
    println!("  level <n|any>         Pin or release the level");
    println!("  format <name>         fantasyStatblock or basic");
    println!("  seed <n>              Set RNG seed");
    println!("  bulk <n>              Generate n NPCs with distribution statistics");
    println!("  show                  Show options and catalog contents");
    println!("  help                  Show this help");
    println!("  quit                  Exit");
}

fn load_settings(path: Option<&str>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => {
            println!("Loading settings: {}", path);
            Settings::load_from_ron(Path::new(path))
        }
        None => Settings::builtin(),
    }
}

fn build_generator(settings: &Settings, seed: u64) -> Option<NpcGenerator> {
    match NpcGenerator::builder()
        .seed(seed)
        .with_settings(settings.clone())
        .build()
    {
        Ok(generator) => Some(generator),
        Err(e) => {
            eprintln!("ERROR building generator: {}", e);
            None
        }
    }
}
