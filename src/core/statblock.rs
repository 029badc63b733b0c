/// Statblock rendering.
///
/// One renderer derives the ordered field sequence; the output format only
/// decides whether it is wrapped in a `statblock` code fence.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::abilities::{challenge_rating, proficient_bonus};
use crate::core::catalog::Catalog;
use crate::core::tables::{cantrips, spell_list, trait_description};
use crate::schema::ability::{Ability, Skill};
use crate::schema::class::{CharacterClass, Feature};
use crate::schema::npc::{CustomParameter, Npc, Spellcasting};
use crate::schema::race::Race;

/// Source line written into every statblock.
pub const SOURCE: &str = "NPC Generator";
/// Most spells named per spell level.
pub const MAX_SPELLS_PER_LEVEL: usize = 4;

/// Output serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatblockFormat {
    /// Fenced so statblock-aware editors render it.
    #[default]
    FantasyStatblock,
    /// Plain text.
    Basic,
}

impl StatblockFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fantasyStatblock" => Some(Self::FantasyStatblock),
            "basic" => Some(Self::Basic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FantasyStatblock => "fantasyStatblock",
            Self::Basic => "basic",
        }
    }
}

/// Which catalog entry a render could not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Race,
    Class,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Race => f.write_str("race"),
            Self::Class => f.write_str("class"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntryKind, name: String },
}

/// Strip quotes and backticks and fold newlines so text can sit inside a
/// quoted field.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '"' && *c != '`')
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn signed(value: i32) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// "3d8 + 6", "3d8 - 3".
fn dice_expression(count: u32, faces: u32, bonus: i32) -> String {
    if bonus < 0 {
        format!("{count}d{faces} - {}", -bonus)
    } else {
        format!("{count}d{faces} + {bonus}")
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// The single weapon attack a statblock lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attack {
    pub weapon: &'static str,
    pub ability: Ability,
    pub die_faces: u32,
    pub to_hit: i32,
    pub average_damage: i32,
    pub damage_modifier: i32,
}

/// Strength and a longsword when the class leads with strength or strength
/// beats dexterity; otherwise dexterity and a shortsword.
pub fn primary_attack(npc: &Npc, class: &CharacterClass) -> Attack {
    let mods = &npc.ability_modifiers;
    let (weapon, ability, die_faces) =
        if class.primary_ability == Ability::Str || mods.str > mods.dex {
            ("Longsword", Ability::Str, 8)
        } else {
            ("Shortsword", Ability::Dex, 6)
        };
    let damage_modifier = mods.get(ability);
    Attack {
        weapon,
        ability,
        die_faces,
        to_hit: proficient_bonus(mods, ability, npc.proficiency_bonus),
        average_damage: (die_faces as i32 + 1) / 2 + 1 + damage_modifier,
        damage_modifier,
    }
}

/// Line-oriented writer for the statblock field sequence.
struct StatblockWriter {
    out: String,
}

impl StatblockWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn field(&mut self, key: &str, value: impl fmt::Display) {
        self.line(&format!("{key}: {value}"));
    }

    fn quoted(&mut self, key: &str, value: &str) {
        self.line(&format!("{key}: \"{value}\""));
    }

    fn named_entry(&mut self, name: &str, desc: &str) {
        self.line(&format!("  - name: \"{name}\""));
        self.line(&format!("    desc: \"{desc}\""));
    }
}

/// Renders NPCs against a catalog snapshot.
pub struct StatblockRenderer<'a> {
    catalog: &'a Catalog,
}

impl<'a> StatblockRenderer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Render `npc` in `format`. Fails without output when the NPC's race
    /// or class is missing from the catalog.
    pub fn render(&self, npc: &Npc, format: StatblockFormat) -> Result<String, RenderError> {
        let body = self.render_fields(npc)?;
        Ok(match format {
            StatblockFormat::FantasyStatblock => format!("```statblock\n{body}```\n"),
            StatblockFormat::Basic => body,
        })
    }

    fn resolve(&self, npc: &Npc) -> Result<(&'a Race, &'a CharacterClass), RenderError> {
        let class = self
            .catalog
            .find_class(&npc.class)
            .ok_or_else(|| RenderError::NotFound {
                kind: EntryKind::Class,
                name: npc.class.clone(),
            })?;
        let race = self
            .catalog
            .find_race(&npc.race)
            .ok_or_else(|| RenderError::NotFound {
                kind: EntryKind::Race,
                name: npc.race.clone(),
            })?;
        Ok((race, class))
    }

    /// The unwrapped field sequence shared by both formats.
    pub fn render_fields(&self, npc: &Npc) -> Result<String, RenderError> {
        let (race, class) = self.resolve(npc)?;
        let mods = &npc.ability_modifiers;
        let mut w = StatblockWriter::new();

        w.quoted("name", &sanitize(&npc.name));
        w.field("source", SOURCE);
        w.field("size", race.size);
        w.field("type", "humanoid");
        w.field("subtype", race.name.to_lowercase());
        w.field("alignment", npc.alignment);
        w.field("ac", 10 + mods.dex);
        w.field("hp", npc.hit_points);
        w.field(
            "hit_dice",
            format!(
                "{}d{} + {}",
                npc.level,
                class.hit_die,
                i32::from(npc.level) * mods.con
            ),
        );
        w.field("speed", format!("{} ft.", race.speed));

        let stats: Vec<String> = npc
            .ability_scores
            .to_array()
            .iter()
            .map(|s| s.to_string())
            .collect();
        w.field("stats", format!("[{}]", stats.join(", ")));

        w.line("saves:");
        for ability in Ability::ALL {
            let proficiency = if class.is_proficient_save(ability) {
                npc.proficiency_bonus
            } else {
                0
            };
            w.line(&format!("  - {}: {}", ability.name(), mods.get(ability) + proficiency));
        }

        w.line("skillsaves:");
        for (skill, bonus) in npc.skills.iter().filter(|(_, b)| **b != 0) {
            w.line(&format!("  - {}: {}", skill.name().to_lowercase(), bonus));
        }

        w.quoted("damage_vulnerabilities", "");
        w.quoted("damage_resistances", "");
        w.quoted("damage_immunities", "");
        w.quoted("condition_immunities", "");
        w.field("senses", senses(npc, race));
        w.field("languages", languages(race));
        w.field("cr", challenge_rating(npc.level));
        w.field("bestiary", false);

        w.line("traits:");
        for name in &npc.traits {
            let desc = trait_description(name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Racial trait of {}.", race.name));
            w.named_entry(&sanitize(name), &sanitize(&desc));
        }
        for feature in class.features_at(npc.level) {
            write_feature(&mut w, feature, None);
        }
        if let Some(subclass) = npc
            .subclass
            .as_deref()
            .and_then(|name| class.find_subclass(name))
        {
            for feature in subclass.features_at(npc.level) {
                write_feature(&mut w, feature, Some(&subclass.name));
            }
        }

        let attack = primary_attack(npc, class);
        w.line("actions:");
        w.named_entry(
            attack.weapon,
            &format!(
                "Melee Weapon Attack: {} to hit, reach 5 ft., one target. Hit: {} ({}) slashing damage.",
                signed(attack.to_hit),
                attack.average_damage,
                dice_expression(1, attack.die_faces, attack.damage_modifier),
            ),
        );

        for parameter in &npc.custom_parameters {
            match parameter {
                CustomParameter::Spellcasting(sc) => write_spells(&mut w, npc, class, sc),
                CustomParameter::UserDefined { .. } => {}
            }
        }

        w.line("possessions:");
        for item in &npc.possessions {
            w.line(&format!("  - name: \"{}\"", sanitize(&item.name)));
            if let Some(desc) = &item.description {
                w.line(&format!("    desc: \"{}\"", sanitize(desc)));
            }
        }

        Ok(w.out)
    }
}

fn senses(npc: &Npc, race: &Race) -> String {
    let darkvision = if race.has_trait("Darkvision") {
        "darkvision 60 ft., "
    } else {
        ""
    };
    format!(
        "{darkvision}passive Perception {}",
        10 + npc.skill_bonus(Skill::Perception)
    )
}

fn languages(race: &Race) -> String {
    let mut text = race.languages.join(", ");
    if let Some(extra) = race.extra_languages.filter(|n| *n > 0) {
        if !text.is_empty() {
            text.push_str(", ");
        }
        text.push_str(&format!("plus {extra} of its choice"));
    }
    text
}

fn write_feature(w: &mut StatblockWriter, feature: &Feature, subclass: Option<&str>) {
    let name = match subclass {
        Some(subclass) => format!("{} ({})", feature.name, subclass),
        None => feature.name.clone(),
    };
    w.named_entry(&sanitize(&name), &sanitize(&feature.description));
}

fn write_spells(w: &mut StatblockWriter, npc: &Npc, class: &CharacterClass, sc: &Spellcasting) {
    let verb = match class.spellcasting.as_ref().and_then(|t| t.prepare_spells) {
        Some(true) => "prepared",
        _ => "known",
    };
    w.line("spells:");
    w.line(&format!(
        "  - \"{} is a {}-level spellcaster. Its spellcasting ability is {} (spell save DC {}, {} to hit with spell attacks). It has the following {} spells {}:\"",
        sanitize(&npc.name),
        ordinal(u32::from(npc.level)),
        sc.ability.title(),
        sc.save_dc,
        signed(sc.attack_bonus),
        class.name.to_lowercase(),
        verb,
    ));

    let known: Vec<&str> = cantrips(&class.name)
        .iter()
        .take(sc.cantrips_known as usize)
        .copied()
        .collect();
    if !known.is_empty() {
        w.line(&format!("  - Cantrips (at will): {}", known.join(", ")));
    }

    for (level, slots) in sc.spell_slots.iter().filter(|(_, s)| **s > 0) {
        let count = (*slots as usize).min(MAX_SPELLS_PER_LEVEL);
        let spells: Vec<&str> = spell_list(&class.name, *level)
            .iter()
            .take(count)
            .copied()
            .collect();
        if spells.is_empty() {
            continue;
        }
        let plural = if *slots == 1 { "slot" } else { "slots" };
        w.line(&format!(
            "  - {} level ({} {}): {}",
            ordinal(u32::from(*level)),
            slots,
            plural,
            spells.join(", ")
        ));
    }
}
