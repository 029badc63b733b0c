use serde::{Deserialize, Serialize};

use super::ability::{Ability, Skill};

/// A named ability unlocked at a given level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub level: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A level-gated specialization of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subclass {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Spellcasting data attached to a class in the catalog.
///
/// Level-indexed tables hold one entry per level, index 0 being level 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellcastingTemplate {
    pub ability: Ability,
    #[serde(default)]
    pub cantrips_known: Option<Vec<u32>>,
    #[serde(default)]
    pub spells_known: Option<Vec<u32>>,
    #[serde(default)]
    pub prepare_spells: Option<bool>,
}

/// A class template. `name` is the catalog key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub name: String,
    /// One of 6, 8, 10 or 12.
    pub hit_die: u32,
    pub primary_ability: Ability,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub skill_choices: usize,
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub armor_proficiencies: Vec<String>,
    #[serde(default)]
    pub tool_proficiencies: Vec<String>,
    /// Ordered by level.
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub spellcasting: Option<SpellcastingTemplate>,
    #[serde(default)]
    pub subclasses: Option<Vec<Subclass>>,
}

impl CharacterClass {
    pub fn is_proficient_save(&self, ability: Ability) -> bool {
        self.saving_throws.contains(&ability)
    }

    /// Features available at `level`.
    pub fn features_at(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level <= level)
    }

    pub fn subclasses(&self) -> &[Subclass] {
        self.subclasses.as_deref().unwrap_or(&[])
    }

    pub fn find_subclass(&self, name: &str) -> Option<&Subclass> {
        self.subclasses().iter().find(|s| s.name == name)
    }
}

impl Subclass {
    /// Features available at `level`.
    pub fn features_at(&self, level: u8) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.level <= level)
    }
}
