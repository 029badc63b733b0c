/// Race and class catalog: loading, lookup and merging.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::class::CharacterClass;
use crate::schema::race::Race;

const BUILTIN_RACES: &str = include_str!("../../catalog_data/races.ron");
const BUILTIN_CLASSES: &str = include_str!("../../catalog_data/classes.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// In-memory race and class templates, keyed by name.
///
/// The generator only reads a catalog; edits happen elsewhere and a new
/// snapshot is handed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
}

impl Catalog {
    pub fn new(races: Vec<Race>, classes: Vec<CharacterClass>) -> Self {
        Self { races, classes }
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            races: Self::builtin_races()?,
            classes: Self::builtin_classes()?,
        })
    }

    pub fn builtin_races() -> Result<Vec<Race>, CatalogError> {
        Ok(ron::from_str(BUILTIN_RACES)?)
    }

    pub fn builtin_classes() -> Result<Vec<CharacterClass>, CatalogError> {
        Ok(ron::from_str(BUILTIN_CLASSES)?)
    }

    /// Load a single-file catalog: `(races: [...], classes: [...])`.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        Ok(ron::from_str(input)?)
    }

    pub fn find_race(&self, name: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.name == name)
    }

    pub fn find_class(&self, name: &str) -> Option<&CharacterClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn random_race<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Race> {
        self.races.choose(rng)
    }

    pub fn random_class<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&CharacterClass> {
        self.classes.choose(rng)
    }

    /// Merge another catalog into this one. Entries from `other` replace
    /// entries with the same name; new names are appended.
    pub fn merge(&mut self, other: Catalog) {
        for race in other.races {
            match self.races.iter_mut().find(|r| r.name == race.name) {
                Some(existing) => *existing = race,
                None => self.races.push(race),
            }
        }
        for class in other.classes {
            match self.classes.iter_mut().find(|c| c.name == class.name) {
                Some(existing) => *existing = class,
                None => self.classes.push(class),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spellcasting::is_spellcaster;
    use crate::core::subclass::subclass_unlock_level;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.races.len(), 9);
        assert_eq!(catalog.classes.len(), 12);
        assert!(catalog.find_race("Elf").is_some());
        assert!(catalog.find_class("Wizard").is_some());
        assert!(catalog.find_class("wizard").is_none());
    }

    #[test]
    fn builtin_classes_are_complete_definitions() {
        let catalog = Catalog::builtin().unwrap();
        for class in &catalog.classes {
            assert!([6, 8, 10, 12].contains(&class.hit_die), "{}", class.name);
            assert!(class.subclasses().len() >= 2, "{} lacks subclasses", class.name);
            assert!(class.skill_choices <= class.skills.len(), "{}", class.name);
            assert!(
                class.features.windows(2).all(|w| w[0].level <= w[1].level),
                "{} features out of order",
                class.name
            );
            for subclass in class.subclasses() {
                assert!(
                    subclass.features.iter().all(|f| f.level >= 1 && f.level <= 20),
                    "{} has out-of-range feature levels",
                    subclass.name
                );
            }
            if is_spellcaster(class) {
                assert!(class.spellcasting.is_some(), "{} lacks a template", class.name);
            }
            assert!(subclass_unlock_level(class) <= 3);
        }
    }

    #[test]
    fn builtin_catalog_has_no_duplicate_names() {
        let catalog = Catalog::builtin().unwrap();
        let mut races: Vec<&str> = catalog.races.iter().map(|r| r.name.as_str()).collect();
        races.sort_unstable();
        races.dedup();
        assert_eq!(races.len(), catalog.races.len());
        let mut classes: Vec<&str> = catalog.classes.iter().map(|c| c.name.as_str()).collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), catalog.classes.len());
    }

    #[test]
    fn merge_overrides_by_name_and_appends() {
        let mut base = Catalog::builtin().unwrap();
        let overrides = Catalog::parse_ron(
            r#"(
                races: [
                    (name: "Elf", speed: 35, traits: ["Trance"]),
                    (name: "Kobold", speed: 30, size: Small),
                ],
            )"#,
        )
        .unwrap();

        base.merge(overrides);
        assert_eq!(base.races.len(), 10);
        assert_eq!(base.find_race("Elf").unwrap().speed, 35);
        assert_eq!(base.find_race("Elf").unwrap().traits, vec!["Trance".to_string()]);
        assert!(base.find_race("Kobold").is_some());
        assert_eq!(base.classes.len(), 12);
    }

    #[test]
    fn empty_catalog_has_nothing_to_pick() {
        let catalog = Catalog::default();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert!(catalog.random_race(&mut rng).is_none());
        assert!(catalog.random_class(&mut rng).is_none());
    }
}
