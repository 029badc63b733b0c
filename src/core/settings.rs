/// Persisted generator settings: catalog, custom parameters, output format.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::{Catalog, CatalogError};
use crate::core::statblock::StatblockFormat;
use crate::schema::class::CharacterClass;
use crate::schema::npc::Value;
use crate::schema::race::Race;

/// Stored race/class arrays this short are treated as damaged and the
/// built-in catalog is used instead.
pub const MIN_STORED_ENTRIES: usize = 5;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A user-declared parameter every generated NPC carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomParameterDef {
    pub name: String,
    pub default: Value,
}

/// Settings exactly as found in the key-value store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSettings {
    pub races: Vec<Race>,
    pub classes: Vec<CharacterClass>,
    pub custom_parameters: Vec<CustomParameterDef>,
    pub statblock_format: StatblockFormat,
}

/// Settings in effect for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog: Catalog,
    pub custom_parameters: Vec<CustomParameterDef>,
    pub statblock_format: StatblockFormat,
}

impl Settings {
    /// Built-in catalog, no custom parameters, fenced statblocks.
    pub fn builtin() -> Result<Settings, SettingsError> {
        Ok(Settings {
            catalog: Catalog::builtin()?,
            custom_parameters: Vec::new(),
            statblock_format: StatblockFormat::default(),
        })
    }

    /// Apply stored settings. Each of races and classes is kept only when
    /// the stored array has more than `MIN_STORED_ENTRIES` entries.
    pub fn from_stored(stored: StoredSettings) -> Result<Settings, SettingsError> {
        let races = if stored.races.len() > MIN_STORED_ENTRIES {
            stored.races
        } else {
            debug!(stored = stored.races.len(), "using built-in races");
            Catalog::builtin_races()?
        };
        let classes = if stored.classes.len() > MIN_STORED_ENTRIES {
            stored.classes
        } else {
            debug!(stored = stored.classes.len(), "using built-in classes");
            Catalog::builtin_classes()?
        };

        Ok(Settings {
            catalog: Catalog::new(races, classes),
            custom_parameters: stored.custom_parameters,
            statblock_format: stored.statblock_format,
        })
    }

    pub fn parse_ron(input: &str) -> Result<Settings, SettingsError> {
        let stored: StoredSettings = ron::from_str(input)?;
        Self::from_stored(stored)
    }

    /// Load settings from a RON file. A missing file yields the built-ins.
    pub fn load_from_ron(path: &Path) -> Result<Settings, SettingsError> {
        if !path.exists() {
            return Self::builtin();
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn to_stored(&self) -> StoredSettings {
        StoredSettings {
            races: self.catalog.races.clone(),
            classes: self.catalog.classes.clone(),
            custom_parameters: self.custom_parameters.clone(),
            statblock_format: self.statblock_format,
        }
    }

    pub fn to_ron(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            &self.to_stored(),
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn save_to_ron(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}
