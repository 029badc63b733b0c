/// The generation pipeline: options → resolved templates → NPC.
///
/// Wires together ability rolls, racial adjustment, skill and subclass
/// selection, spellcasting and possessions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::abilities::{
    apply_racial_adjustments, calculate_ability_modifiers, calculate_hit_points,
    calculate_proficiency_bonus, generate_ability_scores,
};
use crate::core::catalog::Catalog;
use crate::core::names::random_name;
use crate::core::possessions::generate_possessions;
use crate::core::settings::{CustomParameterDef, Settings, SettingsError};
use crate::core::skills::generate_skills;
use crate::core::spellcasting::generate_spellcasting;
use crate::core::statblock::{RenderError, StatblockFormat, StatblockRenderer};
use crate::core::subclass::{select_subclass, SubclassRequest};
use crate::schema::npc::{Alignment, CustomParameter, Morality, Npc, Order, Value};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 20;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("race not found: {0}")]
    RaceNotFound(String),
    #[error("class not found: {0}")]
    ClassNotFound(String),
    #[error("catalog has no races or no classes")]
    EmptyCatalog,
    #[error("level {0} is outside 1..=20")]
    InvalidLevel(u8),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Caller-supplied choices. Anything left unset is rolled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub name: Option<String>,
    pub level: Option<u8>,
    pub race: Option<String>,
    pub class: Option<String>,
    /// A subclass name, or `"None"` to opt out.
    pub subclass: Option<String>,
    pub alignment: Option<Alignment>,
    pub custom_parameters: BTreeMap<String, Value>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn race(mut self, race: &str) -> Self {
        self.race = Some(race.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn subclass(mut self, subclass: &str) -> Self {
        self.subclass = Some(subclass.to_string());
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn custom_parameter(mut self, name: &str, value: Value) -> Self {
        self.custom_parameters.insert(name.to_string(), value);
        self
    }
}

/// Uniform over both axes; Neutral/Neutral displays as "Neutral".
pub fn random_alignment<R: Rng + ?Sized>(rng: &mut R) -> Alignment {
    let order = Order::ALL[rng.gen_range(0..Order::ALL.len())];
    let morality = Morality::ALL[rng.gen_range(0..Morality::ALL.len())];
    Alignment::new(order, morality)
}

/// Generate one NPC from `catalog`.
///
/// `parameter_defs` supplies defaults for user parameters the options leave
/// out. Named race and class must exist; a named subclass that does not
/// exist is dropped with a warning.
pub fn generate_npc<R: Rng + ?Sized>(
    catalog: &Catalog,
    options: &GenerationOptions,
    parameter_defs: &[CustomParameterDef],
    rng: &mut R,
) -> Result<Npc, GenerationError> {
    let level = match options.level {
        Some(level) if (MIN_LEVEL..=MAX_LEVEL).contains(&level) => level,
        Some(level) => return Err(GenerationError::InvalidLevel(level)),
        None => rng.gen_range(MIN_LEVEL..=MAX_LEVEL),
    };

    let race = match options.race.as_deref() {
        Some(name) => catalog
            .find_race(name)
            .ok_or_else(|| GenerationError::RaceNotFound(name.to_string()))?,
        None => catalog.random_race(rng).ok_or(GenerationError::EmptyCatalog)?,
    };
    let class = match options.class.as_deref() {
        Some(name) => catalog
            .find_class(name)
            .ok_or_else(|| GenerationError::ClassNotFound(name.to_string()))?,
        None => catalog.random_class(rng).ok_or(GenerationError::EmptyCatalog)?,
    };
    debug!(race = %race.name, class = %class.name, level, "resolved templates");

    let alignment = match options.alignment {
        Some(alignment) => alignment,
        None => random_alignment(rng),
    };

    let base_scores = generate_ability_scores(rng);
    let ability_scores = apply_racial_adjustments(&base_scores, race);
    let ability_modifiers = calculate_ability_modifiers(&ability_scores);
    let proficiency_bonus = calculate_proficiency_bonus(level);
    let hit_points = calculate_hit_points(class, ability_modifiers.con, level);

    let skills = generate_skills(class, &ability_modifiers, level, rng);

    let request = SubclassRequest::from_option(options.subclass.as_deref());
    let subclass = select_subclass(class, &request, level, rng).map(|s| s.name.clone());
    if let (SubclassRequest::Named(requested), None) = (&request, &subclass) {
        warn!(
            class = %class.name,
            subclass = %requested,
            level,
            "requested subclass unavailable, continuing without one"
        );
    }

    let possessions = generate_possessions(class, rng);

    let name = match &options.name {
        Some(name) => name.clone(),
        None => random_name(&race.name, rng),
    };

    let mut custom_parameters: Vec<CustomParameter> = options
        .custom_parameters
        .iter()
        .map(|(name, value)| CustomParameter::UserDefined {
            name: name.clone(),
            value: value.clone(),
        })
        .collect();
    for def in parameter_defs {
        if !options.custom_parameters.contains_key(&def.name) {
            custom_parameters.push(CustomParameter::UserDefined {
                name: def.name.clone(),
                value: def.default.clone(),
            });
        }
    }
    if let Some(spellcasting) = generate_spellcasting(class, &ability_modifiers, level) {
        debug!(
            ability = %spellcasting.ability,
            save_dc = spellcasting.save_dc,
            "resolved spellcasting"
        );
        custom_parameters.push(CustomParameter::Spellcasting(spellcasting));
    }

    Ok(Npc {
        name,
        level,
        race: race.name.clone(),
        class: class.name.clone(),
        subclass,
        alignment,
        ability_scores,
        ability_modifiers,
        hit_points,
        proficiency_bonus,
        skills,
        traits: race.traits.clone(),
        possessions,
        custom_parameters,
    })
}

/// The top-level generator. Built via `NpcGenerator::builder()`.
pub struct NpcGenerator {
    settings: Settings,
    rng: StdRng,
    seed: Option<u64>,
}

/// Builder for constructing an `NpcGenerator`.
pub struct NpcGeneratorBuilder {
    seed: Option<u64>,
    settings_path: Option<String>,
    /// Directly provided settings (for testing without files).
    settings: Option<Settings>,
    /// Catalog that replaces the one in the settings.
    catalog: Option<Catalog>,
}

impl NpcGenerator {
    pub fn builder() -> NpcGeneratorBuilder {
        NpcGeneratorBuilder {
            seed: None,
            settings_path: None,
            settings: None,
            catalog: None,
        }
    }

    pub fn generate(&mut self, options: &GenerationOptions) -> Result<Npc, GenerationError> {
        generate_npc(
            &self.settings.catalog,
            options,
            &self.settings.custom_parameters,
            &mut self.rng,
        )
    }

    /// Render in an explicit format.
    pub fn render(&self, npc: &Npc, format: StatblockFormat) -> Result<String, RenderError> {
        StatblockRenderer::new(&self.settings.catalog).render(npc, format)
    }

    /// Render in the format chosen in the settings.
    pub fn render_default(&self, npc: &Npc) -> Result<String, RenderError> {
        self.render(npc, self.settings.statblock_format)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.settings.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The seed in use, or `None` when seeded from entropy.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Replace the catalog snapshot used by later generations.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.settings.catalog = catalog;
    }
}

impl NpcGeneratorBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn settings_file(mut self, path: &str) -> Self {
        self.settings_path = Some(path.to_string());
        self
    }

    /// Provide settings directly (for testing without files).
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<NpcGenerator, GenerationError> {
        let mut settings = match (self.settings, self.settings_path) {
            (Some(settings), _) => settings,
            (None, Some(path)) => Settings::load_from_ron(Path::new(&path))?,
            (None, None) => Settings::builtin()?,
        };
        if let Some(catalog) = self.catalog {
            settings.catalog = catalog;
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(NpcGenerator {
            settings,
            rng,
            seed: self.seed,
        })
    }
}
