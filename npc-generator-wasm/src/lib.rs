//! WASM bindings for npc-generator: powers the in-browser generator page.

use wasm_bindgen::prelude::*;

use npc_generator::core::generator::{GenerationOptions, NpcGenerator};
use npc_generator::core::settings::Settings;
use npc_generator::core::statblock::StatblockFormat;
use npc_generator::schema::npc::{Alignment, Npc};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct GenerateInput {
    name: Option<String>,
    level: Option<u8>,
    race: Option<String>,
    class: Option<String>,
    subclass: Option<String>,
    alignment: Option<String>,
}

#[derive(serde::Serialize)]
struct CatalogInfo {
    races: Vec<String>,
    classes: Vec<ClassInfo>,
}

#[derive(serde::Serialize)]
struct ClassInfo {
    name: String,
    subclasses: Vec<String>,
}

fn to_options(input: GenerateInput) -> Result<GenerationOptions, JsError> {
    let alignment = match input.alignment.as_deref() {
        Some(text) => Some(
            text.parse::<Alignment>()
                .map_err(|e| JsError::new(&e.to_string()))?,
        ),
        None => None,
    };
    Ok(GenerationOptions {
        name: input.name,
        level: input.level,
        race: input.race,
        class: input.class,
        subclass: input.subclass,
        alignment,
        ..GenerationOptions::default()
    })
}

// ---------------------------------------------------------------------------
// NpcForge, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct NpcForge {
    generator: NpcGenerator,
}

#[wasm_bindgen]
impl NpcForge {
    /// Create a generator over the built-in catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<NpcForge, JsError> {
        let generator = NpcGenerator::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;
        Ok(NpcForge { generator })
    }

    /// Create a generator from a RON settings document.
    pub fn with_settings(settings_ron: &str, seed: u64) -> Result<NpcForge, JsError> {
        let settings = Settings::parse_ron(settings_ron)
            .map_err(|e| JsError::new(&format!("Settings parse error: {e}")))?;
        let generator = NpcGenerator::builder()
            .seed(seed)
            .with_settings(settings)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;
        Ok(NpcForge { generator })
    }

    /// Generate an NPC and return it as JSON.
    ///
    /// Expected JSON shape (every field optional):
    /// ```json
    /// {
    ///   "name": "Vex",
    ///   "level": 5,
    ///   "race": "Tiefling",
    ///   "class": "Warlock",
    ///   "subclass": "The Fiend",
    ///   "alignment": "Chaotic Neutral"
    /// }
    /// ```
    pub fn generate(&mut self, options_json: &str) -> Result<String, JsError> {
        let input: GenerateInput = if options_json.trim().is_empty() {
            GenerateInput::default()
        } else {
            serde_json::from_str(options_json)
                .map_err(|e| JsError::new(&format!("Invalid options JSON: {e}")))?
        };
        let npc = self
            .generator
            .generate(&to_options(input)?)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&npc)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Render a JSON NPC as statblock text. `format` is `"fantasyStatblock"`
    /// or `"basic"`.
    pub fn render(&self, npc_json: &str, format: &str) -> Result<String, JsError> {
        let npc: Npc = serde_json::from_str(npc_json)
            .map_err(|e| JsError::new(&format!("Invalid NPC JSON: {e}")))?;
        let format = StatblockFormat::from_name(format)
            .ok_or_else(|| JsError::new(&format!("Unknown format: {format}")))?;
        self.generator
            .render(&npc, format)
            .map_err(|e| JsError::new(&format!("Render error: {e}")))
    }

    /// Return JSON listing race names and class names with their subclasses.
    pub fn catalog(&self) -> Result<String, JsError> {
        let catalog = self.generator.catalog();
        let info = CatalogInfo {
            races: catalog.races.iter().map(|r| r.name.clone()).collect(),
            classes: catalog
                .classes
                .iter()
                .map(|c| ClassInfo {
                    name: c.name.clone(),
                    subclasses: c.subclasses().iter().map(|s| s.name.clone()).collect(),
                })
                .collect(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of statblock format names.
    pub fn formats() -> String {
        serde_json::to_string(&[
            StatblockFormat::FantasyStatblock.name(),
            StatblockFormat::Basic.name(),
        ])
        .unwrap_or_else(|_| "[]".to_string())
    }

    /// Reset the random stream with a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let settings = self.generator.settings().clone();
        self.generator = NpcGenerator::builder()
            .seed(seed)
            .with_settings(settings)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;
        Ok(())
    }
}
