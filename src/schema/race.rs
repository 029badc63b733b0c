use serde::{Deserialize, Serialize};
use std::fmt;

use super::ability::AbilityScores;

/// Creature size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Tiny,
    Small,
    Medium,
    Large,
}

impl Default for Size {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tiny => "Tiny",
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        };
        f.write_str(name)
    }
}

/// A playable race template. `name` is the catalog key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    /// Fixed per-ability deltas; abilities left out are 0.
    #[serde(default)]
    pub ability_score_adjustments: AbilityScores,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub size: Size,
    /// Walking speed in feet.
    pub speed: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub extra_languages: Option<u32>,
}

impl Race {
    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t == name)
    }
}
