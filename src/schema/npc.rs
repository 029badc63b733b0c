use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ability::{Ability, AbilityModifiers, AbilityScores, Skill};

/// The lawful/chaotic axis of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    Lawful,
    Neutral,
    Chaotic,
}

/// The good/evil axis of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Morality {
    Good,
    Neutral,
    Evil,
}

impl Order {
    pub const ALL: [Order; 3] = [Order::Lawful, Order::Neutral, Order::Chaotic];

    fn name(&self) -> &'static str {
        match self {
            Self::Lawful => "Lawful",
            Self::Neutral => "Neutral",
            Self::Chaotic => "Chaotic",
        }
    }
}

impl Morality {
    pub const ALL: [Morality; 3] = [Morality::Good, Morality::Neutral, Morality::Evil];

    fn name(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Neutral => "Neutral",
            Self::Evil => "Evil",
        }
    }
}

/// A two-axis alignment, displayed as "Lawful Good" or plain "Neutral".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    pub order: Order,
    pub morality: Morality,
}

impl Alignment {
    pub fn new(order: Order, morality: Morality) -> Self {
        Self { order, morality }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.order == Order::Neutral && self.morality == Morality::Neutral {
            return f.write_str("Neutral");
        }
        write!(f, "{} {}", self.order.name(), self.morality.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized alignment: {0}")]
pub struct ParseAlignmentError(pub String);

impl FromStr for Alignment {
    type Err = ParseAlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "neutral" || lowered == "true neutral" {
            return Ok(Self::new(Order::Neutral, Morality::Neutral));
        }

        let mut words = lowered.split_whitespace();
        let (Some(first), Some(second), None) = (words.next(), words.next(), words.next()) else {
            return Err(ParseAlignmentError(s.to_string()));
        };
        let order = Order::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(first));
        let morality = Morality::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(second));
        match (order, morality) {
            (Some(order), Some(morality)) => Ok(Self::new(order, morality)),
            _ => Err(ParseAlignmentError(s.to_string())),
        }
    }
}

/// A dynamic value carried by a user-defined parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Resolved spellcasting numbers for one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spellcasting {
    pub ability: Ability,
    pub save_dc: i32,
    pub attack_bonus: i32,
    pub cantrips_known: u32,
    /// Spell level (1..=9) to slot count.
    pub spell_slots: BTreeMap<u8, u32>,
}

/// An entry in the NPC's custom-parameter bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomParameter {
    Spellcasting(Spellcasting),
    UserDefined { name: String, value: Value },
}

/// A carried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Possession {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Possession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// A generated character. Never mutated after generation; regenerate instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub level: u8,
    pub race: String,
    pub class: String,
    pub subclass: Option<String>,
    pub alignment: Alignment,
    pub ability_scores: AbilityScores,
    pub ability_modifiers: AbilityModifiers,
    pub hit_points: i32,
    pub proficiency_bonus: i32,
    pub skills: BTreeMap<Skill, i32>,
    pub traits: Vec<String>,
    pub possessions: Vec<Possession>,
    pub custom_parameters: Vec<CustomParameter>,
}

impl Npc {
    /// The resolved spellcasting entry, if the NPC casts spells.
    pub fn spellcasting(&self) -> Option<&Spellcasting> {
        self.custom_parameters.iter().find_map(|p| match p {
            CustomParameter::Spellcasting(sc) => Some(sc),
            CustomParameter::UserDefined { .. } => None,
        })
    }

    /// Look up a user-defined parameter by name.
    pub fn user_parameter(&self, name: &str) -> Option<&Value> {
        self.custom_parameters.iter().find_map(|p| match p {
            CustomParameter::UserDefined { name: n, value } if n == name => Some(value),
            _ => None,
        })
    }

    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }
}
