/// Level-gated subclass selection.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::class::{CharacterClass, Subclass};

/// Sentinel a caller passes to opt out of a subclass.
pub const NO_SUBCLASS: &str = "None";

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubclassRequest {
    /// Pick one at random once the class unlocks subclasses.
    Random,
    /// A specific subclass by name.
    Named(String),
    /// Never attach a subclass.
    OptOut,
}

impl SubclassRequest {
    /// Map a raw option value: unset is random, `"None"` opts out.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None => Self::Random,
            Some(NO_SUBCLASS) => Self::OptOut,
            Some(name) => Self::Named(name.to_string()),
        }
    }
}

/// Level at which a class gains its subclass.
pub fn subclass_unlock_level(class: &CharacterClass) -> u8 {
    if class.name == "Wizard" {
        2
    } else {
        3
    }
}

/// Resolve a subclass request.
///
/// A named request is honored at any level as long as the class defines
/// that subclass; one that matches nothing yields `None` and the caller
/// decides how to report it. A random pick happens only once `level`
/// reaches the unlock level.
pub fn select_subclass<'c, R: Rng + ?Sized>(
    class: &'c CharacterClass,
    request: &SubclassRequest,
    level: u8,
    rng: &mut R,
) -> Option<&'c Subclass> {
    let subclasses = class.subclasses();
    if subclasses.is_empty() {
        return None;
    }

    match request {
        SubclassRequest::Named(name) => class.find_subclass(name),
        SubclassRequest::OptOut => None,
        SubclassRequest::Random if level >= subclass_unlock_level(class) => {
            subclasses.choose(rng)
        }
        SubclassRequest::Random => None,
    }
}
