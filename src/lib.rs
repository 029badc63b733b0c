//! NPC Generator: procedural non-player characters for tabletop play.
//!
//! Rolls complete characters from a catalog of race and class templates
//! (ability scores, skills, subclass, spellcasting, gear) and renders
//! them as statblock text for a note-taking host.

pub mod core;
pub mod schema;

pub use crate::core::catalog::Catalog;
pub use crate::core::generator::{GenerationError, GenerationOptions, NpcGenerator};
pub use crate::core::settings::Settings;
pub use crate::core::statblock::{RenderError, StatblockFormat, StatblockRenderer};
pub use crate::schema::npc::Npc;
