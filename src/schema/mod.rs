//! Data types shared by the catalog, the generator and the renderer.

pub mod ability;
pub mod class;
pub mod npc;
pub mod race;
