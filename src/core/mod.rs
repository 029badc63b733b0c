//! The generation engine: calculators, selectors, assembly and rendering.

pub mod abilities;
pub mod catalog;
pub mod generator;
pub mod names;
pub mod possessions;
pub mod settings;
pub mod skills;
pub mod spellcasting;
pub mod statblock;
pub mod subclass;
pub mod tables;
