/// Starting gear plus an occasional handful of special items.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::tables::{starting_gear, DEFAULT_GEAR_CLASS, SPECIAL_ITEMS};
use crate::schema::class::CharacterClass;
use crate::schema::npc::Possession;

/// Chance that an NPC carries special items.
pub const SPECIAL_ITEM_CHANCE: f64 = 0.25;
/// Most special items a single NPC receives.
pub const MAX_SPECIAL_ITEMS: usize = 3;

/// The class's base gear, falling back to the default list.
pub fn base_gear(class_name: &str) -> Vec<Possession> {
    let gear = starting_gear(class_name).unwrap_or_else(|| {
        debug!(class = class_name, "no starting gear for class, using default");
        starting_gear(DEFAULT_GEAR_CLASS).unwrap_or(&[])
    });
    gear.iter().map(|name| Possession::new(*name)).collect()
}

pub fn generate_possessions<R: Rng + ?Sized>(
    class: &CharacterClass,
    rng: &mut R,
) -> Vec<Possession> {
    let mut possessions = base_gear(&class.name);

    if rng.gen_bool(SPECIAL_ITEM_CHANCE) {
        let count = rng.gen_range(1..=MAX_SPECIAL_ITEMS);
        possessions.extend(SPECIAL_ITEMS.choose_multiple(rng, count).map(
            |(name, description)| Possession {
                name: name.to_string(),
                description: description.map(str::to_string),
            },
        ));
    }

    possessions
}
