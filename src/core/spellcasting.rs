/// Spellcasting parameters: save DC, attack bonus, cantrips and slots.
///
/// The slot progression here is a simplified formula, not the standard
/// table. Generated statblocks depend on these exact numbers.

use std::collections::BTreeMap;

use crate::core::abilities::calculate_proficiency_bonus;
use crate::schema::ability::{Ability, AbilityModifiers};
use crate::schema::class::CharacterClass;
use crate::schema::npc::Spellcasting;

/// Highest spell level a slot table can hold.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Casting ability by class name. Only classes listed here cast spells,
/// whatever their catalog entry says.
pub fn spellcasting_ability(class_name: &str) -> Option<Ability> {
    match class_name {
        "Wizard" => Some(Ability::Int),
        "Cleric" | "Druid" | "Ranger" => Some(Ability::Wis),
        "Bard" | "Paladin" | "Sorcerer" | "Warlock" => Some(Ability::Cha),
        _ => None,
    }
}

pub fn is_spellcaster(class: &CharacterClass) -> bool {
    spellcasting_ability(&class.name).is_some()
}

/// `min(4, floor(level / 4) + 2)`.
pub fn cantrips_known(level: u8) -> u32 {
    (u32::from(level) / 4 + 2).min(4)
}

/// Slots of spell level `spell_level` for a caster of `level`, never negative.
pub fn slots_for(level: u8, spell_level: u8) -> u32 {
    let level = i32::from(level);
    let half = |offset: i32| (level - offset).div_euclid(2);
    let slots = match spell_level {
        1 => level.min(4),
        2 => half(2).min(3),
        3 => half(4).min(3),
        4 => half(6).min(3),
        5 => half(8).min(3),
        _ => half(10).min(1),
    };
    slots.max(0) as u32
}

/// Slot table for a caster of `level`.
///
/// Spell levels run from 1 to `min(9, ceil(level / 2))`; a spell level is
/// left out while `level < spell_level * 2 - 1`.
pub fn spell_slots(level: u8) -> BTreeMap<u8, u32> {
    let max_slot_level = level.div_ceil(2).min(MAX_SPELL_LEVEL);
    (1..=max_slot_level)
        .filter(|i| u32::from(level) + 1 >= u32::from(*i) * 2)
        .map(|i| (i, slots_for(level, i)))
        .collect()
}

/// Resolve spellcasting for a class at `level`, or `None` for non-casters.
pub fn generate_spellcasting(
    class: &CharacterClass,
    modifiers: &AbilityModifiers,
    level: u8,
) -> Option<Spellcasting> {
    let ability = spellcasting_ability(&class.name)?;
    let modifier = modifiers.get(ability);
    let proficiency = calculate_proficiency_bonus(level);

    Some(Spellcasting {
        ability,
        save_dc: 8 + proficiency + modifier,
        attack_bonus: proficiency + modifier,
        cantrips_known: cantrips_known(level),
        spell_slots: spell_slots(level),
    })
}
