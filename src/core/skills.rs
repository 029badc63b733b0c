/// Skill proficiency selection and bonus computation.

use rand::Rng;
use std::collections::BTreeMap;

use crate::core::abilities::calculate_proficiency_bonus;
use crate::schema::ability::{AbilityModifiers, Skill};
use crate::schema::class::CharacterClass;

/// Draw up to `class.skill_choices` distinct skills from the class's
/// eligible list, uniformly and without replacement.
pub fn choose_proficient_skills<R: Rng + ?Sized>(
    class: &CharacterClass,
    rng: &mut R,
) -> Vec<Skill> {
    let mut pool: Vec<Skill> = Vec::with_capacity(class.skills.len());
    for skill in &class.skills {
        if !pool.contains(skill) {
            pool.push(*skill);
        }
    }

    let mut chosen = Vec::with_capacity(class.skill_choices.min(pool.len()));
    while chosen.len() < class.skill_choices && !pool.is_empty() {
        let idx = rng.gen_range(0..pool.len());
        chosen.push(pool.swap_remove(idx));
    }
    chosen
}

/// Bonuses for all eighteen skills: the governing modifier, plus the
/// proficiency bonus for the randomly chosen proficient skills.
pub fn generate_skills<R: Rng + ?Sized>(
    class: &CharacterClass,
    modifiers: &AbilityModifiers,
    level: u8,
    rng: &mut R,
) -> BTreeMap<Skill, i32> {
    let mut skills: BTreeMap<Skill, i32> = Skill::ALL
        .iter()
        .map(|s| (*s, modifiers.get(s.ability())))
        .collect();

    let proficiency = calculate_proficiency_bonus(level);
    for skill in choose_proficient_skills(class, rng) {
        if let Some(bonus) = skills.get_mut(&skill) {
            *bonus += proficiency;
        }
    }
    skills
}
