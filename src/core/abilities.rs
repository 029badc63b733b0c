/// Ability score rolling and the arithmetic derived from scores and level.

use rand::Rng;

use crate::schema::ability::{Ability, AbilityModifiers, AbilityScores};
use crate::schema::class::CharacterClass;
use crate::schema::race::Race;

/// Roll 4d6, drop the lowest die, sum the rest.
pub fn roll_ability_score<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let mut dice: [i32; 4] = [0; 4];
    for die in dice.iter_mut() {
        *die = rng.gen_range(1..=6);
    }
    dice.sort_unstable();
    dice[1..].iter().sum()
}

/// Roll all six raw scores, each in 3..=18.
pub fn generate_ability_scores<R: Rng + ?Sized>(rng: &mut R) -> AbilityScores {
    AbilityScores::from_fn(|_| roll_ability_score(rng))
}

/// Add the race's fixed deltas. Results are not clamped.
pub fn apply_racial_adjustments(base: &AbilityScores, race: &Race) -> AbilityScores {
    let adjustments = &race.ability_score_adjustments;
    AbilityScores::from_fn(|a| base.get(a) + adjustments.get(a))
}

/// `floor((score - 10) / 2)`, flooring toward negative infinity.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

pub fn calculate_ability_modifiers(scores: &AbilityScores) -> AbilityModifiers {
    AbilityScores::from_fn(|a| ability_modifier(scores.get(a)))
}

/// `ceil(level / 4) + 1`: 2 at levels 1-4 up to 6 at 17-20.
pub fn calculate_proficiency_bonus(level: u8) -> i32 {
    (i32::from(level) + 3) / 4 + 1
}

/// Full hit die at first level, then half the die per level, plus the
/// constitution modifier each level. Never below 1.
pub fn calculate_hit_points(class: &CharacterClass, con_modifier: i32, level: u8) -> i32 {
    let die = class.hit_die as i32;
    let first = die + con_modifier;
    let per_level = die / 2 + con_modifier;
    let total = first + (i32::from(level) - 1).max(0) * per_level;
    total.max(1)
}

/// Challenge rating used in statblocks: `max(1, floor(level / 4))`.
pub fn challenge_rating(level: u8) -> u8 {
    (level / 4).max(1)
}

/// Attack-relevant modifier for an ability plus proficiency.
pub fn proficient_bonus(modifiers: &AbilityModifiers, ability: Ability, proficiency: i32) -> i32 {
    modifiers.get(ability) + proficiency
}
