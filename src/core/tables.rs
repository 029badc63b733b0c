/// Fixed rule tables: racial trait text, class spell lists, starting gear.
///
/// Lookups that miss return `None` or an empty slice; callers substitute a
/// placeholder.

/// Description of a racial trait by name.
pub fn trait_description(name: &str) -> Option<&'static str> {
    let desc = match name {
        "Darkvision" => {
            "Can see in dim light within 60 feet as if it were bright light, and in darkness as if it were dim light."
        }
        "Keen Senses" => "Proficient in the Perception skill.",
        "Fey Ancestry" => {
            "Has advantage on saving throws against being charmed, and magic can't put it to sleep."
        }
        "Trance" => "Meditates deeply for 4 hours a day instead of sleeping.",
        "Dwarven Resilience" => {
            "Has advantage on saving throws against poison and resistance to poison damage."
        }
        "Stonecunning" => {
            "Adds double its proficiency bonus to History checks related to the origin of stonework."
        }
        "Dwarven Combat Training" => {
            "Proficient with the battleaxe, handaxe, light hammer, and warhammer."
        }
        "Lucky" => {
            "When it rolls a 1 on an attack roll, ability check, or saving throw, it can reroll the die and must use the new roll."
        }
        "Brave" => "Has advantage on saving throws against being frightened.",
        "Halfling Nimbleness" => {
            "Can move through the space of any creature that is of a size larger than its own."
        }
        "Gnome Cunning" => {
            "Has advantage on all Intelligence, Wisdom, and Charisma saving throws against magic."
        }
        "Skill Versatility" => "Gains proficiency in two skills of its choice.",
        "Menacing" => "Proficient in the Intimidation skill.",
        "Relentless Endurance" => {
            "When reduced to 0 hit points but not killed outright, it can drop to 1 hit point instead. Once per long rest."
        }
        "Savage Attacks" => {
            "When it scores a critical hit with a melee weapon attack, it rolls one of the weapon's damage dice one additional time."
        }
        "Hellish Resistance" => "Has resistance to fire damage.",
        "Infernal Legacy" => {
            "Knows the thaumaturgy cantrip and can later cast hellish rebuke and darkness once per long rest."
        }
        "Draconic Ancestry" => {
            "Descends from a dragon whose type determines its breath weapon and damage resistance."
        }
        "Breath Weapon" => {
            "Can use its action to exhale destructive energy in a line or cone. Once per short or long rest."
        }
        "Damage Resistance" => {
            "Has resistance to the damage type associated with its draconic ancestry."
        }
        "Versatile" => "Adaptable and ambitious, it gains a bonus to every ability score.",
        _ => return None,
    };
    Some(desc)
}

/// Cantrip list for a casting class, in preference order.
pub fn cantrips(class_name: &str) -> &'static [&'static str] {
    match class_name {
        "Bard" => &["vicious mockery", "minor illusion", "light", "mage hand", "prestidigitation"],
        "Cleric" => &["sacred flame", "guidance", "light", "thaumaturgy", "spare the dying"],
        "Druid" => &["produce flame", "guidance", "shillelagh", "druidcraft", "thorn whip"],
        "Sorcerer" => &[
            "fire bolt",
            "ray of frost",
            "shocking grasp",
            "mage hand",
            "prestidigitation",
        ],
        "Warlock" => &[
            "eldritch blast",
            "chill touch",
            "mage hand",
            "minor illusion",
            "prestidigitation",
        ],
        "Wizard" => &["fire bolt", "mage hand", "light", "prestidigitation", "ray of frost"],
        _ => &[],
    }
}

/// Spells a class can draw on at a given spell level.
pub fn spell_list(class_name: &str, spell_level: u8) -> &'static [&'static str] {
    match (class_name, spell_level) {
        ("Bard", 1) => &["charm person", "healing word", "thunderwave", "faerie fire", "sleep"],
        ("Bard", 2) => &["hold person", "invisibility", "shatter", "suggestion"],
        ("Bard", 3) => &["hypnotic pattern", "dispel magic", "fear", "tongues"],
        ("Bard", 4) => &["dimension door", "greater invisibility", "polymorph", "confusion"],
        ("Bard", 5) => &["dominate person", "mass cure wounds", "hold monster", "seeming"],
        ("Bard", 6) => &["mass suggestion", "otto's irresistible dance", "eyebite"],
        ("Bard", 7) => &["etherealness", "teleport", "regenerate"],
        ("Bard", 8) => &["dominate monster", "feeblemind", "power word stun"],
        ("Bard", 9) => &["foresight", "power word kill", "true polymorph"],

        ("Cleric", 1) => &["bless", "cure wounds", "guiding bolt", "shield of faith", "sanctuary"],
        ("Cleric", 2) => &["spiritual weapon", "hold person", "lesser restoration", "silence"],
        ("Cleric", 3) => &["spirit guardians", "revivify", "dispel magic", "mass healing word"],
        ("Cleric", 4) => &["guardian of faith", "banishment", "death ward", "freedom of movement"],
        ("Cleric", 5) => &["flame strike", "mass cure wounds", "greater restoration", "raise dead"],
        ("Cleric", 6) => &["heal", "harm", "blade barrier"],
        ("Cleric", 7) => &["divine word", "fire storm", "resurrection"],
        ("Cleric", 8) => &["holy aura", "antimagic field", "earthquake"],
        ("Cleric", 9) => &["mass heal", "true resurrection", "gate"],

        ("Druid", 1) => &["entangle", "goodberry", "healing word", "thunderwave", "faerie fire"],
        ("Druid", 2) => &["moonbeam", "barkskin", "pass without trace", "spike growth"],
        ("Druid", 3) => &["call lightning", "conjure animals", "plant growth", "wind wall"],
        ("Druid", 4) => &["ice storm", "polymorph", "stoneskin", "wall of fire"],
        ("Druid", 5) => &["insect plague", "mass cure wounds", "tree stride", "wall of stone"],
        ("Druid", 6) => &["sunbeam", "heal", "transport via plants"],
        ("Druid", 7) => &["fire storm", "plane shift", "reverse gravity"],
        ("Druid", 8) => &["sunburst", "earthquake", "animal shapes"],
        ("Druid", 9) => &["shapechange", "storm of vengeance", "foresight"],

        ("Paladin", 1) => &[
            "bless",
            "command",
            "divine favor",
            "shield of faith",
            "wrathful smite",
        ],
        ("Paladin", 2) => &["aid", "branding smite", "magic weapon", "find steed"],
        ("Paladin", 3) => &["aura of vitality", "revivify", "blinding smite", "dispel magic"],
        ("Paladin", 4) => &["aura of purity", "banishment", "death ward", "staggering smite"],
        ("Paladin", 5) => &["banishing smite", "destructive wave", "holy weapon", "raise dead"],

        ("Ranger", 1) => &[
            "hunter's mark",
            "cure wounds",
            "ensnaring strike",
            "fog cloud",
            "goodberry",
        ],
        ("Ranger", 2) => &["pass without trace", "spike growth", "silence", "lesser restoration"],
        ("Ranger", 3) => &["conjure animals", "lightning arrow", "plant growth", "wind wall"],
        ("Ranger", 4) => &["freedom of movement", "stoneskin", "grasping vine", "locate creature"],
        ("Ranger", 5) => &["swift quiver", "tree stride", "commune with nature", "conjure volley"],

        ("Sorcerer", 1) => &["magic missile", "shield", "burning hands", "chromatic orb", "sleep"],
        ("Sorcerer", 2) => &["misty step", "scorching ray", "hold person", "mirror image"],
        ("Sorcerer", 3) => &["fireball", "lightning bolt", "counterspell", "haste"],
        ("Sorcerer", 4) => &["greater invisibility", "polymorph", "banishment", "wall of fire"],
        ("Sorcerer", 5) => &["cone of cold", "dominate person", "hold monster", "telekinesis"],
        ("Sorcerer", 6) => &["chain lightning", "disintegrate", "globe of invulnerability"],
        ("Sorcerer", 7) => &["finger of death", "fire storm", "teleport"],
        ("Sorcerer", 8) => &["sunburst", "dominate monster", "incendiary cloud"],
        ("Sorcerer", 9) => &["meteor swarm", "wish", "time stop"],

        ("Warlock", 1) => &[
            "hex",
            "armor of agathys",
            "hellish rebuke",
            "witch bolt",
            "charm person",
        ],
        ("Warlock", 2) => &["darkness", "misty step", "hold person", "invisibility"],
        ("Warlock", 3) => &["counterspell", "fly", "hunger of hadar", "vampiric touch"],
        ("Warlock", 4) => &["banishment", "dimension door", "blight", "hallucinatory terrain"],
        ("Warlock", 5) => &["hold monster", "scrying", "contact other plane", "dream"],
        ("Warlock", 6) => &["circle of death", "eyebite", "mass suggestion"],
        ("Warlock", 7) => &["finger of death", "plane shift", "etherealness"],
        ("Warlock", 8) => &["demiplane", "feeblemind", "power word stun"],
        ("Warlock", 9) => &["foresight", "imprisonment", "power word kill"],

        ("Wizard", 1) => &["magic missile", "shield", "mage armor", "detect magic", "sleep"],
        ("Wizard", 2) => &["misty step", "scorching ray", "web", "invisibility"],
        ("Wizard", 3) => &["fireball", "counterspell", "fly", "lightning bolt"],
        ("Wizard", 4) => &["greater invisibility", "ice storm", "polymorph", "dimension door"],
        ("Wizard", 5) => &["cone of cold", "wall of force", "teleportation circle", "bigby's hand"],
        ("Wizard", 6) => &["chain lightning", "disintegrate", "globe of invulnerability"],
        ("Wizard", 7) => &["finger of death", "prismatic spray", "teleport"],
        ("Wizard", 8) => &["power word stun", "maze", "sunburst"],
        ("Wizard", 9) => &["meteor swarm", "time stop", "wish"],

        _ => &[],
    }
}

/// Starting gear by class name; `None` for classes without an entry.
pub fn starting_gear(class_name: &str) -> Option<&'static [&'static str]> {
    let gear: &'static [&'static str] = match class_name {
        "Barbarian" => &["Greataxe", "Two handaxes", "Explorer's pack", "Four javelins"],
        "Bard" => &["Rapier", "Diplomat's pack", "Lute", "Leather armor", "Dagger"],
        "Cleric" => &[
            "Mace",
            "Scale mail",
            "Light crossbow and 20 bolts",
            "Priest's pack",
            "Shield",
            "Holy symbol",
        ],
        "Druid" => &[
            "Wooden shield",
            "Scimitar",
            "Leather armor",
            "Explorer's pack",
            "Druidic focus",
        ],
        "Fighter" => &[
            "Chain mail",
            "Longsword",
            "Shield",
            "Light crossbow and 20 bolts",
            "Dungeoneer's pack",
        ],
        "Monk" => &["Shortsword", "Dungeoneer's pack", "10 darts"],
        "Paladin" => &[
            "Longsword",
            "Shield",
            "Five javelins",
            "Priest's pack",
            "Chain mail",
            "Holy symbol",
        ],
        "Ranger" => &[
            "Scale mail",
            "Two shortswords",
            "Dungeoneer's pack",
            "Longbow and quiver of 20 arrows",
        ],
        "Rogue" => &[
            "Rapier",
            "Shortbow and quiver of 20 arrows",
            "Burglar's pack",
            "Leather armor",
            "Two daggers",
            "Thieves' tools",
        ],
        "Sorcerer" => &[
            "Light crossbow and 20 bolts",
            "Component pouch",
            "Dungeoneer's pack",
            "Two daggers",
        ],
        "Warlock" => &[
            "Light crossbow and 20 bolts",
            "Component pouch",
            "Scholar's pack",
            "Leather armor",
            "Two daggers",
        ],
        "Wizard" => &["Quarterstaff", "Component pouch", "Scholar's pack", "Spellbook"],
        _ => return None,
    };
    Some(gear)
}

/// Class whose gear stands in for unrecognized classes.
pub const DEFAULT_GEAR_CLASS: &str = "Fighter";

/// Rare items an NPC may carry on top of its class gear.
pub const SPECIAL_ITEMS: &[(&str, Option<&str>)] = &[
    ("Potion of Healing", Some("Restores 2d4 + 2 hit points when drunk.")),
    ("Bag of Holding", Some("Holds up to 500 pounds in an extradimensional space.")),
    ("Cloak of Elvenkind", Some("Grants advantage on Stealth checks while the hood is up.")),
    ("Ring of Protection", Some("Grants a +1 bonus to AC and saving throws.")),
    ("Spell Scroll", Some("Contains a single spell that can be cast once.")),
    ("Driftglobe", Some("A small glass sphere that sheds light on command.")),
    ("Pouch of gemstones", None),
    ("Sealed letter", None),
    ("Silver signet ring", None),
    ("Map to a forgotten ruin", None),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spellcasting::spellcasting_ability;

    const CASTERS: [&str; 8] = [
        "Bard", "Cleric", "Druid", "Paladin", "Ranger", "Sorcerer", "Warlock", "Wizard",
    ];

    #[test]
    fn unknown_trait_has_no_description() {
        assert!(trait_description("Darkvision").is_some());
        assert!(trait_description("Tail Swipe").is_none());
    }

    #[test]
    fn every_caster_has_first_level_spells() {
        for class in CASTERS {
            assert!(spellcasting_ability(class).is_some());
            assert!(spell_list(class, 1).len() >= 4, "{class} has too few 1st-level spells");
        }
        assert!(spell_list("Fighter", 1).is_empty());
    }

    #[test]
    fn half_casters_have_no_cantrip_list() {
        assert!(cantrips("Paladin").is_empty());
        assert!(cantrips("Ranger").is_empty());
        assert!(cantrips("Wizard").len() >= 4);
    }

    #[test]
    fn default_gear_class_has_gear() {
        assert!(starting_gear(DEFAULT_GEAR_CLASS).is_some());
        assert!(starting_gear("Artificer").is_none());
    }

    #[test]
    fn special_items_are_unique() {
        let mut names: Vec<&str> = SPECIAL_ITEMS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SPECIAL_ITEMS.len());
    }
}
