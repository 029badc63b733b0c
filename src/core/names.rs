/// Random NPC names drawn from per-race name tables.

use rand::seq::SliceRandom;
use rand::Rng;

struct NameTable {
    given: &'static [&'static str],
    family: &'static [&'static str],
}

const GENERIC: NameTable = NameTable {
    given: &["Alden", "Bryn", "Cora", "Dain", "Edda", "Faron", "Greta", "Hale"],
    family: &["Ashford", "Blackwood", "Crane", "Dunmore", "Fairweather", "Holt"],
};

fn table_for(race: &str) -> &'static NameTable {
    const HUMAN: NameTable = NameTable {
        given: &["Aldric", "Mara", "Tobias", "Elena", "Gareth", "Isolde", "Roderick", "Sabine"],
        family: &["Brightwater", "Thorne", "Marsh", "Evenwood", "Greystone", "Amblecrown"],
    };
    const ELF: NameTable = NameTable {
        given: &["Aelar", "Naivara", "Thamior", "Shava", "Erevan", "Lia", "Varis", "Keyleth"],
        family: &["Amakiir", "Galanodel", "Holimion", "Liadon", "Siannodel", "Xiloscient"],
    };
    const DWARF: NameTable = NameTable {
        given: &["Bruenor", "Dagnal", "Eberk", "Helja", "Kathra", "Rurik", "Torbera", "Vondal"],
        family: &["Battlehammer", "Fireforge", "Gorunn", "Ironfist", "Rumnaheim", "Torunn"],
    };
    const HALFLING: NameTable = NameTable {
        given: &["Alton", "Cora", "Eldon", "Kithri", "Merric", "Seraphina", "Wellby", "Verna"],
        family: &["Brushgather", "Goodbarrel", "Greenbottle", "Tealeaf", "Thorngage", "Underbough"],
    };
    const GNOME: NameTable = NameTable {
        given: &[
            "Alston",
            "Bimpnottin",
            "Dimble",
            "Ellyjobell",
            "Fonkin",
            "Nissa",
            "Orryn",
            "Zook",
        ],
        family: &["Beren", "Daergel", "Folkor", "Garrick", "Nackle", "Timbers"],
    };
    const HALF_ORC: NameTable = NameTable {
        given: &["Dench", "Feng", "Gell", "Baggi", "Emen", "Kansif", "Ovak", "Shautha"],
        family: &["Skullsplitter", "Ironhide", "Gorefang", "Stonejaw", "Ashborn", "Redtusk"],
    };
    const TIEFLING: NameTable = NameTable {
        given: &[
            "Akmenos",
            "Damakos",
            "Ekemon",
            "Kallista",
            "Makaria",
            "Nemeia",
            "Orianna",
            "Skamos",
        ],
        family: &["Ash", "Ember", "Sorrow", "Torment", "Vesper", "Whisper"],
    };
    const DRAGONBORN: NameTable = NameTable {
        given: &["Arjhan", "Balasar", "Donaar", "Kava", "Medrash", "Sora", "Thava", "Rhogar"],
        family: &[
            "Clethtinthiallor",
            "Delmirev",
            "Kepeshkmolik",
            "Myastan",
            "Nemmonis",
            "Yarjerit",
        ],
    };

    match race {
        "Human" | "Half-Elf" => &HUMAN,
        "Elf" => &ELF,
        "Dwarf" => &DWARF,
        "Halfling" => &HALFLING,
        "Gnome" => &GNOME,
        "Half-Orc" => &HALF_ORC,
        "Tiefling" => &TIEFLING,
        "Dragonborn" => &DRAGONBORN,
        _ => &GENERIC,
    }
}

/// "Given Family" for a race; unknown races use a generic table.
pub fn random_name<R: Rng + ?Sized>(race: &str, rng: &mut R) -> String {
    let table = table_for(race);
    let given = table.given.choose(rng).copied().unwrap_or("Nameless");
    match table.family.choose(rng) {
        Some(family) => format!("{given} {family}"),
        None => given.to_string(),
    }
}
