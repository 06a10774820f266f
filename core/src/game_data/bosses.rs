//! Boss and raid monster identification data
//!
//! Names are exact in-game spawn names as they appear in exported logs.
//! These are the segmenter/evaluator defaults; both accept alternate
//! sets through their configs.

use hashbrown::HashSet;
use phf::{Set, phf_set};

/// Monsters whose name takes over a fight's label when hit mid-fight.
/// Adds killed before (or alongside) these should not keep a fight
/// mislabeled.
pub static BOSS_NAMES: Set<&'static str> = phf_set! {
    // World / slayer bosses
    "Scurrius",
    "Giant Mole",
    "Kalphite Queen",
    "Sarachnis",
    "Vorkath",
    "Zulrah",
    "Phantom Muspah",
    "The Nightmare",
    "Abyssal Sire",
    "Cerberus",
    "Alchemical Hydra",
    "Kraken",
    "Thermonuclear smoke devil",
    "Grotesque Guardians",
    "Skotizo",
    "Hespori",
    // God Wars
    "General Graardor",
    "K'ril Tsutsaroth",
    "Kree'arra",
    "Commander Zilyana",
    "Nex",
    // Wilderness
    "Callisto",
    "Vet'ion",
    "Venenatis",
    "Chaos Elemental",
    "Corporeal Beast",
    "King Black Dragon",
    // Desert Treasure II
    "Duke Sucellus",
    "The Leviathan",
    "The Whisperer",
    "Vardorvis",
    // Inferno / Fight Caves / Colosseum
    "TzTok-Jad",
    "TzKal-Zuk",
    "Sol Heredit",
    // Raid bosses
    "Great Olm",
    "Tekton",
    "Vasa Nistirio",
    "Vespula",
    "Tumeken's Warden",
    "Elidinis' Warden",
    "Ba-Ba",
    "Akkha",
    "Kephri",
    "Zebak",
    "Verzik Vitur",
    "The Maiden of Sugadinti",
    "Pestilent Bloat",
    "Xarpus",
    "Sotetseg",
};

/// Chambers of Xeric room monsters, used to detect CoX boost context.
pub static COX_MONSTERS: Set<&'static str> = phf_set! {
    "Great Olm",
    "Great Olm (Left claw)",
    "Great Olm (Right claw)",
    "Tekton",
    "Vasa Nistirio",
    "Vespula",
    "Abyssal portal",
    "Muttadile",
    "Guardian",
    "Skeletal Mystic",
    "Deathly ranger",
    "Deathly mage",
    "Ice demon",
    "Lizardman shaman",
    "Vanguard",
};

/// Tombs of Amascut room monsters, used to detect ToA boost context.
pub static TOA_MONSTERS: Set<&'static str> = phf_set! {
    "Ba-Ba",
    "Akkha",
    "Akkha's Shadow",
    "Kephri",
    "Zebak",
    "Obelisk",
    "Tumeken's Warden",
    "Elidinis' Warden",
    "Core",
    "Baboon Brawler",
    "Baboon Mage",
    "Baboon Thrower",
};

pub fn default_boss_names() -> HashSet<String> {
    BOSS_NAMES.iter().map(|n| n.to_string()).collect()
}

pub fn default_cox_monsters() -> HashSet<String> {
    COX_MONSTERS.iter().map(|n| n.to_string()).collect()
}

pub fn default_toa_monsters() -> HashSet<String> {
    TOA_MONSTERS.iter().map(|n| n.to_string()).collect()
}
