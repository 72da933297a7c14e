//! Race specifications: ages, physique, appearance, languages and traits.

use super::alignment_sets;
use super::tables::{
    script_for, AbilityAdjustments, DARK_HAIR_COLORS, DEFAULT_EYE_COLORS, DEFAULT_HAIR_COLORS,
    ELF_EYE_COLORS, ELF_HAIR_COLORS,
};
use super::{ensure_known_skill, AgeCategory, Alignment, Gender, Race, SaveCategory, Size};
use crate::utils::{dice_sizes::*, DiceRoll};
use crate::{NpcGenError, NpcGenResult};
use serde::{Deserialize, Serialize};

/// Which racial age dice a class rolls for starting age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeDice {
    Simple,
    Moderate,
    Complex,
}

/// Hit die a race substitutes for the first few character levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RacialHitDie {
    pub die: i32,
    /// Character levels (from 1) the racial die applies to
    pub levels: u32,
}

/// Extra skill points granted by race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusSkillPoints {
    pub first_level: i32,
    pub per_level: i32,
}

/// Racial save bonuses added to the misc column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveBonus {
    pub fort: i32,
    pub reflex: i32,
    pub will: i32,
}

/// Everything a race grants on top of its base numbers.
#[derive(Debug, Clone, Copy)]
pub struct RacialTraits {
    pub racial_feats: &'static [(&'static str, &'static str)],
    pub vision: &'static str,
    pub skill_bonus: &'static [(&'static str, i32)],
    pub saves: SaveBonus,
    pub special_saves: &'static [(SaveCategory, &'static str, i32)],
    /// Conditional dodge bonuses to AC
    pub special_armor: &'static [(&'static str, i32)],
    /// Base racial spell resistance, added to total level when non-zero
    pub spell_resistance: i32,
    pub grapple: i32,
    pub class_skills: &'static [&'static str],
    pub size_for_items: Option<Size>,
    pub natural_armor: i32,
    pub bab: i32,
    pub hit_die: Option<RacialHitDie>,
    pub bonus_skill_points: Option<BonusSkillPoints>,
}

impl RacialTraits {
    pub const NONE: RacialTraits = RacialTraits {
        racial_feats: &[],
        vision: "normal",
        skill_bonus: &[],
        saves: SaveBonus {
            fort: 0,
            reflex: 0,
            will: 0,
        },
        special_saves: &[],
        special_armor: &[],
        spell_resistance: 0,
        grapple: 0,
        class_skills: &[],
        size_for_items: None,
        natural_armor: 0,
        bab: 0,
        hit_die: None,
        bonus_skill_points: None,
    };
}

/// Base height and weight for one race and gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Physique {
    pub base_feet: i32,
    pub base_inches: i32,
    /// Extra height in inches
    pub height_dice: DiceRoll,
    pub base_weight: i32,
    /// Pounds per inch of extra height
    pub weight_dice: DiceRoll,
}

const fn physique(feet: i32, inches: i32, height_dice: DiceRoll, weight: i32, weight_dice: DiceRoll) -> Physique {
    Physique {
        base_feet: feet,
        base_inches: inches,
        height_dice,
        base_weight: weight,
        weight_dice,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RaceSpec {
    pub adult: i32,
    pub middle: i32,
    pub old: i32,
    pub venerable: i32,
    pub simple_age: DiceRoll,
    pub moderate_age: DiceRoll,
    pub complex_age: DiceRoll,
    pub ability_adjustments: AbilityAdjustments,
    pub level_adjustment: u32,
    pub speed: i32,
    pub size: Size,
    pub skin: &'static [&'static str],
    pub eyes: &'static [&'static str],
    pub hair: &'static [&'static str],
    pub restricted_alignments: &'static [Alignment],
    pub creature_type: &'static str,
    pub languages: &'static [&'static str],
    pub bonus_languages: &'static [&'static str],
    pub traits: RacialTraits,
    pub male: Physique,
    pub female: Physique,
}

impl RaceSpec {
    /// Age at which a member of the race enters `category`.
    pub fn age_threshold(&self, category: AgeCategory) -> i32 {
        match category {
            AgeCategory::Adult => self.adult,
            AgeCategory::Middle => self.middle,
            AgeCategory::Old => self.old,
            AgeCategory::Venerable => self.venerable,
        }
    }

    pub fn age_dice(&self, dice: AgeDice) -> DiceRoll {
        match dice {
            AgeDice::Simple => self.simple_age,
            AgeDice::Moderate => self.moderate_age,
            AgeDice::Complex => self.complex_age,
        }
    }

    pub fn physique(&self, gender: Gender) -> &Physique {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    pub fn allows_alignment(&self, alignment: Alignment) -> bool {
        !self.restricted_alignments.contains(&alignment)
    }

    /// Alignments a member of the race may have.
    pub fn allowed_alignments(&self) -> Vec<Alignment> {
        Alignment::ALL
            .iter()
            .copied()
            .filter(|a| self.allows_alignment(*a))
            .collect()
    }
}

impl Race {
    pub fn spec(self) -> &'static RaceSpec {
        match self {
            Race::Human => &HUMAN,
            Race::Elf => &ELF,
            Race::HalfElf => &HALF_ELF,
            Race::Halfling => &HALFLING,
            Race::Gnome => &GNOME,
            Race::Dwarf => &DWARF,
            Race::HalfOrc => &HALF_ORC,
            Race::Drow => &DROW,
            Race::Duergar => &DUERGAR,
            Race::Svirfneblin => &SVIRFNEBLIN,
            Race::HalfOgre => &HALF_OGRE,
            Race::Orc => &ORC,
            Race::Ogre => &OGRE,
        }
    }
}

const ALL_BUT_DRUIDIC: &[&str] = &[
    "abyssal",
    "aquan",
    "auran",
    "celestial",
    "common",
    "draconic",
    "dwarven",
    "elven",
    "giant",
    "gnome",
    "goblin",
    "gnoll",
    "halfling",
    "ignan",
    "infernal",
    "orc",
    "sylvan",
    "terran",
    "undercommon",
    "drow sign language",
];

const STONECUNNING: (&str, &str) = ("Stonecunning", "+2 to search checks on unusual stonework");
const STABILITY: (&str, &str) = ("Stability", "+4 to checks if tripped/bull rushed");
const POWERFUL_BUILD: (&str, &str) = (
    "Powerful build",
    "+4 to bull rush, overrun, (grapple). May yield large weapons",
);

static HUMAN: RaceSpec = RaceSpec {
    adult: 15,
    middle: 35,
    old: 53,
    venerable: 70,
    simple_age: DiceRoll::plain(1, D4),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(2, D6),
    ability_adjustments: AbilityAdjustments::NONE,
    level_adjustment: 0,
    speed: 30,
    size: Size::Medium,
    skin: &["pale", "tanned", "lightly tanned", "dark", "brown"],
    eyes: DEFAULT_EYE_COLORS,
    hair: DEFAULT_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (human)",
    languages: &["common"],
    bonus_languages: ALL_BUT_DRUIDIC,
    traits: RacialTraits {
        racial_feats: &[("Quick to learn", "Gains one extra feat and extra skill points")],
        bonus_skill_points: Some(BonusSkillPoints {
            first_level: 4,
            per_level: 1,
        }),
        ..RacialTraits::NONE
    },
    male: physique(4, 10, DiceRoll::plain(2, D10), 120, DiceRoll::plain(2, D4)),
    female: physique(4, 10, DiceRoll::plain(2, D10), 120, DiceRoll::plain(2, D4)),
};

static ELF: RaceSpec = RaceSpec {
    adult: 110,
    middle: 175,
    old: 263,
    venerable: 350,
    simple_age: DiceRoll::plain(4, D6),
    moderate_age: DiceRoll::plain(6, D6),
    complex_age: DiceRoll::plain(10, D6),
    ability_adjustments: AbilityAdjustments::new(0, 2, -2, 0, 0, 0),
    level_adjustment: 0,
    speed: 30,
    size: Size::Medium,
    skin: &["pale", "lightly tanned"],
    eyes: ELF_EYE_COLORS,
    hair: ELF_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (elf)",
    languages: &["common", "elven"],
    bonus_languages: &["draconic", "gnoll", "gnome", "goblin", "orc", "sylvan"],
    traits: RacialTraits {
        racial_feats: &[
            ("Immunities", "Immune to sleep spells"),
            ("Skill bonus", "(+2 to listen, search, spot)"),
        ],
        vision: "Low-light",
        skill_bonus: &[("Listen", 2), ("Search", 2), ("Spot", 2)],
        special_saves: &[(SaveCategory::General, "vs. ench.", 2)],
        ..RacialTraits::NONE
    },
    male: physique(4, 5, DiceRoll::plain(2, D6), 85, DiceRoll::plain(1, D6)),
    female: physique(4, 5, DiceRoll::plain(2, D6), 80, DiceRoll::plain(1, D6)),
};

static HALF_ELF: RaceSpec = RaceSpec {
    adult: 20,
    middle: 62,
    old: 93,
    venerable: 125,
    simple_age: DiceRoll::plain(1, D6),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(3, D6),
    ability_adjustments: AbilityAdjustments::NONE,
    level_adjustment: 0,
    speed: 30,
    size: Size::Medium,
    skin: &["pale", "tanned", "lightly tanned", "light brown"],
    eyes: &[
        "green",
        "light green",
        "deep green",
        "blue",
        "emerald",
        "jade",
        "green",
        "blue",
        "brown",
        "gray",
    ],
    hair: &[
        "black", "brown", "dark", "mixed", "black", "brown", "dark", "blonde", "red", "mixed",
        "grayish",
    ],
    restricted_alignments: &[],
    creature_type: "humanoid (elf)",
    languages: &["common", "elven"],
    bonus_languages: ALL_BUT_DRUIDIC,
    traits: RacialTraits {
        racial_feats: &[
            ("Immunities", "Immune to sleep spells"),
            (
                "Skill bonus",
                "(+1 to listen, search, spot, gather information, diplomacy)",
            ),
        ],
        vision: "Low-light",
        skill_bonus: &[
            ("Listen", 1),
            ("Search", 1),
            ("Spot", 1),
            ("Gather Information", 2),
            ("Diplomacy", 2),
        ],
        special_saves: &[(SaveCategory::General, "vs. ench.", 2)],
        ..RacialTraits::NONE
    },
    male: physique(4, 7, DiceRoll::plain(2, D8), 100, DiceRoll::plain(2, D4)),
    female: physique(4, 5, DiceRoll::plain(2, D8), 80, DiceRoll::plain(2, D4)),
};

static HALF_ORC: RaceSpec = RaceSpec {
    adult: 14,
    middle: 30,
    old: 45,
    venerable: 60,
    simple_age: DiceRoll::plain(1, D4),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(2, D6),
    ability_adjustments: AbilityAdjustments::new(2, 0, 0, 0, -2, -2),
    level_adjustment: 0,
    speed: 30,
    size: Size::Medium,
    skin: &["dark", "grayish", "gray", "olive", "brownish"],
    eyes: &["black", "gray", "dark green", "red", "dark blue"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (orc)",
    languages: &["common", "orc"],
    bonus_languages: &["draconic", "giant", "gnoll", "goblin", "abyssal"],
    traits: RacialTraits {
        vision: "Darkvision (60 ft)",
        ..RacialTraits::NONE
    },
    male: physique(4, 10, DiceRoll::plain(2, D10), 130, DiceRoll::plain(2, D4)),
    female: physique(4, 4, DiceRoll::plain(2, D10), 90, DiceRoll::plain(2, D4)),
};

static HALFLING: RaceSpec = RaceSpec {
    adult: 20,
    middle: 50,
    old: 75,
    venerable: 100,
    simple_age: DiceRoll::plain(2, D4),
    moderate_age: DiceRoll::plain(3, D6),
    complex_age: DiceRoll::plain(4, D6),
    ability_adjustments: AbilityAdjustments::new(-2, 2, 0, 0, 0, 0),
    level_adjustment: 0,
    speed: 20,
    size: Size::Small,
    skin: &["dark tan", "ruddy", "light brown", "tanned"],
    eyes: &["black", "dark brown"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (halfling)",
    languages: &["common", "halfling"],
    bonus_languages: &["dwarven", "elven", "gnome", "goblin", "orc"],
    traits: RacialTraits {
        racial_feats: &[
            ("Ranged bonus", "+1 attack with slings and throwing weapons"),
            ("Skill bonus", "(+2 to Climb/listen/jump/move silently)"),
        ],
        skill_bonus: &[("Climb", 2), ("Listen", 2), ("Jump", 2), ("Move Silently", 2)],
        saves: SaveBonus {
            fort: 1,
            reflex: 1,
            will: 1,
        },
        special_saves: &[(SaveCategory::General, "vs. fear", 2)],
        ..RacialTraits::NONE
    },
    male: physique(2, 8, DiceRoll::plain(2, D4), 30, DiceRoll::plain(1, 1)),
    female: physique(2, 6, DiceRoll::plain(2, D4), 25, DiceRoll::plain(1, 1)),
};

static DWARF: RaceSpec = RaceSpec {
    adult: 40,
    middle: 125,
    old: 188,
    venerable: 250,
    simple_age: DiceRoll::plain(3, D6),
    moderate_age: DiceRoll::plain(5, D6),
    complex_age: DiceRoll::plain(7, D6),
    ability_adjustments: AbilityAdjustments::new(0, 0, 2, 0, 0, -2),
    level_adjustment: 0,
    speed: 20,
    size: Size::Medium,
    skin: &["dark tan", "light brown", "tanned"],
    eyes: &["brown", "dark", "dark brown"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (dwarf)",
    languages: &["common", "dwarven"],
    bonus_languages: &["giant", "gnome", "goblin", "orc", "terran", "undercommon"],
    traits: RacialTraits {
        racial_feats: &[
            STONECUNNING,
            STABILITY,
            (
                "Attack bonus",
                "+1 to attack rolls vs. orcs, half-orcs and goblinoids",
            ),
            ("Skill bonus", "(+2 to Appraise/Craft (metal items)"),
        ],
        vision: "darkvision (60 ft, monochrome)",
        special_saves: &[
            (SaveCategory::Fort, "vs. poison", 2),
            (SaveCategory::General, "vs. spells", 2),
        ],
        special_armor: &[("vs. giant types", 4)],
        skill_bonus: &[("Appraise", 2), ("Craft (metals)", 2)],
        ..RacialTraits::NONE
    },
    male: physique(3, 9, DiceRoll::plain(2, D4), 130, DiceRoll::plain(2, D6)),
    female: physique(3, 7, DiceRoll::plain(2, D4), 100, DiceRoll::plain(2, D6)),
};

static GNOME: RaceSpec = RaceSpec {
    adult: 40,
    middle: 100,
    old: 150,
    venerable: 200,
    simple_age: DiceRoll::plain(4, D6),
    moderate_age: DiceRoll::plain(6, D6),
    complex_age: DiceRoll::plain(9, D6),
    ability_adjustments: AbilityAdjustments::new(-2, 0, 2, 0, 0, 0),
    level_adjustment: 0,
    speed: 20,
    size: Size::Small,
    skin: &["dark tan", "woody brown", "tanned"],
    eyes: &["deep blue", "light blue", "teal", "blue"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (gnome)",
    languages: &["common", "gnome"],
    bonus_languages: &["draconic", "dwarven", "elven", "giant", "goblin", "orc"],
    traits: RacialTraits {
        racial_feats: &[
            ("Attack bonus", "+1 to attack rolls vs. goblinoids and kobolds"),
            ("Skill bonus", "(+2 to Listen, Craft (alchemy))"),
            (
                "Spell-like abilities",
                "Speak with animals. If charisma over 10: dancing lights, ghost sound, prestidigitation (1/day)",
            ),
            (
                "Illusionist",
                "+1 to the difficulty class for all saving throws against illusion spells cast by gnomes",
            ),
        ],
        vision: "low-light",
        special_armor: &[("vs. giant types", 4)],
        skill_bonus: &[("Listen", 2), ("Craft (alchemy)", 2)],
        special_saves: &[(SaveCategory::General, "vs. illusions", 2)],
        ..RacialTraits::NONE
    },
    male: physique(3, 0, DiceRoll::plain(2, D4), 40, DiceRoll::plain(1, 1)),
    female: physique(2, 10, DiceRoll::plain(2, D4), 35, DiceRoll::plain(1, 1)),
};

static DROW: RaceSpec = RaceSpec {
    adult: 110,
    middle: 175,
    old: 263,
    venerable: 350,
    simple_age: DiceRoll::plain(4, D6),
    moderate_age: DiceRoll::plain(6, D6),
    complex_age: DiceRoll::plain(10, D6),
    ability_adjustments: AbilityAdjustments::new(0, 2, -2, 0, 0, 2),
    level_adjustment: 2,
    speed: 30,
    size: Size::Medium,
    skin: &["dark gray", "gray", "dark blue", "violet"],
    eyes: &["red", "lavender", "blue", "purple", "amber"],
    hair: &["white", "light gray"],
    restricted_alignments: alignment_sets::GOOD_OR_NEUTRAL,
    creature_type: "humanoid (elf)",
    languages: &["common", "elven", "undercommon"],
    bonus_languages: &["abyssal", "aquan", "draconic", "drow sign language", "gnome", "goblin"],
    traits: RacialTraits {
        racial_feats: &[
            ("Immunities", "Immune to sleep"),
            (
                "Light blindness",
                "Blinded for 1 round in bright sunlight and remains dazzled afterwards",
            ),
        ],
        special_saves: &[(SaveCategory::General, "vs. ench.", 4)],
        spell_resistance: 11,
        vision: "darkvision (120 ft)",
        skill_bonus: &[("Search", 2), ("Listen", 2), ("Spot", 2)],
        ..RacialTraits::NONE
    },
    male: physique(4, 4, DiceRoll::plain(2, D6), 85, DiceRoll::plain(1, D6)),
    female: physique(4, 6, DiceRoll::plain(2, D6), 80, DiceRoll::plain(1, D6)),
};

static DUERGAR: RaceSpec = RaceSpec {
    adult: 40,
    middle: 125,
    old: 188,
    venerable: 250,
    simple_age: DiceRoll::plain(3, D6),
    moderate_age: DiceRoll::plain(5, D6),
    complex_age: DiceRoll::plain(7, D6),
    ability_adjustments: AbilityAdjustments::new(0, 0, 2, 0, 0, -4),
    level_adjustment: 1,
    speed: 20,
    size: Size::Medium,
    skin: &["dark gray", "gray", "charcoal"],
    eyes: &["dull black", "black"],
    hair: &[
        "black",
        "brown",
        "dark",
        "blonde",
        "red",
        "mixed",
        "grayish",
        "dark",
        "black",
        "dark grey",
        "dark brown",
    ],
    restricted_alignments: alignment_sets::GOOD_LAWFUL_NEUTRAL_OR_TRUE_NEUTRAL,
    creature_type: "humanoid (dwarf)",
    languages: &["common", "dwarven", "undercommon"],
    bonus_languages: &["draconic", "giant", "goblin", "orc", "terran"],
    traits: RacialTraits {
        racial_feats: &[
            STONECUNNING,
            STABILITY,
            ("Immunities", "Immune to poison, paralysis and phantasms"),
            ("Spell-like abilities", "Enlarge person, invisibility (1/day)"),
            ("Light sensitivity", "Dazzled in bright sunlight"),
            (
                "Attack bonus",
                "+1 to attack rolls vs. orcs, half-orcs and goblinoids",
            ),
            (
                "Skill bonus",
                "(+2 to Appraise/Craft (metal items), +1 Listen, Spot, +4 Move Silently)",
            ),
        ],
        vision: "darkvision (120 ft)",
        special_saves: &[(SaveCategory::General, "vs. spells", 2)],
        special_armor: &[("vs. giant types", 4)],
        skill_bonus: &[
            ("Appraise", 2),
            ("Craft (metals)", 2),
            ("Listen", 1),
            ("Spot", 1),
            ("Move Silently", 4),
        ],
        ..RacialTraits::NONE
    },
    male: physique(3, 9, DiceRoll::plain(2, D4), 110, DiceRoll::plain(2, D4)),
    female: physique(3, 7, DiceRoll::plain(2, D4), 80, DiceRoll::plain(2, D4)),
};

static SVIRFNEBLIN: RaceSpec = RaceSpec {
    adult: 40,
    middle: 100,
    old: 158,
    venerable: 200,
    simple_age: DiceRoll::plain(4, D6),
    moderate_age: DiceRoll::plain(6, D6),
    complex_age: DiceRoll::plain(9, D6),
    ability_adjustments: AbilityAdjustments::new(0, 2, 0, 2, 0, -4),
    level_adjustment: 3,
    speed: 20,
    size: Size::Small,
    skin: &["dark gray", "gray", "charcoal", "very dark"],
    eyes: &["dull black", "black", "dark brown"],
    hair: &["gray", "light gray", "white"],
    restricted_alignments: alignment_sets::NON_NEUTRAL,
    creature_type: "humanoid (gnome)",
    languages: &["common", "gnome", "undercommon"],
    bonus_languages: &["dwarven", "elven", "giant", "goblin", "orc", "terran"],
    traits: RacialTraits {
        racial_feats: &[
            STONECUNNING,
            ("Non-detection", "Continuous non-detection"),
            ("Save bonus", "(Racial +2 to all saves)"),
            ("Attack bonus", "+1 to attack rolls vs. goblinoids and kobolds"),
            ("Skill bonus", "(+2 to Listen, Hide, Craft (alchemy))"),
            (
                "Spell-like abilities",
                "Blindness/deafness, blur, disguise self (1/day)",
            ),
            (
                "Illusionist",
                "+1 to the difficulty class for all saving throws against illusion spells cast by svirfneblins",
            ),
        ],
        vision: "darkvision (120 ft), low-light",
        spell_resistance: 11,
        saves: SaveBonus {
            fort: 2,
            reflex: 2,
            will: 2,
        },
        special_armor: &[("vs. creatures", 4)],
        skill_bonus: &[("Listen", 2), ("Craft (alchemy)", 2), ("Hide", 2)],
        ..RacialTraits::NONE
    },
    male: physique(3, 0, DiceRoll::plain(2, D4), 40, DiceRoll::plain(1, 1)),
    female: physique(2, 10, DiceRoll::plain(2, D4), 35, DiceRoll::plain(1, 1)),
};

static HALF_OGRE: RaceSpec = RaceSpec {
    adult: 15,
    middle: 32,
    old: 49,
    venerable: 65,
    simple_age: DiceRoll::plain(1, D4),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(1, D10),
    ability_adjustments: AbilityAdjustments::new(6, 0, 2, 0, -2, -2),
    level_adjustment: 2,
    speed: 30,
    size: Size::Medium,
    skin: &["brown", "dark gray", "dull yellow", "gray-greenish"],
    eyes: &["green", "blue", "brown", "gray", "white"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: &[],
    creature_type: "humanoid (giant)",
    languages: &["common", "giant"],
    bonus_languages: &["draconic", "gnoll", "goblin", "orc", "abyssal"],
    traits: RacialTraits {
        racial_feats: &[POWERFUL_BUILD],
        grapple: 4,
        class_skills: &["Intimidate"],
        size_for_items: Some(Size::Large),
        vision: "darkvision (60 ft.)",
        natural_armor: 4,
        ..RacialTraits::NONE
    },
    male: physique(7, 6, DiceRoll::plain(2, D6), 250, DiceRoll::plain(7, 1)),
    female: physique(6, 10, DiceRoll::plain(2, D6), 180, DiceRoll::plain(7, 1)),
};

static ORC: RaceSpec = RaceSpec {
    adult: 12,
    middle: 20,
    old: 30,
    venerable: 40,
    simple_age: DiceRoll::plain(1, D4),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(2, D6),
    ability_adjustments: AbilityAdjustments::new(4, 0, 0, -2, -2, -2),
    level_adjustment: 0,
    speed: 30,
    size: Size::Medium,
    skin: &["dark", "grayish", "gray"],
    eyes: &["black", "red", "dark orange"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: alignment_sets::LAWFUL_OR_GOOD,
    creature_type: "humanoid (orc)",
    languages: &["common", "giant"],
    bonus_languages: &["draconic", "giant", "gnoll", "goblin", "abyssal"],
    traits: RacialTraits {
        racial_feats: &[("Light sensitivity", "Dazzled in bright sunlight")],
        vision: "Darkvision (60 ft)",
        ..RacialTraits::NONE
    },
    male: physique(5, 1, DiceRoll::plain(2, D12), 160, DiceRoll::plain(7, 1)),
    female: physique(4, 9, DiceRoll::plain(2, D12), 120, DiceRoll::plain(7, 1)),
};

static OGRE: RaceSpec = RaceSpec {
    adult: 16,
    middle: 38,
    old: 65,
    venerable: 80,
    simple_age: DiceRoll::plain(1, D4),
    moderate_age: DiceRoll::plain(1, D6),
    complex_age: DiceRoll::plain(1, D10),
    ability_adjustments: AbilityAdjustments::new(10, -2, 4, 0, -4, -4),
    level_adjustment: 2,
    speed: 40,
    size: Size::Large,
    skin: &["brown", "dark gray", "dull yellow", "gray-greenish"],
    eyes: &["green", "blue", "brown", "gray", "white"],
    hair: DARK_HAIR_COLORS,
    restricted_alignments: alignment_sets::NOT_CHAOTIC_EVIL,
    creature_type: "humanoid (giant)",
    languages: &["giant", "common"],
    bonus_languages: &["dwarven", "orc", "goblin", "terran"],
    traits: RacialTraits {
        racial_feats: &[
            POWERFUL_BUILD,
            (
                "Giant",
                "(+3 BAB, 8 HD at first four levels, +4 FORT, +1 REF/WILL)",
            ),
        ],
        grapple: 4,
        bab: 3,
        class_skills: &["Climb", "Listen", "Spot"],
        size_for_items: Some(Size::Large),
        vision: "darkvision (60 ft.)",
        natural_armor: 5,
        saves: SaveBonus {
            fort: 4,
            reflex: 1,
            will: 1,
        },
        hit_die: Some(RacialHitDie { die: D8, levels: 4 }),
        bonus_skill_points: Some(BonusSkillPoints {
            first_level: 7,
            per_level: 0,
        }),
        ..RacialTraits::NONE
    },
    male: physique(9, 2, DiceRoll::plain(1, D8), 600, DiceRoll::plain(7, 1)),
    female: physique(9, 0, DiceRoll::plain(1, D8), 500, DiceRoll::plain(7, 1)),
};

pub(crate) fn validate_race_tables() -> NpcGenResult<()> {
    for race in Race::ALL {
        let spec = race.spec();
        let context = format!("race \"{}\"", race);

        for (skill, _) in spec.traits.skill_bonus {
            ensure_known_skill(skill, &context)?;
        }
        for skill in spec.traits.class_skills {
            ensure_known_skill(skill, &context)?;
        }
        for language in spec.languages.iter().chain(spec.bonus_languages) {
            if script_for(language).is_none() {
                return Err(NpcGenError::RuleTable(format!(
                    "unknown language \"{}\" in {}",
                    language, context
                )));
            }
        }
        if spec.allowed_alignments().is_empty() {
            return Err(NpcGenError::RuleTable(format!(
                "{} restricts every alignment",
                context
            )));
        }
        if spec.skin.is_empty() || spec.eyes.is_empty() || spec.hair.is_empty() {
            return Err(NpcGenError::RuleTable(format!(
                "{} is missing appearance colours",
                context
            )));
        }
        let ages = [spec.adult, spec.middle, spec.old, spec.venerable];
        if ages.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(NpcGenError::RuleTable(format!(
                "{} has unordered age thresholds",
                context
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drow_must_be_evil() {
        let allowed = Race::Drow.spec().allowed_alignments();
        assert_eq!(allowed, alignment_sets::EVIL.to_vec());
    }

    #[test]
    fn test_ogre_only_chaotic_evil() {
        assert_eq!(
            Race::Ogre.spec().allowed_alignments(),
            vec![Alignment::ChaoticEvil]
        );
    }

    #[test]
    fn test_level_adjusted_races() {
        let adjusted: Vec<(Race, u32)> = Race::ALL
            .iter()
            .map(|r| (*r, r.spec().level_adjustment))
            .filter(|(_, la)| *la > 0)
            .collect();
        assert_eq!(
            adjusted,
            vec![
                (Race::Drow, 2),
                (Race::Duergar, 1),
                (Race::Svirfneblin, 3),
                (Race::HalfOgre, 2),
                (Race::Ogre, 2),
            ]
        );
    }

    #[test]
    fn test_age_thresholds() {
        let human = Race::Human.spec();
        assert_eq!(human.age_threshold(AgeCategory::Adult), 15);
        assert_eq!(human.age_threshold(AgeCategory::Venerable), 70);
        assert_eq!(human.age_dice(AgeDice::Complex), DiceRoll::plain(2, D6));
    }

    #[test]
    fn test_large_items_for_ogres() {
        assert_eq!(Race::Ogre.spec().traits.size_for_items, Some(Size::Large));
        assert_eq!(Race::HalfOgre.spec().traits.size_for_items, Some(Size::Large));
        assert_eq!(Race::Human.spec().traits.size_for_items, None);
    }
}
