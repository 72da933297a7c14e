//! Class features granted automatically at fixed class levels.

use super::{CharClass, Size};
use crate::{NpcGenError, NpcGenResult};

/// Features whose grant changes character state instead of only adding a
/// line of text. Several of them stack when granted repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureEffect {
    FastMovement,
    UnarmoredSpeed,
    TrapSense,
    DamageReduction,
    IndomitableWill,
    NatureSense,
    ResistNaturesLure,
    StillMind,
    DiamondSoul,
    PerfectSelf,
    SneakAttack,
    MonkAcBonus,
    DivineGrace,
    AuraOfCourage,
    FavoredEnemy,
    TongueOfSunAndMoon,
    AnimalCompanion,
    SummonFamiliar,
    TurnUndead,
}

/// One entry of a class feature table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feature {
    /// Stored verbatim, tagged with the level that granted it
    Text(String),
    Effect(FeatureEffect),
}

/// Skills touched by [`FeatureEffect::NatureSense`].
pub const NATURE_SENSE_SKILLS: [&str; 2] = ["Knowledge (nature)", "Survival"];

/// Creature types a ranger can pick as favored enemy.
pub const FAVORED_ENEMIES: &[&str] = &[
    "Aberration",
    "Humanoid (reptilian)",
    "Animal",
    "Magical beast",
    "Construct",
    "Monstrous humanoid",
    "Dragon",
    "Ooze",
    "Elemental",
    "Outsider (air)",
    "Fey",
    "Outsider (chaotic)",
    "Giant",
    "Outsider (earth)",
    "Outsider (evil)",
    "Dwarf",
    "Outsider (fire)",
    "Elf",
    "Outsider (good)",
    "Goblinoid",
    "Outsider (lawful)",
    "Gnoll",
    "Outsider (native)",
    "Gnome",
    "Outsider (water)",
    "Halfling",
    "Plant",
    "Human",
    "Undead",
    "Orc",
    "Vermin",
];

pub const UNCANNY_DODGE: &str = "Uncanny Dodge";
pub const LAY_ON_HANDS: &str = "Lay on Hands";
pub const SMITE_EVIL: &str = "Smite Evil";
pub const QUIVERING_PALM: &str = "Quivering Palm";

/// Unarmed strike damage. Monks scale with their final monk level,
/// everyone else uses the first row.
pub fn unarmed_damage(monk_level: Option<u32>, size: Size) -> &'static str {
    let row = match monk_level {
        None => ["1d2", "1d4", "1d6"],
        Some(1..=3) => ["1d4", "1d6", "1d8"],
        Some(4..=7) => ["1d6", "1d8", "2d6"],
        Some(8..=11) => ["1d8", "1d10", "2d8"],
        Some(12..=15) => ["1d10", "2d6", "3d6"],
        Some(16..=19) => ["2d6", "2d8", "3d8"],
        Some(_) => ["2d8", "2d10", "4d8"],
    };
    match size {
        Size::Small => row[0],
        Size::Medium => row[1],
        Size::Large => row[2],
    }
}

fn text(description: impl Into<String>) -> Feature {
    Feature::Text(description.into())
}

use FeatureEffect::*;

const fn effect(kind: FeatureEffect) -> Feature {
    Feature::Effect(kind)
}

/// Features `class` grants on reaching `class_level`.
///
/// `final_class_level` is the level the character ends generation at in
/// this class; descriptions that scale are written against it.
pub fn class_features(
    class: CharClass,
    class_level: u32,
    final_class_level: u32,
    size: Size,
) -> Vec<(&'static str, Feature)> {
    match class {
        CharClass::Barbarian => barbarian(class_level, final_class_level),
        CharClass::Bard => bard(class_level, final_class_level),
        CharClass::Cleric => match class_level {
            1 => vec![("Turn undead", effect(TurnUndead))],
            _ => vec![],
        },
        CharClass::Wizard | CharClass::Sorcerer => match class_level {
            1 => vec![
                ("Summon familiar", effect(SummonFamiliar)),
                ("Scribe scroll", text("Can create a scroll of any known spell")),
            ],
            _ => vec![],
        },
        CharClass::Druid => druid(class_level),
        CharClass::Monk => monk(class_level, final_class_level, size),
        CharClass::Paladin => paladin(class_level),
        CharClass::Ranger => ranger(class_level),
        CharClass::Rogue => rogue(class_level),
        CharClass::Adept => match class_level {
            2 => vec![("Summon familiar", effect(SummonFamiliar))],
            _ => vec![],
        },
        CharClass::Fighter
        | CharClass::Commoner
        | CharClass::Aristocrat
        | CharClass::Warrior
        | CharClass::Expert => vec![],
    }
}

fn barbarian(level: u32, final_level: u32) -> Vec<(&'static str, Feature)> {
    let hp = 2 * final_level;
    let rage = |tier: &str, per_day: u32| {
        (
            "Rage",
            text(match tier {
                "greater" => format!(
                    "Greater: +6 STR/CON, -2 AC, +3 WILL, +{} HP ({}/day)",
                    hp, per_day
                ),
                "tireless" => format!(
                    "Greater and tireless: +6 STR/CON, -2 AC, +3 WILL, +{} HP ({}/day)",
                    hp, per_day
                ),
                "mighty" => format!(
                    "Mighty and tireless: +8 STR/CON, -2 AC, +4 WILL, +{} HP ({}/day)",
                    hp, per_day
                ),
                _ => format!("+4 STR/CON, -2 AC, +2 WILL, +{} HP ({}/day)", hp, per_day),
            }),
        )
    };
    let trap_sense = ("Trap Sense", effect(TrapSense));
    let damage_reduction = ("Damage Reduction (-)", effect(DamageReduction));

    match level {
        1 => vec![
            ("Fast Movement", effect(FastMovement)),
            (
                "Illiteracy",
                text("Cannot read unless spends 2 points on a language"),
            ),
            rage("basic", 1),
        ],
        2 => vec![(
            UNCANNY_DODGE,
            text("Retains DEX bonus if caught Flat-footed"),
        )],
        4 => vec![rage("basic", 2)],
        5 => vec![("Imp. Uncanny Dodge", text("Cannot be flanked"))],
        8 => vec![rage("basic", 3)],
        11 => vec![rage("greater", 3)],
        12 => vec![rage("greater", 4), trap_sense],
        14 => vec![("Indomitable Will", effect(IndomitableWill))],
        16 => vec![damage_reduction, rage("greater", 5)],
        17 => vec![rage("tireless", 5)],
        20 => vec![rage("mighty", 6)],
        24 => vec![trap_sense, rage("mighty", 7)],
        28 => vec![damage_reduction, rage("mighty", 8)],
        34 => vec![rage("mighty", 9), damage_reduction],
        38 => vec![rage("mighty", 10)],
        3 | 6 | 9 | 15 | 18 | 21 | 27 | 30 | 33 | 36 | 39 => vec![trap_sense],
        7 | 10 | 13 | 19 | 22 | 25 | 31 | 37 | 40 => vec![damage_reduction],
        _ => vec![],
    }
}

fn bard(level: u32, final_level: u32) -> Vec<(&'static str, Feature)> {
    let courage = |bonus: u32| {
        (
            "Inspire Courage",
            text(format!("Gives allies +{} to saves and damage rolls", bonus)),
        )
    };
    match level {
        1 => vec![
            (
                "Bardic Music",
                text(format!("May play music ({} per day)", final_level)),
            ),
            (
                "Bardic Knowledge",
                text("May attempt lore checks to gain obscure information"),
            ),
            (
                "Countersong",
                text("Can use music or poetics to counter magical effects that depend on sound"),
            ),
            (
                "Fascinate",
                text("Can use music or poetics to cause one or more creatures to become fascinated with him"),
            ),
            courage(1),
        ],
        3 => vec![("Inspire Competence", text("+2 to ally skill checks"))],
        6 => vec![(
            "Suggestion",
            text("Influence the actions of the target creature by suggesting a course of activity (Perform vs. Will)"),
        )],
        8 => vec![courage(2)],
        9 => vec![(
            "Inspire Greatness",
            text("Give allies +2d10 HP, +2 to attack rolls, +1 fortitude save"),
        )],
        12 => vec![(
            "Song of Freedom",
            text("Free ally from enchantment (perform for 1 minute)"),
        )],
        14 => vec![courage(3)],
        15 => vec![("Inspire Heroics", text("Gives allies +4 AC and +4 to saves"))],
        18 => vec![("Mass Suggestion", text("Influence masses of people"))],
        20 => vec![courage(4)],
        26 => vec![courage(5)],
        32 => vec![courage(6)],
        38 => vec![courage(7)],
        _ => vec![],
    }
}

fn druid(level: u32) -> Vec<(&'static str, Feature)> {
    let wild = |s: &str| ("Wild Shape", text(s));
    let elemental = |s: &str| ("Elemental Shape", text(s));
    match level {
        1 => vec![
            ("Animal Companion", effect(AnimalCompanion)),
            ("Nature Sense", effect(NatureSense)),
            ("Wild Empathy", text("Charm animals")),
        ],
        2 => vec![("Woodland Stride", text("Move through natural obstacles"))],
        3 => vec![("Trackless Step", text("Leaves no trackable trails"))],
        4 => vec![("Resist Nature's Lure", effect(ResistNaturesLure))],
        5 => vec![wild("1/day (small, medium)")],
        6 => vec![wild("2/day (small, medium)")],
        7 => vec![wild("3/day (small, medium)")],
        8 => vec![wild("3/day (small, medium, large)")],
        9 => vec![("Venom Immunity", text("Immunity to all poisons"))],
        10 => vec![wild("4/day (small, medium, large)")],
        11 => vec![wild("4/day (tiny, small, medium, large)")],
        12 => vec![wild("4/day (plant, tiny, small, medium, large)")],
        13 => vec![("A Thousand Faces", text("Change appearance at will"))],
        14 => vec![wild("5/day (plant, tiny, small, medium, large)")],
        15 => vec![
            (
                "Timeless Body",
                text("Does not age, does not receive aging penalties"),
            ),
            wild("5/day (plant, tiny, small, medium, large, huge)"),
        ],
        16 => vec![elemental("1/day (small, medium, large)")],
        18 => vec![
            wild("6/day (plant, tiny, small, medium, large, huge)"),
            elemental("2/day (small, medium, large)"),
        ],
        20 => vec![elemental("3/day (small, medium, large, huge)")],
        22 => vec![
            wild("7/day (plant, tiny, small, medium, large, huge)"),
            elemental("4/day (small, medium, large, huge)"),
        ],
        26 => vec![
            wild("8/day (plant, tiny, small, medium, large, huge)"),
            elemental("5/day (small, medium, large, huge)"),
        ],
        30 => vec![
            wild("infinite (plant, tiny, small, medium, large, huge)"),
            elemental("infinite (small, medium, large, huge)"),
        ],
        _ => vec![],
    }
}

fn monk(level: u32, final_level: u32, size: Size) -> Vec<(&'static str, Feature)> {
    let slow_fall = |s: &str| ("Slow Fall", text(s));
    let ki = |s: &str| ("Ki Strike", text(s));
    let speed = ("Unarmored Speed Bonus", effect(UnarmoredSpeed));
    let ac = ("AC Bonus", effect(MonkAcBonus));
    match level {
        1 => vec![
            (
                "Flurry of Blows",
                text("If unarmored, gain one extra attack with highest BAB -2"),
            ),
            (
                "Unarmed Strike",
                text(format!(
                    "Fists do {} damage",
                    unarmed_damage(Some(final_level), size)
                )),
            ),
        ],
        2 => vec![(
            "Evasion",
            text("No damage from successful REF saves that would halve damage"),
        )],
        3 => vec![("Still Mind", effect(StillMind)), speed],
        4 => vec![ki("Fists +1 magic weapons"), slow_fall("20 ft.")],
        5 => vec![
            ("Purity of Body", text("Immunity to non-magical diseases")),
            ac,
            (
                "Flurry of Blows",
                text("If unarmored, gain one extra attack with highest BAB -1"),
            ),
        ],
        6 => vec![slow_fall("30 ft."), speed],
        7 => vec![(
            "Wholeness of Body",
            text(format!("Heal {} HP per day", final_level * 2)),
        )],
        8 => vec![slow_fall("40 ft.")],
        9 => vec![
            (
                "Improved Evasion",
                text("Take half damage from failed REF saves"),
            ),
            speed,
        ],
        10 => vec![ki("Fists +2 magic weapons"), slow_fall("50 ft."), ac],
        11 => vec![
            ("Diamond Body", text("Immunity to all poisons")),
            (
                "Flurry of Blows",
                text("Greater: If unarmored, gain two extra attacks with highest BAB"),
            ),
        ],
        12 => vec![
            (
                "Abundant Step",
                text(format!("1/day (teleport {} ft.)", 400 + final_level * 20)),
            ),
            slow_fall("60 ft."),
            speed,
        ],
        13 => vec![("Diamond Soul", effect(DiamondSoul))],
        14 => vec![slow_fall("70 ft.")],
        15 => vec![(QUIVERING_PALM, text("")), ac, speed],
        16 => vec![ki("Fists +3 magic weapons"), slow_fall("80 ft.")],
        17 => vec![
            ("Timeless Body", text("Does not age")),
            ("Tongue of the Sun and Moon", effect(TongueOfSunAndMoon)),
        ],
        18 => vec![slow_fall("90 ft."), speed],
        19 => vec![("Empty Body", text("Etherealness 1/day"))],
        20 => vec![
            ("Perfect Self", effect(PerfectSelf)),
            slow_fall("Any Distance"),
            ac,
        ],
        30 => vec![ac, speed],
        21 | 24 | 27 | 33 | 36 | 39 => vec![speed],
        25 | 35 | 40 => vec![ac],
        _ => vec![],
    }
}

fn paladin(level: u32) -> Vec<(&'static str, Feature)> {
    let smite = |s: &str| (SMITE_EVIL, text(s));
    let remove = |s: &str| ("Remove Disease", text(s));
    match level {
        1 => vec![
            (
                "Aura of Good",
                text("Detect presence of good (60 ft radius)"),
            ),
            ("Detect Evil", text("Detect evil at will (60 ft radius)")),
            smite("1/day"),
        ],
        2 => vec![("Divine Grace", effect(DivineGrace)), (LAY_ON_HANDS, text(""))],
        3 => vec![
            ("Aura of Courage", effect(AuraOfCourage)),
            ("Divine Health", text("Immunity to all types of diseases")),
        ],
        4 => vec![("Turn Undead", effect(TurnUndead))],
        5 => vec![smite("2/day"), ("Special Mount", text(""))],
        6 => vec![remove("1/week")],
        9 => vec![remove("2/week")],
        10 => vec![smite("3/day")],
        12 => vec![remove("3/week")],
        15 => vec![remove("4/week"), smite("4/day")],
        18 => vec![remove("5/week")],
        20 => vec![smite("5/day")],
        21 => vec![remove("6/week")],
        24 => vec![remove("7/week")],
        25 => vec![smite("6/day")],
        27 => vec![remove("8/week")],
        30 => vec![remove("9/week"), smite("6/day")],
        33 => vec![remove("10/week")],
        35 => vec![smite("7/day")],
        36 => vec![remove("11/week")],
        39 => vec![remove("12/week")],
        40 => vec![smite("8/day")],
        _ => vec![],
    }
}

fn ranger(level: u32) -> Vec<(&'static str, Feature)> {
    let favored = ("Favored Enemy", effect(FavoredEnemy));
    match level {
        1 => vec![
            favored,
            ("Track", text("May track by using survival skill")),
            ("Wild Empathy", text("Charm animals")),
        ],
        2 => vec![("Combat Style", text(""))],
        3 => vec![(
            "Endurance",
            text("+4 to checks involving non-lethal damage holding-breath. May sleep in medium armor."),
        )],
        4 => vec![("Animal Companion", effect(AnimalCompanion))],
        6 => vec![("Improved Combat Style", text(""))],
        7 => vec![("Woodland Stride", text("Move through natural obstacles"))],
        8 => vec![(
            "Swift Tracker",
            text("Can move normal speed while tracking"),
        )],
        9 => vec![(
            "Evasion",
            text("On succesful REF save that would halve damage, takes no damage"),
        )],
        11 => vec![("Combat Style Mastery", text(""))],
        13 => vec![(
            "Camouflage",
            text("Can hide in any sort of natural terrain"),
        )],
        17 => vec![(
            "Hide in Plain Sight",
            text("When in natural terrain, can use hide skill when observed"),
        )],
        5 | 10 | 15 | 20 | 25 | 30 | 35 | 40 => vec![favored],
        _ => vec![],
    }
}

fn rogue(level: u32) -> Vec<(&'static str, Feature)> {
    let sneak = ("Sneak Attack", effect(SneakAttack));
    let trap_sense = ("Trap Sense", effect(TrapSense));
    let special = ("Special Ability", text(""));
    match level {
        1 => vec![
            sneak,
            (
                "Trapfinding",
                text("Can use search skill to locate traps"),
            ),
        ],
        2 => vec![(
            "Evasion",
            text("On succesful REF save that would halve damage, takes no damage"),
        )],
        4 => vec![(
            UNCANNY_DODGE,
            text("Retains DEX bonus if caught Flat-footed"),
        )],
        8 => vec![("Imp. Uncanny Dodge", text("Cannot be flanked"))],
        10 => vec![(
            "Crippling Strike",
            text("Sneak attacks do 2 strength damage (heals 1 point per day)"),
        )],
        13 | 19 => vec![sneak, special],
        16 => vec![special],
        3 | 9 | 15 | 21 | 27 | 33 | 39 => vec![sneak, trap_sense],
        5 | 7 | 11 | 17 | 23 | 25 | 29 | 31 | 35 | 37 => vec![sneak],
        6 | 12 | 18 | 24 | 30 | 36 => vec![trap_sense],
        _ => vec![],
    }
}

pub(crate) fn validate_feature_tables() -> NpcGenResult<()> {
    for skill in NATURE_SENSE_SKILLS {
        super::ensure_known_skill(skill, "Nature Sense")?;
    }
    for (i, enemy) in FAVORED_ENEMIES.iter().enumerate() {
        if FAVORED_ENEMIES[..i].contains(enemy) {
            return Err(NpcGenError::RuleTable(format!(
                "favored enemy \"{}\" listed twice",
                enemy
            )));
        }
    }
    for class in CharClass::ALL {
        for level in 1..=crate::config::MAX_CHARACTER_LEVEL {
            let granted = class_features(*class, level, level, Size::Medium);
            for (i, (name, _)) in granted.iter().enumerate() {
                if granted[..i].iter().any(|(other, _)| other == name) {
                    return Err(NpcGenError::RuleTable(format!(
                        "{} level {} grants \"{}\" twice",
                        class, level, name
                    )));
                }
            }
        }
    }
    Ok(())
}
