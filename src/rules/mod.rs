//! # Rule Tables
//!
//! Read-only D&D 3.5 data that parametrizes generation: the enumerated
//! domains every configuration is drawn from, and the race, class, skill,
//! feat, class-feature and spell tables keyed by them.
//!
//! Tables are plain statics. Nothing here is mutated during generation;
//! [`validate_rule_tables`] checks the cross references between them once
//! before the first character is built.

pub mod classes;
pub mod feats;
pub mod features;
pub mod races;
pub mod skills;
pub mod spells;
pub mod tables;

pub use classes::*;
pub use feats::*;
pub use features::*;
pub use races::*;
pub use skills::*;
pub use spells::*;
pub use tables::*;

use crate::{NpcGenError, NpcGenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed domain with stable lowercase names, `ALL`, `Display`
/// and a forgiving `FromStr` (case, `-` and `_` are ignored).
macro_rules! rule_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant
            ),+
        }

        impl $name {
            /// Every value, in table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stable name used in tables, sheets and the CLI.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = NpcGenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize_key(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| normalize_key(value.name()) == wanted)
                    .ok_or_else(|| NpcGenError::UnknownKey {
                        kind: stringify!($name),
                        key: s.to_string(),
                    })
            }
        }
    };
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

rule_enum! {
    /// The six ability scores, in sheet order.
    pub enum Ability {
        Str => "str",
        Dex => "dex",
        Con => "con",
        Wis => "wis",
        Int => "int",
        Cha => "cha",
    }
}

impl Ability {
    pub fn full_name(self) -> &'static str {
        match self {
            Ability::Str => "Strength",
            Ability::Dex => "Dexterity",
            Ability::Con => "Constitution",
            Ability::Wis => "Wisdom",
            Ability::Int => "Intelligence",
            Ability::Cha => "Charisma",
        }
    }
}

rule_enum! {
    /// Saving throws.
    pub enum Save {
        Fort => "fort",
        Ref => "ref",
        Will => "will",
    }
}

impl Save {
    /// The ability whose modifier feeds this save.
    pub fn key_ability(self) -> Ability {
        match self {
            Save::Fort => Ability::Con,
            Save::Ref => Ability::Dex,
            Save::Will => Ability::Wis,
        }
    }
}

rule_enum! {
    /// Groups of conditional save bonuses: one per save plus bonuses that
    /// apply to every save.
    pub enum SaveCategory {
        Fort => "fort",
        Ref => "ref",
        Will => "will",
        General => "general",
    }
}

rule_enum! {
    /// Creature size categories used by the playable races.
    pub enum Size {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

impl Size {
    pub fn armor_class_adjustment(self) -> i32 {
        match self {
            Size::Small => 1,
            Size::Medium => 0,
            Size::Large => -1,
        }
    }

    pub fn grapple_adjustment(self) -> i32 {
        match self {
            Size::Small => -4,
            Size::Medium => 0,
            Size::Large => 4,
        }
    }

    pub fn attack_adjustment(self) -> i32 {
        match self {
            Size::Small => 1,
            Size::Medium => 0,
            Size::Large => -1,
        }
    }
}

rule_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
    }
}

rule_enum! {
    /// The nine alignments, lawful to chaotic then good to evil.
    pub enum Alignment {
        LawfulGood => "lawful good",
        LawfulNeutral => "lawful neutral",
        LawfulEvil => "lawful evil",
        NeutralGood => "neutral good",
        TrueNeutral => "true neutral",
        NeutralEvil => "neutral evil",
        ChaoticGood => "chaotic good",
        ChaoticNeutral => "chaotic neutral",
        ChaoticEvil => "chaotic evil",
    }
}

/// Alignment subsets referenced by race and class restrictions.
pub mod alignment_sets {
    use super::Alignment::{self, *};

    pub const LAWFUL: &[Alignment] = &[LawfulGood, LawfulNeutral, LawfulEvil];
    pub const NON_NEUTRAL: &[Alignment] = &[LawfulGood, LawfulEvil, ChaoticGood, ChaoticEvil];
    pub const NON_LAWFUL: &[Alignment] = &[
        NeutralGood,
        TrueNeutral,
        NeutralEvil,
        ChaoticGood,
        ChaoticNeutral,
        ChaoticEvil,
    ];
    pub const NON_LAWFUL_GOOD: &[Alignment] = &[
        LawfulNeutral,
        LawfulEvil,
        NeutralGood,
        TrueNeutral,
        NeutralEvil,
        ChaoticGood,
        ChaoticNeutral,
        ChaoticEvil,
    ];
    pub const EVIL: &[Alignment] = &[LawfulEvil, NeutralEvil, ChaoticEvil];
    pub const NEUTRAL: &[Alignment] = &[LawfulNeutral, TrueNeutral, ChaoticNeutral];
    pub const GOOD: &[Alignment] = &[LawfulGood, NeutralGood, ChaoticGood];
    pub const GOOD_OR_NEUTRAL: &[Alignment] = &[
        LawfulGood,
        NeutralGood,
        ChaoticGood,
        LawfulNeutral,
        TrueNeutral,
        ChaoticNeutral,
    ];
    /// Everything except chaotic evil.
    pub const NOT_CHAOTIC_EVIL: &[Alignment] = &[
        LawfulGood,
        LawfulNeutral,
        LawfulEvil,
        NeutralGood,
        TrueNeutral,
        NeutralEvil,
        ChaoticGood,
        ChaoticNeutral,
    ];
    pub const GOOD_LAWFUL_NEUTRAL_OR_TRUE_NEUTRAL: &[Alignment] = &[
        LawfulGood,
        NeutralGood,
        ChaoticGood,
        LawfulNeutral,
        TrueNeutral,
    ];
    pub const LAWFUL_OR_GOOD: &[Alignment] = &[
        LawfulGood,
        LawfulNeutral,
        LawfulEvil,
        NeutralGood,
        ChaoticGood,
    ];
}

rule_enum! {
    /// Age categories; each carries ability adjustments.
    pub enum AgeCategory {
        Adult => "adult",
        Middle => "middle",
        Old => "old",
        Venerable => "venerable",
    }
}

rule_enum! {
    /// How strong the character is rolled.
    pub enum PowerType {
        Weaker => "weaker",
        Normal => "normal",
        Stronger => "stronger",
        Legendary => "legendary",
    }
}

rule_enum! {
    /// Bands the character's effective level is rolled in.
    pub enum LevelType {
        Novice => "novice",
        Adventurer => "adventurer",
        Master => "master",
        Champion => "champion",
        Epic => "epic",
        DemiGod => "demi-god",
    }
}

impl LevelType {
    /// Inclusive effective-level range of the band.
    pub fn range(self) -> (u32, u32) {
        match self {
            LevelType::Novice => (1, 5),
            LevelType::Adventurer => (6, 9),
            LevelType::Master => (10, 14),
            LevelType::Champion => (15, 20),
            LevelType::Epic => (21, 30),
            LevelType::DemiGod => (31, 40),
        }
    }
}

rule_enum! {
    pub enum Race {
        Human => "human",
        Elf => "elf",
        HalfElf => "half-elf",
        Halfling => "halfling",
        Gnome => "gnome",
        Dwarf => "dwarf",
        HalfOrc => "half-orc",
        Drow => "drow",
        Duergar => "duergar",
        Svirfneblin => "svirfneblin",
        HalfOgre => "half-ogre",
        Orc => "orc",
        Ogre => "ogre",
    }
}

rule_enum! {
    /// Standard classes followed by the NPC classes.
    pub enum CharClass {
        Fighter => "fighter",
        Paladin => "paladin",
        Ranger => "ranger",
        Barbarian => "barbarian",
        Monk => "monk",
        Bard => "bard",
        Rogue => "rogue",
        Wizard => "wizard",
        Sorcerer => "sorcerer",
        Druid => "druid",
        Cleric => "cleric",
        Adept => "adept",
        Commoner => "commoner",
        Aristocrat => "aristocrat",
        Warrior => "warrior",
        Expert => "expert",
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

impl Default for AgeCategory {
    fn default() -> Self {
        AgeCategory::Adult
    }
}

impl Default for PowerType {
    fn default() -> Self {
        PowerType::Normal
    }
}

impl Default for LevelType {
    fn default() -> Self {
        LevelType::Novice
    }
}

/// Checks every cross reference between the tables.
///
/// Run once before generation; a failure is an authoring mistake in the
/// tables, not something a configuration can cause.
pub fn validate_rule_tables() -> NpcGenResult<()> {
    skills::validate_skill_tables()?;
    races::validate_race_tables()?;
    classes::validate_class_tables()?;
    feats::validate_feat_catalogs()?;
    features::validate_feature_tables()?;
    Ok(())
}

pub(crate) fn ensure_known_skill(name: &str, context: &str) -> NpcGenResult<()> {
    if skills::skill_spec(name).is_none() {
        return Err(NpcGenError::RuleTable(format!(
            "unknown skill \"{}\" in {}",
            name, context
        )));
    }
    Ok(())
}
