//! Shared progression tables, aging adjustments, colour lists and languages.

use super::{AgeCategory, Ability, CharClass, Save};
use crate::utils::{dice_sizes, DiceRoll};
use serde::{Deserialize, Serialize};

/// A fixed adjustment per ability, used by races and age categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityAdjustments {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub wis: i32,
    pub int: i32,
    pub cha: i32,
}

impl AbilityAdjustments {
    pub const NONE: AbilityAdjustments = AbilityAdjustments::new(0, 0, 0, 0, 0, 0);

    pub const fn new(str: i32, dex: i32, con: i32, wis: i32, int: i32, cha: i32) -> Self {
        Self {
            str,
            dex,
            con,
            wis,
            int,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Wis => self.wis,
            Ability::Int => self.int,
            Ability::Cha => self.cha,
        }
    }
}

impl AgeCategory {
    /// Ability adjustments applied for reaching this age.
    pub fn ability_adjustments(self) -> AbilityAdjustments {
        match self {
            AgeCategory::Adult => AbilityAdjustments::NONE,
            AgeCategory::Middle => AbilityAdjustments::new(-1, -1, -1, 1, 1, 1),
            AgeCategory::Old => AbilityAdjustments::new(-3, -3, -3, 2, 2, 2),
            AgeCategory::Venerable => AbilityAdjustments::new(-6, -6, -6, 3, 3, 3),
        }
    }
}

/// Per-level base attack bonus increments for levels 1-20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BabProgression {
    High,
    Medium,
    Low,
}

const BAB_HIGH: [i32; 20] = [1; 20];
const BAB_MEDIUM: [i32; 20] = [0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1];
const BAB_LOW: [i32; 20] = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
const BAB_EPIC: [i32; 20] = [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0];

impl BabProgression {
    fn table(self) -> &'static [i32; 20] {
        match self {
            BabProgression::High => &BAB_HIGH,
            BabProgression::Medium => &BAB_MEDIUM,
            BabProgression::Low => &BAB_LOW,
        }
    }

    /// Increment gained at `level` (1-20). Levels outside that range gain 0.
    pub fn increment(self, level: u32) -> i32 {
        table_entry(self.table(), level)
    }
}

/// Base attack bonus increment shared by every class at epic `level` (21-40).
pub fn epic_bab_increment(level: u32) -> i32 {
    epic_entry(&BAB_EPIC, level)
}

/// Per-level saving throw increments for levels 1-20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveProgression {
    Primary,
    Secondary,
}

const SAVE_PRIMARY: [i32; 20] = [2, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
const SAVE_SECONDARY: [i32; 20] = [0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0];
const SAVE_EPIC: [i32; 20] = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1];

impl SaveProgression {
    pub fn increment(self, level: u32) -> i32 {
        match self {
            SaveProgression::Primary => table_entry(&SAVE_PRIMARY, level),
            SaveProgression::Secondary => table_entry(&SAVE_SECONDARY, level),
        }
    }
}

/// Save increment shared by every class and save at epic `level` (21-40).
pub fn epic_save_increment(level: u32) -> i32 {
    epic_entry(&SAVE_EPIC, level)
}

fn table_entry(table: &[i32; 20], level: u32) -> i32 {
    match level {
        1..=20 => table[(level - 1) as usize],
        _ => 0,
    }
}

fn epic_entry(table: &[i32; 20], level: u32) -> i32 {
    match level {
        21..=40 => table[(level - 21) as usize],
        _ => 0,
    }
}

/// Which saves a class treats as primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTable {
    pub fort: SaveProgression,
    pub reflex: SaveProgression,
    pub will: SaveProgression,
}

impl SaveTable {
    const fn new(fort: SaveProgression, reflex: SaveProgression, will: SaveProgression) -> Self {
        Self { fort, reflex, will }
    }

    pub fn progression(&self, save: Save) -> SaveProgression {
        match save {
            Save::Fort => self.fort,
            Save::Ref => self.reflex,
            Save::Will => self.will,
        }
    }
}

/// Named save tables.
pub mod save_tables {
    use super::SaveProgression::{Primary, Secondary};
    use super::SaveTable;

    pub const WARRIOR: SaveTable = SaveTable::new(Primary, Secondary, Secondary);
    pub const BARD: SaveTable = SaveTable::new(Secondary, Primary, Primary);
    pub const DIVINE: SaveTable = SaveTable::new(Primary, Secondary, Primary);
    pub const MONK: SaveTable = SaveTable::new(Primary, Primary, Primary);
    pub const RANGER: SaveTable = SaveTable::new(Primary, Primary, Secondary);
    pub const ROGUE: SaveTable = SaveTable::new(Secondary, Primary, Secondary);
    pub const ARCANE: SaveTable = SaveTable::new(Secondary, Secondary, Primary);
    pub const COMMONER: SaveTable = SaveTable::new(Secondary, Secondary, Secondary);
}

/// How a power type rolls ability scores and hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerSpec {
    /// Roll used for each ability score
    pub ability_roll: DiceRoll,
    /// Ability rolls below this value are rerolled
    pub reroll_at: i32,
    /// Lowest hit point dice dropped after level 1
    pub hp_drop: i32,
}

impl super::PowerType {
    pub fn spec(self) -> PowerSpec {
        use super::PowerType::*;
        match self {
            Weaker => PowerSpec {
                ability_roll: DiceRoll::new(dice_sizes::D8, 2, 1, 0, 0),
                reroll_at: 4,
                hp_drop: 0,
            },
            Normal => PowerSpec {
                ability_roll: DiceRoll::new(dice_sizes::D6, 4, 0, 0, 1),
                reroll_at: 4,
                hp_drop: 0,
            },
            Stronger => PowerSpec {
                ability_roll: DiceRoll::new(dice_sizes::D4, 3, 2, 0, 0),
                reroll_at: 4,
                hp_drop: 1,
            },
            Legendary => PowerSpec {
                ability_roll: DiceRoll::new(dice_sizes::D6, 6, 0, 0, 3),
                reroll_at: 10,
                hp_drop: 2,
            },
        }
    }
}

pub const DEFAULT_EYE_COLORS: &[&str] = &["green", "blue", "brown", "gray"];
pub const ELF_EYE_COLORS: &[&str] = &["green", "light green", "deep green", "blue", "emerald", "jade"];

pub const DEFAULT_HAIR_COLORS: &[&str] = &["black", "brown", "dark", "blonde", "red", "mixed", "grayish"];
pub const ELF_HAIR_COLORS: &[&str] = &["black", "brown", "dark", "mixed"];
pub const DARK_HAIR_COLORS: &[&str] = &["dark", "black", "dark grey", "dark brown"];
/// Hair drawn by old and venerable characters regardless of race.
pub const OLD_HAIR_COLORS: &[&str] = &["light gray", "white", "grayish", "white-gray"];

/// Every language with the script it is written in. An empty script means
/// the language has no written form.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("abyssal", "infernal"),
    ("aquan", "elven"),
    ("auran", "draconic"),
    ("celestial", "celestial"),
    ("common", "common"),
    ("draconic", "draconic"),
    ("druidic", "druidic"),
    ("dwarven", "dwarven"),
    ("elven", "elven"),
    ("giant", "dwarven"),
    ("gnome", "dwarven"),
    ("goblin", "dwarven"),
    ("gnoll", "common"),
    ("halfling", "common"),
    ("ignan", "draconic"),
    ("infernal", "infernal"),
    ("orc", "dwarven"),
    ("sylvan", "elven"),
    ("terran", "dwarven"),
    ("undercommon", "elven"),
    ("drow sign language", ""),
];

/// Script a language is written in, `None` for unknown languages.
pub fn script_for(language: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, script)| *script)
}

/// Bonus languages a class opens up.
pub fn class_languages(class: CharClass) -> &'static [&'static str] {
    match class {
        CharClass::Druid => &["druidic", "sylvan"],
        CharClass::Cleric => &["infernal", "abyssal", "celestial"],
        CharClass::Wizard => &["draconic"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_level_totals() {
        let total = |p: BabProgression| (1..=20).map(|l| p.increment(l)).sum::<i32>();
        assert_eq!(total(BabProgression::High), 20);
        assert_eq!(total(BabProgression::Medium), 15);
        assert_eq!(total(BabProgression::Low), 10);

        let primary: i32 = (1..=20).map(|l| SaveProgression::Primary.increment(l)).sum();
        let secondary: i32 = (1..=20).map(|l| SaveProgression::Secondary.increment(l)).sum();
        assert_eq!(primary, 12);
        assert_eq!(secondary, 6);
    }

    #[test]
    fn test_epic_tables_cover_level_forty() {
        assert_eq!(epic_bab_increment(21), 1);
        assert_eq!(epic_bab_increment(40), 0);
        assert_eq!(epic_save_increment(40), 1);
        assert_eq!(epic_bab_increment(20), 0);
        assert_eq!(epic_save_increment(41), 0);
        let epic_bab: i32 = (21..=40).map(epic_bab_increment).sum();
        assert_eq!(epic_bab, 10);
    }

    #[test]
    fn test_primary_save_starts_at_two() {
        assert_eq!(SaveProgression::Primary.increment(1), 2);
        assert_eq!(SaveProgression::Secondary.increment(1), 0);
        assert_eq!(save_tables::WARRIOR.progression(Save::Fort), SaveProgression::Primary);
        assert_eq!(save_tables::WARRIOR.progression(Save::Will), SaveProgression::Secondary);
    }

    #[test]
    fn test_scripts() {
        assert_eq!(script_for("giant"), Some("dwarven"));
        assert_eq!(script_for("drow sign language"), Some(""));
        assert_eq!(script_for("klingon"), None);
    }
}
