//! Spells per day and spells known by class level.
//!
//! Rows cover class levels 1 to 20; higher class levels read the level 20
//! column.

use super::CharClass;
use serde::{Deserialize, Serialize};

/// One spell level of a progression, starting at class level `starts_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellRow {
    pub spell_level: u32,
    pub starts_at: u32,
    pub counts: &'static [u32],
}

const fn row(spell_level: u32, starts_at: u32, counts: &'static [u32]) -> SpellRow {
    SpellRow {
        spell_level,
        starts_at,
        counts,
    }
}

impl SpellRow {
    fn count(&self, class_level: u32) -> Option<u32> {
        let level = class_level.min(20);
        if level < self.starts_at {
            return None;
        }
        self.counts.get((level - self.starts_at) as usize).copied()
    }
}

const CLERIC_BASE: &[u32] = &[1, 2, 2, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5];
const SORCERER_BASE: &[u32] = &[3, 4, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6];

const ADEPT_PER_DAY: &[SpellRow] = &[
    row(0, 1, &[3; 20]),
    row(1, 1, &[1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3]),
    row(2, 4, &[0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3]),
    row(3, 8, &[0, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3]),
    row(4, 12, &[0, 1, 1, 2, 2, 2, 2, 3, 3]),
    row(5, 16, &[0, 1, 1, 2, 2]),
];

const BARD_PER_DAY: &[SpellRow] = &[
    row(0, 1, &[2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4]),
    row(1, 2, &[0, 1, 2, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4]),
    row(2, 4, &[0, 1, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4]),
    row(3, 7, &[0, 1, 2, 2, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4]),
    row(4, 10, &[0, 1, 2, 2, 3, 3, 3, 3, 4, 4, 4]),
    row(5, 13, &[0, 1, 2, 2, 3, 3, 4, 4]),
    row(6, 16, &[0, 1, 2, 3, 4]),
];

/// Shared by rangers and paladins.
const RANGER_PER_DAY: &[SpellRow] = &[
    row(0, 4, &[0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3]),
    row(1, 8, &[0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 3, 3]),
    row(2, 11, &[0, 1, 1, 1, 1, 1, 2, 2, 3, 3]),
    row(3, 14, &[0, 1, 1, 1, 1, 2, 3]),
];

/// Shared by clerics and druids.
const CLERIC_PER_DAY: &[SpellRow] = &[
    row(0, 1, &[3, 4, 4, 5, 5, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6]),
    row(1, 1, CLERIC_BASE),
    row(2, 3, CLERIC_BASE),
    row(3, 5, CLERIC_BASE),
    row(4, 7, CLERIC_BASE),
    row(5, 9, CLERIC_BASE),
    row(6, 11, CLERIC_BASE),
    row(7, 13, CLERIC_BASE),
    row(8, 15, CLERIC_BASE),
    row(9, 17, &[1, 2, 3, 4]),
];

const WIZARD_PER_DAY: &[SpellRow] = &[
    row(0, 1, &[3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
    row(1, 1, CLERIC_BASE),
    row(2, 3, CLERIC_BASE),
    row(3, 5, CLERIC_BASE),
    row(4, 7, CLERIC_BASE),
    row(5, 9, CLERIC_BASE),
    row(6, 11, CLERIC_BASE),
    row(7, 13, CLERIC_BASE),
    row(8, 15, CLERIC_BASE),
    row(9, 17, &[1, 2, 3, 4]),
];

const SORCERER_PER_DAY: &[SpellRow] = &[
    row(0, 1, &[5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6]),
    row(1, 1, SORCERER_BASE),
    row(2, 4, SORCERER_BASE),
    row(3, 6, SORCERER_BASE),
    row(4, 8, SORCERER_BASE),
    row(5, 10, SORCERER_BASE),
    row(6, 12, SORCERER_BASE),
    row(7, 14, SORCERER_BASE),
    row(8, 16, SORCERER_BASE),
    row(9, 18, &[3, 4, 6]),
];

const BARD_KNOWN: &[SpellRow] = &[
    row(0, 1, &[4, 5, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6]),
    row(1, 2, &[2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5]),
    row(2, 4, &[2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 5, 5, 5, 5]),
    row(3, 7, &[2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 5, 5, 5]),
    row(4, 10, &[2, 3, 3, 4, 4, 4, 4, 4, 4, 5, 5]),
    row(5, 13, &[2, 3, 3, 4, 4, 4, 5, 5]),
    row(6, 16, &[2, 3, 3, 4, 4]),
];

const SORCERER_KNOWN: &[SpellRow] = &[
    row(0, 1, &[4, 5, 6, 6, 7, 7, 8, 8, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9]),
    row(1, 1, &[2, 2, 3, 3, 4, 4, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5]),
    row(2, 4, &[1, 2, 2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
    row(3, 6, &[1, 2, 2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4]),
    row(4, 8, &[1, 2, 2, 3, 3, 4, 4, 4, 4, 4, 4, 4, 4]),
    row(5, 10, &[1, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3]),
    row(6, 12, &[1, 2, 2, 3, 3, 3, 3, 3, 3]),
    row(7, 14, &[1, 2, 2, 3, 3, 3, 3]),
    row(8, 16, &[1, 2, 2, 3, 3]),
    row(9, 18, &[1, 2, 3]),
];

fn per_day_table(class: CharClass) -> &'static [SpellRow] {
    match class {
        CharClass::Adept => ADEPT_PER_DAY,
        CharClass::Bard => BARD_PER_DAY,
        CharClass::Ranger | CharClass::Paladin => RANGER_PER_DAY,
        CharClass::Cleric | CharClass::Druid => CLERIC_PER_DAY,
        CharClass::Wizard => WIZARD_PER_DAY,
        CharClass::Sorcerer => SORCERER_PER_DAY,
        _ => &[],
    }
}

fn known_table(class: CharClass) -> &'static [SpellRow] {
    match class {
        CharClass::Bard => BARD_KNOWN,
        CharClass::Sorcerer => SORCERER_KNOWN,
        _ => &[],
    }
}

fn lookup(table: &[SpellRow], spell_level: u32, class_level: u32) -> Option<u32> {
    table
        .iter()
        .find(|r| r.spell_level == spell_level)
        .and_then(|r| r.count(class_level))
}

/// Spells of `spell_level` castable per day, `None` before the class
/// reaches that spell level.
pub fn spells_per_day(class: CharClass, spell_level: u32, class_level: u32) -> Option<u32> {
    lookup(per_day_table(class), spell_level, class_level)
}

/// Spells of `spell_level` known, for the spontaneous casters.
pub fn spells_known(class: CharClass, spell_level: u32, class_level: u32) -> Option<u32> {
    lookup(known_table(class), spell_level, class_level)
}

/// True when the class has any spell progression at all.
pub fn casts_spells(class: CharClass) -> bool {
    !per_day_table(class).is_empty()
}

/// Castable and known counts for one spell level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub spell_level: u32,
    pub per_day: u32,
    pub known: Option<u32>,
}

/// Every spell level the class can cast at `class_level`, lowest first.
pub fn spell_slots(class: CharClass, class_level: u32) -> Vec<SpellSlots> {
    per_day_table(class)
        .iter()
        .filter_map(|r| {
            r.count(class_level).map(|per_day| SpellSlots {
                spell_level: r.spell_level,
                per_day,
                known: spells_known(class, r.spell_level, class_level),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_rows() {
        assert_eq!(spells_per_day(CharClass::Cleric, 2, 2), None);
        assert_eq!(spells_per_day(CharClass::Cleric, 2, 3), Some(1));
        assert_eq!(spells_per_day(CharClass::Cleric, 2, 20), Some(5));
        assert_eq!(spells_per_day(CharClass::Wizard, 9, 17), Some(1));
        assert_eq!(spells_per_day(CharClass::Sorcerer, 2, 3), None);
        assert_eq!(spells_per_day(CharClass::Sorcerer, 2, 4), Some(3));
        assert_eq!(spells_per_day(CharClass::Sorcerer, 9, 20), Some(6));
    }

    #[test]
    fn test_shared_progressions() {
        for level in 1..=20 {
            assert_eq!(
                spell_slots(CharClass::Paladin, level),
                spell_slots(CharClass::Ranger, level)
            );
            assert_eq!(
                spells_per_day(CharClass::Druid, 1, level),
                spells_per_day(CharClass::Cleric, 1, level)
            );
        }
    }

    #[test]
    fn test_epic_levels_use_level_twenty() {
        assert_eq!(
            spell_slots(CharClass::Bard, 34),
            spell_slots(CharClass::Bard, 20)
        );
        assert_eq!(spells_known(CharClass::Sorcerer, 9, 40), Some(3));
    }

    #[test]
    fn test_non_casters() {
        assert!(!casts_spells(CharClass::Fighter));
        assert!(spell_slots(CharClass::Rogue, 10).is_empty());
        assert!(casts_spells(CharClass::Adept));
    }

    #[test]
    fn test_ranger_first_spells_at_four() {
        assert!(spell_slots(CharClass::Ranger, 3).is_empty());
        let slots = spell_slots(CharClass::Ranger, 4);
        assert_eq!(
            slots,
            vec![SpellSlots {
                spell_level: 0,
                per_day: 0,
                known: None
            }]
        );
    }

    #[test]
    fn test_known_counts() {
        let slots = spell_slots(CharClass::Sorcerer, 1);
        assert_eq!(slots[0].known, Some(4));
        assert_eq!(slots[1].known, Some(2));
        assert_eq!(spells_known(CharClass::Wizard, 1, 5), None);
    }
}
