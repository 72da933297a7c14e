//! Class specifications and class groupings.

use super::alignment_sets;
use super::races::AgeDice;
use super::tables::{save_tables, BabProgression, SaveTable};
use super::{Ability, Alignment, CharClass};
use crate::utils::dice_sizes::*;
use crate::{NpcGenError, NpcGenResult};

use Ability::*;

#[derive(Debug, Clone, Copy)]
pub struct ClassSpec {
    pub age: AgeDice,
    pub hit_die: i32,
    pub bab: BabProgression,
    pub saves: SaveTable,
    /// Abilities in the order the class values them
    pub priority: [Ability; 6],
    /// Base skill points per level before the intelligence modifier
    pub skill_mod: i32,
    pub restricted_alignments: &'static [Alignment],
    /// Classes this one cannot be combined with
    pub restricted_multi: &'static [CharClass],
    /// Class levels granting a bonus feat
    pub bonus_feat_levels: &'static [u32],
}

/// The eleven classes of the player's handbook.
pub const STANDARD_CLASSES: &[CharClass] = &[
    CharClass::Fighter,
    CharClass::Paladin,
    CharClass::Ranger,
    CharClass::Barbarian,
    CharClass::Monk,
    CharClass::Bard,
    CharClass::Rogue,
    CharClass::Wizard,
    CharClass::Sorcerer,
    CharClass::Druid,
    CharClass::Cleric,
];

/// NPC classes.
pub const CIVILIAN_CLASSES: &[CharClass] = &[
    CharClass::Commoner,
    CharClass::Aristocrat,
    CharClass::Expert,
    CharClass::Adept,
    CharClass::Warrior,
];

const FIGHTER_FEAT_LEVELS: &[u32] = &[
    1, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38, 40,
];
const EVERY_FOURTH_EPIC_LEVEL: &[u32] = &[24, 28, 32, 36, 40];
const EVERY_THIRD_EPIC_LEVEL: &[u32] = &[23, 26, 29, 32, 35, 38];
const WIZARD_FEAT_LEVELS: &[u32] = &[5, 10, 15, 20, 23, 26, 29, 32, 35, 38];
const MONK_FEAT_LEVELS: &[u32] = &[1, 2, 6, 25, 30, 35, 40];

impl CharClass {
    pub fn spec(self) -> &'static ClassSpec {
        match self {
            CharClass::Fighter => &FIGHTER,
            CharClass::Barbarian => &BARBARIAN,
            CharClass::Bard => &BARD,
            CharClass::Cleric => &CLERIC,
            CharClass::Druid => &DRUID,
            CharClass::Monk => &MONK,
            CharClass::Paladin => &PALADIN,
            CharClass::Ranger => &RANGER,
            CharClass::Sorcerer => &SORCERER,
            CharClass::Wizard => &WIZARD,
            CharClass::Rogue => &ROGUE,
            CharClass::Adept => &ADEPT,
            CharClass::Commoner => &COMMONER,
            CharClass::Aristocrat => &ARISTOCRAT,
            CharClass::Warrior => &WARRIOR,
            CharClass::Expert => &EXPERT,
        }
    }

    pub fn is_standard(self) -> bool {
        STANDARD_CLASSES.contains(&self)
    }

    pub fn is_civilian(self) -> bool {
        CIVILIAN_CLASSES.contains(&self)
    }

    /// Classes whose primary ability gates their spell levels.
    pub fn is_spellcaster(self) -> bool {
        matches!(
            self,
            CharClass::Sorcerer | CharClass::Wizard | CharClass::Adept | CharClass::Druid
        )
    }

    /// Classes expected to wear heavy armor.
    pub fn is_armor_user(self) -> bool {
        matches!(
            self,
            CharClass::Paladin | CharClass::Fighter | CharClass::Cleric | CharClass::Warrior
        )
    }

    pub fn allows_alignment(self, alignment: Alignment) -> bool {
        !self.spec().restricted_alignments.contains(&alignment)
    }

    /// Whether `other` may be taken as this class's second class.
    pub fn allows_multiclass_with(self, other: CharClass) -> bool {
        self != other
            && !self.spec().restricted_multi.contains(&other)
            && !other.spec().restricted_multi.contains(&self)
    }
}

static FIGHTER: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D10,
    bab: BabProgression::High,
    saves: save_tables::WARRIOR,
    priority: [Str, Con, Dex, Wis, Int, Cha],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: FIGHTER_FEAT_LEVELS,
};

static BARBARIAN: ClassSpec = ClassSpec {
    age: AgeDice::Simple,
    hit_die: D12,
    bab: BabProgression::High,
    saves: save_tables::WARRIOR,
    priority: [Str, Con, Dex, Wis, Int, Cha],
    skill_mod: 4,
    restricted_alignments: alignment_sets::LAWFUL,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_FOURTH_EPIC_LEVEL,
};

static BARD: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D6,
    bab: BabProgression::Medium,
    saves: save_tables::BARD,
    priority: [Cha, Dex, Int, Str, Con, Wis],
    skill_mod: 6,
    restricted_alignments: alignment_sets::LAWFUL,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_THIRD_EPIC_LEVEL,
};

static CLERIC: ClassSpec = ClassSpec {
    age: AgeDice::Complex,
    hit_die: D8,
    bab: BabProgression::Medium,
    saves: save_tables::DIVINE,
    priority: [Wis, Str, Con, Cha, Int, Dex],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_THIRD_EPIC_LEVEL,
};

static DRUID: ClassSpec = ClassSpec {
    age: AgeDice::Complex,
    hit_die: D8,
    bab: BabProgression::Medium,
    saves: save_tables::DIVINE,
    priority: [Wis, Cha, Con, Str, Int, Dex],
    skill_mod: 4,
    restricted_alignments: alignment_sets::NON_NEUTRAL,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_FOURTH_EPIC_LEVEL,
};

static MONK: ClassSpec = ClassSpec {
    age: AgeDice::Complex,
    hit_die: D8,
    bab: BabProgression::High,
    saves: save_tables::MONK,
    priority: [Str, Con, Dex, Wis, Int, Cha],
    skill_mod: 4,
    restricted_alignments: alignment_sets::NON_LAWFUL,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: MONK_FEAT_LEVELS,
};

static PALADIN: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D10,
    bab: BabProgression::High,
    saves: save_tables::WARRIOR,
    priority: [Str, Con, Cha, Wis, Int, Dex],
    skill_mod: 2,
    restricted_alignments: alignment_sets::NON_LAWFUL_GOOD,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_THIRD_EPIC_LEVEL,
};

static RANGER: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D10,
    bab: BabProgression::High,
    saves: save_tables::RANGER,
    priority: [Str, Dex, Con, Wis, Cha, Int],
    skill_mod: 6,
    restricted_alignments: &[],
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_THIRD_EPIC_LEVEL,
};

static SORCERER: ClassSpec = ClassSpec {
    age: AgeDice::Simple,
    hit_die: D4,
    bab: BabProgression::Low,
    saves: save_tables::ARCANE,
    priority: [Cha, Int, Dex, Con, Str, Wis],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: &[CharClass::Wizard],
    bonus_feat_levels: EVERY_THIRD_EPIC_LEVEL,
};

static WIZARD: ClassSpec = ClassSpec {
    age: AgeDice::Complex,
    hit_die: D4,
    bab: BabProgression::Low,
    saves: save_tables::ARCANE,
    priority: [Int, Dex, Con, Wis, Cha, Str],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: &[CharClass::Sorcerer],
    bonus_feat_levels: WIZARD_FEAT_LEVELS,
};

static ROGUE: ClassSpec = ClassSpec {
    age: AgeDice::Simple,
    hit_die: D6,
    bab: BabProgression::Medium,
    saves: save_tables::ROGUE,
    priority: [Dex, Int, Str, Cha, Con, Wis],
    skill_mod: 8,
    restricted_alignments: alignment_sets::LAWFUL,
    restricted_multi: CIVILIAN_CLASSES,
    bonus_feat_levels: EVERY_FOURTH_EPIC_LEVEL,
};

static ADEPT: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D8,
    bab: BabProgression::Medium,
    saves: save_tables::ARCANE,
    priority: [Wis, Str, Con, Cha, Int, Dex],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: STANDARD_CLASSES,
    bonus_feat_levels: &[],
};

static COMMONER: ClassSpec = ClassSpec {
    age: AgeDice::Simple,
    hit_die: D4,
    bab: BabProgression::Low,
    saves: save_tables::COMMONER,
    priority: [Wis, Str, Con, Cha, Int, Dex],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: STANDARD_CLASSES,
    bonus_feat_levels: &[],
};

static ARISTOCRAT: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D8,
    bab: BabProgression::Medium,
    saves: save_tables::ARCANE,
    priority: [Int, Cha, Wis, Con, Str, Dex],
    skill_mod: 4,
    restricted_alignments: &[],
    restricted_multi: STANDARD_CLASSES,
    bonus_feat_levels: &[],
};

static WARRIOR: ClassSpec = ClassSpec {
    age: AgeDice::Simple,
    hit_die: D8,
    bab: BabProgression::High,
    saves: save_tables::WARRIOR,
    priority: [Str, Con, Dex, Wis, Int, Cha],
    skill_mod: 2,
    restricted_alignments: &[],
    restricted_multi: STANDARD_CLASSES,
    bonus_feat_levels: &[],
};

static EXPERT: ClassSpec = ClassSpec {
    age: AgeDice::Moderate,
    hit_die: D6,
    bab: BabProgression::Medium,
    saves: save_tables::ARCANE,
    priority: [Int, Dex, Wis, Str, Cha, Con],
    skill_mod: 6,
    restricted_alignments: &[],
    restricted_multi: STANDARD_CLASSES,
    bonus_feat_levels: &[],
};

pub(crate) fn validate_class_tables() -> NpcGenResult<()> {
    for class in CharClass::ALL {
        let spec = class.spec();
        let mut priority = spec.priority.to_vec();
        priority.sort();
        priority.dedup();
        if priority.len() != Ability::ALL.len() {
            return Err(NpcGenError::RuleTable(format!(
                "class \"{}\" does not rank every ability exactly once",
                class
            )));
        }
        if spec
            .bonus_feat_levels
            .iter()
            .any(|l| *l == 0 || *l > crate::config::MAX_CHARACTER_LEVEL)
        {
            return Err(NpcGenError::RuleTable(format!(
                "class \"{}\" grants a bonus feat outside levels 1-{}",
                class,
                crate::config::MAX_CHARACTER_LEVEL
            )));
        }
        if !Alignment::ALL.iter().any(|a| class.allows_alignment(*a)) {
            return Err(NpcGenError::RuleTable(format!(
                "class \"{}\" restricts every alignment",
                class
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiclass_restrictions_are_symmetric() {
        assert!(!CharClass::Wizard.allows_multiclass_with(CharClass::Sorcerer));
        assert!(!CharClass::Sorcerer.allows_multiclass_with(CharClass::Wizard));
        assert!(!CharClass::Fighter.allows_multiclass_with(CharClass::Commoner));
        assert!(!CharClass::Commoner.allows_multiclass_with(CharClass::Fighter));
        assert!(!CharClass::Rogue.allows_multiclass_with(CharClass::Rogue));
        assert!(CharClass::Fighter.allows_multiclass_with(CharClass::Wizard));
        assert!(CharClass::Commoner.allows_multiclass_with(CharClass::Expert));
    }

    #[test]
    fn test_alignment_restrictions() {
        assert!(!CharClass::Paladin.allows_alignment(Alignment::NeutralGood));
        assert!(CharClass::Paladin.allows_alignment(Alignment::LawfulGood));
        assert!(!CharClass::Monk.allows_alignment(Alignment::ChaoticNeutral));
        assert!(!CharClass::Barbarian.allows_alignment(Alignment::LawfulEvil));
        assert!(CharClass::Druid.allows_alignment(Alignment::TrueNeutral));
        assert!(!CharClass::Druid.allows_alignment(Alignment::ChaoticEvil));
    }

    #[test]
    fn test_fighter_bonus_feats() {
        let levels = CharClass::Fighter.spec().bonus_feat_levels;
        assert_eq!(levels[0], 1);
        assert!(levels.contains(&2));
        assert!(levels.contains(&40));
        assert!(!levels.contains(&3));
    }

    #[test]
    fn test_groups() {
        assert!(CharClass::Adept.is_spellcaster());
        assert!(!CharClass::Cleric.is_spellcaster());
        assert!(CharClass::Warrior.is_armor_user());
        assert!(CharClass::Warrior.is_civilian());
        assert_eq!(STANDARD_CLASSES.len() + CIVILIAN_CLASSES.len(), CharClass::ALL.len());
    }
}
