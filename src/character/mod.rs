//! # Character
//!
//! The record a generation run fills in, plus the calculator that keeps its
//! derived fields consistent.
//!
//! A character is created with [`Character::new`] from the resolved
//! configuration, populated by the builder level by level, and handed to
//! rendering read-only once generation finishes. Every map is a `BTreeMap`
//! so a fixed seed always produces the same serialized record.

pub mod abilities;
pub mod derived;

pub use abilities::*;
pub use derived::*;

use crate::rules::{
    AgeCategory, Alignment, CharClass, Gender, LevelType, PowerType, Race, Save, SaveCategory,
    Size,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ranks and modifiers of one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillRanks {
    pub ranks: i32,
    pub ability_mod: i32,
    pub misc_mod: i32,
}

impl SkillRanks {
    pub fn total(&self) -> i32 {
        self.ranks + self.ability_mod + self.misc_mod
    }
}

/// One saving throw broken down into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavingThrow {
    /// Accumulated from the class and epic progressions
    pub base: i32,
    pub ability: i32,
    pub magic: i32,
    /// Racial and feat bonuses
    pub misc: i32,
    /// Charisma modifier when charisma applies to saves
    pub charisma: i32,
    pub total: i32,
}

/// Itemized armor class modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorModifiers {
    pub armor: i32,
    pub shield: i32,
    pub dex: i32,
    pub size: i32,
    pub natural: i32,
    pub deflect: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArmorClass {
    /// 10 plus the unarmored bonus
    pub base: i32,
    pub total: i32,
    pub touch: i32,
    pub flat_footed: i32,
    pub modifiers: ArmorModifiers,
}

/// Height and weight in both unit systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Physical {
    pub feet: i32,
    pub inches: i32,
    pub lbs: i32,
    pub cm: i32,
    pub kg: i32,
}

/// A class feature as recorded on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFeature {
    /// Level tag of text grants; `None` for entries written by a stateful
    /// feature, which are always rewritten
    pub level: Option<u32>,
    pub description: String,
}

/// The character under construction and, once generation ends, the
/// finished record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub race: Race,
    pub gender: Gender,
    pub alignment: Alignment,
    pub age: i32,
    pub age_category: AgeCategory,
    pub power: PowerType,
    pub level_type: LevelType,
    pub creature_type: String,
    pub vision: String,
    pub eyes: String,
    pub skin: String,
    pub hair: String,
    pub size: Size,
    /// Size the character wields items for; differs from `size` for races
    /// built like larger creatures
    pub size_for_items: Size,
    pub physical: Physical,

    /// One or two classes, in the order their levels are gained
    pub classes: Vec<CharClass>,
    /// Levels per class, parallel to `classes`
    pub levels: Vec<u32>,
    /// Rolled level including the racial level adjustment
    pub effective_level: u32,
    pub total_level: u32,
    /// Abilities from most to least important for this build
    pub priority_order: Vec<crate::rules::Ability>,

    pub abilities: AbilityScores,
    pub ability_mods: AbilityScores,
    /// Racial plus age adjustments applied to the rolled scores
    pub ability_adjustments: AbilityScores,

    pub hp: i32,
    pub bab: i32,
    /// Attack bonus per slot; `None` for slots the base attack bonus does not reach
    pub attacks: [Option<i32>; 4],
    pub attack_adjustment: i32,
    pub grapple_bonus: i32,
    pub grapple: i32,
    pub initiative_bonus: i32,
    pub initiative: i32,

    pub armor_class: ArmorClass,
    pub ac_unarmored_bonus: i32,
    /// Conditional dodge bonuses keyed by circumstance
    pub ac_special_bonuses: BTreeMap<String, i32>,
    pub wears_armor: bool,
    pub wisdom_to_ac: bool,

    pub saves: BTreeMap<Save, SavingThrow>,
    pub save_special_bonuses: BTreeMap<SaveCategory, BTreeMap<String, i32>>,
    pub charisma_to_saves: bool,

    pub speed_base: i32,
    pub speed_bonus: i32,
    pub unarmored_speed_bonus: i32,
    pub speed: i32,
    pub run_speed_multiplier: i32,

    /// Skill ranks bought per class slot, parallel to `classes`
    pub class_skill_ranks: Vec<BTreeMap<String, i32>>,
    /// Combined view over both class slots with modifiers applied
    pub skills: BTreeMap<String, SkillRanks>,

    pub race_feats: BTreeMap<String, String>,
    pub class_features: BTreeMap<String, ClassFeature>,
    pub feats: BTreeMap<String, String>,

    pub damage_reduction: BTreeMap<String, i32>,
    pub spell_resistance: i32,
    pub spell_penetration: i32,
    pub fast_healing: i32,
    pub sneak_attack: i32,

    pub languages: Vec<String>,
    pub scripts: Vec<String>,
    pub armor_proficiencies: Vec<String>,
    pub weapon_proficiencies: Vec<String>,
    pub has_shield_proficiency: bool,

    pub favored_enemies: Vec<String>,
    pub animal_companion_level: u32,
    pub familiar_level: u32,
    pub turn_undead_level: u32,
    pub unarmed_damage: Option<String>,
}

impl Character {
    /// Creates an empty record for the given choices.
    pub fn new(
        race: Race,
        gender: Gender,
        alignment: Alignment,
        classes: Vec<CharClass>,
        age_category: AgeCategory,
        power: PowerType,
        level_type: LevelType,
    ) -> Self {
        let size = race.spec().size;
        let slots = classes.len();
        Self {
            race,
            gender,
            alignment,
            age: 0,
            age_category,
            power,
            level_type,
            creature_type: String::new(),
            vision: String::new(),
            eyes: String::new(),
            skin: String::new(),
            hair: String::new(),
            size,
            size_for_items: size,
            physical: Physical::default(),
            levels: vec![0; slots],
            classes,
            effective_level: 0,
            total_level: 0,
            priority_order: Vec::new(),
            abilities: AbilityScores::default(),
            ability_mods: AbilityScores::default(),
            ability_adjustments: AbilityScores::default(),
            hp: 0,
            bab: 0,
            attacks: [Some(0), None, None, None],
            attack_adjustment: 0,
            grapple_bonus: 0,
            grapple: 0,
            initiative_bonus: 0,
            initiative: 0,
            armor_class: ArmorClass::default(),
            ac_unarmored_bonus: 0,
            ac_special_bonuses: BTreeMap::new(),
            wears_armor: false,
            wisdom_to_ac: false,
            saves: Save::ALL.iter().map(|s| (*s, SavingThrow::default())).collect(),
            save_special_bonuses: BTreeMap::new(),
            charisma_to_saves: false,
            speed_base: 0,
            speed_bonus: 0,
            unarmored_speed_bonus: 0,
            speed: 0,
            run_speed_multiplier: 4,
            class_skill_ranks: vec![BTreeMap::new(); slots],
            skills: crate::rules::SKILLS
                .iter()
                .map(|s| (s.name.to_string(), SkillRanks::default()))
                .collect(),
            race_feats: BTreeMap::new(),
            class_features: BTreeMap::new(),
            feats: BTreeMap::new(),
            damage_reduction: BTreeMap::new(),
            spell_resistance: 0,
            spell_penetration: 0,
            fast_healing: 0,
            sneak_attack: 0,
            languages: Vec::new(),
            scripts: Vec::new(),
            armor_proficiencies: Vec::new(),
            weapon_proficiencies: Vec::new(),
            has_shield_proficiency: false,
            favored_enemies: Vec::new(),
            animal_companion_level: 0,
            familiar_level: 0,
            turn_undead_level: 0,
            unarmed_damage: None,
        }
    }

    pub fn is_multiclass(&self) -> bool {
        self.classes.len() == 2
    }

    /// Levels recorded for `class`, 0 if the character does not have it.
    pub fn class_level(&self, class: CharClass) -> u32 {
        self.classes
            .iter()
            .position(|c| *c == class)
            .and_then(|i| self.levels.get(i).copied())
            .unwrap_or(0)
    }

    pub fn modifier(&self, ability: crate::rules::Ability) -> i32 {
        self.ability_mods.get(ability)
    }

    pub fn save(&self, save: Save) -> SavingThrow {
        self.saves.get(&save).copied().unwrap_or_default()
    }

    pub fn save_mut(&mut self, save: Save) -> &mut SavingThrow {
        self.saves.entry(save).or_default()
    }

    pub fn has_feat(&self, name: &str) -> bool {
        self.feats.contains_key(name)
    }

    pub fn has_class_feature(&self, name: &str) -> bool {
        self.class_features.contains_key(name)
    }

    pub fn skill_mut(&mut self, name: &str) -> &mut SkillRanks {
        self.skills.entry(name.to_string()).or_default()
    }

    /// Adds to a conditional save bonus and returns the new value.
    pub fn add_special_save(&mut self, category: SaveCategory, circumstance: &str, bonus: i32) -> i32 {
        let value = self
            .save_special_bonuses
            .entry(category)
            .or_default()
            .entry(circumstance.to_string())
            .or_insert(0);
        *value += bonus;
        *value
    }

    /// Adds to a conditional dodge bonus and returns the new value.
    pub fn add_special_armor(&mut self, circumstance: &str, bonus: i32) -> i32 {
        let value = self
            .ac_special_bonuses
            .entry(circumstance.to_string())
            .or_insert(0);
        *value += bonus;
        *value
    }

    /// Adds damage reduction of `kind` and returns the new value.
    pub fn add_damage_reduction(&mut self, kind: &str, amount: i32) -> i32 {
        let value = self.damage_reduction.entry(kind.to_string()).or_insert(0);
        *value += amount;
        *value
    }

    /// Records a text class feature granted at `level`.
    ///
    /// An existing text entry is only replaced by a grant of the same or a
    /// higher level. Returns whether the description was written.
    pub fn grant_class_feature_text(&mut self, name: &str, level: u32, description: &str) -> bool {
        match self.class_features.get(name) {
            Some(ClassFeature {
                level: Some(stored), ..
            }) if level < *stored => false,
            Some(ClassFeature { level: None, .. }) => false,
            _ => {
                self.class_features.insert(
                    name.to_string(),
                    ClassFeature {
                        level: Some(level),
                        description: description.to_string(),
                    },
                );
                true
            }
        }
    }

    /// Writes a class feature maintained by a stateful feature.
    pub fn set_class_feature(&mut self, name: &str, description: impl Into<String>) {
        self.class_features.insert(
            name.to_string(),
            ClassFeature {
                level: None,
                description: description.into(),
            },
        );
    }

    /// Class feature description, if granted.
    pub fn class_feature(&self, name: &str) -> Option<&str> {
        self.class_features.get(name).map(|f| f.description.as_str())
    }
}
