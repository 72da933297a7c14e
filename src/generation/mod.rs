//! # Generation Module
//!
//! Turns an initial configuration into a finished [`Character`].
//!
//! Everything random in a run flows from one seeded [`StdRng`] created by
//! [`utils::create_rng`], and all per-run mutable state lives in a
//! [`GenerationContext`] built fresh for each character. The builder drives
//! the level-up loop; the feat selector and the special-ability selector are
//! invoked once per level for the class being advanced.

pub mod builder;
pub mod feat_selector;
pub mod options;
pub mod progression;
pub mod special_abilities;

pub use builder::*;
pub use feat_selector::*;
pub use options::*;
pub use progression::*;
pub use special_abilities::*;

use crate::character::Character;
use crate::rules::{AgeCategory, Alignment, CharClass, Gender, LevelType, PowerType, Race};
use crate::{NpcGenError, NpcGenResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fully resolved initial choices for one character.
///
/// Every field is a concrete value; random answers are resolved beforehand
/// by [`CharacterOptions::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    pub gender: Gender,
    pub race: Race,
    pub alignment: Alignment,
    /// One class, or two for a multiclass character
    pub classes: Vec<CharClass>,
    pub age_category: AgeCategory,
    pub power: PowerType,
    /// Band the effective level is rolled in
    pub level_type: LevelType,
}

impl GenerationConfig {
    /// Creates a configuration for a human fighter adventurer.
    ///
    /// # Examples
    ///
    /// ```
    /// use npcgen::{CharClass, GenerationConfig};
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.classes, vec![CharClass::Fighter]);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            gender: Gender::Male,
            race: Race::Human,
            alignment: Alignment::TrueNeutral,
            classes: vec![CharClass::Fighter],
            age_category: AgeCategory::Adult,
            power: PowerType::Normal,
            level_type: LevelType::Adventurer,
        }
    }

    /// Creates a configuration for testing with low level characters.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            level_type: LevelType::Novice,
            ..Self::new(seed)
        }
    }

    pub fn is_multiclass(&self) -> bool {
        self.classes.len() == 2
    }

    /// Checks the choices against every race, alignment and class
    /// restriction of the rule tables.
    pub fn validate(&self) -> NpcGenResult<()> {
        if self.classes.is_empty() || self.classes.len() > 2 {
            return Err(NpcGenError::InvalidConfig(format!(
                "expected one or two classes, got {}",
                self.classes.len()
            )));
        }

        if !self.race.spec().allows_alignment(self.alignment) {
            return Err(NpcGenError::InvalidConfig(format!(
                "a {} cannot be {}",
                self.race, self.alignment
            )));
        }

        for class in &self.classes {
            if !class.allows_alignment(self.alignment) {
                return Err(NpcGenError::InvalidConfig(format!(
                    "a {} cannot be {}",
                    class, self.alignment
                )));
            }
        }

        if let [first, second] = self.classes[..] {
            if !first.allows_multiclass_with(second) {
                return Err(NpcGenError::InvalidConfig(format!(
                    "{} cannot be combined with {}",
                    first, second
                )));
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for generators.
///
/// Mirrors the shape of every generation system in the crate: generate from
/// a configuration and a seeded source, then validate the result.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> NpcGenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> NpcGenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// The level being applied by one level-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStep {
    /// Character level, from 1
    pub level: u32,
    pub class: CharClass,
    /// Index of `class` in the character's class list
    pub slot: usize,
    /// Level in `class` after this step
    pub class_level: u32,
    /// Level in `class` once generation ends
    pub final_class_level: u32,
}

/// State owned by one generation run.
///
/// Holds the character under construction, the run's random source and the
/// repeat counter of epic feats. Nothing survives the run.
pub struct GenerationContext<'a> {
    pub character: Character,
    pub rng: &'a mut StdRng,
    /// Attempts made to fill one feat slot
    pub feat_attempts: u32,
    epic_counter: BTreeMap<String, u32>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(character: Character, rng: &'a mut StdRng, feat_attempts: u32) -> Self {
        Self {
            character,
            rng,
            feat_attempts,
            epic_counter: BTreeMap::new(),
        }
    }

    /// Counts another take of the epic feat `name` and returns its ordinal.
    pub fn next_epic_ordinal(&mut self, name: &str) -> u32 {
        let count = self.epic_counter.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn into_character(self) -> Character {
        self.character
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Race;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(!config.is_multiclass());
        assert!(config.validate().is_ok());
        assert_eq!(GenerationConfig::for_testing(1).level_type, LevelType::Novice);
    }

    #[test]
    fn test_validate_rejects_race_alignment() {
        let config = GenerationConfig {
            race: Race::Drow,
            alignment: Alignment::NeutralGood,
            ..GenerationConfig::new(1)
        };
        assert!(matches!(
            config.validate(),
            Err(NpcGenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_class_alignment() {
        let config = GenerationConfig {
            classes: vec![CharClass::Paladin],
            alignment: Alignment::ChaoticGood,
            ..GenerationConfig::new(1)
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_multiclass() {
        let twice = GenerationConfig {
            classes: vec![CharClass::Wizard, CharClass::Wizard],
            ..GenerationConfig::new(1)
        };
        assert!(twice.validate().is_err());

        let civilian = GenerationConfig {
            classes: vec![CharClass::Fighter, CharClass::Commoner],
            ..GenerationConfig::new(1)
        };
        assert!(civilian.validate().is_err());

        let none = GenerationConfig {
            classes: vec![],
            ..GenerationConfig::new(1)
        };
        assert!(none.validate().is_err());

        let ok = GenerationConfig {
            classes: vec![CharClass::Fighter, CharClass::Wizard],
            ..GenerationConfig::new(1)
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_epic_ordinals_are_per_context() {
        let config = GenerationConfig::new(3);
        let mut rng = utils::create_rng(&config);
        let character = crate::character::Character::new(
            Race::Human,
            Gender::Male,
            Alignment::TrueNeutral,
            vec![CharClass::Fighter],
            AgeCategory::Adult,
            PowerType::Normal,
            LevelType::Epic,
        );
        let mut context = GenerationContext::new(character.clone(), &mut rng, 10);
        assert_eq!(context.next_epic_ordinal("Armor Skin"), 1);
        assert_eq!(context.next_epic_ordinal("Armor Skin"), 2);
        assert_eq!(context.next_epic_ordinal("Epic Toughness"), 1);
        drop(context);

        let mut context = GenerationContext::new(character, &mut rng, 10);
        assert_eq!(context.next_epic_ordinal("Armor Skin"), 1);
    }

    #[test]
    fn test_utils_rng_creation() {
        use rand::Rng;
        let config = GenerationConfig::new(12345);
        let a: u32 = utils::create_rng(&config).gen();
        let b: u32 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }
}
