//! Partially specified character options.
//!
//! Any field left out is chosen at random, restricted the same way the
//! interactive menu restricts its choices.

use super::GenerationConfig;
use crate::rules::{
    AgeCategory, Alignment, CharClass, Gender, LevelType, PowerType, Race, CIVILIAN_CLASSES,
    STANDARD_CLASSES,
};
use crate::NpcGenResult;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Requested choices for one character. `None` means "random".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterOptions {
    pub gender: Option<Gender>,
    pub race: Option<Race>,
    pub alignment: Option<Alignment>,
    pub class: Option<CharClass>,
    /// Second class; implies a multiclass character
    pub second_class: Option<CharClass>,
    /// Whether to take a second class; random (1 in 4) when unset
    pub multiclass: Option<bool>,
    /// Draw the class from the NPC classes instead of the standard ones
    pub npc_classes: bool,
    pub age_category: Option<AgeCategory>,
    /// Roll the age category when none is given instead of using adult
    pub random_age: bool,
    pub power: Option<PowerType>,
    pub level_type: Option<LevelType>,
}

impl CharacterOptions {
    /// Loads options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> NpcGenResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fills every missing choice at random and validates the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use npcgen::{CharacterOptions, Race};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let options = CharacterOptions {
    ///     race: Some(Race::Drow),
    ///     ..CharacterOptions::default()
    /// };
    /// let mut rng = StdRng::seed_from_u64(3);
    /// let config = options.resolve(3, &mut rng).unwrap();
    /// assert_eq!(config.race, Race::Drow);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn resolve<R: Rng + ?Sized>(&self, seed: u64, rng: &mut R) -> NpcGenResult<GenerationConfig> {
        let gender = self.gender.unwrap_or_else(|| pick(Gender::ALL, rng, Gender::Male));
        let fixed: Vec<CharClass> = self.class.into_iter().chain(self.second_class).collect();
        let alignments_for = |race: Race| -> Vec<Alignment> {
            race.spec()
                .allowed_alignments()
                .into_iter()
                .filter(|a| self.alignment.map_or(true, |wanted| wanted == *a))
                .filter(|a| fixed.iter().all(|c| c.allows_alignment(*a)))
                .collect()
        };

        let race = match self.race {
            Some(race) => race,
            None => {
                let allowed: Vec<Race> = Race::ALL
                    .iter()
                    .copied()
                    .filter(|r| !alignments_for(*r).is_empty())
                    .collect();
                pick(&allowed, rng, Race::Human)
            }
        };
        let alignment = match self.alignment {
            Some(alignment) => alignment,
            None => pick(&alignments_for(race), rng, Alignment::TrueNeutral),
        };

        let pool = if self.npc_classes {
            CIVILIAN_CLASSES
        } else {
            STANDARD_CLASSES
        };
        let first = match self.class {
            Some(class) => class,
            None => {
                let allowed: Vec<CharClass> = pool
                    .iter()
                    .copied()
                    .filter(|c| c.allows_alignment(alignment))
                    .filter(|c| self.second_class.map_or(true, |second| c.allows_multiclass_with(second)))
                    .collect();
                pick(&allowed, rng, CharClass::Commoner)
            }
        };

        let mut classes = vec![first];
        let wants_second = match (self.second_class, self.multiclass) {
            (Some(_), _) => true,
            (None, Some(multiclass)) => multiclass,
            (None, None) => !self.npc_classes && rng.gen_ratio(1, 4),
        };
        if wants_second {
            let second = match self.second_class {
                Some(class) => Some(class),
                None => {
                    let allowed: Vec<CharClass> = STANDARD_CLASSES
                        .iter()
                        .copied()
                        .filter(|c| c.allows_alignment(alignment) && first.allows_multiclass_with(*c))
                        .collect();
                    allowed.choose(rng).copied()
                }
            };
            classes.extend(second);
        }

        let age_category = match self.age_category {
            Some(category) => category,
            None if self.random_age => pick(AgeCategory::ALL, rng, AgeCategory::Adult),
            None => AgeCategory::Adult,
        };
        let power = self.power.unwrap_or_else(|| pick(PowerType::ALL, rng, PowerType::Normal));
        let level_type = self
            .level_type
            .unwrap_or_else(|| pick(LevelType::ALL, rng, LevelType::Novice));

        let config = GenerationConfig {
            seed,
            gender,
            race,
            alignment,
            classes,
            age_category,
            power,
            level_type,
        };
        config.validate()?;
        debug!("Resolved options to {:?}", config);
        Ok(config)
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(values: &[T], rng: &mut R, fallback: T) -> T {
    values.choose(rng).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NpcGenError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_fixed_options_pass_through() {
        let options = CharacterOptions {
            gender: Some(Gender::Female),
            race: Some(Race::Dwarf),
            alignment: Some(Alignment::LawfulGood),
            class: Some(CharClass::Paladin),
            multiclass: Some(false),
            age_category: Some(AgeCategory::Old),
            power: Some(PowerType::Stronger),
            level_type: Some(LevelType::Master),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let config = options.resolve(9, &mut rng).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.classes, vec![CharClass::Paladin]);
        assert_eq!(config.age_category, AgeCategory::Old);
        assert_eq!(config.level_type, LevelType::Master);
    }

    #[test]
    fn test_random_options_respect_restrictions() {
        let mut rng = StdRng::seed_from_u64(2);
        for seed in 0..200 {
            let config = CharacterOptions::default().resolve(seed, &mut rng).unwrap();
            assert!(config.validate().is_ok());
            assert!(config.classes.iter().all(|c| c.is_standard()));
            assert_eq!(config.age_category, AgeCategory::Adult);
        }
    }

    #[test]
    fn test_npc_classes_stay_single() {
        let options = CharacterOptions {
            npc_classes: true,
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for seed in 0..50 {
            let config = options.resolve(seed, &mut rng).unwrap();
            assert_eq!(config.classes.len(), 1);
            assert!(config.classes[0].is_civilian());
        }
    }

    #[test]
    fn test_forced_multiclass() {
        let options = CharacterOptions {
            alignment: Some(Alignment::TrueNeutral),
            class: Some(CharClass::Wizard),
            multiclass: Some(true),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let config = options.resolve(4, &mut rng).unwrap();
        assert_eq!(config.classes.len(), 2);
        assert_ne!(config.classes[1], CharClass::Wizard);
    }

    #[test]
    fn test_random_alignment_fits_fixed_classes() {
        let paladin = CharacterOptions {
            class: Some(CharClass::Paladin),
            ..CharacterOptions::default()
        };
        let monk_fighter = CharacterOptions {
            class: Some(CharClass::Monk),
            second_class: Some(CharClass::Fighter),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        for seed in 0..100 {
            let config = paladin.resolve(seed, &mut rng).unwrap();
            assert_eq!(config.alignment, Alignment::LawfulGood);
            assert_eq!(config.classes[0], CharClass::Paladin);

            let config = monk_fighter.resolve(seed, &mut rng).unwrap();
            assert!(CharClass::Monk.allows_alignment(config.alignment));
            assert_eq!(config.classes, vec![CharClass::Monk, CharClass::Fighter]);
        }
    }

    #[test]
    fn test_random_first_class_fits_fixed_second_class() {
        let options = CharacterOptions {
            second_class: Some(CharClass::Wizard),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(8);
        for seed in 0..100 {
            let config = options.resolve(seed, &mut rng).unwrap();
            assert_eq!(config.classes[1], CharClass::Wizard);
            assert!(config.classes[0].allows_multiclass_with(CharClass::Wizard));
        }
    }

    #[test]
    fn test_unsatisfiable_class_and_race_are_rejected() {
        let options = CharacterOptions {
            race: Some(Race::Drow),
            class: Some(CharClass::Paladin),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            options.resolve(7, &mut rng),
            Err(NpcGenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_contradicting_options_are_rejected() {
        let options = CharacterOptions {
            race: Some(Race::Drow),
            alignment: Some(Alignment::LawfulGood),
            ..CharacterOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            options.resolve(5, &mut rng),
            Err(NpcGenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"race": "half-orc", "class": "barbarian", "level_type": "epic", "random_age": true}}"#
        )
        .unwrap();

        let options = CharacterOptions::from_json_file(file.path()).unwrap();
        assert_eq!(options.race, Some(Race::HalfOrc));
        assert_eq!(options.class, Some(CharClass::Barbarian));
        assert_eq!(options.level_type, Some(LevelType::Epic));
        assert!(options.random_age);
        assert_eq!(options.alignment, None);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"race\": \"dragon\"}}").unwrap();
        assert!(matches!(
            CharacterOptions::from_json_file(file.path()),
            Err(NpcGenError::Serde(_))
        ));
    }
}
