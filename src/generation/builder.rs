//! # Character Builder
//!
//! Drives a full generation run: level totals, age, physique, appearance,
//! ability scores, racial traits and languages, then one level-up step per
//! character level and a final pass of the derived-stat calculator.

use super::{
    level_up, priority_order, split_levels, GenerationConfig, GenerationContext, Generator,
};
use crate::character::{Character, Physical};
use crate::config;
use crate::rules::{
    class_languages, script_for, validate_rule_tables, AgeCategory, Save, OLD_HAIR_COLORS,
};
use crate::utils::{dice_sizes, roll_dice};
use crate::{NpcGenError, NpcGenResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Builds complete characters from a [`GenerationConfig`].
///
/// # Examples
///
/// ```
/// use npcgen::generation::utils;
/// use npcgen::{CharacterBuilder, GenerationConfig, Generator};
///
/// let config = GenerationConfig::for_testing(11);
/// let mut rng = utils::create_rng(&config);
/// let character = CharacterBuilder::new().generate(&config, &mut rng).unwrap();
/// assert_eq!(character.bab, character.total_level as i32);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterBuilder {
    /// Attempts made to fill one feat slot before it is skipped
    pub feat_attempts: u32,
}

impl CharacterBuilder {
    pub fn new() -> Self {
        Self {
            feat_attempts: config::DEFAULT_FEAT_PICK_ATTEMPTS,
        }
    }

    /// Creates a builder that gives up on feat slots quickly.
    pub fn for_testing() -> Self {
        Self { feat_attempts: 20 }
    }

    pub fn with_feat_attempts(mut self, attempts: u32) -> Self {
        self.feat_attempts = attempts;
        self
    }

    /// Rolls the effective level and derives the number of class levels.
    fn roll_levels(&self, character: &mut Character, rng: &mut StdRng) {
        let (low, high) = character.level_type.range();
        let adjustment = character.race.spec().level_adjustment;
        let effective = rng.gen_range(low..=high);

        let minimum = if character.is_multiclass() { 2 } else { 1 };
        let total = effective.saturating_sub(adjustment).max(minimum);

        character.total_level = total;
        character.effective_level = total + adjustment;
        character.levels = split_levels(total, character.classes.len(), rng);
        character.priority_order = priority_order(&character.classes, &character.levels);
    }

    fn roll_age(&self, character: &mut Character, rng: &mut StdRng) {
        let race = character.race.spec();
        let rolls: Vec<i32> = character
            .classes
            .iter()
            .map(|class| race.age_dice(class.spec().age).roll(rng))
            .collect();
        let highest = rolls.iter().copied().max().unwrap_or(0);
        let lowest = rolls.iter().copied().min().unwrap_or(0);

        let divider = roll_dice(rng, dice_sizes::D6, 1, 0, 3, 0).max(1);
        let mut modifier = character.total_level as i32 / divider;
        modifier += if character.is_multiclass() {
            highest + lowest / 2
        } else {
            highest
        };

        let mut age = race.age_threshold(character.age_category) + modifier;
        if character.age_category == AgeCategory::Adult && age > race.middle {
            age = race.middle - race.middle / 15;
        }
        character.age = age;
    }

    fn roll_physical(&self, character: &mut Character, rng: &mut StdRng) {
        let race = character.race.spec();
        let physique = race.physique(character.gender);
        let extra = physique.height_dice.roll(rng);
        let weight_per_inch = physique.weight_dice.roll(rng);

        let mut feet = physique.base_feet + extra / 12;
        let mut inches = physique.base_inches + extra % 12;
        if inches >= 12 {
            feet += inches / 12;
            inches %= 12;
        }
        let lbs = physique.base_weight + extra * weight_per_inch;

        character.physical = Physical {
            feet,
            inches,
            lbs,
            cm: (inches as f64 * 2.54 + feet as f64 * 30.48) as i32,
            kg: (lbs as f64 * 0.45) as i32,
        };
        character.size = race.size;
        character.size_for_items = race.traits.size_for_items.unwrap_or(race.size);
        character.attack_adjustment = race.size.attack_adjustment();
    }

    fn roll_appearance(&self, character: &mut Character, rng: &mut StdRng) {
        let race = character.race.spec();
        let hair = match character.age_category {
            AgeCategory::Old | AgeCategory::Venerable => OLD_HAIR_COLORS,
            _ => race.hair,
        };
        let mut pick = |values: &[&str]| values.choose(&mut *rng).map(|v| v.to_string()).unwrap_or_default();
        character.eyes = pick(race.eyes);
        character.skin = pick(race.skin);
        character.hair = pick(hair);
    }

    /// Rolls six scores and assigns them, highest first, along the
    /// character's priority order.
    fn roll_abilities(&self, character: &mut Character, rng: &mut StdRng) -> NpcGenResult<()> {
        let power = character.power.spec();
        if power.ability_roll.max() < power.reroll_at {
            return Err(NpcGenError::GenerationFailed(format!(
                "{} ability rolls can never reach {}",
                character.power, power.reroll_at
            )));
        }

        let mut rolls: Vec<i32> = (0..character.priority_order.len())
            .map(|_| loop {
                let roll = power.ability_roll.roll(rng);
                if roll >= power.reroll_at {
                    break roll;
                }
            })
            .collect();
        rolls.sort_unstable_by(|a, b| b.cmp(a));

        let racial = character.race.spec().ability_adjustments;
        let aging = character.age_category.ability_adjustments();
        let floor = config::ABILITY_SCORE_FLOOR;
        for (ability, roll) in character.priority_order.clone().into_iter().zip(rolls) {
            let adjustment = racial.get(ability) + aging.get(ability);
            character.ability_adjustments.set(ability, adjustment);
            character
                .abilities
                .set(ability, (roll.max(floor) + adjustment).max(floor));
        }
        character.update_ability_modifiers(0);
        debug!("Rolled abilities {:?}", character.abilities);
        Ok(())
    }

    /// Applies the race's one-time traits.
    fn apply_racial_traits(&self, character: &mut Character) {
        let race = character.race.spec();
        let traits = &race.traits;

        character.creature_type = race.creature_type.to_string();
        character.speed_base = race.speed;
        character.vision = traits.vision.to_string();
        character.race_feats = traits
            .racial_feats
            .iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect();

        if traits.spell_resistance > 0 {
            character.spell_resistance = traits.spell_resistance + character.total_level as i32;
        }
        character.bab += traits.bab;

        for (skill, bonus) in traits.skill_bonus {
            character.skill_mut(skill).misc_mod += bonus;
        }
        character.save_mut(Save::Fort).misc += traits.saves.fort;
        character.save_mut(Save::Ref).misc += traits.saves.reflex;
        character.save_mut(Save::Will).misc += traits.saves.will;
        for (category, circumstance, bonus) in traits.special_saves {
            character.add_special_save(*category, circumstance, *bonus);
        }
        for (circumstance, bonus) in traits.special_armor {
            character.add_special_armor(circumstance, *bonus);
        }

        character.armor_class.modifiers.natural += traits.natural_armor;
        character.grapple_bonus = traits.grapple;
    }

    /// Picks bonus languages up to the intelligence modifier.
    fn choose_languages(&self, character: &mut Character, rng: &mut StdRng) {
        let race = character.race.spec();
        let known: Vec<&str> = race.languages.to_vec();

        let mut candidates: BTreeSet<&str> = race.bonus_languages.iter().copied().collect();
        for class in &character.classes {
            candidates.extend(class_languages(*class).iter().copied());
        }
        let candidates: Vec<&str> = candidates
            .into_iter()
            .filter(|language| !known.contains(language))
            .collect();

        let count = (character.ability_mods.int.max(0) as usize).min(candidates.len());
        let mut languages: Vec<String> = candidates
            .choose_multiple(rng, count)
            .chain(known.iter())
            .map(|language| language.to_string())
            .collect();
        languages.sort();
        languages.dedup();

        let scripts: BTreeSet<&str> = languages
            .iter()
            .filter_map(|language| script_for(language))
            .filter(|script| !script.is_empty())
            .collect();
        character.scripts = scripts.into_iter().map(String::from).collect();
        character.languages = languages;
    }
}

impl Generator<Character> for CharacterBuilder {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> NpcGenResult<Character> {
        validate_rule_tables()?;
        config.validate()?;

        let mut character = Character::new(
            config.race,
            config.gender,
            config.alignment,
            config.classes.clone(),
            config.age_category,
            config.power,
            config.level_type,
        );

        // Creation-time rolls
        self.roll_levels(&mut character, rng);
        self.roll_age(&mut character, rng);
        self.roll_physical(&mut character, rng);
        self.roll_appearance(&mut character, rng);
        self.roll_abilities(&mut character, rng)?;
        self.apply_racial_traits(&mut character);
        self.choose_languages(&mut character, rng);

        // Level-up loop
        let total_level = character.total_level;
        let mut ctx = GenerationContext::new(character, rng, self.feat_attempts);
        for level in 1..=total_level {
            level_up(&mut ctx, level)?;
        }
        let mut character = ctx.into_character();
        character.update_derived();

        self.validate(&character, config)?;
        info!(
            "Generated {} {} {} level {} (effective {}, hp {})",
            character.alignment,
            character.race,
            character
                .classes
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join("/"),
            character.total_level,
            character.effective_level,
            character.hp
        );
        Ok(character)
    }

    fn validate(&self, character: &Character, config: &GenerationConfig) -> NpcGenResult<()> {
        if character.classes != config.classes {
            return Err(NpcGenError::GenerationFailed(
                "class list differs from the configuration".to_string(),
            ));
        }
        if character.levels.iter().sum::<u32>() != character.total_level {
            return Err(NpcGenError::GenerationFailed(format!(
                "class levels {:?} do not add up to {}",
                character.levels, character.total_level
            )));
        }
        if let Some((ability, score)) = character
            .abilities
            .iter()
            .find(|(_, score)| *score < config::ABILITY_SCORE_FLOOR)
        {
            return Err(NpcGenError::GenerationFailed(format!(
                "{} is {}, below the floor",
                ability, score
            )));
        }
        let cap = character.total_level as i32 + 3;
        if let Some((name, _)) = character.skills.iter().find(|(_, skill)| skill.ranks > cap) {
            return Err(NpcGenError::GenerationFailed(format!(
                "{} has more than {} ranks",
                name, cap
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CharacterBuilder"
    }
}

impl Default for CharacterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;
    use crate::rules::{Alignment, CharClass, Gender, LevelType, PowerType, Race, Size};

    fn build(config: &GenerationConfig) -> Character {
        let mut rng = utils::create_rng(config);
        CharacterBuilder::for_testing()
            .generate(config, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_builder_creation() {
        assert_eq!(
            CharacterBuilder::new().feat_attempts,
            config::DEFAULT_FEAT_PICK_ATTEMPTS
        );
        assert_eq!(CharacterBuilder::new().with_feat_attempts(5).feat_attempts, 5);
        assert_eq!(CharacterBuilder::default().generator_type(), "CharacterBuilder");
    }

    #[test]
    fn test_same_seed_same_character() {
        let config = GenerationConfig::new(99);
        assert_eq!(build(&config), build(&config));
    }

    #[test]
    fn test_levels_follow_band_and_adjustment() {
        for seed in 0..20 {
            let config = GenerationConfig {
                race: Race::Drow,
                alignment: Alignment::ChaoticEvil,
                ..GenerationConfig::new(seed)
            };
            let character = build(&config);
            assert!((6..=9).contains(&character.effective_level));
            assert_eq!(character.total_level + 2, character.effective_level);
            assert!(character.spell_resistance >= 11 + character.total_level as i32);
        }
    }

    #[test]
    fn test_adult_age_stays_below_middle_age() {
        for seed in 0..20 {
            let character = build(&GenerationConfig::new(seed));
            let race = Race::Human.spec();
            assert!(character.age >= race.adult);
            assert!(character.age <= race.middle);
        }
    }

    #[test]
    fn test_height_is_normalised() {
        for seed in 0..20 {
            let config = GenerationConfig {
                gender: Gender::Female,
                race: Race::Halfling,
                ..GenerationConfig::for_testing(seed)
            };
            let character = build(&config);
            assert!(character.physical.inches < 12);
            assert!(character.physical.cm > 0);
            assert_eq!(character.size, Size::Small);
            assert!(!character.eyes.is_empty());
        }
    }

    #[test]
    fn test_abilities_follow_priority() {
        let config = GenerationConfig {
            power: PowerType::Legendary,
            ..GenerationConfig::for_testing(5)
        };
        let character = build(&config);
        let first = character.priority_order[0];
        let last = character.priority_order[5];
        let raw = |a| character.abilities.get(a) - character.ability_adjustments.get(a);
        assert!(raw(first) >= raw(last));
        assert!(character.abilities.iter().all(|(_, score)| score >= 3));
    }

    #[test]
    fn test_languages_include_racial_defaults() {
        let config = GenerationConfig {
            race: Race::Dwarf,
            classes: vec![CharClass::Wizard],
            ..GenerationConfig::for_testing(8)
        };
        let character = build(&config);
        for language in Race::Dwarf.spec().languages {
            assert!(character.languages.iter().any(|l| l == language));
        }
        let bonus = character.languages.len() - Race::Dwarf.spec().languages.len();
        assert!(bonus as i32 <= character.ability_mods.int.max(0));
        assert!(!character.scripts.is_empty());
    }

    #[test]
    fn test_multiclass_levels_split() {
        let config = GenerationConfig {
            classes: vec![CharClass::Rogue, CharClass::Sorcerer],
            level_type: LevelType::Master,
            ..GenerationConfig::new(4)
        };
        let character = build(&config);
        assert_eq!(character.levels.len(), 2);
        assert!(character.levels.iter().all(|l| *l >= 1));
        assert_eq!(character.levels.iter().sum::<u32>(), character.total_level);
    }

    #[test]
    fn test_invalid_config_fails_before_rolling() {
        let config = GenerationConfig {
            classes: vec![CharClass::Monk],
            alignment: Alignment::ChaoticNeutral,
            ..GenerationConfig::new(1)
        };
        let mut rng = utils::create_rng(&config);
        assert!(matches!(
            CharacterBuilder::new().generate(&config, &mut rng),
            Err(NpcGenError::InvalidConfig(_))
        ));
    }
}
