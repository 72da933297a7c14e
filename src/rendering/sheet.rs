//! # Character Sheet
//!
//! Read-only projection of a finished character, as plain text or JSON.

use crate::character::Character;
use crate::rules::{spell_slots, untrained_skills, Save, SpellSlots};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A finished character plus the facts a sheet needs alongside it.
///
/// # Examples
///
/// ```
/// use npcgen::generation::utils;
/// use npcgen::{CharacterBuilder, CharacterSheet, GenerationConfig, Generator};
///
/// let config = GenerationConfig::for_testing(1);
/// let mut rng = utils::create_rng(&config);
/// let character = CharacterBuilder::new().generate(&config, &mut rng).unwrap();
///
/// let sheet = CharacterSheet::new(&character);
/// assert!(sheet.to_string().contains("fighter"));
/// assert!(sheet.to_json().unwrap().contains("\"untrained_skills\""));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet<'a> {
    #[serde(flatten)]
    pub character: &'a Character,
    /// Skills usable without ranks
    pub untrained_skills: Vec<&'static str>,
    /// Spell slots of every casting class, keyed by class name
    pub spell_slots: BTreeMap<&'static str, Vec<SpellSlots>>,
}

impl<'a> CharacterSheet<'a> {
    pub fn new(character: &'a Character) -> Self {
        let spell_slots = character
            .classes
            .iter()
            .zip(&character.levels)
            .map(|(class, level)| (class.name(), spell_slots(*class, *level)))
            .filter(|(_, slots)| !slots.is_empty())
            .collect();
        Self {
            character,
            untrained_skills: untrained_skills(),
            spell_slots,
        }
    }

    pub fn to_json(&self) -> crate::NpcGenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn write_combat(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.character;
        let attacks: Vec<String> = c
            .attacks
            .iter()
            .flatten()
            .map(|a| format!("{:+}", a + c.attack_adjustment))
            .collect();
        writeln!(f, "HP: {}", c.hp)?;
        writeln!(
            f,
            "AC: {} (touch {}, flat-footed {})",
            c.armor_class.total, c.armor_class.touch, c.armor_class.flat_footed
        )?;
        for (circumstance, bonus) in &c.ac_special_bonuses {
            writeln!(f, "  {:+} AC {}", bonus, circumstance)?;
        }
        writeln!(f, "Initiative: {:+}", c.initiative)?;
        writeln!(f, "Speed: {}ft", c.speed)?;
        writeln!(f, "BAB: {:+}  Attacks: {}", c.bab, attacks.join("/"))?;
        writeln!(f, "Grapple: {:+}", c.grapple)?;
        if let Some(damage) = &c.unarmed_damage {
            writeln!(f, "Unarmed damage: {}", damage)?;
        }
        for save in Save::ALL {
            let throw = c.save(*save);
            writeln!(f, "{}: {:+}", save.name(), throw.total)?;
        }
        for (category, bonuses) in &c.save_special_bonuses {
            for (circumstance, bonus) in bonuses {
                writeln!(f, "  {:+} {} saves {}", bonus, category, circumstance)?;
            }
        }
        if !c.damage_reduction.is_empty() {
            let reductions: Vec<String> = c
                .damage_reduction
                .iter()
                .map(|(kind, amount)| format!("{}/{}", amount, kind))
                .collect();
            writeln!(f, "Damage reduction: {}", reductions.join(", "))?;
        }
        if c.spell_resistance > 0 {
            writeln!(f, "Spell resistance: {}", c.spell_resistance)?;
        }
        if c.fast_healing > 0 {
            writeln!(f, "Fast healing: {}", c.fast_healing)?;
        }
        Ok(())
    }
}

impl fmt::Display for CharacterSheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.character;
        let classes: Vec<String> = c
            .classes
            .iter()
            .zip(&c.levels)
            .map(|(class, level)| format!("{} {}", class, level))
            .collect();

        writeln!(
            f,
            "{} {} {} {}",
            c.alignment,
            c.gender,
            c.race,
            classes.join(" / ")
        )?;
        writeln!(f, "Effective level {} ({})", c.effective_level, c.level_type)?;
        writeln!(f, "{}, {} vision", c.creature_type, c.vision)?;
        writeln!(f, "Age {} ({})", c.age, c.age_category)?;
        writeln!(
            f,
            "{}'{}\" ({} cm), {} lbs ({} kg), size {}",
            c.physical.feet, c.physical.inches, c.physical.cm, c.physical.lbs, c.physical.kg, c.size
        )?;
        writeln!(f, "Eyes {}, hair {}, skin {}", c.eyes, c.hair, c.skin)?;
        writeln!(f)?;

        for (ability, score) in c.abilities.iter() {
            writeln!(f, "{} {:>2} ({:+})", ability.name().to_uppercase(), score, c.modifier(ability))?;
        }
        writeln!(f)?;
        self.write_combat(f)?;

        writeln!(f)?;
        writeln!(f, "Skills:")?;
        for (name, skill) in &c.skills {
            if skill.ranks > 0 || (skill.misc_mod != 0 && self.untrained_skills.iter().any(|s| *s == name.as_str())) {
                writeln!(f, "  {} {:+} ({} ranks)", name, skill.total(), skill.ranks)?;
            }
        }

        let sections = [
            ("Racial feats", &c.race_feats),
            ("Feats", &c.feats),
        ];
        for (title, entries) in sections {
            if entries.is_empty() {
                continue;
            }
            writeln!(f, "{}:", title)?;
            for (name, description) in entries {
                writeln!(f, "  {} {}", name, description)?;
            }
        }
        if !c.class_features.is_empty() {
            writeln!(f, "Class features:")?;
            for (name, feature) in &c.class_features {
                writeln!(f, "  {} {}", name, feature.description)?;
            }
        }
        if c.sneak_attack > 0 {
            writeln!(f, "  Sneak attack +{}d6", c.sneak_attack)?;
        }
        if !c.favored_enemies.is_empty() {
            writeln!(f, "Favored enemies: {}", c.favored_enemies.join(", "))?;
        }

        for (class, slots) in &self.spell_slots {
            let per_day: Vec<String> = slots
                .iter()
                .map(|s| match s.known {
                    Some(known) => format!("{}:{}/{}", s.spell_level, s.per_day, known),
                    None => format!("{}:{}", s.spell_level, s.per_day),
                })
                .collect();
            writeln!(f, "{} spells: {}", class, per_day.join(" "))?;
        }

        writeln!(f, "Languages: {}", c.languages.join(", "))?;
        if !c.scripts.is_empty() {
            writeln!(f, "Scripts: {}", c.scripts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{utils, CharacterBuilder, GenerationConfig, Generator};
    use crate::rules::{Alignment, CharClass, LevelType};

    fn generate(config: &GenerationConfig) -> Character {
        let mut rng = utils::create_rng(config);
        CharacterBuilder::new().generate(config, &mut rng).unwrap()
    }

    #[test]
    fn test_sheet_lists_casting_classes_only() {
        let config = GenerationConfig {
            classes: vec![CharClass::Fighter, CharClass::Wizard],
            level_type: LevelType::Master,
            ..GenerationConfig::new(21)
        };
        let character = generate(&config);
        let sheet = CharacterSheet::new(&character);
        assert!(sheet.spell_slots.contains_key("wizard"));
        assert!(!sheet.spell_slots.contains_key("fighter"));
        assert!(sheet.untrained_skills.contains(&"Climb"));
    }

    #[test]
    fn test_text_sheet_sections() {
        let config = GenerationConfig {
            alignment: Alignment::LawfulGood,
            classes: vec![CharClass::Paladin],
            ..GenerationConfig::new(3)
        };
        let character = generate(&config);
        let text = CharacterSheet::new(&character).to_string();
        assert!(text.starts_with("lawful good"));
        assert!(text.contains("Class features:"));
        assert!(text.contains("Languages: "));
        assert!(text.contains("Divine Grace"));
    }

    #[test]
    fn test_json_sheet_exposes_character_fields() {
        let character = generate(&GenerationConfig::for_testing(8));
        let json = CharacterSheet::new(&character).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["race"], "human");
        assert_eq!(value["bab"], character.bab);
        assert!(value["untrained_skills"].is_array());
        assert!(value["saves"]["fort"]["total"].is_number());
    }
}
