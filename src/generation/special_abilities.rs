//! Class feature grants.
//!
//! Text features are recorded with the keep-highest-level rule. Stateful
//! features mutate the character and rewrite their own sheet entry; most of
//! them accumulate, so each is applied exactly once per granting level.

use super::{GenerationContext, LevelStep};
use crate::rules::{
    class_features, unarmed_damage, CharClass, Feature, FeatureEffect, SaveCategory,
    FAVORED_ENEMIES, NATURE_SENSE_SKILLS,
};
use log::debug;
use rand::seq::SliceRandom;

/// Grants every class feature `step.class` gains at `step.class_level`.
pub fn grant_class_features(ctx: &mut GenerationContext<'_>, step: &LevelStep) {
    let size = ctx.character.size;
    for (name, feature) in class_features(step.class, step.class_level, step.final_class_level, size) {
        match feature {
            Feature::Text(description) => {
                if ctx
                    .character
                    .grant_class_feature_text(name, step.final_class_level, &description)
                {
                    debug!("Level {}: {} gains {}", step.level, step.class, name);
                }
            }
            Feature::Effect(effect) => {
                apply_feature_effect(ctx, effect, step);
                debug!("Level {}: {} applies {}", step.level, step.class, name);
            }
        }
    }

    let character = &mut ctx.character;
    if step.class == CharClass::Monk {
        character.wisdom_to_ac = true;
        character.unarmed_damage = Some(unarmed_damage(Some(step.final_class_level), size).to_string());
    } else if character.unarmed_damage.is_none() {
        character.unarmed_damage = Some(unarmed_damage(None, size).to_string());
    }
}

/// Applies one stateful class feature.
pub fn apply_feature_effect(ctx: &mut GenerationContext<'_>, effect: FeatureEffect, step: &LevelStep) {
    let final_level = step.final_class_level;
    // Companions are as strong as the levels left in the class, plus one.
    let companion_levels = final_level + 1 - step.class_level;
    let character = &mut ctx.character;

    match effect {
        FeatureEffect::FastMovement => {
            character.speed_bonus += 10;
            character.set_class_feature("Fast Movement", "(+10ft)");
        }
        FeatureEffect::UnarmoredSpeed => {
            character.unarmored_speed_bonus += 10;
            let text = format!("({})", character.unarmored_speed_bonus);
            character.set_class_feature("Unarmored Speed Bonus", text);
        }
        FeatureEffect::TrapSense => {
            let bonus = character.add_special_save(SaveCategory::Ref, "vs. traps", 1);
            character.add_special_armor("vs. traps", 1);
            character.set_class_feature("Trap Sense", format!("(+{})", bonus));
        }
        FeatureEffect::DamageReduction => {
            let amount = character.add_damage_reduction("-", 1);
            character.set_class_feature("Damage Reduction", format!("({}/-)", amount));
        }
        FeatureEffect::IndomitableWill => {
            let bonus = character.add_special_save(SaveCategory::Will, "vs. ench.", 4);
            character.set_class_feature("Indomitable Will", format!("(+{})", bonus));
        }
        FeatureEffect::NatureSense => {
            for skill in NATURE_SENSE_SKILLS {
                character.skill_mut(skill).misc_mod += 2;
            }
            character.set_class_feature("Nature Sense", "(+2 nature checks)");
        }
        FeatureEffect::ResistNaturesLure => {
            let bonus = character.add_special_save(SaveCategory::General, "vs. Fey", 4);
            character.set_class_feature("Resist Nature's Lure", format!("(+{})", bonus));
        }
        FeatureEffect::StillMind => {
            let bonus = character.add_special_save(SaveCategory::Will, "vs. ench.", 2);
            character.set_class_feature("Still Mind", format!("(+{})", bonus));
        }
        FeatureEffect::DiamondSoul => {
            let resistance = final_level as i32 + 10;
            character.spell_resistance = character.spell_resistance.max(resistance);
            let text = format!("(SR {})", character.spell_resistance);
            character.set_class_feature("Diamond Soul", text);
        }
        FeatureEffect::PerfectSelf => {
            let reduction = character.damage_reduction.entry("magic".to_string()).or_insert(0);
            *reduction = (*reduction).max(10);
            let text = format!("Considered extraplanar, DR {}/magic", reduction);
            character.set_class_feature("Perfect Self", text);
            character.creature_type = "Outsider (Extraplanar)".to_string();
        }
        FeatureEffect::SneakAttack => character.sneak_attack += 1,
        FeatureEffect::MonkAcBonus => {
            character.ac_unarmored_bonus += 1;
            let text = format!("(+{})", character.ac_unarmored_bonus);
            character.set_class_feature("Monk AC bonus", text);
        }
        FeatureEffect::DivineGrace => {
            character.charisma_to_saves = true;
            character.set_class_feature("Divine Grace", "(CHA modifier to saving throws)");
        }
        FeatureEffect::AuraOfCourage => {
            let bonus = character.add_special_save(SaveCategory::General, "vs. fear", 4);
            character.set_class_feature(
                "Aura of Courage",
                format!("(saves +{} vs. fear 10ft radius)", bonus),
            );
        }
        FeatureEffect::FavoredEnemy => {
            let remaining: Vec<&str> = FAVORED_ENEMIES
                .iter()
                .copied()
                .filter(|enemy| !character.favored_enemies.iter().any(|e| e == enemy))
                .collect();
            if let Some(enemy) = remaining.choose(&mut *ctx.rng) {
                character.favored_enemies.push(enemy.to_string());
            }
        }
        FeatureEffect::TongueOfSunAndMoon => {
            let text = "Can speak with any living creature";
            character.languages = vec![text.to_string()];
            character.set_class_feature("Tongue of the Sun and Moon", text);
        }
        FeatureEffect::AnimalCompanion => {
            character.animal_companion_level += companion_levels;
            let text = format!("level {}", character.animal_companion_level);
            character.set_class_feature("Animal Companion", text);
        }
        FeatureEffect::SummonFamiliar => {
            character.familiar_level += companion_levels;
            let text = format!("level {}", character.familiar_level);
            character.set_class_feature("Summon familiar", text);
        }
        FeatureEffect::TurnUndead => {
            character.turn_undead_level += companion_levels;
            let text = format!("level {}", character.turn_undead_level);
            character.set_class_feature("Turn undead", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;
    use crate::generation::{utils, GenerationConfig};
    use crate::rules::{AgeCategory, Alignment, Gender, LevelType, PowerType, Race, Save, LAY_ON_HANDS};
    use rand::rngs::StdRng;

    fn character(class: CharClass) -> Character {
        Character::new(
            Race::Human,
            Gender::Female,
            Alignment::LawfulGood,
            vec![class],
            AgeCategory::Adult,
            PowerType::Normal,
            LevelType::Champion,
        )
    }

    fn step(class: CharClass, class_level: u32, final_class_level: u32) -> LevelStep {
        LevelStep {
            level: class_level,
            class,
            slot: 0,
            class_level,
            final_class_level,
        }
    }

    fn rng() -> StdRng {
        utils::create_rng(&GenerationConfig::for_testing(5))
    }

    fn advance(ctx: &mut GenerationContext<'_>, class: CharClass, final_level: u32) {
        for level in 1..=final_level {
            grant_class_features(ctx, &step(class, level, final_level));
        }
    }

    #[test]
    fn test_trap_sense_accumulates() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Rogue), &mut rng, 100);
        advance(&mut ctx, CharClass::Rogue, 9);

        let c = &ctx.character;
        assert_eq!(c.save_special_bonuses[&SaveCategory::Ref]["vs. traps"], 3);
        assert_eq!(c.ac_special_bonuses["vs. traps"], 3);
        assert_eq!(c.class_feature("Trap Sense"), Some("(+3)"));
        assert_eq!(c.sneak_attack, 5);
        assert!(c.has_class_feature("Uncanny Dodge"));
        assert_eq!(c.unarmed_damage.as_deref(), Some("1d4"));
    }

    #[test]
    fn test_companions_count_remaining_levels() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Druid), &mut rng, 100);
        advance(&mut ctx, CharClass::Druid, 6);
        assert_eq!(ctx.character.animal_companion_level, 6);
        assert_eq!(ctx.character.class_feature("Animal Companion"), Some("level 6"));
        assert_eq!(ctx.character.skills["Survival"].misc_mod, 2);
        assert_eq!(
            ctx.character.save_special_bonuses[&SaveCategory::General]["vs. Fey"],
            4
        );

        let mut ctx = GenerationContext::new(character(CharClass::Ranger), &mut rng, 100);
        advance(&mut ctx, CharClass::Ranger, 10);
        assert_eq!(ctx.character.animal_companion_level, 7);
        assert_eq!(ctx.character.favored_enemies.len(), 3);
    }

    #[test]
    fn test_favored_enemies_are_distinct() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Ranger), &mut rng, 100);
        advance(&mut ctx, CharClass::Ranger, 40);
        let enemies = &ctx.character.favored_enemies;
        assert_eq!(enemies.len(), 9);
        for (i, enemy) in enemies.iter().enumerate() {
            assert!(!enemies[..i].contains(enemy));
        }
    }

    #[test]
    fn test_paladin_features() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Paladin), &mut rng, 100);
        advance(&mut ctx, CharClass::Paladin, 5);
        let c = &ctx.character;
        assert!(c.charisma_to_saves);
        assert_eq!(c.class_features[LAY_ON_HANDS].level, Some(5));
        assert_eq!(c.class_feature("Smite Evil"), Some("2/day"));
        assert_eq!(c.turn_undead_level, 2);
        assert_eq!(
            c.class_feature("Aura of Courage"),
            Some("(saves +4 vs. fear 10ft radius)")
        );
        assert_eq!(c.save(Save::Will).misc, 0);
    }

    #[test]
    fn test_monk_features() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Monk), &mut rng, 100);
        advance(&mut ctx, CharClass::Monk, 20);
        let c = &ctx.character;
        assert!(c.wisdom_to_ac);
        assert_eq!(c.unarmed_damage.as_deref(), Some("2d10"));
        assert_eq!(c.ac_unarmored_bonus, 4);
        assert_eq!(c.class_feature("Monk AC bonus"), Some("(+4)"));
        assert_eq!(c.unarmored_speed_bonus, 60);
        assert_eq!(c.spell_resistance, 30);
        assert_eq!(c.damage_reduction["magic"], 10);
        assert_eq!(c.creature_type, "Outsider (Extraplanar)");
        assert_eq!(c.languages, vec!["Can speak with any living creature".to_string()]);
        assert_eq!(c.class_feature("Still Mind"), Some("(+2)"));
    }

    #[test]
    fn test_barbarian_damage_reduction_and_speed() {
        let mut rng = rng();
        let mut ctx = GenerationContext::new(character(CharClass::Barbarian), &mut rng, 100);
        advance(&mut ctx, CharClass::Barbarian, 16);
        let c = &ctx.character;
        assert_eq!(c.speed_bonus, 10);
        assert_eq!(c.damage_reduction["-"], 4);
        assert_eq!(c.class_feature("Damage Reduction"), Some("(4/-)"));
        assert_eq!(c.class_feature("Indomitable Will"), Some("(+4)"));
        assert_eq!(c.unarmed_damage.as_deref(), Some("1d4"));
    }
}
