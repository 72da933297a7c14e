//! Feat selection.
//!
//! At each general or bonus feat level a candidate list is built from the
//! class's pool minus feats already held, and candidates are drawn at random
//! until one is granted or the attempt cap runs out. A candidate whose
//! prerequisites fail is dropped from the list before the next draw.

use super::{GenerationContext, LevelStep};
use crate::character::Character;
use crate::config::EPIC_LEVEL_THRESHOLD;
use crate::rules::{
    bonus_feat_pool, epic_feat_pool, general_feat_pool, ArmorWeight, EpicFeat, FeatDef,
    FeatEffect, FeatPool, Requirement, GENERAL_FEAT_LEVELS,
};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

/// Energy types Energy Resistance protects against.
const RESISTED_ENERGIES: [&str; 3] = ["fire", "cold", "acid"];

/// Ranks a skill needs before Epic Skill Focus can pick it.
const SKILL_FOCUS_MIN_RANKS: i32 = 10;

/// Whether every requirement of a feat holds for `character` while it
/// advances a class at `class_level`.
pub fn requirements_met(character: &Character, requires: &[Requirement], class_level: u32) -> bool {
    requires.iter().all(|requirement| match *requirement {
        Requirement::MinAbility(ability, min) => character.abilities.get(ability) >= min,
        Requirement::MinBab(min) => character.bab >= min,
        Requirement::MinClassLevel(min) => class_level >= min,
        Requirement::HasFeat(name) => character.has_feat(name),
        Requirement::MinSneakAttack(min) => character.sneak_attack >= min,
    })
}

/// Picks the general and bonus feats for one level-up step.
pub fn select_feats(ctx: &mut GenerationContext<'_>, step: &LevelStep) {
    if GENERAL_FEAT_LEVELS.contains(&step.class_level) {
        let pool = if step.level < EPIC_LEVEL_THRESHOLD {
            general_feat_pool(step.class)
        } else {
            epic_feat_pool()
        };
        pick_feat(ctx, &pool, step);
    }

    if step.class.spec().bonus_feat_levels.contains(&step.class_level) {
        let epic = step.level >= EPIC_LEVEL_THRESHOLD;
        match bonus_feat_pool(step.class, epic) {
            Some(pool) => {
                pick_feat(ctx, &pool, step);
            }
            None => debug!(
                "{} has no {} bonus feat pool at level {}",
                step.class,
                if epic { "epic" } else { "regular" },
                step.class_level
            ),
        }
    }
}

/// Grants one random feat from `pool` that the character does not hold yet.
///
/// Returns the name recorded on the character, or `None` when the slot is
/// skipped because nothing in the pool could be granted.
pub fn pick_feat(ctx: &mut GenerationContext<'_>, pool: &FeatPool, step: &LevelStep) -> Option<String> {
    let mut candidates: Vec<&'static FeatDef> = pool
        .values()
        .copied()
        .filter(|def| !ctx.character.has_feat(def.name))
        .collect();

    for _ in 0..ctx.feat_attempts {
        if candidates.is_empty() {
            break;
        }
        let index = ctx.rng.gen_range(0..candidates.len());
        let def = candidates[index];
        if let Some(name) = grant_feat(ctx, def, step) {
            debug!("Level {}: {} gains feat {}", step.level, step.class, name);
            return Some(name);
        }
        candidates.swap_remove(index);
    }

    warn!(
        "No feat granted to {} at class level {}",
        step.class, step.class_level
    );
    None
}

/// Applies `def` if its prerequisites hold and returns the recorded name.
pub fn grant_feat(ctx: &mut GenerationContext<'_>, def: &FeatDef, step: &LevelStep) -> Option<String> {
    if !requirements_met(&ctx.character, def.requires, step.class_level) {
        return None;
    }

    let character = &mut ctx.character;
    let description = match def.effect {
        FeatEffect::Text => def.description.to_string(),
        FeatEffect::ImprovedGrapple => {
            character.grapple_bonus += 4;
            def.description.to_string()
        }
        FeatEffect::WeaponFocus => {
            let weapon = character.weapon_proficiencies.choose(&mut *ctx.rng)?.clone();
            let name = format!("{} ({})", def.name, weapon);
            character.feats.insert(name.clone(), def.description.to_string());
            return Some(name);
        }
        FeatEffect::Epic(kind) => return grant_epic_feat(ctx, def, kind),
        FeatEffect::Polyglot => {
            character.languages = vec!["Can speak all languages".to_string()];
            character.scripts.clear();
            def.description.to_string()
        }
        // Feat bonuses go to the misc modifier so ranks stay within the level + 3 cap.
        FeatEffect::SkillBonus(bonuses) => {
            let mut parts = Vec::new();
            for (skill, bonus) in bonuses {
                character.skill_mut(skill).misc_mod += bonus;
                parts.push(format!("+{} to {}", bonus, skill));
            }
            format!("({})", parts.join(", "))
        }
        FeatEffect::SaveBonus(bonuses) => {
            let mut parts = Vec::new();
            for (save, bonus) in bonuses {
                character.save_mut(*save).misc += bonus;
                parts.push(format!("+{} to {} saves", bonus, save));
            }
            format!("({})", parts.join(", "))
        }
        FeatEffect::SpecialSaveBonus(category, circumstance, bonus) => {
            character.add_special_save(category, circumstance, bonus);
            format!("+{} to saves {}", bonus, circumstance)
        }
        FeatEffect::ArmorProficiency(weight) => {
            if weight == ArmorWeight::Heavy && character.ability_mods.dex > 1 {
                return None;
            }
            character.armor_proficiencies.push(weight.name().to_string());
            def.description.to_string()
        }
        FeatEffect::ShieldProficiency => {
            character.has_shield_proficiency = true;
            def.description.to_string()
        }
        FeatEffect::ImprovedInitiative => {
            character.initiative_bonus += 4;
            def.description.to_string()
        }
        FeatEffect::Run => {
            character.run_speed_multiplier = 5;
            def.description.to_string()
        }
        FeatEffect::WeaponProficiency(kind) => {
            character.weapon_proficiencies.push(kind.to_string());
            def.description.to_string()
        }
        FeatEffect::Toughness => {
            character.hp += 3;
            def.description.to_string()
        }
        FeatEffect::SpellPenetration => {
            character.spell_penetration += 2;
            def.description.to_string()
        }
    };

    character.feats.insert(def.name.to_string(), description);
    Some(def.name.to_string())
}

fn grant_epic_feat(ctx: &mut GenerationContext<'_>, def: &FeatDef, kind: EpicFeat) -> Option<String> {
    let mut description = def.description.to_string();
    let base_name = match kind {
        EpicFeat::ArmorSkin => {
            ctx.character.armor_class.modifiers.natural += 1;
            def.name.to_string()
        }
        EpicFeat::Toughness => {
            ctx.character.hp += 30;
            def.name.to_string()
        }
        EpicFeat::SneakAttack => {
            ctx.character.sneak_attack += 1;
            def.name.to_string()
        }
        EpicFeat::AbilityIncrease => {
            let order = &ctx.character.priority_order;
            let primary = *order.first()?;
            let raised = if ctx.character.abilities.get(primary) > 30 {
                *order.get(1)?
            } else {
                primary
            };
            ctx.character.abilities.increase(raised);
            format!("{} {}", def.name, raised.full_name())
        }
        EpicFeat::DamageReduction => {
            ctx.character.add_damage_reduction("-", 3);
            def.name.to_string()
        }
        EpicFeat::SkillFocus => {
            let trained: Vec<String> = ctx
                .character
                .skills
                .iter()
                .filter(|(_, skill)| skill.ranks > SKILL_FOCUS_MIN_RANKS)
                .map(|(name, _)| name.clone())
                .collect();
            let skill = trained.choose(&mut *ctx.rng)?.clone();
            ctx.character.skill_mut(&skill).misc_mod += 10;
            description = format!("(Improved {})", skill);
            def.name.to_string()
        }
        EpicFeat::EnergyResistance => {
            let energy = *RESISTED_ENERGIES.choose(&mut *ctx.rng)?;
            ctx.character.add_damage_reduction(energy, 10);
            def.name.to_string()
        }
        // One-time epic feats keep their plain name.
        EpicFeat::Initiative => {
            ctx.character.initiative_bonus += 8;
            ctx.character.feats.insert(def.name.to_string(), description);
            return Some(def.name.to_string());
        }
        EpicFeat::FastHealing => {
            ctx.character.fast_healing += 3;
            ctx.character.feats.insert(def.name.to_string(), description);
            return Some(def.name.to_string());
        }
    };

    let ordinal = ctx.next_epic_ordinal(&base_name);
    let name = format!("{} (+{})", base_name, ordinal);
    ctx.character.feats.insert(name.clone(), description);
    Some(name)
}
