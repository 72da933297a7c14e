//! Level progression: how levels split between classes, the hybrid
//! ability priority, ability increases and the per-level step itself.

use super::{grant_class_features, select_feats, GenerationContext, LevelStep};
use crate::character::{attack_table, Character};
use crate::config::{ABILITY_INCREASE_INTERVAL, EPIC_LEVEL_THRESHOLD, MAX_CHARACTER_LEVEL};
use crate::rules::{
    class_skills, epic_bab_increment, epic_save_increment, Ability, CharClass, Save,
};
use crate::utils::roll_dice;
use crate::{NpcGenError, NpcGenResult};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

/// Splits `total` levels between one or two classes.
///
/// The first level always goes to the first class and the second level to
/// the second class; every later level goes to either class at random.
pub fn split_levels<R: Rng + ?Sized>(total: u32, class_count: usize, rng: &mut R) -> Vec<u32> {
    if class_count < 2 {
        return vec![total];
    }
    let mut levels = vec![0, 0];
    for level in 1..=total {
        let slot = match level {
            1 => 0,
            2 => 1,
            _ => rng.gen_range(0..2),
        };
        levels[slot] += 1;
    }
    levels
}

/// Abilities from most to least important for a class combination.
///
/// A multiclass order interleaves the class with more levels and the one
/// with fewer, pairwise, keeping the first occurrence of each ability. On a
/// tie the first class leads.
pub fn priority_order(classes: &[CharClass], levels: &[u32]) -> Vec<Ability> {
    match (classes, levels) {
        ([first, second], [first_levels, second_levels]) => {
            let (high, low) = if second_levels > first_levels {
                (second, first)
            } else {
                (first, second)
            };
            let mut order = Vec::with_capacity(6);
            for (a, b) in high.spec().priority.iter().zip(low.spec().priority.iter()) {
                for ability in [*a, *b] {
                    if !order.contains(&ability) {
                        order.push(ability);
                    }
                }
            }
            order
        }
        ([only, ..], _) => only.spec().priority.to_vec(),
        _ => Ability::ALL.to_vec(),
    }
}

/// Which class, and which level in it, character level `level` advances.
pub fn level_step(character: &Character, level: u32) -> Option<LevelStep> {
    let first_levels = *character.levels.first()?;
    let slot = if level <= first_levels { 0 } else { 1 };
    let class = *character.classes.get(slot)?;
    let final_class_level = *character.levels.get(slot)?;
    let class_level = if slot == 0 { level } else { level - first_levels };
    Some(LevelStep {
        level,
        class,
        slot,
        class_level,
        final_class_level,
    })
}

/// Picks the ability raised at an ability increase level.
///
/// The first rule that applies wins:
/// 1. a score below 8 outside the two least important abilities, leaving
///    dexterity, wisdom and charisma alone
/// 2. a caster's primary ability below 19 (16 for bards and adepts)
/// 3. an odd score of 9 or less among the class's top three
/// 4. a score of exactly 9 outside the two least important abilities
/// 5. the highest odd score from 11 up among the class's top three
/// 6. a top three score below 16, skipping dexterity for armored classes
/// 7. the primary ability of a spellcasting class, else one of the class's
///    top two at random
pub fn choose_ability_increase<R: Rng + ?Sized>(
    character: &Character,
    class: CharClass,
    rng: &mut R,
) -> Ability {
    let class_order = class.spec().priority;
    let primary = &class_order[..3];
    let order = &character.priority_order;
    let irrelevant = &order[order.len().saturating_sub(2)..];
    let score = |ability: Ability| character.abilities.get(ability);

    let pick = class_order
        .iter()
        .copied()
        .find(|a| {
            score(*a) < 8
                && !irrelevant.contains(a)
                && !matches!(a, Ability::Cha | Ability::Wis | Ability::Dex)
        })
        .or_else(|| {
            let cap = match class {
                CharClass::Bard | CharClass::Adept => 16,
                c if c.is_spellcaster() => 19,
                _ => return None,
            };
            Some(primary[0]).filter(|a| score(*a) < cap)
        })
        .or_else(|| {
            primary
                .iter()
                .copied()
                .find(|a| score(*a) <= 9 && score(*a) % 2 == 1 && !irrelevant.contains(a))
        })
        .or_else(|| {
            class_order
                .iter()
                .copied()
                .find(|a| score(*a) == 9 && !irrelevant.contains(a))
        })
        .or_else(|| {
            primary
                .iter()
                .copied()
                .filter(|a| score(*a) >= 11 && score(*a) % 2 == 1)
                .fold(None, |best: Option<Ability>, a| match best {
                    Some(b) if score(b) >= score(a) => Some(b),
                    _ => Some(a),
                })
        })
        .or_else(|| {
            primary
                .iter()
                .copied()
                .find(|a| score(*a) < 16 && !(class.is_armor_user() && *a == Ability::Dex))
        })
        .or_else(|| {
            character
                .classes
                .iter()
                .find(|c| c.is_spellcaster())
                .map(|c| c.spec().priority[0])
        });

    match pick {
        Some(ability) => ability,
        None => *primary[..2].choose(rng).unwrap_or(&primary[0]),
    }
}

/// Rolls the hit points gained at `level`, never less than 1.
pub fn roll_hit_points<R: Rng + ?Sized>(
    rng: &mut R,
    hit_die: i32,
    level: u32,
    con_mod: i32,
    hp_drop: i32,
) -> i32 {
    let hp = if level == 1 {
        hit_die + con_mod
    } else {
        roll_dice(rng, hit_die, hp_drop + 1, 0, con_mod, hp_drop)
    };
    hp.max(1)
}

/// Applies character level `level`.
pub fn level_up(ctx: &mut GenerationContext<'_>, level: u32) -> NpcGenResult<()> {
    let step = level_step(&ctx.character, level).ok_or_else(|| {
        NpcGenError::GenerationFailed(format!("no class advances at level {}", level))
    })?;
    let class = step.class.spec();
    let race = ctx.character.race.spec();

    ctx.character.update_ability_modifiers(level - 1);

    let mut hit_die = class.hit_die;
    if let Some(racial) = race.traits.hit_die {
        if level <= racial.levels && hit_die < racial.die {
            hit_die = racial.die;
        }
    }
    let con = ctx.character.ability_mods.con;
    let hp_drop = ctx.character.power.spec().hp_drop;
    let hp = roll_hit_points(&mut *ctx.rng, hit_die, level, con, hp_drop);
    ctx.character.hp += hp;

    if level % ABILITY_INCREASE_INTERVAL == 0 && level < MAX_CHARACTER_LEVEL {
        let ability = choose_ability_increase(&ctx.character, step.class, &mut *ctx.rng);
        ctx.character.abilities.increase(ability);
        ctx.character.update_ability_modifiers(level);
        debug!("Level {}: {} increased", level, ability.full_name());
    }

    let character = &mut ctx.character;
    if level < EPIC_LEVEL_THRESHOLD {
        character.bab += class.bab.increment(level);
        for save in Save::ALL {
            character.save_mut(*save).base += class.saves.progression(*save).increment(level);
        }
    } else {
        character.bab += epic_bab_increment(level);
        for save in Save::ALL {
            character.save_mut(*save).base += epic_save_increment(level);
        }
    }
    character.attacks = attack_table(character.bab);

    distribute_skill_points(ctx, &step);
    grant_class_features(ctx, &step);
    select_feats(ctx, &step);

    // Epic ability feats raise scores after the modifiers were last computed.
    ctx.character.update_ability_modifiers(level);
    ctx.character.update_derived();

    debug!(
        "Level {}: {} {} (hp {}, bab {})",
        level, step.class, step.class_level, ctx.character.hp, ctx.character.bab
    );
    Ok(())
}

/// Ranks bought in `skill` across every class slot.
fn total_ranks(character: &Character, skill: &str) -> i32 {
    character
        .class_skill_ranks
        .iter()
        .filter_map(|slot| slot.get(skill))
        .sum()
}

/// Spends the level's skill points on random class skills.
///
/// Every point is spent, but a point landing on a skill already at the
/// rank cap of `level + 3` is lost.
fn distribute_skill_points(ctx: &mut GenerationContext<'_>, step: &LevelStep) {
    let character = &mut ctx.character;
    let race = character.race.spec();

    let mut skills = class_skills(step.class);
    for skill in race.traits.class_skills {
        if !skills.contains(skill) {
            skills.push(*skill);
        }
    }

    let (multiplier, bonus) = match (step.level, race.traits.bonus_skill_points) {
        (1, Some(extra)) => (4, extra.first_level),
        (1, None) => (4, 0),
        (_, Some(extra)) => (1, extra.per_level),
        (_, None) => (1, 0),
    };
    let mut points = (step.class.spec().skill_mod + bonus + character.ability_mods.int) * multiplier;
    if points < 1 {
        points = multiplier + bonus;
    }

    let cap = step.level as i32 + 3;
    while points > 0 {
        let skill = match skills.choose(&mut *ctx.rng) {
            Some(skill) => *skill,
            None => break,
        };
        if total_ranks(character, skill) < cap {
            if let Some(slot) = character.class_skill_ranks.get_mut(step.slot) {
                *slot.entry(skill.to_string()).or_insert(0) += 1;
            }
        }
        points -= 1;
    }

    let names: Vec<String> = character.skills.keys().cloned().collect();
    for name in names {
        let ranks = total_ranks(character, &name);
        character.skill_mut(&name).ranks = ranks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::AbilityScores;
    use crate::generation::{utils, GenerationConfig};
    use crate::rules::{AgeCategory, Alignment, Gender, LevelType, PowerType, Race};
    use rand::rngs::StdRng;
    use Ability::*;

    fn rng(seed: u64) -> StdRng {
        utils::create_rng(&GenerationConfig::for_testing(seed))
    }

    fn character(classes: Vec<CharClass>) -> Character {
        Character::new(
            Race::Human,
            Gender::Male,
            Alignment::TrueNeutral,
            classes,
            AgeCategory::Adult,
            PowerType::Normal,
            LevelType::Master,
        )
    }

    #[test]
    fn test_split_levels() {
        let mut rng = rng(1);
        assert_eq!(split_levels(7, 1, &mut rng), vec![7]);
        assert_eq!(split_levels(2, 2, &mut rng), vec![1, 1]);
        for total in 2..20 {
            let levels = split_levels(total, 2, &mut rng);
            assert_eq!(levels.iter().sum::<u32>(), total);
            assert!(levels.iter().all(|l| *l >= 1));
        }
    }

    #[test]
    fn test_multiclass_priority_interleaves() {
        let order = priority_order(&[CharClass::Fighter, CharClass::Wizard], &[3, 2]);
        assert_eq!(order, vec![Str, Int, Con, Dex, Wis, Cha]);

        let order = priority_order(&[CharClass::Fighter, CharClass::Wizard], &[2, 3]);
        assert_eq!(order[0], Int);
        assert_eq!(order.len(), 6);

        let single = priority_order(&[CharClass::Rogue], &[4]);
        assert_eq!(single, CharClass::Rogue.spec().priority.to_vec());
    }

    #[test]
    fn test_level_step_switches_class() {
        let mut c = character(vec![CharClass::Fighter, CharClass::Rogue]);
        c.levels = vec![3, 2];
        let third = level_step(&c, 3).unwrap();
        assert_eq!((third.class, third.class_level, third.slot), (CharClass::Fighter, 3, 0));
        let fourth = level_step(&c, 4).unwrap();
        assert_eq!(fourth.class, CharClass::Rogue);
        assert_eq!(fourth.class_level, 1);
        assert_eq!(fourth.final_class_level, 2);
        assert_eq!(fourth.slot, 1);
    }

    #[test]
    fn test_increase_fixes_dump_penalty_first() {
        let mut rng = rng(2);
        let mut c = character(vec![CharClass::Fighter]);
        c.priority_order = CharClass::Fighter.spec().priority.to_vec();
        c.abilities = AbilityScores::new(15, 14, 7, 12, 10, 8);
        assert_eq!(choose_ability_increase(&c, CharClass::Fighter, &mut rng), Con);
    }

    #[test]
    fn test_increase_pumps_caster_primary() {
        let mut rng = rng(3);
        let mut c = character(vec![CharClass::Wizard]);
        c.priority_order = CharClass::Wizard.spec().priority.to_vec();
        c.abilities = AbilityScores::new(10, 14, 12, 10, 17, 8);
        assert_eq!(choose_ability_increase(&c, CharClass::Wizard, &mut rng), Int);

        c.abilities.int = 19;
        assert_eq!(choose_ability_increase(&c, CharClass::Wizard, &mut rng), Int);

        c.abilities.int = 20;
        assert_eq!(choose_ability_increase(&c, CharClass::Wizard, &mut rng), Dex);
    }

    #[test]
    fn test_increase_prefers_highest_odd_primary() {
        let mut rng = rng(4);
        let mut c = character(vec![CharClass::Fighter]);
        c.priority_order = CharClass::Fighter.spec().priority.to_vec();
        c.abilities = AbilityScores::new(16, 13, 15, 10, 10, 10);
        assert_eq!(choose_ability_increase(&c, CharClass::Fighter, &mut rng), Con);
    }

    #[test]
    fn test_increase_skips_dexterity_for_armored_classes() {
        let mut rng = rng(5);
        let mut c = character(vec![CharClass::Fighter]);
        c.priority_order = CharClass::Fighter.spec().priority.to_vec();
        c.abilities = AbilityScores::new(18, 12, 18, 10, 10, 10);
        let raised = choose_ability_increase(&c, CharClass::Fighter, &mut rng);
        assert!(raised == Str || raised == Con);
    }

    #[test]
    fn test_hit_points_floor() {
        let mut rng = rng(6);
        assert_eq!(roll_hit_points(&mut rng, 4, 1, -5, 0), 1);
        assert_eq!(roll_hit_points(&mut rng, 10, 1, 2, 0), 12);
        for _ in 0..50 {
            let hp = roll_hit_points(&mut rng, 8, 3, 1, 2);
            assert!((2..=9).contains(&hp));
        }
    }

    #[test]
    fn test_skill_ranks_respect_cap() {
        let mut rng = rng(7);
        let mut c = character(vec![CharClass::Rogue]);
        c.levels = vec![6];
        c.abilities = AbilityScores::new(10, 10, 10, 10, 18, 10);
        c.update_ability_modifiers(0);
        let mut ctx = GenerationContext::new(c, &mut rng, 100);
        for level in 1..=6 {
            let step = level_step(&ctx.character, level).unwrap();
            distribute_skill_points(&mut ctx, &step);
            for skill in ctx.character.skills.values() {
                assert!(skill.ranks <= level as i32 + 3);
            }
        }
        let spent: i32 = ctx.character.skills.values().map(|s| s.ranks).sum();
        assert!(spent > 0);
    }
}
