//! End-to-end generation scenarios through the public API.

use npcgen::generation::utils;
use npcgen::{
    alignment_sets, Alignment, CharClass, Character, CharacterBuilder, CharacterOptions,
    CharacterSheet, GenerationConfig, Generator, LevelType, NpcGenResult, Race, Save,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generate(config: &GenerationConfig) -> NpcGenResult<Character> {
    let mut rng = utils::create_rng(config);
    CharacterBuilder::new().generate(config, &mut rng)
}

#[test]
fn test_human_fighter_novice() -> NpcGenResult<()> {
    for seed in 0..25 {
        let character = generate(&GenerationConfig::for_testing(seed))?;
        let level = character.total_level;
        assert!((1..=5).contains(&level));
        assert_eq!(character.bab, level as i32);
        assert_eq!(character.save(Save::Fort).base, 2 + level as i32 / 2);
        assert!(!character.feats.is_empty());
        assert!(character.hp >= level as i32);
    }
    Ok(())
}

#[test]
fn test_two_level_multiclass_splits_evenly() -> NpcGenResult<()> {
    let mut checked = 0;
    for seed in 0..30 {
        let config = GenerationConfig {
            race: Race::HalfOgre,
            classes: vec![CharClass::Fighter, CharClass::Wizard],
            level_type: LevelType::Novice,
            ..GenerationConfig::new(seed)
        };
        let character = generate(&config)?;
        assert!(character.total_level >= 2);
        if character.total_level == 2 {
            assert_eq!(character.levels, vec![1, 1]);
            checked += 1;
        }
    }
    assert!(checked > 0);
    Ok(())
}

#[test]
fn test_random_drow_alignment_is_never_restricted() -> NpcGenResult<()> {
    let options = CharacterOptions {
        race: Some(Race::Drow),
        ..CharacterOptions::default()
    };
    let mut rng = StdRng::seed_from_u64(77);
    for seed in 0..200 {
        let config = options.resolve(seed, &mut rng)?;
        assert!(!alignment_sets::GOOD_OR_NEUTRAL.contains(&config.alignment));
    }
    Ok(())
}

#[test]
fn test_skill_ranks_stay_under_cap() -> NpcGenResult<()> {
    for seed in 0..10 {
        let config = GenerationConfig {
            classes: vec![CharClass::Rogue],
            level_type: LevelType::Champion,
            ..GenerationConfig::new(seed)
        };
        let character = generate(&config)?;
        let cap = character.total_level as i32 + 3;
        assert!(character.skills.values().all(|s| s.ranks <= cap));
        assert!(character.skills.values().any(|s| s.ranks > 0));
    }
    Ok(())
}

#[test]
fn test_epic_characters_use_epic_tables() -> NpcGenResult<()> {
    let config = GenerationConfig {
        alignment: Alignment::LawfulNeutral,
        classes: vec![CharClass::Monk],
        level_type: LevelType::Epic,
        ..GenerationConfig::new(12)
    };
    let character = generate(&config)?;
    let level = character.total_level as i32;
    assert!(level >= 21);
    // Medium progression to 20, then +1 every odd epic level.
    assert_eq!(character.bab, 15 + (level - 19) / 2);
    assert!(character.attacks[1].is_some());
    assert!(character.has_class_feature("Diamond Soul"));
    assert!(character.spell_resistance >= 30);
    Ok(())
}

#[test]
fn test_same_options_and_seed_reproduce_the_sheet() -> NpcGenResult<()> {
    let render = || -> NpcGenResult<String> {
        let mut rng = StdRng::seed_from_u64(2024);
        let config = CharacterOptions::default().resolve(2024, &mut rng)?;
        let character = generate(&config)?;
        CharacterSheet::new(&character).to_json()
    };
    assert_eq!(render()?, render()?);
    Ok(())
}

#[test]
fn test_every_race_and_class_generates() -> NpcGenResult<()> {
    let mut rng = StdRng::seed_from_u64(5);
    for race in Race::ALL {
        for class in CharClass::ALL {
            let options = CharacterOptions {
                race: Some(*race),
                class: Some(*class),
                multiclass: Some(false),
                ..CharacterOptions::default()
            };
            let alignment = race
                .spec()
                .allowed_alignments()
                .into_iter()
                .find(|a| class.allows_alignment(*a));
            let Some(alignment) = alignment else { continue };
            let options = CharacterOptions {
                alignment: Some(alignment),
                ..options
            };
            let config = options.resolve(7, &mut rng)?;
            let character = generate(&config)?;
            assert_eq!(character.classes, vec![*class]);
            assert!(character.hp >= 1);
        }
    }
    Ok(())
}

#[test]
fn test_every_class_alone_resolves_and_generates() -> NpcGenResult<()> {
    for class in CharClass::ALL {
        let options = CharacterOptions {
            class: Some(*class),
            ..CharacterOptions::default()
        };
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = options.resolve(seed, &mut rng)?;
            assert_eq!(config.classes[0], *class);
            let character = generate(&config)?;
            assert!(class.allows_alignment(character.alignment));
        }
    }
    Ok(())
}
