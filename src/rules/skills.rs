//! Skill table and per-class class-skill lists.

use super::{Ability, CharClass};
use crate::{NpcGenError, NpcGenResult};

/// One row of the skill table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillSpec {
    pub name: &'static str,
    /// One flag per class of [`CLASS_FLAG_ORDER`]: `C` for a class skill,
    /// `x` for cross-class
    pub class_flags: &'static str,
    pub untrained: bool,
    /// `None` for skills no ability modifies
    pub key_ability: Option<Ability>,
    pub armor_check_multiplier: i32,
}

/// Standard classes in the column order of `SkillSpec::class_flags`.
pub const CLASS_FLAG_ORDER: [CharClass; 11] = [
    CharClass::Barbarian,
    CharClass::Bard,
    CharClass::Cleric,
    CharClass::Druid,
    CharClass::Fighter,
    CharClass::Monk,
    CharClass::Paladin,
    CharClass::Ranger,
    CharClass::Rogue,
    CharClass::Sorcerer,
    CharClass::Wizard,
];

const fn skill(
    name: &'static str,
    class_flags: &'static str,
    untrained: bool,
    key_ability: Option<Ability>,
    armor_check_multiplier: i32,
) -> SkillSpec {
    SkillSpec {
        name,
        class_flags,
        untrained,
        key_ability,
        armor_check_multiplier,
    }
}

const STR: Option<Ability> = Some(Ability::Str);
const DEX: Option<Ability> = Some(Ability::Dex);
const CON: Option<Ability> = Some(Ability::Con);
const WIS: Option<Ability> = Some(Ability::Wis);
const INT: Option<Ability> = Some(Ability::Int);
const CHA: Option<Ability> = Some(Ability::Cha);

/// Every skill, sorted by name.
pub static SKILLS: &[SkillSpec] = &[
    skill("Appraise", "xCxxxxxxCxx", true, INT, 0),
    skill("Balance", "xCxxxCxxCxx", true, DEX, 1),
    skill("Bluff", "xCxxxxxxCCx", true, CHA, 0),
    skill("Climb", "CCxxCCxCCxx", true, STR, 1),
    skill("Concentration", "xCCCxCCCxCC", true, CON, 0),
    skill("Craft (alchemy)", "CCCCCCCCCCC", true, INT, 0),
    skill("Craft (metals)", "CCCCCCCCCCC", true, INT, 0),
    skill("Craft (various)", "CCCCCCCCCCC", true, INT, 0),
    skill("Craft (wood/stone)", "CCCCCCCCCCC", true, INT, 0),
    skill("Decipher Script", "xCxxxxxxCxC", false, INT, 0),
    skill("Diplomacy", "xCCCxCCxCxx", true, CHA, 0),
    skill("Disable Device", "xxxxxxxxCxx", false, INT, 0),
    skill("Disguise", "xCxxxxxxCxx", true, CHA, 0),
    skill("Escape Artist", "xCxxxCxxCxx", true, DEX, 1),
    skill("Forgery", "xxxxxxxxCxx", true, INT, 0),
    skill("Gather Information", "xCxxxxxxCxx", true, CHA, 0),
    skill("Handle Animal", "CxxCCxCCxxx", false, CHA, 0),
    skill("Heal", "xxCCxxCCxxx", true, WIS, 0),
    skill("Hide", "xCxxxCxCCxx", true, DEX, 1),
    skill("Intimidate", "CxxxCxxxCxx", true, CHA, 0),
    skill("Jump", "CCxxCCxCCxx", true, STR, 1),
    skill("Knowledge (arcana)", "xCCxxCxxxCC", false, INT, 0),
    skill("Knowledge (architecture and engineering)", "xCxxxxxxxxC", false, INT, 0),
    skill("Knowledge (dungeoneering)", "xCxxxxxCxxC", false, INT, 0),
    skill("Knowledge (geography)", "xCxxxxxCxxC", false, INT, 0),
    skill("Knowledge (history)", "xCCxxxxxxxC", false, INT, 0),
    skill("Knowledge (local)", "xCxxxxxxCxC", false, INT, 0),
    skill("Knowledge (nature)", "xCxCxxxCxxC", false, INT, 0),
    skill("Knowledge (nobility and royalty)", "xCxxxxCxxxC", false, INT, 0),
    skill("Knowledge (religion)", "xCCxxCCxxxC", false, INT, 0),
    skill("Knowledge (the planes)", "xCCxxxxxxxC", false, INT, 0),
    skill("Listen", "CCxCxCxCCxx", true, WIS, 0),
    skill("Move Silently", "xCxxxCxCCxx", true, DEX, 1),
    skill("Open Lock", "xxxxxxxxCxx", false, DEX, 0),
    skill("Perform", "xCxxxCxxCxx", true, CHA, 0),
    skill("Profession", "xCCCxCCCCCC", false, WIS, 0),
    skill("Ride", "CxxCCxCCxxx", true, DEX, 0),
    skill("Search", "xxxxxxxCCxx", true, INT, 0),
    skill("Sense Motive", "xCxxxCCxCxx", true, WIS, 0),
    skill("Sleight of Hand", "xCxxxxxxCxx", false, DEX, 1),
    skill("Speak Language", "xCxxxxxxxxx", false, None, 0),
    skill("Spellcraft", "xCCCxxxxxCC", false, INT, 0),
    skill("Spot", "xxxCxCxCCxx", true, WIS, 0),
    skill("Survival", "CxxCxxxCxxx", true, WIS, 0),
    skill("Swim", "CCxCCCxCCxx", true, STR, 2),
    skill("Tumble", "xCxxxCxxCxx", false, DEX, 1),
    skill("Use Magic Device", "xCxxxxxxCxx", false, CHA, 0),
    skill("Use Rope", "xxxxxxxCCxx", true, DEX, 0),
];

/// Skill groups usable in class-skill overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillGroup {
    Knowledge,
    Craft,
    All,
}

impl SkillGroup {
    fn contains(self, name: &str) -> bool {
        match self {
            SkillGroup::Knowledge => name.starts_with("Knowledge"),
            SkillGroup::Craft => name.starts_with("Craft"),
            SkillGroup::All => true,
        }
    }
}

/// Class skills for classes outside the flag columns.
struct SkillOverride {
    groups: &'static [SkillGroup],
    skills: &'static [&'static str],
}

fn skill_override(class: CharClass) -> Option<SkillOverride> {
    let entry = match class {
        CharClass::Adept => SkillOverride {
            groups: &[SkillGroup::Knowledge, SkillGroup::Craft],
            skills: &[
                "Concentration",
                "Handle Animal",
                "Heal",
                "Profession",
                "Spellcraft",
                "Survival",
            ],
        },
        CharClass::Expert => SkillOverride {
            groups: &[SkillGroup::All],
            skills: &[],
        },
        CharClass::Warrior => SkillOverride {
            groups: &[],
            skills: &["Climb", "Handle Animal", "Intimidate", "Jump", "Ride", "Swim"],
        },
        CharClass::Aristocrat => SkillOverride {
            groups: &[SkillGroup::Knowledge],
            skills: &[
                "Appraise",
                "Bluff",
                "Diplomacy",
                "Disguise",
                "Forgery",
                "Gather Information",
                "Handle Animal",
                "Intimidate",
                "Listen",
                "Perform",
                "Ride",
                "Sense Motive",
                "Speak Language",
                "Spot",
                "Swim",
                "Survival",
            ],
        },
        CharClass::Commoner => SkillOverride {
            groups: &[SkillGroup::Craft],
            skills: &[
                "Climb",
                "Handle Animal",
                "Jump",
                "Listen",
                "Profession",
                "Ride",
                "Spot",
                "Swim",
                "Use Rope",
            ],
        },
        _ => return None,
    };
    Some(entry)
}

pub fn skill_spec(name: &str) -> Option<&'static SkillSpec> {
    SKILLS.iter().find(|s| s.name == name)
}

/// Class skills of `class`, in skill-table order.
pub fn class_skills(class: CharClass) -> Vec<&'static str> {
    if let Some(entry) = skill_override(class) {
        return SKILLS
            .iter()
            .filter(|s| {
                entry.groups.iter().any(|g| g.contains(s.name)) || entry.skills.contains(&s.name)
            })
            .map(|s| s.name)
            .collect();
    }

    let column = CLASS_FLAG_ORDER.iter().position(|c| *c == class);
    SKILLS
        .iter()
        .filter(|s| column.map_or(false, |i| s.class_flags.as_bytes().get(i) == Some(&b'C')))
        .map(|s| s.name)
        .collect()
}

/// Skills that can be used without ranks.
pub fn untrained_skills() -> Vec<&'static str> {
    SKILLS.iter().filter(|s| s.untrained).map(|s| s.name).collect()
}

pub(crate) fn validate_skill_tables() -> NpcGenResult<()> {
    for spec in SKILLS {
        if spec.class_flags.len() != CLASS_FLAG_ORDER.len()
            || spec.class_flags.bytes().any(|b| b != b'C' && b != b'x')
        {
            return Err(NpcGenError::RuleTable(format!(
                "skill \"{}\" has malformed class flags \"{}\"",
                spec.name, spec.class_flags
            )));
        }
    }
    for class in CharClass::ALL {
        if let Some(entry) = skill_override(*class) {
            for name in entry.skills {
                super::ensure_known_skill(name, &format!("class skills of \"{}\"", class))?;
            }
        }
        if class_skills(*class).is_empty() {
            return Err(NpcGenError::RuleTable(format!(
                "class \"{}\" has no class skills",
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
    fn test_flag_columns() {
        let rogue = class_skills(CharClass::Rogue);
        assert!(rogue.contains(&"Disable Device"));
        assert!(rogue.contains(&"Open Lock"));
        assert!(!rogue.contains(&"Spellcraft"));

        let wizard = class_skills(CharClass::Wizard);
        assert!(wizard.contains(&"Knowledge (the planes)"));
        assert!(!wizard.contains(&"Climb"));
    }

    #[test]
    fn test_overrides() {
        assert_eq!(class_skills(CharClass::Expert).len(), SKILLS.len());

        let adept = class_skills(CharClass::Adept);
        assert!(adept.contains(&"Knowledge (arcana)"));
        assert!(adept.contains(&"Craft (metals)"));
        assert!(adept.contains(&"Heal"));
        assert!(!adept.contains(&"Climb"));

        assert_eq!(class_skills(CharClass::Warrior).len(), 6);
    }

    #[test]
    fn test_untrained() {
        let untrained = untrained_skills();
        assert!(untrained.contains(&"Climb"));
        assert!(!untrained.contains(&"Open Lock"));
        assert!(!untrained.contains(&"Knowledge (nature)"));
    }

    #[test]
    fn test_speak_language_has_no_key_ability() {
        assert_eq!(skill_spec("Speak Language").map(|s| s.key_ability), Some(None));
        assert!(skill_spec("Basket Weaving").is_none());
    }

    #[test]
    fn test_skill_table_is_sorted() {
        assert!(SKILLS.windows(2).all(|w| w[0].name < w[1].name));
    }
}
