//! Feat catalogs and the per-class pools drawn from them.
//!
//! A catalog entry pairs a name and description with its prerequisites and
//! the effect applied when it is granted. Pools are merged catalogs; on a
//! name clash the later catalog wins.

use super::{Ability, CharClass, Save, SaveCategory};
use crate::{NpcGenError, NpcGenResult};
use std::collections::BTreeMap;

/// A condition checked before a feat is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    MinAbility(Ability, i32),
    MinBab(i32),
    /// Level in the class currently being advanced
    MinClassLevel(u32),
    HasFeat(&'static str),
    /// Accumulated sneak attack dice
    MinSneakAttack(i32),
}

/// Epic feats that can be taken repeatedly and are recorded with a
/// running ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpicFeat {
    ArmorSkin,
    Toughness,
    SneakAttack,
    /// Raises the first or second priority ability
    AbilityIncrease,
    DamageReduction,
    Initiative,
    FastHealing,
    SkillFocus,
    EnergyResistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorWeight {
    Light,
    Medium,
    Heavy,
}

impl ArmorWeight {
    pub fn name(self) -> &'static str {
        match self {
            ArmorWeight::Light => "light",
            ArmorWeight::Medium => "medium",
            ArmorWeight::Heavy => "heavy",
        }
    }
}

/// What granting a feat does to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatEffect {
    /// Recorded with its description, nothing else
    Text,
    ImprovedGrapple,
    /// Needs a weapon proficiency; the picked proficiency is appended to the name
    WeaponFocus,
    Epic(EpicFeat),
    Polyglot,
    SkillBonus(&'static [(&'static str, i32)]),
    SaveBonus(&'static [(Save, i32)]),
    SpecialSaveBonus(SaveCategory, &'static str, i32),
    ArmorProficiency(ArmorWeight),
    ShieldProficiency,
    ImprovedInitiative,
    Run,
    WeaponProficiency(&'static str),
    Toughness,
    SpellPenetration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatDef {
    pub name: &'static str,
    pub description: &'static str,
    pub requires: &'static [Requirement],
    pub effect: FeatEffect,
}

const fn feat(name: &'static str, description: &'static str) -> FeatDef {
    FeatDef {
        name,
        description,
        requires: &[],
        effect: FeatEffect::Text,
    }
}

const fn gated(name: &'static str, description: &'static str, requires: &'static [Requirement]) -> FeatDef {
    FeatDef {
        name,
        description,
        requires,
        effect: FeatEffect::Text,
    }
}

const fn effect(name: &'static str, description: &'static str, effect: FeatEffect) -> FeatDef {
    FeatDef {
        name,
        description,
        requires: &[],
        effect,
    }
}

const fn epic(
    name: &'static str,
    description: &'static str,
    requires: &'static [Requirement],
    kind: EpicFeat,
) -> FeatDef {
    FeatDef {
        name,
        description,
        requires,
        effect: FeatEffect::Epic(kind),
    }
}

use Ability::*;
use Requirement::*;

pub static GENERAL_FEATS: &[FeatDef] = &[
    effect("Acrobatic", "", FeatEffect::SkillBonus(&[("Jump", 2), ("Tumble", 2)])),
    effect("Agile", "", FeatEffect::SkillBonus(&[("Balance", 2), ("Escape Artist", 2)])),
    effect("Alertness", "", FeatEffect::SkillBonus(&[("Listen", 2), ("Spot", 2)])),
    effect(
        "Animal Affinity",
        "",
        FeatEffect::SkillBonus(&[("Ride", 2), ("Handle Animal", 2)]),
    ),
    effect("Armor Profiency (light)", "", FeatEffect::ArmorProficiency(ArmorWeight::Light)),
    effect("Armor Profiency (medium)", "", FeatEffect::ArmorProficiency(ArmorWeight::Medium)),
    effect("Armor Profiency (heavy)", "", FeatEffect::ArmorProficiency(ArmorWeight::Heavy)),
    effect("Athletic", "", FeatEffect::SkillBonus(&[("Climb", 2), ("Swim", 2)])),
    feat(
        "Blind-fight",
        "When fighting concealed creatures, reroll misses once. Half penalties when blinded",
    ),
    feat("Combat reflexes", "Additional attack of opportunity"),
    effect("Deceitful", "", FeatEffect::SkillBonus(&[("Disguise", 2), ("Forgery", 2)])),
    effect(
        "Deft hands",
        "",
        FeatEffect::SkillBonus(&[("Use Rope", 2), ("Sleight of Hand", 2)]),
    ),
    effect(
        "Endurance",
        "",
        FeatEffect::SpecialSaveBonus(SaveCategory::General, "vs. non-lethal", 4),
    ),
    effect("Great Fortitude", "", FeatEffect::SaveBonus(&[(Save::Fort, 2)])),
    effect("Improved initiative", "(+4 to initiative)", FeatEffect::ImprovedInitiative),
    effect("Iron Will", "", FeatEffect::SaveBonus(&[(Save::Will, 2)])),
    effect("Lightning Reflexes", "", FeatEffect::SaveBonus(&[(Save::Ref, 2)])),
    feat(
        "Point Blank Shot",
        "+1 bonus on ranged attack and damage within 30 ft.",
    ),
    effect("Run", "Run speed increased", FeatEffect::Run),
    effect(
        "Shield Profiency",
        "No armor check penalty on attack rolls",
        FeatEffect::ShieldProficiency,
    ),
    effect(
        "Simple Weapon Profiency",
        "No -4 penalty with simple weapons",
        FeatEffect::WeaponProficiency("simple"),
    ),
    effect(
        "Martial Weapon Profiency",
        "No -4 penalty with martial weapons",
        FeatEffect::WeaponProficiency("martial"),
    ),
    effect(
        "Exotic Weapon Profiency",
        "No -4 penalty with exotic weapons",
        FeatEffect::WeaponProficiency("exotic"),
    ),
    effect("Toughness", "(+3 hitpoints)", FeatEffect::Toughness),
];

const SPELL_PENETRATION: FeatDef = effect(
    "Spell Penetration",
    "+2 to checks breaking enemy spell resistance",
    FeatEffect::SpellPenetration,
);

pub static MAGIC_FEATS: &[FeatDef] = &[
    feat("Augment Summoning", "Summoned monsters have +4 STR/CON"),
    feat("Combat Casting", "+4 concentration when casting defensively"),
    feat("Eschew Materials", "Cast spells without material components"),
    feat("Improved counterspell", "Counterspell with spell of same school"),
    SPELL_PENETRATION,
];

pub static METAMAGIC_FEATS: &[FeatDef] = &[
    feat("Empower Spell", "Increase spell's variable, numeric effects by 50%"),
    feat("Enlarge Spell", "Double spell's range"),
    feat("Extend Spell", "Double spell's duration"),
    feat("Heighten Spell", "Cast spells as higher level"),
    feat("Maximize Spell", "Maximize spell's variable, numeric effects"),
    feat("Quicken Spell", "Cast spells as free action"),
    feat("Silent Spell", "Cast spells without verbal components"),
    feat("Still Spell", "Cast spells without somatic components"),
    feat("Widen Spell", "Double spell's area"),
];

pub static FIGHTER_BONUS_FEATS: &[FeatDef] = &[
    gated(
        "Power Attack",
        "Trade attack bonus for damage (up to base attack bonus)",
        &[MinAbility(Str, 13)],
    ),
    gated(
        "Cleave",
        "Extra melee attack after killing target",
        &[HasFeat("Power Attack")],
    ),
    gated(
        "Great Cleave",
        "No limit to cleave attacks each round",
        &[HasFeat("Cleave"), MinBab(4)],
    ),
    gated(
        "Improved Shield Bash",
        "Retain shield bonus to AC when bashing",
        &[HasFeat("Shield Profiency")],
    ),
    gated(
        "Two Weapon Fighting",
        "Reduce two-weapon fighting penalties by 2",
        &[MinAbility(Dex, 15)],
    ),
    gated(
        "Two Weapon Defense",
        "Off-hand weapon grants +1 shield bonus to AC",
        &[HasFeat("Two Weapon Fighting")],
    ),
    gated(
        "Impr. Two Weapon Fighting",
        "Gain second off-hand attack",
        &[MinAbility(Dex, 17), HasFeat("Two Weapon Fighting"), MinBab(6)],
    ),
    gated(
        "Greater Two Weapon Fighting",
        "Gain second off-hand attack",
        &[
            MinAbility(Dex, 19),
            HasFeat("Impr. Two Weapon Fighting"),
            MinBab(11),
        ],
    ),
    FeatDef {
        name: "Weapon Focus",
        description: "(+1 with selected weapon type)",
        requires: &[MinBab(1)],
        effect: FeatEffect::WeaponFocus,
    },
];

pub static WIZARD_BONUS_FEATS: &[FeatDef] = &[feat(
    "Spell Mastery",
    "Can prepare some spells without spell book",
)];

pub static MONK_BONUS_FEATS: &[FeatDef] = &[
    feat(
        "Improved Unarmed Strike",
        "Does not provoke attacks of opportunity when unarmed",
    ),
    effect("Improved grapple", "(+4 to grapple checks)", FeatEffect::ImprovedGrapple),
    gated(
        "Stunning Fist",
        "May attempt to stun opponents with unarmed strikes",
        &[MinClassLevel(2)],
    ),
    gated(
        "Combat Reflexes",
        "May make a number of additional attacks of opportunity equal to DEX bonus",
        &[MinClassLevel(2)],
    ),
    gated(
        "Deflect Arrows",
        "May dodge ranged attack once per round",
        &[MinClassLevel(2)],
    ),
    gated(
        "Improved Disarm",
        "Does not provoke AOO when disarming enemy",
        &[MinClassLevel(6)],
    ),
];

/// Non-bonus feats past level 20.
pub static EPIC_FEATS: &[FeatDef] = &[epic("Great", "(Ability score bonus)", &[], EpicFeat::AbilityIncrease)];

const ARMOR_SKIN: FeatDef = epic("Armor Skin", "(Improved natural armor)", &[], EpicFeat::ArmorSkin);
const ENERGY_RESISTANCE: FeatDef = epic(
    "Energy Resistance",
    "(Elemental damage reduction)",
    &[],
    EpicFeat::EnergyResistance,
);
const IMPROVED_COMBAT_CASTING: FeatDef = gated(
    "Impr. Combat Casting",
    "Does not incur AOO when casting spells",
    &[HasFeat("Combat Casting")],
);
const GREATER_SPELL_PENETRATION: FeatDef = gated(
    "Greater Spell Penetration",
    "Additional +2 to checks breaking enemy spell resistance",
    &[HasFeat("Spell Penetration")],
);
const EPIC_SPELL_PENETRATION: FeatDef = gated(
    "Epic Spell Penetration",
    "Additional +2 to checks breaking enemy spell resistance",
    &[HasFeat("Greater Spell Penetration")],
);
const EPIC_SKILL_FOCUS: FeatDef = epic(
    "Epic Skill Focus",
    "(Bonus to skill checks)",
    &[],
    EpicFeat::SkillFocus,
);

pub static FIGHTER_EPIC_BONUS_FEATS: &[FeatDef] = &[
    ARMOR_SKIN,
    epic("Epic Toughness", "(Additional hitpoints)", &[], EpicFeat::Toughness),
    epic("Superior Initiative", "(+8 to initiative)", &[], EpicFeat::Initiative),
    ENERGY_RESISTANCE,
    gated(
        "Perfect Two Weapon Fighting",
        "The character can make as many attacks with his or her off-hand weapon as with his or her primary weapon, using the same base attack bonus.",
        &[HasFeat("Greater Two Weapon Fighting"), MinAbility(Dex, 25)],
    ),
    epic(
        "Epic Damage Reduction",
        "(Increased damage reduction)",
        &[],
        EpicFeat::DamageReduction,
    ),
];

pub static ROGUE_EPIC_BONUS_FEATS: &[FeatDef] = &[
    epic(
        "Epic Sneak Attack",
        "Improved Sneak Attack",
        &[MinSneakAttack(8)],
        EpicFeat::SneakAttack,
    ),
    gated(
        "Legendary Climber",
        "May ignore all penalties applied for accelerated climbing",
        &[MinAbility(Dex, 21)],
    ),
    gated(
        "Sneak Attack of Opportunity",
        "Attack of opportunities gain sneak attack bonus",
        &[MinSneakAttack(8)],
    ),
    gated(
        "Combat Archery",
        "Enemies do not get AOO when using bow",
        &[HasFeat("Point Blank Shot")],
    ),
    gated(
        "Dexterous Will",
        "May use reflex save instead of will save once per round",
        &[MinAbility(Dex, 25)],
    ),
    gated(
        "Dexterous Fortitude",
        "May use reflex save instead of fortitude save once per round",
        &[MinAbility(Dex, 25)],
    ),
    EPIC_SKILL_FOCUS,
];

pub static CLERIC_EPIC_BONUS_FEATS: &[FeatDef] = &[
    ARMOR_SKIN,
    IMPROVED_COMBAT_CASTING,
    gated(
        "Planar Turning",
        "May turn outsiders as undead",
        &[MinAbility(Wis, 25), MinAbility(Cha, 25)],
    ),
    gated(
        "Undead Mastery",
        "The character may command up to ten times his or her level in HD of undead",
        &[MinAbility(Cha, 21)],
    ),
    SPELL_PENETRATION,
    GREATER_SPELL_PENETRATION,
    EPIC_SPELL_PENETRATION,
];

pub static DRUID_EPIC_BONUS_FEATS: &[FeatDef] = &[
    gated(
        "Wildshape (Colossal)",
        "May shapeshift into colossal animals",
        &[HasFeat("Wildshape (Gargantuan)")],
    ),
    gated(
        "Wildshape (Diminutive)",
        "May shapeshift into diminutive animals",
        &[],
    ),
    gated(
        "Wildshape (Gargantuan)",
        "May shapeshift into gargantuan animals",
        &[HasFeat("Wildshape (Huge)")],
    ),
    gated("Wildshape (Huge)", "May shapeshift into huge animals", &[]),
    gated(
        "Wildshape (Fine)",
        "May shapeshift into fine sized animals",
        &[HasFeat("Wildshape (Diminutive)")],
    ),
    gated(
        "Dragon Shape",
        "May shapeshift into Dragon. Maximum size is determined by Wildshape feats",
        &[MinAbility(Wis, 30)],
    ),
    epic(
        "Fast Healing",
        "(Improved HP regeneration)",
        &[MinAbility(Con, 25)],
        EpicFeat::FastHealing,
    ),
    ENERGY_RESISTANCE,
    SPELL_PENETRATION,
    GREATER_SPELL_PENETRATION,
    EPIC_SPELL_PENETRATION,
];

pub static WIZARD_EPIC_BONUS_FEATS: &[FeatDef] = &[
    IMPROVED_COMBAT_CASTING,
    SPELL_PENETRATION,
    GREATER_SPELL_PENETRATION,
    EPIC_SPELL_PENETRATION,
];

pub static BARD_EPIC_BONUS_FEATS: &[FeatDef] = &[
    IMPROVED_COMBAT_CASTING,
    EPIC_SKILL_FOCUS,
    FeatDef {
        name: "Polyglot",
        description: "Can speak all languages",
        requires: &[MinAbility(Int, 25)],
        effect: FeatEffect::Polyglot,
    },
];

const ALL_CATALOGS: &[&[FeatDef]] = &[
    GENERAL_FEATS,
    MAGIC_FEATS,
    METAMAGIC_FEATS,
    FIGHTER_BONUS_FEATS,
    WIZARD_BONUS_FEATS,
    MONK_BONUS_FEATS,
    EPIC_FEATS,
    FIGHTER_EPIC_BONUS_FEATS,
    ROGUE_EPIC_BONUS_FEATS,
    CLERIC_EPIC_BONUS_FEATS,
    DRUID_EPIC_BONUS_FEATS,
    WIZARD_EPIC_BONUS_FEATS,
    BARD_EPIC_BONUS_FEATS,
];

/// Class levels at which every class picks a feat from its general pool.
pub const GENERAL_FEAT_LEVELS: [u32; 14] = [1, 3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 36, 39];

/// A named set of candidate feats.
pub type FeatPool = BTreeMap<&'static str, &'static FeatDef>;

fn merge(catalogs: &[&'static [FeatDef]]) -> FeatPool {
    let mut pool = FeatPool::new();
    for catalog in catalogs {
        for def in catalog.iter() {
            pool.insert(def.name, def);
        }
    }
    pool
}

/// Feats a class picks from at general feat levels below 21.
pub fn general_feat_pool(class: CharClass) -> FeatPool {
    use CharClass::*;
    match class {
        Fighter | Barbarian | Paladin | Ranger | Rogue | Monk => {
            merge(&[GENERAL_FEATS, FIGHTER_BONUS_FEATS])
        }
        Cleric | Bard | Druid | Adept | Warrior => merge(&[
            GENERAL_FEATS,
            FIGHTER_BONUS_FEATS,
            MAGIC_FEATS,
            METAMAGIC_FEATS,
            GENERAL_FEATS,
        ]),
        Wizard | Sorcerer => merge(&[MAGIC_FEATS, METAMAGIC_FEATS, GENERAL_FEATS]),
        Commoner | Expert | Aristocrat => merge(&[GENERAL_FEATS]),
    }
}

/// Feats every class picks from at general feat levels from 21 on.
pub fn epic_feat_pool() -> FeatPool {
    merge(&[EPIC_FEATS])
}

/// Bonus feat pool for `class`, `None` when the class has no pool for the tier.
pub fn bonus_feat_pool(class: CharClass, epic: bool) -> Option<FeatPool> {
    use CharClass::*;
    let catalogs: &[&'static [FeatDef]] = match (class, epic) {
        (Wizard, false) => &[WIZARD_BONUS_FEATS, METAMAGIC_FEATS],
        (Monk, false) => &[MONK_BONUS_FEATS],
        (Fighter, false) => &[FIGHTER_BONUS_FEATS],
        (Fighter | Paladin | Monk | Barbarian | Ranger, true) => &[FIGHTER_EPIC_BONUS_FEATS],
        (Rogue, true) => &[ROGUE_EPIC_BONUS_FEATS],
        (Cleric, true) => &[CLERIC_EPIC_BONUS_FEATS],
        (Druid, true) => &[DRUID_EPIC_BONUS_FEATS],
        (Wizard | Sorcerer, true) => &[WIZARD_EPIC_BONUS_FEATS],
        (Bard, true) => &[BARD_EPIC_BONUS_FEATS],
        _ => return None,
    };
    Some(merge(catalogs))
}

/// Looks a feat up across every catalog.
pub fn feat_def(name: &str) -> Option<&'static FeatDef> {
    ALL_CATALOGS
        .iter()
        .flat_map(|catalog| catalog.iter())
        .find(|def| def.name == name)
}

pub(crate) fn validate_feat_catalogs() -> NpcGenResult<()> {
    for catalog in ALL_CATALOGS {
        for def in catalog.iter() {
            let context = format!("feat \"{}\"", def.name);
            for requirement in def.requires {
                if let HasFeat(required) = requirement {
                    if feat_def(required).is_none() {
                        return Err(NpcGenError::RuleTable(format!(
                            "{} requires unknown feat \"{}\"",
                            context, required
                        )));
                    }
                }
            }
            if let FeatEffect::SkillBonus(bonuses) = def.effect {
                for (skill, _) in bonuses {
                    super::ensure_known_skill(skill, &context)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warrior_pool_contains_combat_feats() {
        let pool = general_feat_pool(CharClass::Fighter);
        assert!(pool.contains_key("Power Attack"));
        assert!(pool.contains_key("Toughness"));
        assert!(!pool.contains_key("Empower Spell"));
    }

    #[test]
    fn test_mixed_pool() {
        let pool = general_feat_pool(CharClass::Cleric);
        assert!(pool.contains_key("Power Attack"));
        assert!(pool.contains_key("Empower Spell"));
        assert!(pool.contains_key("Spell Penetration"));
        assert_eq!(general_feat_pool(CharClass::Commoner).len(), GENERAL_FEATS.len());
    }

    #[test]
    fn test_bonus_pools_by_tier() {
        assert!(bonus_feat_pool(CharClass::Rogue, false).is_none());
        assert!(bonus_feat_pool(CharClass::Commoner, true).is_none());

        let wizard = bonus_feat_pool(CharClass::Wizard, false).unwrap();
        assert!(wizard.contains_key("Spell Mastery"));
        assert!(wizard.contains_key("Quicken Spell"));

        let paladin = bonus_feat_pool(CharClass::Paladin, true).unwrap();
        assert!(paladin.contains_key("Epic Toughness"));
    }

    #[test]
    fn test_general_feat_levels() {
        assert_eq!(GENERAL_FEAT_LEVELS[0], 1);
        assert!(GENERAL_FEAT_LEVELS.contains(&3));
        assert!(!GENERAL_FEAT_LEVELS.contains(&2));
        assert_eq!(GENERAL_FEAT_LEVELS[13], 39);
    }

    #[test]
    fn test_shared_definitions_resolve() {
        assert_eq!(
            feat_def("Armor Skin").map(|d| d.effect),
            Some(FeatEffect::Epic(EpicFeat::ArmorSkin))
        );
        assert!(feat_def("Greater Spell Penetration").is_some());
    }
}
