//! Attribute and derived-stat calculator.
//!
//! Every function here recomputes its outputs from stored components, so
//! running the calculator again after a mutation never double counts.

use super::{Character, ClassFeature};
use crate::rules::{skill_spec, Ability, Save, LAY_ON_HANDS, QUIVERING_PALM, SMITE_EVIL, UNCANNY_DODGE};

/// Attack bonus of each of the four attack slots.
///
/// Slot one always carries `bab`. Later slots step down by 5 and are
/// `None` once the stepped value is no longer above 1.
///
/// # Examples
///
/// ```
/// use npcgen::attack_table;
///
/// assert_eq!(attack_table(1), [Some(1), None, None, None]);
/// assert_eq!(attack_table(11), [Some(11), Some(6), None, None]);
/// ```
pub fn attack_table(bab: i32) -> [Option<i32>; 4] {
    let mut attacks = [None; 4];
    for (slot, attack) in attacks.iter_mut().enumerate() {
        let value = bab - 5 * slot as i32;
        if slot == 0 || value > 1 {
            *attack = Some(value);
        }
    }
    attacks
}

impl Character {
    /// Recomputes every modifier from the current scores.
    ///
    /// A changed constitution modifier adjusts hit points for all
    /// `current_level` levels gained so far. Returns the modifier change.
    pub fn update_ability_modifiers(&mut self, current_level: u32) -> i32 {
        let old_con = self.ability_mods.con;
        self.ability_mods = self.abilities.modifiers();
        let change = self.ability_mods.con - old_con;
        self.hp += change * current_level as i32;
        change
    }

    /// Recomputes every derived total: armor class, saves, skill ability
    /// modifiers, scaling class feature texts, speed, grapple, initiative
    /// and attacks.
    pub fn update_derived(&mut self) {
        self.update_armor_class();
        self.update_saves();
        self.update_skill_modifiers();
        self.update_class_feature_texts();
        self.update_speed();
        self.grapple =
            self.bab + self.ability_mods.str + self.size.grapple_adjustment() + self.grapple_bonus;
        self.initiative = self.ability_mods.dex + self.initiative_bonus;
        self.attacks = attack_table(self.bab);
    }

    fn update_armor_class(&mut self) {
        let unarmored = if self.wears_armor {
            0
        } else if self.wisdom_to_ac {
            self.ac_unarmored_bonus + self.ability_mods.wis
        } else {
            self.ac_unarmored_bonus
        };

        let ac = &mut self.armor_class;
        ac.modifiers.dex = self.ability_mods.dex;
        ac.modifiers.size = self.size.armor_class_adjustment();
        ac.base = 10 + unarmored;

        let m = ac.modifiers;
        ac.total = ac.base + m.armor + m.shield + m.dex + m.size + m.natural + m.deflect;
        ac.touch = ac.base + m.dex + m.size;
        ac.flat_footed = if self.class_features.contains_key(UNCANNY_DODGE) {
            ac.total
        } else {
            ac.total - m.dex
        };
    }

    fn update_saves(&mut self) {
        let charisma = if self.charisma_to_saves {
            self.ability_mods.cha
        } else {
            0
        };
        for save in Save::ALL {
            let ability = self.ability_mods.get(save.key_ability());
            let throw = self.save_mut(*save);
            throw.ability = ability;
            throw.charisma = charisma;
            throw.total = throw.base + throw.ability + throw.magic + throw.misc + throw.charisma;
        }
    }

    fn update_skill_modifiers(&mut self) {
        let mods = self.ability_mods;
        for (name, skill) in self.skills.iter_mut() {
            skill.ability_mod = skill_spec(name)
                .and_then(|spec| spec.key_ability)
                .map_or(0, |ability| mods.get(ability));
        }
    }

    /// Rewrites class features whose text depends on current modifiers.
    fn update_class_feature_texts(&mut self) {
        let cha = self.ability_mods.cha;
        let wis = self.ability_mods.wis;

        if cha > 0 {
            rewrite(&mut self.class_features, LAY_ON_HANDS, |level| {
                format!(
                    "Heal {} HPs/day (may be used in small portions)",
                    cha * level as i32
                )
            });
        }
        rewrite(&mut self.class_features, SMITE_EVIL, |level| {
            format!(
                "+{} to hit, +{} to dmg vs. evil ({}/day)",
                cha,
                level,
                level / 5 + 1
            )
        });
        rewrite(&mut self.class_features, QUIVERING_PALM, |level| {
            format!(
                "Enemy must do a successful fortitude save vs. {} or die (1/week)",
                level as i32 / 2 + wis + 10
            )
        });
    }

    fn update_speed(&mut self) {
        let unarmored = if self.wears_armor {
            0
        } else {
            self.unarmored_speed_bonus
        };
        self.speed = self.speed_base + self.speed_bonus + unarmored;
    }

    /// Sum of `ability` adjustments from race and age.
    pub fn ability_adjustment(&self, ability: Ability) -> i32 {
        self.ability_adjustments.get(ability)
    }
}

fn rewrite(
    features: &mut std::collections::BTreeMap<String, ClassFeature>,
    name: &str,
    describe: impl Fn(u32) -> String,
) {
    if let Some(feature) = features.get_mut(name) {
        if let Some(level) = feature.level {
            feature.description = describe(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample;
    use super::*;
    use crate::character::AbilityScores;

    #[test]
    fn test_attack_table_steps() {
        assert_eq!(attack_table(0), [Some(0), None, None, None]);
        assert_eq!(attack_table(6), [Some(6), None, None, None]);
        assert_eq!(attack_table(7), [Some(7), Some(2), None, None]);
        assert_eq!(
            attack_table(20),
            [Some(20), Some(15), Some(10), Some(5)]
        );
        assert_eq!(attack_table(16), [Some(16), Some(11), Some(6), None]);
    }

    #[test]
    fn test_constitution_change_is_retroactive() {
        let mut character = sample();
        character.abilities = AbilityScores::new(10, 10, 12, 10, 10, 10);
        character.update_ability_modifiers(0);
        character.hp = 40;

        character.abilities.con = 14;
        let change = character.update_ability_modifiers(6);
        assert_eq!(change, 1);
        assert_eq!(character.hp, 46);

        character.abilities.con = 10;
        character.update_ability_modifiers(6);
        assert_eq!(character.hp, 34);
    }

    #[test]
    fn test_armor_class_parts() {
        let mut character = sample();
        character.abilities = AbilityScores::new(10, 14, 10, 16, 10, 10);
        character.update_ability_modifiers(0);
        character.armor_class.modifiers.natural = 2;
        character.ac_unarmored_bonus = 1;
        character.update_derived();

        let ac = character.armor_class;
        assert_eq!(ac.base, 11);
        assert_eq!(ac.total, 15);
        assert_eq!(ac.touch, 13);
        assert_eq!(ac.flat_footed, 13);

        character.wisdom_to_ac = true;
        character.set_class_feature(UNCANNY_DODGE, "Retains DEX bonus if caught Flat-footed");
        character.update_derived();
        assert_eq!(character.armor_class.total, 18);
        assert_eq!(character.armor_class.flat_footed, 18);
    }

    #[test]
    fn test_saves_and_charisma() {
        let mut character = sample();
        character.abilities = AbilityScores::new(10, 12, 14, 8, 10, 16);
        character.update_ability_modifiers(0);
        character.save_mut(Save::Fort).base = 4;
        character.save_mut(Save::Will).misc = 2;
        character.update_derived();
        assert_eq!(character.save(Save::Fort).total, 6);
        assert_eq!(character.save(Save::Ref).total, 1);
        assert_eq!(character.save(Save::Will).total, 1);

        character.charisma_to_saves = true;
        character.update_derived();
        character.update_derived();
        assert_eq!(character.save(Save::Fort).total, 9);
        assert_eq!(character.save(Save::Will).charisma, 3);
    }

    #[test]
    fn test_paladin_texts_follow_modifiers() {
        let mut character = sample();
        character.abilities = AbilityScores::new(16, 10, 14, 10, 10, 14);
        character.update_ability_modifiers(0);
        character.grant_class_feature_text(LAY_ON_HANDS, 10, "");
        character.grant_class_feature_text(SMITE_EVIL, 10, "3/day");
        character.update_derived();

        assert_eq!(
            character.class_feature(LAY_ON_HANDS),
            Some("Heal 20 HPs/day (may be used in small portions)")
        );
        assert_eq!(
            character.class_feature(SMITE_EVIL),
            Some("+2 to hit, +10 to dmg vs. evil (3/day)")
        );
    }

    #[test]
    fn test_grapple_speed_initiative() {
        let mut character = sample();
        character.abilities = AbilityScores::new(14, 16, 10, 10, 10, 10);
        character.update_ability_modifiers(0);
        character.bab = 3;
        character.grapple_bonus = 4;
        character.speed_base = 30;
        character.unarmored_speed_bonus = 10;
        character.initiative_bonus = 4;
        character.update_derived();

        assert_eq!(character.grapple, 9);
        assert_eq!(character.speed, 40);
        assert_eq!(character.initiative, 7);

        character.wears_armor = true;
        character.update_derived();
        assert_eq!(character.speed, 30);
    }

    #[test]
    fn test_skill_modifiers_follow_key_ability() {
        let mut character = sample();
        character.abilities = AbilityScores::new(10, 10, 10, 10, 18, 10);
        character.update_ability_modifiers(0);
        character.update_derived();
        assert_eq!(character.skills["Appraise"].ability_mod, 4);
        assert_eq!(character.skills["Climb"].ability_mod, 0);
        assert_eq!(character.skills["Speak Language"].ability_mod, 0);
    }
}
