//! Ability scores and the modifier table.

use crate::rules::{Ability, AbilityAdjustments};
use serde::{Deserialize, Serialize};

/// Highest score the modifier table covers.
pub const MAX_TABULATED_SCORE: i32 = 50;

/// Modifier for scores 1..=50, indexed by `score - 1`.
///
/// Breakpoints sit on every even score: 1 gives -5, 2 and 3 give -4, 10 and
/// 11 give 0, up to +20 at 50.
const MODIFIER_TABLE: [i32; MAX_TABULATED_SCORE as usize] = build_modifier_table();

const fn build_modifier_table() -> [i32; MAX_TABULATED_SCORE as usize] {
    let mut table = [0; MAX_TABULATED_SCORE as usize];
    let mut modifier = -5;
    let mut score = 1;
    while score <= MAX_TABULATED_SCORE {
        if score % 2 == 0 {
            modifier += 1;
        }
        table[(score - 1) as usize] = modifier;
        score += 1;
    }
    table
}

/// Modifier of an ability score. Scores below the table clamp to its first
/// entry and scores above it to its last.
///
/// # Examples
///
/// ```
/// use npcgen::ability_modifier;
///
/// assert_eq!(ability_modifier(10), 0);
/// assert_eq!(ability_modifier(9), -1);
/// assert_eq!(ability_modifier(18), 4);
/// ```
pub fn ability_modifier(score: i32) -> i32 {
    let index = score.clamp(1, MAX_TABULATED_SCORE) - 1;
    MODIFIER_TABLE[index as usize]
}

/// Six values keyed by ability. Holds raw scores, modifiers or adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub wis: i32,
    pub int: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub const fn new(str: i32, dex: i32, con: i32, wis: i32, int: i32, cha: i32) -> Self {
        Self {
            str,
            dex,
            con,
            wis,
            int,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Wis => self.wis,
            Ability::Int => self.int,
            Ability::Cha => self.cha,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Str => &mut self.str,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Wis => &mut self.wis,
            Ability::Int => &mut self.int,
            Ability::Cha => &mut self.cha,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        *self.get_mut(ability) = value;
    }

    /// Raises `ability` by one.
    pub fn increase(&mut self, ability: Ability) {
        *self.get_mut(ability) += 1;
    }

    /// Modifier of every score in this set.
    pub fn modifiers(&self) -> AbilityScores {
        let mut mods = AbilityScores::default();
        for ability in Ability::ALL {
            mods.set(*ability, ability_modifier(self.get(*ability)));
        }
        mods
    }

    /// Values in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.iter().map(move |a| (*a, self.get(*a)))
    }
}

impl From<AbilityAdjustments> for AbilityScores {
    fn from(adj: AbilityAdjustments) -> Self {
        Self::new(adj.str, adj.dex, adj.con, adj.wis, adj.int, adj.cha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_modifier_breakpoints() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(2), -4);
        assert_eq!(ability_modifier(3), -4);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(50), 20);
    }

    #[test]
    fn test_modifier_clamps_outside_table() {
        assert_eq!(ability_modifier(0), -5);
        assert_eq!(ability_modifier(-4), -5);
        assert_eq!(ability_modifier(60), 20);
    }

    #[test]
    fn test_scores_accessors() {
        let mut scores = AbilityScores::new(10, 12, 14, 8, 16, 3);
        scores.increase(Ability::Wis);
        assert_eq!(scores.get(Ability::Wis), 9);

        let mods = scores.modifiers();
        assert_eq!(mods.int, 3);
        assert_eq!(mods.cha, -4);
        assert_eq!(scores.iter().count(), 6);
    }

    proptest! {
        #[test]
        fn test_modifier_is_monotonic(score in 1i32..50) {
            prop_assert!(ability_modifier(score) <= ability_modifier(score + 1));
        }

        #[test]
        fn test_modifier_matches_halved_offset(score in 1i32..=50) {
            prop_assert_eq!(ability_modifier(score), (score - 10).div_euclid(2));
        }
    }
}
