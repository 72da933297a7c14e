//! # Dice Engine
//!
//! The one rolling primitive every table uses: roll `repeat` dice of `die`
//! sides, add `per_roll` to each die, drop the lowest `drop` dice, sum the
//! rest and add `total`.
//!
//! Failures never propagate. A request that drops every die, or a malformed
//! parameter list, rolls 0.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common die sizes.
pub mod dice_sizes {
    pub const D100: i32 = 100;
    pub const D20: i32 = 20;
    pub const D12: i32 = 12;
    pub const D10: i32 = 10;
    pub const D8: i32 = 8;
    pub const D6: i32 = 6;
    pub const D4: i32 = 4;
}

/// Value returned by every failed roll.
pub const FAILED_ROLL: i32 = 0;

/// A complete roll request.
///
/// # Examples
///
/// ```
/// use npcgen::DiceRoll;
///
/// // 4d6, drop the lowest
/// let roll = DiceRoll::new(6, 4, 0, 0, 1);
/// let mut rng = rand::thread_rng();
/// let value = roll.roll(&mut rng);
/// assert!((3..=18).contains(&value));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Sides on each die
    pub die: i32,
    /// How many dice are rolled
    pub repeat: i32,
    /// Added to every individual die
    pub per_roll: i32,
    /// Added once to the final sum
    pub total: i32,
    /// How many of the lowest dice are discarded
    pub drop: i32,
}

impl DiceRoll {
    pub const fn new(die: i32, repeat: i32, per_roll: i32, total: i32, drop: i32) -> Self {
        Self {
            die,
            repeat,
            per_roll,
            total,
            drop,
        }
    }

    /// `repeat` plain dice of `die` sides.
    pub const fn plain(repeat: i32, die: i32) -> Self {
        Self::new(die, repeat, 0, 0, 0)
    }

    /// Builds a request from the five-element list form
    /// `[die, repeat, per_roll, total, drop]`.
    ///
    /// Returns `None` for the wrong length.
    pub fn from_slice(params: &[i32]) -> Option<Self> {
        match *params {
            [die, repeat, per_roll, total, drop] => {
                Some(Self::new(die, repeat, per_roll, total, drop))
            }
            _ => None,
        }
    }

    /// True when the request leaves at least one die to sum.
    pub fn is_rollable(&self) -> bool {
        self.die >= 1 && self.drop >= 0 && self.drop < self.repeat
    }

    /// Lowest possible result, or `FAILED_ROLL` when not rollable.
    pub fn min(&self) -> i32 {
        if !self.is_rollable() {
            return FAILED_ROLL;
        }
        self.total + (self.repeat - self.drop) * (1 + self.per_roll)
    }

    /// Highest possible result, or `FAILED_ROLL` when not rollable.
    pub fn max(&self) -> i32 {
        if !self.is_rollable() {
            return FAILED_ROLL;
        }
        self.total + (self.repeat - self.drop) * (self.die + self.per_roll)
    }

    /// Rolls the request.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        roll_dice(rng, self.die, self.repeat, self.per_roll, self.total, self.drop)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.repeat, self.die)?;
        if self.per_roll != 0 {
            write!(f, " ({:+} each)", self.per_roll)?;
        }
        if self.drop > 0 {
            write!(f, " drop {}", self.drop)?;
        }
        if self.total != 0 {
            write!(f, " {:+}", self.total)?;
        }
        Ok(())
    }
}

/// Rolls `repeat` dice of `die` sides, each increased by `per_roll`, drops
/// the lowest `drop`, sums the rest and adds `total`.
///
/// Returns `FAILED_ROLL` when `drop >= repeat` or the die has no sides.
///
/// # Examples
///
/// ```
/// use npcgen::{roll_dice, FAILED_ROLL};
///
/// let mut rng = rand::thread_rng();
/// assert_eq!(roll_dice(&mut rng, 6, 2, 0, 0, 2), FAILED_ROLL);
/// assert_eq!(roll_dice(&mut rng, 1, 3, 0, 5, 0), 8);
/// ```
pub fn roll_dice<R: Rng + ?Sized>(
    rng: &mut R,
    die: i32,
    repeat: i32,
    per_roll: i32,
    total: i32,
    drop: i32,
) -> i32 {
    if die < 1 || drop < 0 || drop >= repeat {
        return FAILED_ROLL;
    }

    let mut rolls: Vec<i32> = (0..repeat)
        .map(|_| rng.gen_range(1..=die) + per_roll)
        .collect();
    rolls.sort_unstable();

    total + rolls[drop as usize..].iter().sum::<i32>()
}

/// Rolls the five-element list form `[die, repeat, per_roll, total, drop]`.
///
/// A list of the wrong length rolls `FAILED_ROLL`.
pub fn roll_from_slice<R: Rng + ?Sized>(rng: &mut R, params: &[i32]) -> i32 {
    DiceRoll::from_slice(params).map_or(FAILED_ROLL, |roll| roll.roll(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_drop_everything_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(roll_dice(&mut rng, 6, 3, 0, 10, 3), FAILED_ROLL);
        assert_eq!(roll_dice(&mut rng, 6, 3, 0, 10, 4), FAILED_ROLL);
        assert_eq!(roll_dice(&mut rng, 6, 0, 0, 10, 0), FAILED_ROLL);
    }

    #[test]
    fn test_single_sided_dice_are_exact() {
        let mut rng = StdRng::seed_from_u64(2);
        // 7 dice of 1 side, +1 each, drop 2: five dice of 2 each, +3
        assert_eq!(roll_dice(&mut rng, 1, 7, 1, 3, 2), 13);
    }

    #[test]
    fn test_drop_lowest_keeps_highest() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let dropped = roll_dice(&mut rng, 6, 4, 0, 0, 1);
            assert!((3..=18).contains(&dropped));
        }
    }

    #[test]
    fn test_slice_form() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(roll_from_slice(&mut rng, &[6, 4, 0]), FAILED_ROLL);
        assert_eq!(roll_from_slice(&mut rng, &[6, 4, 0, 0, 1, 9]), FAILED_ROLL);
        assert_eq!(roll_from_slice(&mut rng, &[1, 2, 0, 1, 0]), 3);

        let value = roll_from_slice(&mut rng, &[8, 2, 1, 0, 0]);
        assert!((4..=18).contains(&value));
    }

    #[test]
    fn test_bounds_and_display() {
        let roll = DiceRoll::new(6, 6, 0, 0, 3);
        assert_eq!(roll.min(), 3);
        assert_eq!(roll.max(), 18);
        assert_eq!(roll.to_string(), "6d6 drop 3");
        assert_eq!(DiceRoll::new(4, 3, 2, 0, 0).to_string(), "3d4 (+2 each)");
        assert_eq!(DiceRoll::new(6, 2, 0, 2, 2).min(), FAILED_ROLL);
    }
}
