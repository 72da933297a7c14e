//! Property tests for the dice engine.

use npcgen::{roll_dice, roll_from_slice, DiceRoll, FAILED_ROLL};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn test_roll_stays_in_range(
        seed in any::<u64>(),
        die in 1i32..=20,
        repeat in 1i32..=8,
        per_roll in -2i32..=3,
        total in -5i32..=5,
        drop_seed in 0i32..8,
    ) {
        let drop = drop_seed % repeat;
        let mut rng = StdRng::seed_from_u64(seed);
        let kept = repeat - drop;
        let result = roll_dice(&mut rng, die, repeat, per_roll, total, drop);
        prop_assert!(result >= total + kept * (1 + per_roll));
        prop_assert!(result <= total + kept * (die + per_roll));

        let roll = DiceRoll::new(die, repeat, per_roll, total, drop);
        prop_assert!(roll.min() <= result && result <= roll.max());
    }

    #[test]
    fn test_degenerate_drop_fails(
        seed in any::<u64>(),
        die in 1i32..=20,
        repeat in 0i32..=6,
        extra in 0i32..=3,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert_eq!(roll_dice(&mut rng, die, repeat, 0, 10, repeat + extra), FAILED_ROLL);
    }

    #[test]
    fn test_wrong_arity_fails(seed in any::<u64>(), len in 0usize..10) {
        prop_assume!(len != 5);
        let mut rng = StdRng::seed_from_u64(seed);
        let params = vec![6; len];
        prop_assert_eq!(roll_from_slice(&mut rng, &params), FAILED_ROLL);
    }
}
