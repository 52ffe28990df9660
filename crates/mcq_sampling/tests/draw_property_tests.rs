//! Property tests for the bounded draws.

use mcq_sampling::{
    random_coefficient, random_distinct, random_int, random_nonzero_int, sample_until, shuffle,
    Attempted, RngSource,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn int_draws_stay_inside_the_range(seed in any::<u64>(), lo in -50i64..50, width in 0i64..40) {
        let mut rng = RngSource::seeded(seed);
        let hi = lo + width;
        for _ in 0..32 {
            let v = random_int(&mut rng, lo, hi);
            prop_assert!((lo..=hi).contains(&v));
        }
    }

    #[test]
    fn nonzero_draws_never_return_zero(seed in any::<u64>(), lo in -10i64..=0, hi in 0i64..=10) {
        prop_assume!(!(lo == 0 && hi == 0));
        let mut rng = RngSource::seeded(seed);
        for _ in 0..32 {
            let v = random_nonzero_int(&mut rng, lo, hi);
            prop_assert!(v != 0 && (lo..=hi).contains(&v));
        }
    }

    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>(), items in prop::collection::vec(-100i64..100, 0..12)) {
        let mut rng = RngSource::seeded(seed);
        let mut shuffled = shuffle(&mut rng, &items);
        let mut original = items.clone();
        shuffled.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(shuffled, original);
    }

    #[test]
    fn distinct_picks_come_from_distinct_positions(seed in any::<u64>(), len in 1usize..15, count in 0usize..15) {
        prop_assume!(count <= len);
        let items: Vec<usize> = (0..len).collect();
        let mut rng = RngSource::seeded(seed);
        let mut picked = random_distinct(&mut rng, &items, count);
        prop_assert_eq!(picked.len(), count);
        picked.sort_unstable();
        picked.dedup();
        prop_assert_eq!(picked.len(), count);
    }

    #[test]
    fn coefficients_avoid_the_excluded_values(seed in any::<u64>(), exclude in prop::collection::vec(-5i64..=5, 0..6)) {
        prop_assume!((-5..=5).any(|v| !exclude.contains(&v)));
        let mut rng = RngSource::seeded(seed);
        let v = random_coefficient(&mut rng, -5, 5, &exclude);
        prop_assert!(!exclude.contains(&v));
    }

    #[test]
    fn retries_never_exceed_the_cap(seed in any::<u64>(), cap in 0usize..20) {
        let mut rng = RngSource::seeded(seed);
        let attempted = sample_until(cap, || random_int(&mut rng, 0, 9), |v| *v == 10);
        prop_assert_eq!(attempted, Attempted::Exhausted { attempts: cap });
    }
}
