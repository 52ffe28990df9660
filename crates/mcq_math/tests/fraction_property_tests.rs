//! Property tests for the fraction engine.

use mcq_math::{gcd, simplify, CommonDenominator, Fraction};
use proptest::prelude::*;

fn arb_fraction() -> impl Strategy<Value = Fraction> {
    (-200i64..=200, 1i64..=60).prop_map(|(n, d)| Fraction::new(n, d))
}

fn arb_nonzero_fraction() -> impl Strategy<Value = Fraction> {
    arb_fraction().prop_filter("non-zero numerator", |f| f.numer() != 0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn simplify_is_lowest_terms(n in -10_000i64..10_000, d in -500i64..500) {
        prop_assume!(d != 0);
        let (n2, d2) = simplify(n, d);
        prop_assert!(d2 > 0);
        prop_assert_eq!(gcd(n2.abs(), d2), 1);
        prop_assert_eq!(n2 * d, n * d2);
    }

    #[test]
    fn addition_matches_float_cross_check(a in arb_fraction(), b in arb_fraction()) {
        let sum = (a + b).to_f64();
        let diff = (a - b).to_f64();
        prop_assert!((sum - (a.to_f64() + b.to_f64())).abs() < 1e-9);
        prop_assert!((diff - (a.to_f64() - b.to_f64())).abs() < 1e-9);
    }

    #[test]
    fn addition_commutes_by_value(a in arb_fraction(), b in arb_fraction()) {
        prop_assert_eq!((a + b).simplify(), (b + a).simplify());
    }

    #[test]
    fn both_common_denominator_strategies_agree(a in arb_fraction(), b in arb_fraction()) {
        let lcm = a.add_with(b, CommonDenominator::Lcm).result;
        let cross = a.add_with(b, CommonDenominator::CrossMultiply).result;
        prop_assert!(lcm.value_eq(&cross));
        let lcm = a.sub_with(b, CommonDenominator::Lcm).result;
        let cross = a.sub_with(b, CommonDenominator::CrossMultiply).result;
        prop_assert_eq!(lcm.simplify(), cross.simplify());
    }

    #[test]
    fn multiplication_is_associative_and_commutative(
        a in arb_fraction(),
        b in arb_fraction(),
        c in arb_fraction(),
    ) {
        prop_assert_eq!((a * b).simplify(), (b * a).simplify());
        prop_assert_eq!(((a * b) * c).simplify(), (a * (b * c)).simplify());
    }

    #[test]
    fn division_undoes_multiplication(a in arb_fraction(), b in arb_nonzero_fraction()) {
        prop_assert_eq!(((a / b) * b).simplify(), a.simplify());
    }

    #[test]
    fn mixed_parts_recompose(a in arb_fraction()) {
        let parts = a.to_mixed();
        let whole = if parts.negative { -parts.whole } else { parts.whole };
        let rebuilt = if parts.negative {
            Fraction::from_integer(whole) - Fraction::new(parts.numer, parts.denom)
        } else {
            Fraction::from_integer(whole) + Fraction::new(parts.numer, parts.denom)
        };
        prop_assert!(rebuilt.value_eq(&a));
        prop_assert!(parts.numer < parts.denom);
    }
}
