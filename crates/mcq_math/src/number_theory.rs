//! GCD / LCM and fraction reduction over machine integers.

use num_integer::Integer;

/// Greatest common divisor. Always non-negative; `gcd(a, 0) == |a|`.
pub fn gcd(a: i64, b: i64) -> i64 {
    a.gcd(&b)
}

/// Least common multiple, `|a*b| / gcd(a, b)`. `lcm(x, 0) == 0`.
pub fn lcm(a: i64, b: i64) -> i64 {
    a.lcm(&b)
}

/// Reduce `numer/denom` to lowest terms with a positive denominator.
///
/// # Panics
///
/// Panics when `denom == 0`.
pub fn simplify(numer: i64, denom: i64) -> (i64, i64) {
    assert!(denom != 0, "simplify: denominator must be non-zero");
    let g = gcd(numer, denom);
    let (n, d) = (numer / g, denom / g);
    if d < 0 {
        (-n, -d)
    } else {
        (n, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_handles_zero_and_signs() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(-7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn lcm_matches_definition() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(3, 4), 12);
        assert_eq!(lcm(-4, 6), 12);
        assert_eq!(lcm(5, 0), 0);
    }

    #[test]
    fn simplify_moves_sign_to_numerator() {
        assert_eq!(simplify(8, 12), (2, 3));
        assert_eq!(simplify(3, -6), (-1, 2));
        assert_eq!(simplify(-3, -6), (1, 2));
        assert_eq!(simplify(0, -5), (0, 1));
        assert_eq!(simplify(10, 5), (2, 1));
    }

    #[test]
    #[should_panic(expected = "denominator must be non-zero")]
    fn simplify_rejects_zero_denominator() {
        simplify(1, 0);
    }
}
