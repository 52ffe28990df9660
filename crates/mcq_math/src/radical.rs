//! Square roots of non-negative integers in simplest radical form.

use num_integer::Roots;

/// `coefficient * sqrt(radicand)` with `radicand` square-free.
///
/// A perfect square has `radicand == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Radical {
    pub coefficient: i64,
    pub radicand: i64,
}

impl Radical {
    pub fn is_rational(&self) -> bool {
        self.radicand == 1
    }

    /// The integer this radical is the square root of.
    pub fn squared(&self) -> i64 {
        self.coefficient * self.coefficient * self.radicand
    }

    pub fn to_f64(&self) -> f64 {
        self.coefficient as f64 * (self.radicand as f64).sqrt()
    }
}

/// Pull the largest perfect-square factor out of `n`.
///
/// `simplify_radical(20)` is `2√5`, `simplify_radical(49)` is `7`.
///
/// # Panics
///
/// Panics on negative input.
pub fn simplify_radical(n: i64) -> Radical {
    assert!(n >= 0, "simplify_radical: radicand must be non-negative, got {n}");
    if n == 0 {
        return Radical {
            coefficient: 0,
            radicand: 1,
        };
    }
    let mut coefficient = 1;
    let mut radicand = n;
    let mut f = 2;
    while f * f <= radicand {
        while radicand % (f * f) == 0 {
            coefficient *= f;
            radicand /= f * f;
        }
        f += 1;
    }
    Radical {
        coefficient,
        radicand,
    }
}

/// Exact integer square root, if `n` is a perfect square.
pub fn isqrt_exact(n: i64) -> Option<i64> {
    if n < 0 {
        return None;
    }
    let root = n.sqrt();
    (root * root == n).then_some(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_largest_square_factor() {
        assert_eq!(
            simplify_radical(20),
            Radical {
                coefficient: 2,
                radicand: 5
            }
        );
        assert_eq!(
            simplify_radical(72),
            Radical {
                coefficient: 6,
                radicand: 2
            }
        );
        assert_eq!(
            simplify_radical(13),
            Radical {
                coefficient: 1,
                radicand: 13
            }
        );
    }

    #[test]
    fn perfect_squares_are_rational() {
        let r = simplify_radical(49);
        assert!(r.is_rational());
        assert_eq!(r.coefficient, 7);
        assert_eq!(simplify_radical(0).coefficient, 0);
        assert_eq!(simplify_radical(1), Radical { coefficient: 1, radicand: 1 });
    }

    #[test]
    fn squared_round_trips_the_input() {
        for n in 1..500 {
            assert_eq!(simplify_radical(n).squared(), n);
        }
    }

    #[test]
    fn isqrt_exact_only_for_squares() {
        assert_eq!(isqrt_exact(169), Some(13));
        assert_eq!(isqrt_exact(170), None);
        assert_eq!(isqrt_exact(-4), None);
    }
}
