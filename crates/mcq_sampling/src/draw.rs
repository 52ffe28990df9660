//! Bounded draws over a [`RandomSource`].

use mcq_math::Fraction;

use crate::source::RandomSource;

/// Uniform integer in `[min, max]`.
pub fn random_int(src: &mut dyn RandomSource, min: i64, max: i64) -> i64 {
    src.next_int(min, max)
}

/// Uniform over `[min, max] \ {0}`.
///
/// Draws once from a range one shorter and skips over zero, so it never
/// loops.
///
/// # Panics
///
/// Panics when the range contains nothing but zero, or is empty.
pub fn random_nonzero_int(src: &mut dyn RandomSource, min: i64, max: i64) -> i64 {
    assert!(min <= max, "random_nonzero_int: empty range [{min}, {max}]");
    assert!(
        !(min == 0 && max == 0),
        "random_nonzero_int: range [0, 0] has no non-zero value"
    );
    if min > 0 || max < 0 {
        return src.next_int(min, max);
    }
    let v = src.next_int(min, max - 1);
    if v >= 0 {
        v + 1
    } else {
        v
    }
}

/// Uniform float in `[min, max]` rounded to `places` decimals.
pub fn random_decimal(src: &mut dyn RandomSource, min: f64, max: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let raw = min + src.next_unit() * (max - min);
    ((raw * scale).round() / scale).clamp(min, max)
}

/// Uniform value on the `10^-places` grid inside `[min, max]`, exact.
pub fn random_decimal_exact(
    src: &mut dyn RandomSource,
    min: i64,
    max: i64,
    places: u32,
) -> Fraction {
    let scale = 10_i64.pow(places);
    Fraction::new(src.next_int(min * scale, max * scale), scale)
}

/// # Panics
///
/// Panics on an empty slice.
pub fn random_element<'a, T>(src: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    assert!(!items.is_empty(), "random_element: empty choice set");
    &items[src.next_int(0, items.len() as i64 - 1) as usize]
}

/// `true` with probability `p`.
pub fn random_bool(src: &mut dyn RandomSource, p: f64) -> bool {
    src.next_unit() < p
}

/// Integer from `[min, max]` that is not in `exclude`.
///
/// # Panics
///
/// Panics when every value in the range is excluded.
pub fn random_coefficient(
    src: &mut dyn RandomSource,
    min: i64,
    max: i64,
    exclude: &[i64],
) -> i64 {
    let candidates: Vec<i64> = (min..=max).filter(|v| !exclude.contains(v)).collect();
    assert!(
        !candidates.is_empty(),
        "random_coefficient: [{min}, {max}] minus {exclude:?} is empty"
    );
    *random_element(src, &candidates)
}

/// Fisher–Yates shuffle of a copy; the input is left untouched.
pub fn shuffle<T: Clone>(src: &mut dyn RandomSource, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = src.next_int(0, i as i64) as usize;
        out.swap(i, j);
    }
    out
}

/// `count` entries taken from distinct positions of `items`.
///
/// # Panics
///
/// Panics when `count > items.len()`.
pub fn random_distinct<T: Clone>(src: &mut dyn RandomSource, items: &[T], count: usize) -> Vec<T> {
    assert!(
        count <= items.len(),
        "random_distinct: asked for {count} of {} items",
        items.len()
    );
    let mut indices: Vec<usize> = (0..items.len()).collect();
    for i in 0..count {
        let j = src.next_int(i as i64, indices.len() as i64 - 1) as usize;
        indices.swap(i, j);
    }
    indices[..count].iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RngSource, ScriptedSource};

    #[test]
    fn nonzero_skips_zero() {
        let mut src = ScriptedSource::ints([-1, 0, 2]);
        assert_eq!(random_nonzero_int(&mut src, -3, 3), -1);
        assert_eq!(random_nonzero_int(&mut src, -3, 3), 1);
        assert_eq!(random_nonzero_int(&mut src, -3, 3), 3);

        let mut rng = RngSource::seeded(7);
        for _ in 0..1000 {
            let v = random_nonzero_int(&mut rng, -2, 2);
            assert!(v != 0 && (-2..=2).contains(&v));
        }
    }

    #[test]
    #[should_panic(expected = "no non-zero value")]
    fn nonzero_rejects_zero_only_range() {
        random_nonzero_int(&mut RngSource::seeded(1), 0, 0);
    }

    #[test]
    fn decimals_stay_on_grid() {
        let mut rng = RngSource::seeded(3);
        for _ in 0..200 {
            let v = random_decimal(&mut rng, -5.0, 5.0, 1);
            assert!((-5.0..=5.0).contains(&v));
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-9);

            let exact = random_decimal_exact(&mut rng, -5, 5, 2);
            assert_eq!(exact.denom(), 100);
            assert!((-500..=500).contains(&exact.numer()));
        }
    }

    #[test]
    fn coefficient_respects_exclusions() {
        let mut rng = RngSource::seeded(11);
        for _ in 0..200 {
            let c = random_coefficient(&mut rng, -2, 2, &[0, 1]);
            assert!([-2, -1, 2].contains(&c));
        }
    }

    #[test]
    fn shuffle_is_a_permutation_of_a_copy() {
        let items = vec![1, 2, 3, 4, 5];
        let shuffled = shuffle(&mut RngSource::seeded(5), &items);
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, items);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn distinct_picks_never_repeat_positions() {
        let mut rng = RngSource::seeded(9);
        let items = [2, 3, 4, 5, 6, 8, 9, 12, 15, 16];
        for _ in 0..500 {
            let picked = random_distinct(&mut rng, &items, 2);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
        }
    }
}
