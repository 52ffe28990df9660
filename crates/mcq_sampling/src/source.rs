use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Uniform randomness as the generators consume it.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, both ends inclusive.
    fn next_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Adapter from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Reproducible stream for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "next_int: empty range [{min}, {max}]");
        self.rng.gen_range(min..=max)
    }

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays scripted integers and unit floats, then continues from a seeded
/// generator once a script runs out.
///
/// A scripted integer outside the requested range panics: the script no
/// longer matches the order in which the caller draws.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    ints: VecDeque<i64>,
    units: VecDeque<f64>,
    rest: RngSource<StdRng>,
}

impl ScriptedSource {
    pub fn new(ints: impl IntoIterator<Item = i64>, units: impl IntoIterator<Item = f64>) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            units: units.into_iter().collect(),
            rest: RngSource::seeded(0),
        }
    }

    pub fn ints(ints: impl IntoIterator<Item = i64>) -> Self {
        Self::new(ints, Vec::<f64>::new())
    }

    /// Whether every scripted value has been consumed.
    pub fn is_drained(&self) -> bool {
        self.ints.is_empty() && self.units.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        match self.ints.pop_front() {
            Some(v) => {
                assert!(
                    (min..=max).contains(&v),
                    "scripted value {v} outside requested range [{min}, {max}]"
                );
                v
            }
            None => self.rest.next_int(min, max),
        }
    }

    fn next_unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(v) => v,
            None => self.rest.next_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        let xs: Vec<i64> = (0..20).map(|_| a.next_int(-5, 5)).collect();
        let ys: Vec<i64> = (0..20).map(|_| b.next_int(-5, 5)).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| (-5..=5).contains(x)));
    }

    #[test]
    fn scripted_values_come_first() {
        let mut src = ScriptedSource::new([3, 7], [0.25]);
        assert_eq!(src.next_int(1, 10), 3);
        assert_eq!(src.next_unit(), 0.25);
        assert_eq!(src.next_int(1, 10), 7);
        assert!(src.is_drained());
        let v = src.next_int(1, 2);
        assert!((1..=2).contains(&v));
    }

    #[test]
    #[should_panic(expected = "outside requested range")]
    fn scripted_value_out_of_range_panics() {
        let mut src = ScriptedSource::ints([11]);
        src.next_int(1, 10);
    }
}
