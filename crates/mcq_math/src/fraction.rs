//! Exact fraction value type.
//!
//! Arithmetic never reduces on its own: `1/6 + 1/6` is `2/6` until the
//! caller calls [`Fraction::simplify`]. Explanations rely on this to show
//! the rewritten-over-a-common-denominator form before the reduced answer.
//!
//! The derived `PartialEq` is structural (`2/6 != 1/3`). Use
//! [`Fraction::value_eq`] or [`Fraction::to_rational`] to compare values.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_rational::Rational64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::number_theory::{gcd, lcm, simplify};

/// How two fractions are brought over a common denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommonDenominator {
    /// Rewrite both operands over `lcm(b, d)`.
    #[default]
    Lcm,
    /// Multiply the denominators: `(a*d ± c*b) / (b*d)`.
    CrossMultiply,
}

/// Intermediate values of one addition or subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddTrace {
    pub strategy: CommonDenominator,
    pub left: Fraction,
    pub right: Fraction,
    pub subtract: bool,
    /// Common denominator both operands were rewritten over.
    pub common_denom: i64,
    /// Left numerator after the rewrite.
    pub left_scaled: i64,
    /// Right numerator after the rewrite.
    pub right_scaled: i64,
    /// Unsimplified result over `common_denom`.
    pub result: Fraction,
}

/// Sign, whole part and proper remainder of a fraction in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedParts {
    pub negative: bool,
    pub whole: i64,
    pub numer: i64,
    pub denom: i64,
}

/// A fraction `numer/denom` with a non-zero denominator.
///
/// The sign is carried by the numerator; construction moves a negative
/// denominator's sign up without reducing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numer: i64,
    denom: i64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { numer: 0, denom: 1 };
    pub const ONE: Fraction = Fraction { numer: 1, denom: 1 };

    /// # Panics
    ///
    /// Panics when `denom == 0`. Use [`Fraction::try_new`] for a checked
    /// constructor.
    pub fn new(numer: i64, denom: i64) -> Self {
        assert!(denom != 0, "Fraction::new: denominator must be non-zero");
        if denom < 0 {
            Self {
                numer: -numer,
                denom: -denom,
            }
        } else {
            Self { numer, denom }
        }
    }

    pub fn try_new(numer: i64, denom: i64) -> Result<Self, MathError> {
        if denom == 0 {
            return Err(MathError::ZeroDenominator);
        }
        Ok(Self::new(numer, denom))
    }

    pub fn from_integer(n: i64) -> Self {
        Self { numer: n, denom: 1 }
    }

    /// Build a mixed number `whole + numer/denom` as an improper fraction.
    /// A negative `whole` negates the whole value.
    pub fn from_mixed(whole: i64, numer: i64, denom: i64) -> Self {
        let magnitude = Self::new(whole.abs() * denom + numer, denom);
        if whole < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Exact value of a decimal drawn with `places` fractional digits.
    ///
    /// `from_decimal(2.5, 1)` is `25/10`; the caller decides when to reduce.
    /// Non-finite values and values whose scaled form leaves the `i64`
    /// range are [`MathError::Overflow`].
    pub fn from_decimal(value: f64, places: u32) -> Result<Self, MathError> {
        let scale = 10_i64
            .checked_pow(places)
            .ok_or(MathError::Overflow("from_decimal"))?;
        let scaled = (value * scale as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(MathError::Overflow("from_decimal"));
        }
        Ok(Self::new(scaled as i64, scale))
    }

    pub fn numer(&self) -> i64 {
        self.numer
    }

    pub fn denom(&self) -> i64 {
        self.denom
    }

    /// Lowest terms with a positive denominator.
    pub fn simplify(&self) -> Self {
        let (numer, denom) = simplify(self.numer, self.denom);
        Self { numer, denom }
    }

    pub fn is_simplified(&self) -> bool {
        gcd(self.numer, self.denom) == 1
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_negative(&self) -> bool {
        self.numer < 0
    }

    pub fn is_integer(&self) -> bool {
        self.numer % self.denom == 0
    }

    /// `|numer| < denom`, judged on the stored (possibly unreduced) form.
    pub fn is_proper(&self) -> bool {
        self.numer.abs() < self.denom
    }

    /// Integer value, if the fraction reduces to one.
    pub fn to_integer(&self) -> Option<i64> {
        self.is_integer().then(|| self.numer / self.denom)
    }

    pub fn to_rational(&self) -> Rational64 {
        Rational64::new(self.numer, self.denom)
    }

    pub fn from_rational(r: Rational64) -> Self {
        Self::new(*r.numer(), *r.denom())
    }

    /// Approximate value. Only for ordering candidates or plotting, never
    /// for deciding a correct answer.
    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Value equality: `2/6` equals `1/3`.
    pub fn value_eq(&self, other: &Fraction) -> bool {
        (self.numer as i128) * (other.denom as i128) == (other.numer as i128) * (self.denom as i128)
    }

    /// Compare by value.
    pub fn cmp_value(&self, other: &Fraction) -> Ordering {
        let lhs = (self.numer as i128) * (other.denom as i128);
        let rhs = (other.numer as i128) * (self.denom as i128);
        lhs.cmp(&rhs)
    }

    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.abs(),
            denom: self.denom,
        }
    }

    /// # Panics
    ///
    /// Panics on a zero numerator.
    pub fn reciprocal(&self) -> Self {
        assert!(self.numer != 0, "Fraction::reciprocal: zero has no reciprocal");
        Self::new(self.denom, self.numer)
    }

    pub fn checked_reciprocal(&self) -> Result<Self, MathError> {
        if self.numer == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self::new(self.denom, self.numer))
    }

    /// Split into whole part and proper remainder, after reducing.
    pub fn to_mixed(&self) -> MixedParts {
        let reduced = self.simplify();
        let magnitude = reduced.numer.abs();
        MixedParts {
            negative: reduced.numer < 0,
            whole: magnitude / reduced.denom,
            numer: magnitude % reduced.denom,
            denom: reduced.denom,
        }
    }

    /// Add with an explicit common-denominator strategy, keeping the
    /// intermediate numerators for narration.
    pub fn add_with(self, rhs: Fraction, strategy: CommonDenominator) -> AddTrace {
        self.combine(rhs, strategy, false)
    }

    pub fn sub_with(self, rhs: Fraction, strategy: CommonDenominator) -> AddTrace {
        self.combine(rhs, strategy, true)
    }

    fn combine(self, rhs: Fraction, strategy: CommonDenominator, subtract: bool) -> AddTrace {
        let (common_denom, left_scaled, right_scaled) = match strategy {
            CommonDenominator::Lcm => {
                let l = lcm(self.denom, rhs.denom);
                (l, self.numer * (l / self.denom), rhs.numer * (l / rhs.denom))
            }
            CommonDenominator::CrossMultiply => (
                self.denom * rhs.denom,
                self.numer * rhs.denom,
                rhs.numer * self.denom,
            ),
        };
        let numer = if subtract {
            left_scaled - right_scaled
        } else {
            left_scaled + right_scaled
        };
        AddTrace {
            strategy,
            left: self,
            right: rhs,
            subtract,
            common_denom,
            left_scaled,
            right_scaled,
            result: Fraction::new(numer, common_denom),
        }
    }

    pub fn checked_add(self, rhs: Fraction) -> Result<Self, MathError> {
        let l = self
            .denom
            .checked_div(gcd(self.denom, rhs.denom))
            .and_then(|q| q.checked_mul(rhs.denom))
            .ok_or(MathError::Overflow("add"))?;
        let left = self
            .numer
            .checked_mul(l / self.denom)
            .ok_or(MathError::Overflow("add"))?;
        let right = rhs
            .numer
            .checked_mul(l / rhs.denom)
            .ok_or(MathError::Overflow("add"))?;
        let numer = left.checked_add(right).ok_or(MathError::Overflow("add"))?;
        Ok(Fraction::new(numer, l))
    }

    pub fn checked_mul(self, rhs: Fraction) -> Result<Self, MathError> {
        let numer = self
            .numer
            .checked_mul(rhs.numer)
            .ok_or(MathError::Overflow("mul"))?;
        let denom = self
            .denom
            .checked_mul(rhs.denom)
            .ok_or(MathError::Overflow("mul"))?;
        Ok(Fraction::new(numer, denom))
    }

    /// Division that reports a zero divisor instead of panicking.
    pub fn checked_div(self, rhs: Fraction) -> Result<Self, MathError> {
        if rhs.numer == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(self / rhs)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.numer == 0
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::ONE
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl From<Rational64> for Fraction {
    fn from(r: Rational64) -> Self {
        Self::from_rational(r)
    }
}

impl Add for Fraction {
    type Output = Fraction;

    /// LCM-based addition, unsimplified.
    fn add(self, rhs: Fraction) -> Fraction {
        self.add_with(rhs, CommonDenominator::Lcm).result
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self.sub_with(rhs, CommonDenominator::Lcm).result
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::new(self.numer * rhs.numer, self.denom * rhs.denom)
    }
}

impl Div for Fraction {
    type Output = Fraction;

    /// Multiply by the reciprocal: `(a*d) / (b*c)`.
    ///
    /// # Panics
    ///
    /// Panics when `rhs` is zero.
    fn div(self, rhs: Fraction) -> Fraction {
        assert!(rhs.numer != 0, "Fraction::div: division by a zero fraction");
        Fraction::new(self.numer * rhs.denom, self.denom * rhs.numer)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_sign_without_reducing() {
        let f = Fraction::new(2, -4);
        assert_eq!((f.numer(), f.denom()), (-2, 4));
        assert_eq!(Fraction::try_new(1, 0), Err(MathError::ZeroDenominator));
    }

    #[test]
    #[should_panic(expected = "denominator must be non-zero")]
    fn zero_denominator_panics() {
        let _ = Fraction::new(3, 0);
    }

    #[test]
    fn lcm_addition_keeps_intermediate_form() {
        let trace = Fraction::new(1, 6).add_with(Fraction::new(1, 4), CommonDenominator::Lcm);
        assert_eq!(trace.common_denom, 12);
        assert_eq!((trace.left_scaled, trace.right_scaled), (2, 3));
        assert_eq!(trace.result, Fraction::new(5, 12));

        let sum = Fraction::new(1, 6) + Fraction::new(1, 6);
        assert_eq!(sum, Fraction::new(2, 6));
        assert_eq!(sum.simplify(), Fraction::new(1, 3));
    }

    #[test]
    fn cross_multiply_differs_only_in_intermediate_form() {
        let a = Fraction::new(1, 6);
        let b = Fraction::new(1, 4);
        let lcm_sum = a.add_with(b, CommonDenominator::Lcm).result;
        let cross = a.add_with(b, CommonDenominator::CrossMultiply);
        assert_eq!(cross.common_denom, 24);
        assert_eq!(cross.result, Fraction::new(10, 24));
        assert_ne!(lcm_sum, cross.result);
        assert!(lcm_sum.value_eq(&cross.result));
    }

    #[test]
    fn subtraction_and_products() {
        assert_eq!(Fraction::new(3, 4) - Fraction::new(1, 3), Fraction::new(5, 12));
        assert_eq!(Fraction::new(2, 3) * Fraction::new(3, 4), Fraction::new(6, 12));
        assert_eq!(Fraction::new(2, 3) / Fraction::new(4, 5), Fraction::new(10, 12));
        assert_eq!(Fraction::new(1, 2) / Fraction::new(-1, 3), Fraction::new(-3, 2));
    }

    #[test]
    fn division_by_zero_is_checked_or_panics() {
        assert_eq!(
            Fraction::ONE.checked_div(Fraction::ZERO),
            Err(MathError::DivisionByZero)
        );
        let result = std::panic::catch_unwind(|| Fraction::ONE / Fraction::ZERO);
        assert!(result.is_err());
    }

    #[test]
    fn mixed_parts_reduce_first() {
        let parts = Fraction::new(14, 6).to_mixed();
        assert_eq!(
            parts,
            MixedParts {
                negative: false,
                whole: 2,
                numer: 1,
                denom: 3
            }
        );
        let negative = Fraction::new(-7, 2).to_mixed();
        assert!(negative.negative);
        assert_eq!((negative.whole, negative.numer, negative.denom), (3, 1, 2));
        assert_eq!(Fraction::from_mixed(2, 1, 3), Fraction::new(7, 3));
        assert_eq!(Fraction::from_mixed(-2, 1, 3), Fraction::new(-7, 3));
    }

    #[test]
    fn decimal_draws_are_exact() {
        assert_eq!(Fraction::from_decimal(2.5, 1), Ok(Fraction::new(25, 10)));
        assert_eq!(
            Fraction::from_decimal(-0.25, 2).map(|f| f.simplify()),
            Ok(Fraction::new(-1, 4))
        );
        assert!(Fraction::from_decimal(0.1, 1).is_ok_and(|f| f.value_eq(&Fraction::new(1, 10))));
    }

    #[test]
    fn decimals_outside_the_integer_range_are_rejected() {
        let overflow = Err(MathError::Overflow("from_decimal"));
        assert_eq!(Fraction::from_decimal(f64::NAN, 1), overflow);
        assert_eq!(Fraction::from_decimal(f64::INFINITY, 0), overflow);
        assert_eq!(Fraction::from_decimal(1e18, 2), overflow);
        assert_eq!(Fraction::from_decimal(-1e19, 0), overflow);
        assert_eq!(Fraction::from_decimal(1.5, 19), overflow);
        assert_eq!(Fraction::from_decimal(-12.25, 2), Ok(Fraction::new(-1225, 100)));
    }

    #[test]
    fn value_comparison_ignores_representation() {
        assert!(Fraction::new(2, 6).value_eq(&Fraction::new(1, 3)));
        assert_eq!(Fraction::new(1, 3).cmp_value(&Fraction::new(1, 4)), Ordering::Greater);
        assert_eq!(Fraction::new(4, 6).to_rational(), Rational64::new(2, 3));
        assert_eq!(Fraction::new(6, 3).to_integer(), Some(2));
        assert_eq!(Fraction::new(5, 3).to_integer(), None);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let big = Fraction::new(i64::MAX, 1);
        assert_eq!(big.checked_mul(big), Err(MathError::Overflow("mul")));
        assert_eq!(
            Fraction::new(1, 2).checked_add(Fraction::new(1, 3)),
            Ok(Fraction::new(5, 6))
        );
    }
}
