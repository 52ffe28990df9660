//! Circle equations in standard and general form.

use mcq_math::{Fraction, Point};

use crate::latex::{coefficient_latex, fraction_latex, signed_constant, signed_term, FractionStyle};

/// Coefficients of `x^2 + y^2 + Dx + Ey + F = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralCoefficients {
    pub d: Fraction,
    pub e: Fraction,
    pub f: Fraction,
}

impl GeneralCoefficients {
    /// `D = -2h`, `E = -2k`, `F = h² + k² − r²`.
    pub fn from_circle(center: &Point, radius_sq: Fraction) -> Self {
        let minus_two = Fraction::from_integer(-2);
        Self {
            d: (minus_two * center.x).simplify(),
            e: (minus_two * center.y).simplify(),
            f: (center.x * center.x + center.y * center.y - radius_sq).simplify(),
        }
    }

    pub fn scaled(&self, factor: i64) -> Self {
        let k = Fraction::from_integer(factor);
        Self {
            d: (self.d * k).simplify(),
            e: (self.e * k).simplify(),
            f: (self.f * k).simplify(),
        }
    }
}

/// `(x-2)^2`, `(x+4)^2`, or `x^2` for a zero shift.
pub fn shifted_square(var: &str, shift: Fraction) -> String {
    if shift.is_zero() {
        return format!("{var}^2");
    }
    let op = if shift.is_negative() { '+' } else { '-' };
    format!(
        "({var}{op}{})^2",
        fraction_latex(shift.abs(), FractionStyle::Improper)
    )
}

/// `(x-h)^2 + (y-k)^2 = r^2`.
pub fn standard_circle(center: &Point, radius_sq: Fraction) -> String {
    format!(
        "{} + {} = {}",
        shifted_square("x", center.x),
        shifted_square("y", center.y),
        fraction_latex(radius_sq, FractionStyle::Improper)
    )
}

/// `(ax-ah)^2 + (ay-ak)^2 = a^2 r^2`: the standard form with every
/// bracket multiplied through by `scale`.
pub fn scaled_standard_circle(center: &Point, radius_sq: Fraction, scale: i64) -> String {
    let k = Fraction::from_integer(scale);
    let bracket = |var: &str, shift: Fraction| {
        let shift = (shift * k).simplify();
        if shift.is_zero() {
            return format!("({scale}{var})^2");
        }
        let op = if shift.is_negative() { '+' } else { '-' };
        format!(
            "({scale}{var}{op}{})^2",
            fraction_latex(shift.abs(), FractionStyle::Improper)
        )
    };
    format!(
        "{} + {} = {}",
        bracket("x", center.x),
        bracket("y", center.y),
        fraction_latex(radius_sq * k * k, FractionStyle::Improper)
    )
}

/// `x^2 + y^2 - 4x - 6y - 12 = 0`. Zero terms are omitted.
pub fn general_circle(center: &Point, radius_sq: Fraction) -> String {
    general_form(1, &GeneralCoefficients::from_circle(center, radius_sq))
}

/// `a x^2 + a y^2 + Dx + Ey + F = 0` with the given leading coefficient.
pub fn general_form(leading: i64, coefficients: &GeneralCoefficients) -> String {
    let lead = Fraction::from_integer(leading);
    format!(
        "{} + {}{}{}{} = 0",
        coefficient_latex(lead, "x^2"),
        coefficient_latex(lead, "y^2"),
        signed_term(coefficients.d, "x"),
        signed_term(coefficients.e, "y"),
        signed_constant(coefficients.f)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_form_signs() {
        let center = Point::lattice(2, 3);
        assert_eq!(
            standard_circle(&center, Fraction::from_integer(25)),
            "(x-2)^2 + (y-3)^2 = 25"
        );
        assert_eq!(
            standard_circle(&Point::lattice(-4, 0), Fraction::from_integer(9)),
            "(x+4)^2 + y^2 = 9"
        );
        assert_eq!(
            standard_circle(
                &Point::new(Fraction::new(5, 2), Fraction::from_integer(1)),
                Fraction::new(13, 4)
            ),
            "(x-\\frac{5}{2})^2 + (y-1)^2 = \\frac{13}{4}"
        );
    }

    #[test]
    fn general_form_matches_expansion() {
        let center = Point::lattice(2, 3);
        assert_eq!(
            general_circle(&center, Fraction::from_integer(25)),
            "x^2 + y^2 - 4x - 6y - 12 = 0"
        );
        assert_eq!(
            general_circle(&Point::lattice(0, -1), Fraction::from_integer(1)),
            "x^2 + y^2 + 2y = 0"
        );
    }

    #[test]
    fn scaled_forms() {
        let center = Point::lattice(2, -1);
        assert_eq!(
            scaled_standard_circle(&center, Fraction::from_integer(4), 3),
            "(3x-6)^2 + (3y+3)^2 = 36"
        );
        let coefficients = GeneralCoefficients::from_circle(&center, Fraction::from_integer(4));
        assert_eq!(
            general_form(2, &coefficients.scaled(2)),
            "2x^2 + 2y^2 - 8x + 4y + 2 = 0"
        );
    }
}
