//! Circle model shared by the circle families: equation rendering in every
//! form the questions use, the catalogue of wrong equations students write,
//! and the explanation steps that turn a center and radius into an equation.

use mcq_formatter::{
    coefficient_latex, fraction_latex, general_form, inline, point_latex, scaled_standard_circle,
    shifted_square, signed_constant, signed_term, square_root_latex, standard_circle, text, FractionStyle,
    GeneralCoefficients,
};
use mcq_math::{Fraction, Point};
use mcq_sampling::{random_bool, random_int, random_nonzero_int, RandomSource};

use crate::distractor::Candidate;
use crate::explanation::Explanation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationForm {
    /// `(x-h)^2 + (y-k)^2 = r^2`
    Standard,
    /// Standard form with both brackets multiplied through by the factor.
    ScaledStandard(i64),
    /// `x^2 + y^2 + Dx + Ey + F = 0`
    General,
    /// General form with every term multiplied by the factor.
    ScaledGeneral(i64),
}

impl EquationForm {
    pub fn is_general(self) -> bool {
        matches!(self, EquationForm::General | EquationForm::ScaledGeneral(_))
    }

    pub fn name(self) -> &'static str {
        if self.is_general() {
            "general form"
        } else {
            "standard form"
        }
    }

    pub fn scale(self) -> i64 {
        match self {
            EquationForm::ScaledStandard(a) | EquationForm::ScaledGeneral(a) => a,
            _ => 1,
        }
    }
}

/// A circle by center and squared radius. `radius_sq` is kept reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center: Point,
    pub radius_sq: Fraction,
}

impl Circle {
    pub fn new(center: Point, radius_sq: Fraction) -> Self {
        Self {
            center,
            radius_sq: radius_sq.simplify(),
        }
    }

    pub fn with_radius(center: Point, radius: i64) -> Self {
        Self::new(center, Fraction::from_integer(radius * radius))
    }

    /// The circle centered at `center` passing through `point`.
    pub fn through(center: Point, point: &Point) -> Self {
        Self::new(center, center.squared_distance(point))
    }

    pub fn radius_latex(&self) -> String {
        square_root_latex(self.radius_sq)
    }

    pub fn coefficients(&self) -> GeneralCoefficients {
        GeneralCoefficients::from_circle(&self.center, self.radius_sq)
    }

    pub fn equation(&self, form: EquationForm) -> String {
        match form {
            EquationForm::Standard => standard_circle(&self.center, self.radius_sq),
            EquationForm::ScaledStandard(a) => scaled_standard_circle(&self.center, self.radius_sq, a),
            EquationForm::General => general_form(1, &self.coefficients()),
            EquationForm::ScaledGeneral(a) => general_form(a, &self.coefficients().scaled(a)),
        }
    }

    /// Same center and radius, compared by value.
    pub fn same_as(&self, other: &Circle) -> bool {
        self.center.x.value_eq(&other.center.x)
            && self.center.y.value_eq(&other.center.y)
            && self.radius_sq.value_eq(&other.radius_sq)
    }

    /// `(2, 3)` or `(\frac{5}{2}, -1)`.
    pub fn center_latex(&self) -> String {
        point_latex(&self.center)
    }

    pub fn with_center(&self, center: Point) -> Circle {
        Circle::new(center, self.radius_sq)
    }

    pub fn with_radius_sq(&self, radius_sq: Fraction) -> Circle {
        Circle::new(self.center, radius_sq)
    }
}

/// Equation answer wrapped for display.
pub fn equation_answer(circle: &Circle, form: EquationForm) -> String {
    inline(&circle.equation(form))
}

/// `\(\text{Center } (2, 3),\ r = 5\)`
pub fn center_radius_answer(center: &Point, radius_latex: &str) -> String {
    inline(&format!(
        "{} {},\\ r = {radius_latex}",
        text("Center "),
        point_latex(center)
    ))
}

/// An equation of `wrong`, unless it is the correct circle again or has no
/// positive radius.
pub fn wrong_circle(correct: &Circle, wrong: Circle, form: EquationForm) -> Option<Candidate> {
    if wrong.same_as(correct) || wrong.radius_sq.is_negative() || wrong.radius_sq.is_zero() {
        return None;
    }
    Some(Candidate::text(equation_answer(&wrong, form)))
}

/// Mistakes made when writing a circle equation from its center and
/// radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationSlip {
    /// `(x+h)^2` for a center at `x = h`.
    CenterXSignFlipped,
    CenterYSignFlipped,
    CenterSignFlipped,
    /// `= r` on the right-hand side instead of `= r^2`.
    RadiusNotSquared,
    /// `(x-r)^2 + (y-r)^2 = h^2 + k^2`.
    CenterRadiusConfused,
    /// The diameter used as the radius.
    DiameterAsRadius,
    /// `D = 2h` instead of `-2h`.
    GeneralXSignFlipped,
    /// `D = -h`, `E = -k`.
    ForgotToDouble,
    /// `F = h^2 + k^2 + r^2`.
    ConstantAddsRadius,
}

impl EquationSlip {
    pub const STANDARD: [EquationSlip; 4] = [
        EquationSlip::RadiusNotSquared,
        EquationSlip::CenterSignFlipped,
        EquationSlip::CenterRadiusConfused,
        EquationSlip::CenterXSignFlipped,
    ];

    pub const GENERAL: [EquationSlip; 4] = [
        EquationSlip::GeneralXSignFlipped,
        EquationSlip::ForgotToDouble,
        EquationSlip::ConstantAddsRadius,
        EquationSlip::CenterSignFlipped,
    ];

    /// The wrong equation this slip produces, rendered in `form`.
    pub fn apply(self, circle: &Circle, form: EquationForm) -> Option<Candidate> {
        let Circle { center, radius_sq } = *circle;
        match self {
            EquationSlip::CenterXSignFlipped => {
                wrong_circle(circle, circle.with_center(center.reflect(true, false)), form)
            }
            EquationSlip::CenterYSignFlipped => {
                wrong_circle(circle, circle.with_center(center.reflect(false, true)), form)
            }
            EquationSlip::CenterSignFlipped => {
                wrong_circle(circle, circle.with_center(center.reflect(true, true)), form)
            }
            EquationSlip::DiameterAsRadius => wrong_circle(
                circle,
                circle.with_radius_sq(radius_sq * Fraction::from_integer(4)),
                form,
            ),
            EquationSlip::RadiusNotSquared => {
                if form.is_general() {
                    return None;
                }
                Some(Candidate::text(inline(&format!(
                    "{} + {} = {}",
                    shifted_square("x", center.x),
                    shifted_square("y", center.y),
                    circle.radius_latex()
                ))))
            }
            EquationSlip::CenterRadiusConfused => {
                let r = radius_sq.simplify();
                let root = mcq_math::isqrt_exact(r.numer()).filter(|_| r.denom() == 1)?;
                let swapped = Circle::new(
                    Point::lattice(root, root),
                    (center.x * center.x + center.y * center.y).simplify(),
                );
                wrong_circle(circle, swapped, form)
            }
            EquationSlip::GeneralXSignFlipped
            | EquationSlip::ForgotToDouble
            | EquationSlip::ConstantAddsRadius => {
                if !form.is_general() {
                    return None;
                }
                let mut coefficients = circle.coefficients();
                match self {
                    EquationSlip::GeneralXSignFlipped => coefficients.d = -coefficients.d,
                    EquationSlip::ForgotToDouble => {
                        coefficients.d = -center.x;
                        coefficients.e = -center.y;
                    }
                    _ => {
                        coefficients.f =
                            (center.x * center.x + center.y * center.y + radius_sq).simplify()
                    }
                }
                let a = form.scale();
                Some(Candidate::text(inline(&general_form(a, &coefficients.scaled(a)))))
            }
        }
    }
}

/// A nearby wrong circle: the center nudged by up to three units, or the
/// squared radius changed by a small amount.
pub fn perturbed_circle(src: &mut dyn RandomSource, circle: &Circle) -> Circle {
    match random_int(src, 0, 2) {
        0 => circle.with_center(circle.center.translate(random_nonzero_int(src, -3, 3), 0)),
        1 => circle.with_center(circle.center.translate(0, random_nonzero_int(src, -3, 3))),
        _ => {
            let delta = Fraction::from_integer(random_nonzero_int(src, -5, 5));
            circle.with_radius_sq(circle.radius_sq + delta)
        }
    }
}

/// Deterministic completion: the squared radius increased by `k`.
pub fn radius_step(circle: &Circle, k: i64) -> Circle {
    circle.with_radius_sq(circle.radius_sq + Fraction::from_integer(k))
}

/// Standard or general form with equal odds.
pub fn either_form(src: &mut dyn RandomSource) -> EquationForm {
    if random_bool(src, 0.5) {
        EquationForm::Standard
    } else {
        EquationForm::General
    }
}

/// Wrap negative values in brackets for substitution: `(-3)`.
pub fn bracketed(value: Fraction) -> String {
    let latex = fraction_latex(value, FractionStyle::Improper);
    if value.is_negative() {
        format!("({latex})")
    } else {
        latex
    }
}

/// `(5 - 2)^2 + (7 - 3)^2 = 9 + 16 = 25`
pub fn squared_distance_working(from: &Point, to: &Point) -> String {
    let dx = (to.x - from.x).simplify();
    let dy = (to.y - from.y).simplify();
    format!(
        "({} - {})^2 + ({} - {})^2 = {} + {} = {}",
        bracketed(to.x),
        bracketed(from.x),
        bracketed(to.y),
        bracketed(from.y),
        fraction_latex(dx * dx, FractionStyle::Improper),
        fraction_latex(dy * dy, FractionStyle::Improper),
        fraction_latex(from.squared_distance(to), FractionStyle::Improper)
    )
}

/// `r = \sqrt{20} = 2\sqrt{5}`, or `r = \sqrt{7}` when nothing simplifies.
pub fn radius_working(radius_sq: Fraction) -> String {
    let under = fraction_latex(radius_sq, FractionStyle::Improper);
    let root = square_root_latex(radius_sq);
    if root == format!("\\sqrt{{{under}}}") {
        format!("r = {root}")
    } else {
        format!("r = \\sqrt{{{under}}} = {root}")
    }
}

/// `x^2 - 4x + 4`
fn expanded_square(var: &str, shift: Fraction) -> String {
    format!(
        "{var}^2{}{}",
        signed_term((Fraction::from_integer(-2) * shift).simplify(), var),
        signed_constant((shift * shift).simplify())
    )
}

/// Substitute into the standard form and, for a general-form answer,
/// expand and collect.
pub fn explain_equation(e: &mut Explanation, circle: &Circle, form: EquationForm) {
    let (h, k) = (circle.center.x, circle.center.y);
    e.step_math(
        format!(
            "Substitute \\(h = {}\\), \\(k = {}\\) and \\(r^2 = {}\\) into \\((x-h)^2 + (y-k)^2 = r^2\\)",
            fraction_latex(h, FractionStyle::Improper),
            fraction_latex(k, FractionStyle::Improper),
            fraction_latex(circle.radius_sq, FractionStyle::Improper)
        ),
        circle.equation(EquationForm::Standard),
    );
    if form.is_general() {
        e.step_lines(
            "Expand the brackets and move every term to the left-hand side",
            vec![
                format!(
                    "{} + {} = {}",
                    expanded_square("x", h),
                    expanded_square("y", k),
                    fraction_latex(circle.radius_sq, FractionStyle::Improper)
                ),
                circle.equation(EquationForm::General),
            ],
        );
        if form.scale() != 1 {
            e.step_math(
                format!("Multiply every term by {}", form.scale()),
                circle.equation(form),
            );
        }
    }
}

/// `2h + 6k = 22`, skipping a zero coefficient.
pub fn linear_equation(a: Fraction, b: Fraction, c: Fraction) -> String {
    let lhs = match (a.is_zero(), b.is_zero()) {
        (true, _) => coefficient_latex(b, "k"),
        (false, true) => coefficient_latex(a, "h"),
        (false, false) => format!("{}{}", coefficient_latex(a, "h"), signed_term(b, "k")),
    };
    format!("{lhs} = {}", fraction_latex(c, FractionStyle::Improper))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Circle {
        Circle::with_radius(Point::lattice(2, 3), 5)
    }

    #[test]
    fn renders_every_form() {
        let c = sample();
        assert_eq!(c.equation(EquationForm::Standard), "(x-2)^2 + (y-3)^2 = 25");
        assert_eq!(c.equation(EquationForm::General), "x^2 + y^2 - 4x - 6y - 12 = 0");
        assert_eq!(
            c.equation(EquationForm::ScaledStandard(2)),
            "(2x-4)^2 + (2y-6)^2 = 100"
        );
        assert_eq!(
            c.equation(EquationForm::ScaledGeneral(3)),
            "3x^2 + 3y^2 - 12x - 18y - 36 = 0"
        );
    }

    #[test]
    fn standard_slips() {
        let c = sample();
        let render = |slip: EquationSlip| slip.apply(&c, EquationForm::Standard).map(|w| w.rendered);
        assert_eq!(
            render(EquationSlip::RadiusNotSquared).as_deref(),
            Some("\\((x-2)^2 + (y-3)^2 = 5\\)")
        );
        assert_eq!(
            render(EquationSlip::CenterSignFlipped).as_deref(),
            Some("\\((x+2)^2 + (y+3)^2 = 25\\)")
        );
        assert_eq!(
            render(EquationSlip::CenterRadiusConfused).as_deref(),
            Some("\\((x-5)^2 + (y-5)^2 = 13\\)")
        );
        assert_eq!(render(EquationSlip::ForgotToDouble), None);
    }

    #[test]
    fn general_slips() {
        let c = sample();
        let render = |slip: EquationSlip| slip.apply(&c, EquationForm::General).map(|w| w.rendered);
        assert_eq!(
            render(EquationSlip::GeneralXSignFlipped).as_deref(),
            Some("\\(x^2 + y^2 + 4x - 6y - 12 = 0\\)")
        );
        assert_eq!(
            render(EquationSlip::ForgotToDouble).as_deref(),
            Some("\\(x^2 + y^2 - 2x - 3y - 12 = 0\\)")
        );
        assert_eq!(
            render(EquationSlip::ConstantAddsRadius).as_deref(),
            Some("\\(x^2 + y^2 - 4x - 6y + 38 = 0\\)")
        );
        assert_eq!(render(EquationSlip::RadiusNotSquared), None);
    }

    #[test]
    fn a_slip_that_changes_nothing_is_dropped() {
        let c = Circle::with_radius(Point::lattice(0, 4), 3);
        assert!(EquationSlip::CenterXSignFlipped
            .apply(&c, EquationForm::General)
            .is_none());
    }

    #[test]
    fn answers_and_working() {
        assert_eq!(
            center_radius_answer(&Point::lattice(2, -3), "2\\sqrt{5}"),
            "\\(\\text{Center } (2, -3),\\ r = 2\\sqrt{5}\\)"
        );
        assert_eq!(
            squared_distance_working(&Point::lattice(2, 3), &Point::lattice(5, 7)),
            "(5 - 2)^2 + (7 - 3)^2 = 9 + 16 = 25"
        );
        assert_eq!(radius_working(Fraction::from_integer(25)), "r = \\sqrt{25} = 5");
        assert_eq!(radius_working(Fraction::from_integer(7)), "r = \\sqrt{7}");
        assert_eq!(
            linear_equation(
                Fraction::from_integer(16),
                Fraction::ZERO,
                Fraction::from_integer(64)
            ),
            "16h = 64"
        );
    }

    #[test]
    fn general_explanation_expands_both_brackets() {
        let mut e = Explanation::new();
        explain_equation(&mut e, &sample(), EquationForm::General);
        let rendered = e.render();
        assert!(rendered.contains("x^2 - 4x + 4 + y^2 - 6y + 9 = 25"));
        assert!(rendered.contains("x^2 + y^2 - 4x - 6y - 12 = 0"));
    }
}
