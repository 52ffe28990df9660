//! Math-markup primitives.
//!
//! Negative values put the sign outside the fraction (`-\frac{1}{2}`), and
//! integers never render as `\frac{n}{1}`.

use mcq_math::{gcd, simplify_radical, Fraction, Point, Radical};
use serde::{Deserialize, Serialize};

/// How a non-integer value above one is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionStyle {
    /// `\frac{7}{3}`
    Improper,
    /// `2\frac{1}{3}`
    #[default]
    Mixed,
}

/// Inline math delimiters: `\(...\)`.
pub fn inline(body: &str) -> String {
    format!("\\({body}\\)")
}

/// Display math delimiters: `\[...\]`.
pub fn block(body: &str) -> String {
    format!("\\[{body}\\]")
}

pub fn text(body: &str) -> String {
    format!("\\text{{{body}}}")
}

/// Render a value in lowest terms.
pub fn fraction_latex(value: Fraction, style: FractionStyle) -> String {
    let reduced = value.simplify();
    if reduced.denom() == 1 {
        return reduced.numer().to_string();
    }
    let sign = if reduced.is_negative() { "-" } else { "" };
    match style {
        FractionStyle::Mixed if !reduced.is_proper() => {
            let parts = reduced.to_mixed();
            format!(
                "{sign}{}\\frac{{{}}}{{{}}}",
                parts.whole, parts.numer, parts.denom
            )
        }
        _ => format!(
            "{sign}\\frac{{{}}}{{{}}}",
            reduced.numer().abs(),
            reduced.denom()
        ),
    }
}

/// Render an intermediate value exactly as stored, without reducing.
pub fn raw_fraction_latex(value: Fraction) -> String {
    if value.denom() == 1 {
        return value.numer().to_string();
    }
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}\\frac{{{}}}{{{}}}", value.numer().abs(), value.denom())
}

/// `5`, `\sqrt{7}`, `2\sqrt{5}`.
pub fn radical_latex(r: Radical) -> String {
    match (r.coefficient, r.radicand) {
        (c, 1) => c.to_string(),
        (1, n) => format!("\\sqrt{{{n}}}"),
        (c, n) => format!("{c}\\sqrt{{{n}}}"),
    }
}

/// Square root of a non-negative rational in simplest radical form:
/// `\frac{13}{4}` gives `\frac{\sqrt{13}}{2}`, `8` gives `2\sqrt{2}`.
///
/// # Panics
///
/// Panics on a negative value.
pub fn square_root_latex(value: Fraction) -> String {
    let reduced = value.simplify();
    assert!(
        !reduced.is_negative(),
        "square_root_latex: negative value {reduced}"
    );
    let (p, q) = (reduced.numer(), reduced.denom());
    let root = simplify_radical(p * q);
    if root.is_rational() {
        return fraction_latex(Fraction::new(root.coefficient, q), FractionStyle::Improper);
    }
    let g = gcd(root.coefficient, q);
    let numerator = radical_latex(Radical {
        coefficient: root.coefficient / g,
        radicand: root.radicand,
    });
    match q / g {
        1 => numerator,
        d => format!("\\frac{{{numerator}}}{{{d}}}"),
    }
}

/// Terminating decimal when the reduced denominator allows it
/// (`5/2` → `2.5`), otherwise an improper fraction.
pub fn decimal_latex(value: Fraction) -> String {
    let reduced = value.simplify();
    let denom = reduced.denom();
    let mut places = 0u32;
    let mut scale = 1i64;
    while scale % denom != 0 {
        if places == 12 {
            return fraction_latex(reduced, FractionStyle::Improper);
        }
        places += 1;
        scale *= 10;
    }
    let scaled = reduced.numer().abs() * (scale / denom);
    let sign = if reduced.is_negative() { "-" } else { "" };
    if places == 0 {
        return format!("{sign}{scaled}");
    }
    let int_part = scaled / scale;
    let frac_part = scaled % scale;
    format!(
        "{sign}{int_part}.{frac_part:0width$}",
        width = places as usize
    )
}

/// `x`, `-x`, `3x`, `\frac{1}{9}x^2`. An empty `var` renders the bare
/// coefficient.
pub fn coefficient_latex(coefficient: Fraction, var: &str) -> String {
    let c = coefficient.simplify();
    if var.is_empty() {
        return fraction_latex(c, FractionStyle::Improper);
    }
    if c.numer() == c.denom() {
        return var.to_string();
    }
    if c.numer() == -c.denom() {
        return format!("-{var}");
    }
    format!("{}{var}", fraction_latex(c, FractionStyle::Improper))
}

/// ` + 4x` / ` - 6y`; zero coefficients render nothing.
pub fn signed_term(coefficient: Fraction, var: &str) -> String {
    if coefficient.is_zero() {
        return String::new();
    }
    if coefficient.is_negative() {
        format!(" - {}", coefficient_latex(-coefficient, var))
    } else {
        format!(" + {}", coefficient_latex(coefficient, var))
    }
}

/// ` + 12` / ` - 12`; zero renders nothing.
pub fn signed_constant(value: Fraction) -> String {
    signed_term(value, "")
}

/// `(3, -4)` with coordinates as improper fractions.
pub fn point_latex(p: &Point) -> String {
    format!(
        "({}, {})",
        fraction_latex(p.x, FractionStyle::Improper),
        fraction_latex(p.y, FractionStyle::Improper)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_math::simplify_radical;

    fn f(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d)
    }

    #[test]
    fn fractions_render_reduced_with_sign_outside() {
        assert_eq!(fraction_latex(f(8, 12), FractionStyle::Mixed), "\\frac{2}{3}");
        assert_eq!(fraction_latex(f(-1, 2), FractionStyle::Mixed), "-\\frac{1}{2}");
        assert_eq!(fraction_latex(f(1, -2), FractionStyle::Improper), "-\\frac{1}{2}");
        assert_eq!(fraction_latex(f(12, 4), FractionStyle::Mixed), "3");
        assert_eq!(fraction_latex(f(0, 7), FractionStyle::Mixed), "0");
    }

    #[test]
    fn mixed_style_only_affects_improper_values() {
        assert_eq!(fraction_latex(f(7, 3), FractionStyle::Mixed), "2\\frac{1}{3}");
        assert_eq!(fraction_latex(f(-7, 3), FractionStyle::Mixed), "-2\\frac{1}{3}");
        assert_eq!(fraction_latex(f(7, 3), FractionStyle::Improper), "\\frac{7}{3}");
        assert_eq!(fraction_latex(f(14, 6), FractionStyle::Mixed), "2\\frac{1}{3}");
    }

    #[test]
    fn raw_fractions_keep_intermediate_form() {
        assert_eq!(raw_fraction_latex(f(8, 12)), "\\frac{8}{12}");
        assert_eq!(raw_fraction_latex(f(-3, 4)), "-\\frac{3}{4}");
        assert_eq!(raw_fraction_latex(f(9, 1)), "9");
    }

    #[test]
    fn delimiters_are_exact() {
        assert_eq!(inline("\\frac{7}{12}"), "\\(\\frac{7}{12}\\)");
        assert_eq!(block("x = 1"), "\\[x = 1\\]");
        assert_eq!(text("undefined"), "\\text{undefined}");
    }

    #[test]
    fn radicals() {
        assert_eq!(radical_latex(simplify_radical(25)), "5");
        assert_eq!(radical_latex(simplify_radical(7)), "\\sqrt{7}");
        assert_eq!(radical_latex(simplify_radical(20)), "2\\sqrt{5}");
    }

    #[test]
    fn square_roots_of_rationals() {
        assert_eq!(square_root_latex(f(25, 1)), "5");
        assert_eq!(square_root_latex(f(8, 1)), "2\\sqrt{2}");
        assert_eq!(square_root_latex(f(13, 4)), "\\frac{\\sqrt{13}}{2}");
        assert_eq!(square_root_latex(f(9, 4)), "\\frac{3}{2}");
        assert_eq!(square_root_latex(f(1, 2)), "\\frac{\\sqrt{2}}{2}");
    }

    #[test]
    fn decimals_render_when_terminating() {
        assert_eq!(decimal_latex(f(5, 2)), "2.5");
        assert_eq!(decimal_latex(f(-1, 4)), "-0.25");
        assert_eq!(decimal_latex(f(30, 10)), "3");
        assert_eq!(decimal_latex(f(3, 100)), "0.03");
        assert_eq!(decimal_latex(f(1, 3)), "\\frac{1}{3}");
    }

    #[test]
    fn terms_omit_units_and_zeros() {
        assert_eq!(coefficient_latex(f(1, 1), "x"), "x");
        assert_eq!(coefficient_latex(f(-1, 1), "x"), "-x");
        assert_eq!(coefficient_latex(f(3, 1), "xy"), "3xy");
        assert_eq!(coefficient_latex(f(1, 9), "x^2"), "\\frac{1}{9}x^2");
        assert_eq!(signed_term(f(-6, 1), "y"), " - 6y");
        assert_eq!(signed_term(f(4, 1), "x"), " + 4x");
        assert_eq!(signed_term(Fraction::ZERO, "x"), "");
        assert_eq!(signed_constant(f(-12, 1)), " - 12");
    }

    #[test]
    fn points() {
        assert_eq!(point_latex(&Point::lattice(3, -4)), "(3, -4)");
        assert_eq!(
            point_latex(&Point::new(f(5, 2), Fraction::ZERO)),
            "(\\frac{5}{2}, 0)"
        );
    }
}
