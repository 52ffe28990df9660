//! LaTeX rendering for question content, answers and explanations.
//!
//! Every generator renders numbers through this crate so that the answer
//! string, the distractors and the explanation agree byte-for-byte.

pub mod equation;
pub mod latex;

pub use equation::{
    general_circle, general_form, scaled_standard_circle, shifted_square, standard_circle,
    GeneralCoefficients,
};
pub use latex::{
    block, coefficient_latex, decimal_latex, fraction_latex, inline, point_latex,
    radical_latex, raw_fraction_latex, signed_constant, signed_term, square_root_latex, text, FractionStyle,
};
