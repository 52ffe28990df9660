//! Exact arithmetic used by the question generators.
//!
//! Everything on the correctness path is integer or rational arithmetic:
//! [`Fraction`] keeps intermediate results unsimplified until the caller
//! asks for it, [`Radical`] handles square roots of integers, and
//! [`geometry`] solves the small lattice problems the circle families need.

pub mod error;
pub mod fraction;
pub mod geometry;
pub mod number_theory;
pub mod radical;

pub use error::MathError;
pub use fraction::{AddTrace, CommonDenominator, Fraction, MixedParts};
pub use geometry::{circumcenter, circumcenter_system, is_right_angle_at, LinearSystem2, Point};
pub use number_theory::{gcd, lcm, simplify};
pub use radical::{isqrt_exact, simplify_radical, Radical};
