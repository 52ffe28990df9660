//! Random sampling for question generation.
//!
//! All draws go through the object-safe [`RandomSource`] trait so tests can
//! replay a fixed script ([`ScriptedSource`]) or a seeded generator
//! ([`RngSource::seeded`]) while production code uses the thread RNG.

pub mod draw;
pub mod retry;
pub mod source;

pub use draw::{
    random_bool, random_coefficient, random_decimal, random_decimal_exact, random_distinct,
    random_element, random_int, random_nonzero_int, shuffle,
};
pub use retry::{sample_or_fallback, sample_until, Attempted};
pub use source::{RandomSource, RngSource, ScriptedSource};
