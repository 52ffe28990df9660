use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Fraction denominator must be non-zero")]
    ZeroDenominator,
    #[error("Division by a zero fraction")]
    DivisionByZero,
    #[error("Integer overflow in {0}")]
    Overflow(&'static str),
}
