//! Error types for dimensioned arithmetic and unit parsing.

use thiserror::Error;

use crate::dimension::Dimension;

/// Result alias for dimensioned value operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by dimensioned arithmetic and by unit text parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Addition or subtraction of values with different dimensions.
    #[error("dimension mismatch: '{left}' vs '{right}'")]
    DimensionMismatch {
        /// Dimension of the left operand.
        left: Dimension,
        /// Dimension of the right operand.
        right: Dimension,
    },

    /// An exponent carrying a physical dimension.
    #[error("exponent must be dimensionless, found '{0}'")]
    NonDimensionlessExponent(Dimension),

    /// A non-integer power of a dimensioned base.
    #[error("non-integer exponent on dimensioned base '{0}'")]
    FractionalExponentOnDimensionedBase(Dimension),

    /// A non-integer power of a negative base.
    #[error("non-integer exponent on negative base")]
    FractionalExponentOnNegativeBase,

    /// Division by zero, or zero raised to a negative power.
    #[error("division by zero")]
    DivisionByZero,

    /// A dimension exponent or the order of a power left the supported range.
    #[error("exponent out of range")]
    ExponentOutOfRange,

    /// Text that is not a decimal numeral.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// A unit symbol that is neither known nor a prefixed known unit.
    #[error("unknown unit symbol '{0}'")]
    UnknownUnit(String),

    /// Malformed unit expression.
    #[error("invalid unit syntax at byte {pos}: {message}")]
    Syntax {
        /// Byte offset in the input.
        pos: usize,
        /// What went wrong.
        message: &'static str,
    },
}
