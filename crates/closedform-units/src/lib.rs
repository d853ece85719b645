//! # closedform-units
//!
//! Arbitrary precision dimensioned values for closedform.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision decimal reals (`Real`) with explicit `Precision`
//! - Physical dimensions over the seven SI base quantities (`Dimension`)
//! - Dimension-checked arithmetic (`DimValue`)
//! - Parsing and formatting of values with SI units (`9.109e-31 kg`)
//!
//! ## Precision
//!
//! Every constructor takes a [`Precision`]. Magnitudes carry
//! `digits + Precision::GUARD_DIGITS` significant decimal digits, and
//! arithmetic keeps the precision of its operands.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dimension;
pub mod error;
pub mod precision;
pub mod real;
pub mod unit;
pub mod value;

#[cfg(test)]
mod proptests;

pub use dimension::{BaseQuantity, Dimension};
pub use error::{Error, Result};
pub use precision::Precision;
pub use real::Real;
pub use unit::{parse_unit, ScaledUnit};
pub use value::DimValue;
