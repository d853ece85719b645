//! # closedform
//!
//! Recognize numbers: search for an arithmetic expression over named
//! constants and small integers whose value is closest to a target, with
//! physical dimensions checked throughout.
//!
//! ## Features
//!
//! - **Arbitrary Precision**: decimal magnitudes at any number of digits
//! - **Dimensioned Values**: SI units with prefixes, checked arithmetic
//! - **Memoized Expressions**: cached evaluation with explicit invalidation
//! - **Simplification**: identity and reciprocal rewrites to a fixed point
//! - **Parallel Search**: seeds explored with rayon, deterministic output
//!
//! ## Quick Start
//!
//! ```rust
//! use closedform::prelude::*;
//!
//! let precision = Precision::default();
//! let constants = ConstantSet::builtins(precision);
//! let target = DimValue::parse("1.61803398874989484820", precision).unwrap();
//!
//! let outcome = Search::new(&constants, &target, SearchConfig::new(1, 2))
//!     .run()
//!     .unwrap();
//! assert_eq!(outcome.best().unwrap().display, "phi");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use closedform_constants as constants;
pub use closedform_core as core;
pub use closedform_search as search;
pub use closedform_simplify as simplify;
pub use closedform_units as units;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use closedform_constants::{Builtin, ConstantSet};
    pub use closedform_core::{BinOp, Expr, NamedConstant};
    pub use closedform_search::{RankedResult, Search, SearchConfig, SearchOutcome};
    pub use closedform_simplify::Simplifier;
    pub use closedform_units::{DimValue, Dimension, Precision, Real};
}
