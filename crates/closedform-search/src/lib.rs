//! # closedform-search
//!
//! Search for closed-form expressions approximating a dimensioned target.
//!
//! This crate provides:
//! - Depth-bounded candidate generation from constants and small integers
//!   (`Generator`)
//! - Deduplication by error and top-K ranking (`Selector`)
//! - A parallel driver with deterministic output (`Search`)
//!
//! # Example
//!
//! ```
//! use closedform_constants::ConstantSet;
//! use closedform_core::NamedConstant;
//! use closedform_search::{Search, SearchConfig};
//! use closedform_units::{DimValue, Precision};
//!
//! let pi = DimValue::parse("3.14159265358979323846", Precision::default()).unwrap();
//! let constants = ConstantSet::from_constants([NamedConstant::new("pi", pi)]).unwrap();
//! let target = DimValue::parse("6.2832", Precision::default()).unwrap();
//!
//! let outcome = Search::new(&constants, &target, SearchConfig::new(1, 2))
//!     .run()
//!     .unwrap();
//! assert_eq!(outcome.best().unwrap().display, "(pi * 2)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod generator;
pub mod search;
pub mod selector;

#[cfg(test)]
mod proptests;

pub use config::{SearchConfig, DEFAULT_TOP};
pub use error::{Result, SearchError};
pub use generator::{Generator, GeneratorStats};
pub use search::{RankedResult, Search, SearchOutcome};
pub use selector::{ResultSink, SearchResult, Selector};
