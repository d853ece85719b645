//! # closedform-constants
//!
//! Named constants for the closedform search engine.
//!
//! This crate provides:
//! - The built-in catalog: pi, e, the Euler–Mascheroni constant, ln 2,
//!   Catalan's constant, the golden ratio and the fine-structure constant,
//!   each computed to any precision (`Builtin`)
//! - Ordered, name-unique constant collections (`ConstantSet`)
//! - The `constants.conf` file format (`file::parse`, `file::load`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod error;
pub mod file;
pub mod set;

pub use builtin::{builtins, Builtin};
pub use error::{Error, Result};
pub use file::{load, parse, DEFAULT_CONSTANTS_FILE};
pub use set::ConstantSet;
