//! # closedform-simplify
//!
//! Greedy rewriting of closedform expressions to a redundancy-free form.
//!
//! This crate provides:
//! - Identity-elimination rules (`x + 0`, `x * 1`, `x / 1`, ...)
//! - Reciprocal flattening (`1 / (a / b)` becomes `b / a`)
//! - A fixed-point rewrite loop with statistics
//!
//! ## Matching by Value
//!
//! Rules compare the *evaluated* operands against the dimensionless numbers
//! zero and one, so `(2 - 2) + x` simplifies to `x` just like `0 + x` does.
//! Every rule strictly shrinks the tree, which bounds the number of rewrites
//! by the size of the input.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod rules;

#[cfg(test)]
mod proptests;

pub use engine::{SimplificationStats, Simplifier};
pub use rules::Rule;
