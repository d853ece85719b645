//! # closedform-core
//!
//! Expression trees for the closedform search engine.
//!
//! This crate provides:
//! - A closed expression type over literals, named constants and binary
//!   operators (`Expr`)
//! - Memoized evaluation to dimensioned values with a dirty flag
//! - Process-unique node identities (`NodeId`)
//! - A side index of parent links for invalidation (`ParentIndex`)
//!
//! ## Design Principles
//!
//! - **Single Owner**: every node owns its children; there are no parent pointers
//! - **Structural Equality**: `==` compares shape and leaves, never identities
//! - **Explicit Invalidation**: ancestors are found through a `ParentIndex`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod constant;
pub mod expr;
pub mod id;
pub mod parents;

pub use constant::NamedConstant;
pub use expr::{BinOp, Expr, ExprKind, NodeKind};
pub use id::NodeId;
pub use parents::ParentIndex;
