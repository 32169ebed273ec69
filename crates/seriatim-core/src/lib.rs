//! # seriatim-core
//!
//! Core expression engine for the Seriatim symbolic expansion kernel.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Type-safe expression handles
//! - O(1) structural equality via interning
//! - An infix renderer for diagnostics and tests
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: Every structurally unique expression is stored exactly
//!   once, so comparing two handles compares the trees they denote.
//! - **Immutability**: Nodes are never modified after interning; every
//!   operation that "changes" an expression interns a fresh tree.
//! - **Zero-Cost Handles**: 32-bit indices instead of pointers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod expr;
pub mod render;

pub use arena::ExprArena;
pub use expr::{ExprId, ExprNode, FunctionId, Sign, SymbolId};
pub use render::render;
