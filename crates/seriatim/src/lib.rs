//! # Seriatim
//!
//! A symbolic Taylor-series expansion engine.
//!
//! Seriatim turns a symbolic expression and a list of
//! (variable, point, order) stages into a truncated power series by
//! repeated differentiation and evaluation at the expansion point, with
//! closed-form rules for the elementary functions and a structural
//! safeguard against expansions that would never terminate.
//!
//! ## Quick Start
//!
//! ```rust
//! use seriatim::prelude::*;
//!
//! let mut arena = ExprArena::new();
//! let x = arena.symbol("x");
//! let zero = arena.integer(0);
//! let sin_x = arena.func("sin", vec![x]);
//!
//! let series = expand(&mut arena, sin_x, &[ExpansionSpec::new(x, zero, 5)]).unwrap();
//! assert_eq!(render(&arena, series), "x - 1/6*x^3 + 1/120*x^5");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use seriatim_calculus as calculus;
pub use seriatim_core as core;
pub use seriatim_taylor as taylor;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use seriatim_calculus::{contains_var, derivative, derivative_n, substitute};
    pub use seriatim_core::{render, ExprArena, ExprId, ExprNode, Sign};
    pub use seriatim_taylor::{
        check_points, diff_expand, expand, search, ExpansionError, ExpansionSpec,
    };
}
