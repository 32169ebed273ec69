//! # seriatim-calculus
//!
//! Differentiation, substitution and normalization operators for the
//! Seriatim symbolic expansion kernel.
//!
//! This crate provides the operators the expansion engine composes:
//! - [`derivative`]/[`derivative_n`]: symbolic differentiation, leaving an
//!   unresolved-derivative marker where no closed-form rule applies
//! - [`substitute`]: substitution of a value for a variable, with exact
//!   numeric evaluation of the result
//! - [`contains_var`]: the free-occurrence test
//! - [`norm`]: the normalizing constructors all of the above build with
//!
//! Every operator takes the arena by `&mut` and returns freshly interned
//! trees; inputs are never mutated.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diff;
pub mod norm;
pub mod occurs;
pub mod subst;

pub use diff::{derivative, derivative_n};
pub use occurs::contains_var;
pub use subst::substitute;
