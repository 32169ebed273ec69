//! # seriatim-taylor
//!
//! Truncated Taylor-series expansion for the Seriatim symbolic kernel.
//!
//! The engine is built from four pieces, composed top-down:
//! - [`expand`]: the driver; recognizes closed-form series and constant
//!   subexpressions, and otherwise falls back to derivative-based expansion,
//!   vetting the result before re-entering itself
//! - [`diff_expand`]: the generic fallback; a finite sum of scaled
//!   derivative terms per variable, recursing over the remaining variables
//!   coefficient by coefficient
//! - [`search`]: the containment check that keeps the driver from
//!   re-expanding a result that still carries its own input
//! - [`check_points`]: rejection of infinite expansion points up front
//!
//! All computation is pure and synchronous; the only failure modes are the
//! variants of [`ExpansionError`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use seriatim_core::expr::ExprId;
use thiserror::Error;

pub mod driver;
pub mod expander;
pub mod guard;
pub mod maclaurin;
pub mod singular;

#[cfg(test)]
mod proptests;

pub use driver::expand;
pub use expander::diff_expand;
pub use guard::{search, search_with};
pub use singular::check_points;

/// One stage of a Taylor expansion: which variable to eliminate, the point
/// to center on, and the highest derivative order to keep.
///
/// A slice of these drives a multi-variable expansion; stages apply left to
/// right, outermost variable first. An order of zero means "evaluate at the
/// point only, no derivative terms".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionSpec {
    /// The variable being expanded away.
    pub variable: ExprId,
    /// The expansion point.
    pub point: ExprId,
    /// The truncation order (inclusive).
    pub order: u32,
}

impl ExpansionSpec {
    /// Creates an expansion stage.
    #[must_use]
    pub fn new(variable: ExprId, point: ExprId, order: u32) -> Self {
        Self {
            variable,
            point,
            order,
        }
    }
}

/// Errors that can occur during series expansion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExpansionError {
    /// An expansion point is a directed infinity. Expansion about infinity
    /// is rejected outright, never approximated.
    #[error("cannot expand about an infinite point")]
    InfiniteExpansionPoint {
        /// The offending point.
        point: ExprId,
    },

    /// The fallback expansion still contains the expression being expanded
    /// as a plain subterm, so re-expanding it would never terminate.
    #[error("expansion keeps reproducing its own input; series does not resolve")]
    DivergentExpansion {
        /// The expression whose expansion failed to resolve.
        expr: ExprId,
    },

    /// Re-expansion of the fallback output failed to reach a fixpoint
    /// within the driver's depth bound.
    #[error("expansion did not stabilize within {limit} rounds")]
    DepthLimitExceeded {
        /// The depth bound that was exceeded.
        limit: usize,
    },
}
