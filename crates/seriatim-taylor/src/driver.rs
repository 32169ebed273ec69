//! The expansion driver.
//!
//! Ties the pieces together: closed-form rules first, then the constant
//! short-circuit, then derivative-based expansion. Fallback output is only
//! re-entered after the containment check has passed, so the termination
//! argument ("never re-expand something that still carries its own input")
//! is enforced mechanically rather than by convention. A depth bound
//! backstops the re-entry in case refinement fails to reach a fixpoint.

use log::{debug, trace};

use seriatim_calculus::contains_var;
use seriatim_core::expr::ExprId;
use seriatim_core::ExprArena;

use crate::{expander, guard, maclaurin, ExpansionError, ExpansionSpec};

/// Bound on how many times the driver may re-enter itself on fallback
/// output before giving up.
const MAX_REEXPANSION_DEPTH: usize = 64;

/// Expands `e` as a truncated power series over the given stages.
///
/// Constants (expressions free of every stage variable) come back
/// unchanged. Results may be partially symbolic: coefficients the
/// differentiation operator could not resolve stay behind as
/// unresolved-derivative markers.
///
/// # Errors
///
/// - [`ExpansionError::InfiniteExpansionPoint`] if a stage expands about a
///   directed infinity
/// - [`ExpansionError::DivergentExpansion`] if the fallback reproduces the
///   input inside its own output, where re-expansion would never terminate
/// - [`ExpansionError::DepthLimitExceeded`] if refinement fails to
///   stabilize
pub fn expand(
    arena: &mut ExprArena,
    e: ExprId,
    specs: &[ExpansionSpec],
) -> Result<ExprId, ExpansionError> {
    expand_bounded(arena, e, specs, 0)
}

fn expand_bounded(
    arena: &mut ExprArena,
    e: ExprId,
    specs: &[ExpansionSpec],
    depth: usize,
) -> Result<ExprId, ExpansionError> {
    if specs.is_empty() {
        return Ok(e);
    }
    if depth > MAX_REEXPANSION_DEPTH {
        return Err(ExpansionError::DepthLimitExceeded {
            limit: MAX_REEXPANSION_DEPTH,
        });
    }

    if let Some(series) = maclaurin::known_series(arena, e, specs) {
        trace!("expand: closed-form rule applied");
        return Ok(series);
    }

    if specs.iter().all(|s| !contains_var(arena, e, s.variable)) {
        // constants contribute no series terms
        return Ok(e);
    }

    let candidate = expander::diff_expand(arena, e, specs)?;

    // The containment check runs before any re-entrant call, always.
    let offenders = guard::divergent_matches(arena, e, candidate);
    if !offenders.is_empty() {
        debug!(
            "expand: fallback output still contains its input in {} place(s)",
            offenders.len()
        );
        return Err(ExpansionError::DivergentExpansion { expr: e });
    }

    if candidate == e {
        // fixpoint: nothing left to refine
        return Ok(candidate);
    }

    trace!("expand: refining fallback output, round {depth}");
    expand_bounded(arena, candidate, specs, depth + 1)
}
