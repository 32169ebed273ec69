//! Derivative-based series expansion.
//!
//! The generic fallback: for the leading stage `(v, p, n)` it forms
//!
//! ```text
//! sum for k in 0..=n of  f_k(p)/k! * (v - p)^k
//! ```
//!
//! where `f_k` is the k-th derivative of the input, then re-expands each
//! coefficient `f_k(p)` in the remaining stages before assembling the term.
//!
//! Evaluating a derivative at the point can come back indeterminate (0/0
//! and friends). That case is deliberately not an error: the term keeps the
//! underived expression, still written in `v`, as its coefficient. The
//! result can then mention `v` where a constant was expected; the driver's
//! containment check decides whether such a residual is acceptable.

use log::trace;

use seriatim_calculus::{derivative, norm, substitute};
use seriatim_core::expr::ExprId;
use seriatim_core::ExprArena;

use crate::singular::check_points;
use crate::{ExpansionError, ExpansionSpec};

/// Expands `e` as a truncated power series over the given stages, leftmost
/// stage first.
///
/// The input is never mutated; the result is a freshly interned tree.
/// An empty stage list returns `e` unchanged.
///
/// # Errors
///
/// Returns [`ExpansionError::InfiniteExpansionPoint`] if any stage expands
/// about a directed infinity. Indeterminate coefficient evaluations are not
/// errors; see the module docs.
pub fn diff_expand(
    arena: &mut ExprArena,
    e: ExprId,
    specs: &[ExpansionSpec],
) -> Result<ExprId, ExpansionError> {
    check_points(arena, specs)?;
    expand_stages(arena, e, specs)
}

fn expand_stages(
    arena: &mut ExprArena,
    e: ExprId,
    specs: &[ExpansionSpec],
) -> Result<ExprId, ExpansionError> {
    let Some((stage, rest)) = specs.split_first() else {
        return Ok(e);
    };
    let v = stage.variable;
    let neg_p = norm::neg(arena, stage.point);
    let offset = norm::add(arena, [v, neg_p]);

    let mut terms = Vec::with_capacity(stage.order as usize + 1);
    let mut deriv = e;
    for k in 0..=stage.order {
        if k > 0 {
            deriv = derivative(arena, deriv, v);
        }
        let at_point = substitute(arena, deriv, v, stage.point);
        let term = if arena.get(at_point).is_indeterminate() {
            trace!("diff_expand: order-{k} coefficient is indeterminate, keeping residual");
            residual_term(arena, deriv, offset, k)
        } else {
            let coeff = expand_stages(arena, at_point, rest)?;
            scaled_term(arena, coeff, offset, k)
        };
        if !arena.get(term).is_zero() {
            terms.push(term);
        }
    }
    Ok(norm::add(arena, terms))
}

/// Assembles `coeff/k! * offset^k` through the normalizing constructors.
fn scaled_term(arena: &mut ExprArena, coeff: ExprId, offset: ExprId, k: u32) -> ExprId {
    let scaled = if k >= 2 {
        let fact = arena.integer(factorial(k));
        norm::div(arena, coeff, fact)
    } else {
        coeff
    };
    let k_expr = arena.integer(i64::from(k));
    let offset_pow = norm::pow(arena, offset, k_expr);
    norm::mul(arena, [scaled, offset_pow])
}

/// Assembles the residual term for an indeterminate coefficient.
///
/// Interned raw, bypassing normalization: the `(v-p)^k` scaffolding must
/// stay visible so a containment search over the result can still see the
/// underived expression as a direct subterm.
fn residual_term(arena: &mut ExprArena, deriv: ExprId, offset: ExprId, k: u32) -> ExprId {
    let coeff = if k >= 2 {
        let fact = arena.integer(factorial(k));
        arena.div(deriv, fact)
    } else {
        deriv
    };
    let k_expr = arena.integer(i64::from(k));
    let offset_pow = arena.pow(offset, k_expr);
    arena.mul(smallvec::smallvec![coeff, offset_pow])
}

/// Exact k! in the 64-bit numeric kernel.
pub(crate) fn factorial(k: u32) -> i64 {
    assert!(k <= 20, "factorial overflows the 64-bit numeric kernel");
    (1..=i64::from(k)).product()
}
