//! Substitution and evaluation.
//!
//! [`substitute`] replaces a variable by a value and rebuilds the tree
//! through the normalizing constructors, so the result comes back evaluated
//! as far as exact arithmetic allows. Division by zero along the way yields
//! the indeterminate numeral, never an error.
//!
//! Unresolved-derivative markers are opaque to substitution: the marker and
//! everything under it pass through untouched, keeping the residual
//! expressed in the original variable. Downstream consumers rely on that
//! imprecision (see the expansion engine's handling of residual terms).

use smallvec::SmallVec;

use seriatim_core::expr::{functions, ExprId, ExprNode, FunctionId};
use seriatim_core::ExprArena;

use crate::norm;

/// Substitutes `value` for the variable `v` throughout `e` and evaluates
/// the result.
pub fn substitute(arena: &mut ExprArena, e: ExprId, v: ExprId, value: ExprId) -> ExprId {
    if e == v {
        return value;
    }
    let node = arena.get(e).clone();
    match node {
        ExprNode::Integer(_)
        | ExprNode::Rational(_, _)
        | ExprNode::Symbol(_)
        | ExprNode::Infinity(_)
        | ExprNode::Undefined
        | ExprNode::Derivative { .. } => e,

        ExprNode::Add(args) => {
            let mapped: Vec<ExprId> = args
                .iter()
                .map(|&a| substitute(arena, a, v, value))
                .collect();
            norm::add(arena, mapped)
        }

        ExprNode::Mul(args) => {
            let mapped: Vec<ExprId> = args
                .iter()
                .map(|&a| substitute(arena, a, v, value))
                .collect();
            norm::mul(arena, mapped)
        }

        ExprNode::Neg(arg) => {
            let inner = substitute(arena, arg, v, value);
            norm::neg(arena, inner)
        }

        ExprNode::Div { num, den } => {
            let num = substitute(arena, num, v, value);
            let den = substitute(arena, den, v, value);
            norm::div(arena, num, den)
        }

        ExprNode::Pow { base, exp } => {
            let base = substitute(arena, base, v, value);
            let exp = substitute(arena, exp, v, value);
            norm::pow(arena, base, exp)
        }

        ExprNode::Function { id, args } => {
            let mapped: SmallVec<[ExprId; 2]> = args
                .iter()
                .map(|&a| substitute(arena, a, v, value))
                .collect();
            apply_function(arena, id, mapped)
        }
    }
}

/// Rebuilds a function application, evaluating the built-ins at the
/// numerals where they are exact.
fn apply_function(arena: &mut ExprArena, id: FunctionId, args: SmallVec<[ExprId; 2]>) -> ExprId {
    if args.iter().any(|&a| arena.get(a).is_indeterminate()) {
        return arena.undefined();
    }
    if let [arg] = args.as_slice() {
        let arg_node = arena.get(*arg).clone();
        match (id, &arg_node) {
            (functions::SIN | functions::TAN, ExprNode::Integer(0)) => return arena.integer(0),
            (functions::COS | functions::EXP, ExprNode::Integer(0)) => return arena.integer(1),
            (functions::LN, ExprNode::Integer(1)) => return arena.integer(0),
            (functions::SQRT, ExprNode::Integer(n @ (0 | 1))) => return arena.integer(*n),
            (functions::ABS, ExprNode::Integer(n)) => return arena.integer(n.abs()),
            (functions::ABS, ExprNode::Rational(n, d)) => {
                return arena.rational(n.abs(), *d as i64);
            }
            _ => {}
        }
    }
    arena.function(id, args)
}
